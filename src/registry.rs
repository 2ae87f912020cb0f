//! Builtin registry
//!
//! Folds validated signatures into:
//!
//! - a flat [`FunctionTable`] in scan order, where each function gets `id = first_id + position`, and
//! - per-object [`ObjectTable`]s holding `(method, id)` pairs, keyed by object key in first-seen order.
//!
//! The flat table is the single source of truth for flags, argument count and dispatcher; per-object tables are only
//! name → ID lookups. Plain and `_prototype` keys of the same class are separate tables, and repeated method names
//! under one key are kept as separate entries.

use std::collections::HashMap;

use crate::signature::Signature;

/// One `(method, id)` pair in an object table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoEntry {
    pub method: String,
    pub id: u32,
}

/// Methods registered under one object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectTable {
    pub key: String,
    pub entries: Vec<ProtoEntry>,
}

/// A signature with its assigned ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinFunction {
    pub id: u32,
    pub signature: Signature,
}

/// Flat, contiguous table of every builtin function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionTable {
    first_id: u32,
    functions: Vec<BuiltinFunction>,
}

impl FunctionTable {
    pub fn first_id(&self) -> u32 {
        self.first_id
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuiltinFunction> {
        self.functions.iter()
    }

    /// Look up a function by ID.
    pub fn get(&self, id: u32) -> Option<&BuiltinFunction> {
        let idx = id.checked_sub(self.first_id)?;
        self.functions.get(usize::try_from(idx).ok()?)
    }

    /// Largest parameter count (0 for an empty table).
    pub fn max_params(&self) -> usize {
        self.functions
            .iter()
            .map(|f| f.signature.param_count())
            .max()
            .unwrap_or(0)
    }
}

/// Finished registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    objects: Vec<ObjectTable>,
    functions: FunctionTable,
}

impl Registry {
    /// Object tables in first-seen order.
    pub fn objects(&self) -> &[ObjectTable] {
        &self.objects
    }

    pub fn object(&self, key: &str) -> Option<&ObjectTable> {
        self.objects.iter().find(|o| o.key == key)
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }
}

/// Accumulates signatures in scan order.
#[derive(Debug)]
pub struct RegistryBuilder {
    first_id: u32,
    objects: Vec<ObjectTable>,
    index: HashMap<String, usize>,
    functions: Vec<BuiltinFunction>,
}

impl RegistryBuilder {
    pub fn new(first_id: u32) -> Self {
        Self {
            first_id,
            objects: Vec::new(),
            index: HashMap::new(),
            functions: Vec::new(),
        }
    }

    /// Register a signature and return its ID.
    ///
    /// Returns `None`, registering nothing, when the ID would not fit in a `u32`.
    pub fn register(&mut self, signature: Signature) -> Option<u32> {
        let id = self.next_id()?;
        let slot = match self.index.get(&signature.object_key) {
            Some(&slot) => slot,
            None => {
                self.objects.push(ObjectTable {
                    key: signature.object_key.clone(),
                    entries: Vec::new(),
                });
                self.index.insert(signature.object_key.clone(), self.objects.len() - 1);
                self.objects.len() - 1
            }
        };
        self.objects[slot].entries.push(ProtoEntry {
            method: signature.method.clone(),
            id,
        });
        tracing::debug!(id, object = %signature.object_key, dispatcher = %signature.dispatcher, "registered builtin");
        self.functions.push(BuiltinFunction { id, signature });
        Some(id)
    }

    pub fn first_id(&self) -> u32 {
        self.first_id
    }

    fn next_id(&self) -> Option<u32> {
        // Contiguous by construction: one ID per pushed function.
        let offset = u32::try_from(self.functions.len()).ok()?;
        self.first_id.checked_add(offset)
    }

    pub fn build(self) -> Registry {
        Registry {
            objects: self.objects,
            functions: FunctionTable {
                first_id: self.first_id,
                functions: self.functions,
            },
        }
    }
}
