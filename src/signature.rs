//! Signature validation
//!
//! Checks a scanned [`Declaration`] against the builtin calling convention and derives its flags and object key.
//!
//! ## Rules
//!
//! 1. The first parameter must be the context parameter.
//! 2. The return type is `value_t` (synchronous) or `void` (sets `ASYNC`).
//! 3. A `prop_` declaration sets `PROP`.
//! 4. A leading `value_t self` after ctx is consumed and binds the builtin to `<Class>_prototype`; otherwise `NO_SELF`
//!    is set and the object key is `<Class>`.
//! 5. Every remaining parameter is `value_t <name>`.
//!
//! All violations of one declaration are reported together.

use protogen_abi::{BuiltinFlag, BuiltinFlags, DeclKindId, ReturnKindId};
use regex::Regex;

use crate::config::GenConfig;
use crate::diagnostics::SignatureError;
use crate::scanner::Declaration;

/// A value parameter after ctx/self.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
}

/// Validated builtin signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// `<Class>` or `<Class>_prototype`
    pub object_key: String,
    pub class_name: String,
    pub method: String,
    pub dispatcher: String,
    pub params: Vec<Param>,
    pub flags: BuiltinFlags,
}

impl Signature {
    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}

/// Validates declarations under one [`GenConfig`].
#[derive(Debug)]
pub struct Validator<'a> {
    config: &'a GenConfig,
    param_shape: Regex,
}

impl<'a> Validator<'a> {
    pub fn new(config: &'a GenConfig) -> Self {
        let source = format!(r"^{}\s+([A-Za-z0-9_]+)$", regex::escape(protogen_abi::VALUE_TYPE));
        let param_shape = Regex::new(&source).expect("INVARIANT: parameter shape is a valid regex");
        Self { config, param_shape }
    }

    /// Validate one declaration.
    ///
    /// ## Errors
    ///
    /// Returns every [`SignatureError`] found in the declaration, in rule order.
    pub fn validate(&self, decl: &Declaration) -> Result<Signature, Vec<SignatureError>> {
        let mut errors = Vec::new();
        let mut flags = BuiltinFlags::empty();

        let args = decl.params();
        let (first, rest) = match args.split_first() {
            Some((first, rest)) => (*first, rest),
            None => ("", &[][..]),
        };
        if first != self.config.ctx_param {
            errors.push(SignatureError::FirstArgNotCtx {
                found: first.to_string(),
            });
        }

        match ReturnKindId::from_spelling(&decl.return_type) {
            Some(ReturnKindId::Value) => {}
            Some(ReturnKindId::Void) => flags.insert(BuiltinFlag::Async),
            None => errors.push(SignatureError::UnsupportedReturn {
                found: decl.return_type.clone(),
            }),
        }

        if decl.kind == DeclKindId::Property {
            flags.insert(BuiltinFlag::Property);
        }

        let (object_key, values) = match rest.split_first() {
            Some((receiver, values)) if *receiver == self.config.self_param => {
                (protogen_abi::prototype_key(&decl.class_name), values)
            }
            _ => {
                flags.insert(BuiltinFlag::NoSelf);
                (decl.class_name.clone(), rest)
            }
        };

        let mut params = Vec::with_capacity(values.len());
        for p in values {
            match self.param_shape.captures(p) {
                Some(caps) => params.push(Param {
                    name: caps[1].to_string(),
                }),
                None => errors.push(SignatureError::InvalidParam { param: p.to_string() }),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Signature {
            object_key,
            class_name: decl.class_name.clone(),
            method: decl.method.clone(),
            dispatcher: decl.dispatcher.clone(),
            params,
            flags,
        })
    }
}
