//! Table emitter
//!
//! Serializes a [`Registry`] into the self-contained C translation unit the VM links against. The layout is:
//!
//! 1. header: include and flag macro aliases
//! 2. forward declarations of every dispatcher, grouped per input file
//! 3. one sentinel-terminated `<key>_entries` table per object key, in first-seen order
//! 4. the master `devs_builtin_protos` table indexed by object-type enum: configured VM object types first, then
//!    every other observed key
//! 5. the flat `devs_builtin_functions` array and its length
//! 6. `STATIC_ASSERT`s tying the output to VM-side constants
//!
//! Output depends only on the ordered input, so re-running on unchanged sources is byte-stable.

pub mod writer;

use protogen_abi::flags::ALL_FLAGS;
use protogen_abi::symbols::{
    self, FIRST_FUNCTION_CONST, FUNCTION_TYPE, FUNCTIONS_COUNT, FUNCTIONS_TABLE, MAX_ARGS_CONST, OBJECT_ENUM_MAX,
    PROTO_ENTRY_TYPE, PROTO_INIT, PROTO_TYPE, PROTOS_TABLE, STATIC_ASSERT,
};

use crate::config::GenConfig;
use crate::registry::{ObjectTable, Registry};
use writer::CWriter;

/// Shared table for VM object types that defined no builtins in this run
const EMPTY_TABLE: &str = "empty_entries";

/// Forward declarations echoed from one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrototypeGroup {
    pub file_name: String,
    pub prototypes: Vec<String>,
}

impl PrototypeGroup {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            prototypes: Vec::new(),
        }
    }
}

/// Render the generated translation unit.
#[tracing::instrument(skip_all, fields(objects = registry.objects().len(), functions = registry.functions().len()))]
pub fn emit(registry: &Registry, groups: &[PrototypeGroup], config: &GenConfig) -> String {
    TableEmitter::new(registry, config).emit(groups)
}

struct TableEmitter<'a> {
    registry: &'a Registry,
    config: &'a GenConfig,
    w: CWriter,
}

impl<'a> TableEmitter<'a> {
    fn new(registry: &'a Registry, config: &'a GenConfig) -> Self {
        Self {
            registry,
            config,
            w: CWriter::new(),
        }
    }

    fn emit(mut self, groups: &[PrototypeGroup]) -> String {
        self.emit_header();
        self.emit_prototypes(groups);
        let registry = self.registry;
        for object in registry.objects() {
            self.emit_object_table(object);
        }
        self.emit_protos_table();
        self.emit_function_table();
        self.emit_asserts();
        self.w.finish()
    }

    fn emit_header(&mut self) {
        self.w.writeln("// auto-generated!");
        self.w.writeln(&format!("#include \"{}\"", self.config.include_header));
        self.w.blank_line();
        for flag in ALL_FLAGS {
            self.w
                .writeln(&format!("#define {} {}", flag.macro_alias(), flag.vm_constant()));
        }
    }

    fn emit_prototypes(&mut self, groups: &[PrototypeGroup]) {
        for group in groups {
            self.w.blank_line();
            self.w.writeln(&format!("// {}", group.file_name));
            for proto in &group.prototypes {
                self.w.writeln(proto);
            }
        }
    }

    fn emit_object_table(&mut self, object: &ObjectTable) {
        self.w.blank_line();
        let header = format!(
            "static const {PROTO_ENTRY_TYPE} {}[] =",
            symbols::entries_table(&object.key)
        );
        self.w.block(&header, "};", |w| {
            for entry in &object.entries {
                w.writeln(&format!("{{{}, {}}},", symbols::string_enum(&entry.method), entry.id));
            }
            w.writeln("{0, 0},");
        });
    }

    fn emit_protos_table(&mut self) {
        let registry = self.registry;
        let config = self.config;

        let needs_empty = config.known_objects.iter().any(|k| registry.object(k).is_none());
        if needs_empty {
            self.w.blank_line();
            self.w
                .block(&format!("static const {PROTO_ENTRY_TYPE} {EMPTY_TABLE}[] ="), "};", |w| {
                    w.writeln("{0, 0},")
                });
        }

        let mut slots: Vec<(&str, String)> = config
            .known_objects
            .iter()
            .map(|key| {
                let table = match registry.object(key) {
                    Some(_) => symbols::entries_table(key),
                    None => EMPTY_TABLE.to_string(),
                };
                (key.as_str(), table)
            })
            .collect();
        for object in registry.objects() {
            if !config.is_known_object(&object.key) {
                if config.has_known_objects() {
                    tracing::warn!(object = %object.key, "object key is not a known VM object type");
                }
                slots.push((object.key.as_str(), symbols::entries_table(&object.key)));
            }
        }

        self.w.blank_line();
        let header = format!("const {PROTO_TYPE} {PROTOS_TABLE}[{OBJECT_ENUM_MAX} + 1] =");
        self.w.block(&header, "};", |w| {
            // Empty initializer lists are not valid C before C23.
            if slots.is_empty() {
                w.writeln("{0},");
            }
            for (key, table) in &slots {
                w.writeln(&format!("[{}] = {{{PROTO_INIT}, {table}}},", symbols::object_enum(key)));
            }
        });
    }

    fn emit_function_table(&mut self) {
        let functions = self.registry.functions();
        self.w.blank_line();
        self.w
            .writeln(&format!("const uint16_t {FUNCTIONS_COUNT} = {};", functions.len()));
        // C forbids zero-length arrays; an empty run gets one all-zero placeholder.
        let size = functions.len().max(1);
        let header = format!("const {FUNCTION_TYPE} {FUNCTIONS_TABLE}[{size}] =");
        self.w.block(&header, "};", |w| {
            if functions.is_empty() {
                w.writeln("{0, 0, 0, 0},");
            }
            for f in functions.iter() {
                let sig = &f.signature;
                w.writeln(&format!(
                    "{{{}, {}, {}, (void *){}}},",
                    symbols::string_enum(&sig.method),
                    sig.param_count(),
                    sig.flags,
                    sig.dispatcher
                ));
            }
        });
    }

    fn emit_asserts(&mut self) {
        let functions = self.registry.functions();
        self.w.blank_line();
        self.w
            .writeln(&format!("{STATIC_ASSERT}({} <= {MAX_ARGS_CONST});", functions.max_params()));
        self.w
            .writeln(&format!("{STATIC_ASSERT}({} == {FIRST_FUNCTION_CONST});", functions.first_id()));
    }
}
