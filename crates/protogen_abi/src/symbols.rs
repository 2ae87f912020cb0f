//! C symbol names shared with the VM headers.
//!
//! ## Examples
//! ```rust
//! use protogen_abi::symbols;
//!
//! assert_eq!(symbols::object_enum("Buffer_prototype"), "DEVS_BUILTIN_OBJECT_BUFFER_PROTOTYPE");
//! assert_eq!(symbols::string_enum("byteLength"), "DEVS_BUILTIN_STRING_BYTELENGTH");
//! ```

/// Prefix of the VM's object-type enum values.
pub const OBJECT_ENUM_PREFIX: &str = "DEVS_BUILTIN_OBJECT_";
/// Prefix of the VM's interned method-name enum values.
pub const STRING_ENUM_PREFIX: &str = "DEVS_BUILTIN_STRING_";
/// Last value of the object-type enum; the master table is sized `OBJECT_ENUM_MAX + 1`.
pub const OBJECT_ENUM_MAX: &str = "DEVS_BUILTIN_OBJECT___MAX";

/// Argument-count ceiling of the builtin-call instruction.
pub const MAX_ARGS_CONST: &str = "DEVS_BUILTIN_MAX_ARGS";
/// VM-side constant that must equal the generator's first builtin-function ID.
pub const FIRST_FUNCTION_CONST: &str = "DEVS_FIRST_BUILTIN_FUNCTION";
/// Header initializer of every `devs_builtin_proto_t`.
pub const PROTO_INIT: &str = "DEVS_BUILTIN_PROTO_INIT";

pub const PROTO_ENTRY_TYPE: &str = "devs_builtin_proto_entry_t";
pub const PROTO_TYPE: &str = "devs_builtin_proto_t";

// The flat function table below is declared by the VM headers alongside the ID base. Keep these spellings in sync
// with `devs_internal.h`.

pub const FUNCTION_TYPE: &str = "devs_builtin_function_t";

/// Master table indexed by object-type enum.
pub const PROTOS_TABLE: &str = "devs_builtin_protos";
/// Flat builtin-function array indexed by `id - DEVS_FIRST_BUILTIN_FUNCTION`.
pub const FUNCTIONS_TABLE: &str = "devs_builtin_functions";
/// Length of [`FUNCTIONS_TABLE`].
pub const FUNCTIONS_COUNT: &str = "devs_num_builtin_functions";

/// Compile-time assertion macro provided by the VM headers.
pub const STATIC_ASSERT: &str = "STATIC_ASSERT";

/// Enum value of an object key.
pub fn object_enum(object_key: &str) -> String {
    format!("{OBJECT_ENUM_PREFIX}{}", object_key.to_uppercase())
}

/// Enum value of an interned method name.
pub fn string_enum(method: &str) -> String {
    format!("{STRING_ENUM_PREFIX}{}", method.to_uppercase())
}

/// Name of the generated per-object table.
pub fn entries_table(object_key: &str) -> String {
    format!("{object_key}_entries")
}
