//! Provide the canonical ABI vocabulary shared by the builtin-prototype generator and the VM headers.
//!
//! The generator must produce tables that are binary-compatible with handwritten VM headers. Every spelling the two
//! sides agree on (calling-convention parameters, return types, flag macros, enum prefixes, table symbols) lives
//! here so the generator never compares against ad hoc string literals.
//!
//! ## Notes
//!
//! - This is a vocabulary crate: **no IO**, no global state, no generator-specific types.
//! - Values mirror `devs_internal.h` and are kept in sync with it by hand. [`FIRST_BUILTIN_FUNCTION`] and the
//!   flat-function-table symbols in [`symbols`] are part of that hand-kept contract; a drift in the ID base or the
//!   argument ceiling is caught by the `STATIC_ASSERT`s the generator emits, a renamed symbol by the C compiler.
//! - The VM's object-type enum is not mirrored here. The generator emits master-table slots for the object keys it
//!   observes; embedders that want a slot per VM type pass the enum's keys through the generator config.
//!
//! ## Examples
//! ```rust
//! use protogen_abi::{CTX_PARAM, SELF_PARAM, prototype_key};
//!
//! assert_eq!(CTX_PARAM, "devs_ctx_t *ctx");
//! assert_eq!(SELF_PARAM, "value_t self");
//! assert_eq!(prototype_key("Buffer"), "Buffer_prototype");
//! ```

pub mod flags;
pub mod kinds;
pub mod symbols;

pub use flags::{BuiltinFlag, BuiltinFlags};
pub use kinds::{DeclKindId, ReturnKindId};

/// Spelling of the mandatory first (context) parameter of every builtin.
pub const CTX_PARAM: &str = "devs_ctx_t *ctx";

/// Spelling of the optional receiver parameter that binds a builtin to an object prototype.
pub const SELF_PARAM: &str = "value_t self";

/// The VM value type; the only accepted parameter type and the synchronous return type.
pub const VALUE_TYPE: &str = "value_t";

/// Return type marking an asynchronous builtin.
pub const VOID_TYPE: &str = "void";

/// Suffix appended to a class name for instance-bound (prototype) builtins.
pub const PROTOTYPE_SUFFIX: &str = "_prototype";

/// ID of the first builtin function; must match `DEVS_FIRST_BUILTIN_FUNCTION` in the VM headers.
pub const FIRST_BUILTIN_FUNCTION: u32 = 50000;

/// Header included at the top of the generated translation unit.
pub const INTERNAL_HEADER: &str = "devs_internal.h";

/// File name of the generated translation unit, placed next to the first input.
pub const OUTPUT_FILE_NAME: &str = "protogen.c";

/// Build the object key of an instance-bound builtin.
///
/// ## Examples
/// ```rust
/// assert_eq!(protogen_abi::prototype_key("Foo"), "Foo_prototype");
/// ```
pub fn prototype_key(class_name: &str) -> String {
    format!("{class_name}{PROTOTYPE_SUFFIX}")
}
