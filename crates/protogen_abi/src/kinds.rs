//! Declaration kinds and return kinds recognized in builtin declarations.
//!
//! ## Notes
//! - Lookup via [`DeclKindId::from_prefix`] / [`ReturnKindId::from_spelling`] is **case-sensitive**.
//!
//! ## Examples
//! ```rust
//! use protogen_abi::{DeclKindId, ReturnKindId};
//!
//! assert_eq!(DeclKindId::from_prefix("prop"), Some(DeclKindId::Property));
//! assert_eq!(ReturnKindId::from_spelling("void"), Some(ReturnKindId::Void));
//! assert_eq!(ReturnKindId::from_spelling("int"), None);
//! ```

use super::{VALUE_TYPE, VOID_TYPE};

/// Kind of a builtin declaration, taken from the dispatcher name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKindId {
    /// `fun_<Class>_<method>`: an ordinary callable builtin.
    Function,
    /// `prop_<Class>_<method>`: a property getter.
    Property,
}

/// All declaration kinds, in grammar order.
pub const DECL_KINDS: &[DeclKindId] = &[DeclKindId::Function, DeclKindId::Property];

impl DeclKindId {
    /// Dispatcher name prefix (without the trailing underscore).
    pub const fn prefix(self) -> &'static str {
        match self {
            DeclKindId::Function => "fun",
            DeclKindId::Property => "prop",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        DECL_KINDS.iter().copied().find(|k| k.prefix() == prefix)
    }
}

/// Return type of a builtin declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnKindId {
    /// `value_t`: the builtin returns synchronously.
    Value,
    /// `void`: the builtin completes asynchronously.
    Void,
}

/// All accepted return kinds.
pub const RETURN_KINDS: &[ReturnKindId] = &[ReturnKindId::Value, ReturnKindId::Void];

impl ReturnKindId {
    pub const fn spelling(self) -> &'static str {
        match self {
            ReturnKindId::Value => VALUE_TYPE,
            ReturnKindId::Void => VOID_TYPE,
        }
    }

    pub fn from_spelling(spelling: &str) -> Option<Self> {
        RETURN_KINDS.iter().copied().find(|k| k.spelling() == spelling)
    }
}
