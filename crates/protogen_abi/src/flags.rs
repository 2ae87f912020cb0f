//! Builtin flag vocabulary.
//!
//! Each flag has a short macro alias used inside the generated translation unit and the VM-side constant it aliases.
//! [`BuiltinFlags`] is a small bit set over [`BuiltinFlag`].
//!
//! ## Notes
//! - Rendering order is fixed by [`EMIT_ORDER`] (`ASYNC | PROP | NO_SELF`), independent of insertion order, so the
//!   generated output stays byte-stable.
//!
//! ## Examples
//! ```rust
//! use protogen_abi::{BuiltinFlag, BuiltinFlags};
//!
//! let mut flags = BuiltinFlags::empty();
//! assert_eq!(flags.to_string(), "0");
//!
//! flags.insert(BuiltinFlag::NoSelf);
//! flags.insert(BuiltinFlag::Async);
//! assert_eq!(flags.to_string(), "ASYNC | NO_SELF");
//! ```

use std::fmt;

/// A single builtin flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFlag {
    /// The builtin is a property getter (`prop_` prefix).
    Property,
    /// The builtin suspends and completes asynchronously (`void` return).
    Async,
    /// The builtin takes no `self` receiver.
    NoSelf,
}

/// All flags, in bit order.
pub const ALL_FLAGS: &[BuiltinFlag] = &[BuiltinFlag::Property, BuiltinFlag::Async, BuiltinFlag::NoSelf];

/// Flags in the order they are rendered.
pub const EMIT_ORDER: &[BuiltinFlag] = &[BuiltinFlag::Async, BuiltinFlag::Property, BuiltinFlag::NoSelf];

impl BuiltinFlag {
    /// Bit value; matches the VM's `DEVS_BUILTIN_FLAG_*` constants.
    pub const fn bit(self) -> u8 {
        match self {
            BuiltinFlag::Property => 0x01,
            BuiltinFlag::Async => 0x02,
            BuiltinFlag::NoSelf => 0x04,
        }
    }

    /// Short alias `#define`d at the top of the generated file.
    pub const fn macro_alias(self) -> &'static str {
        match self {
            BuiltinFlag::Property => "PROP",
            BuiltinFlag::Async => "ASYNC",
            BuiltinFlag::NoSelf => "NO_SELF",
        }
    }

    /// VM-side constant the alias expands to.
    pub const fn vm_constant(self) -> &'static str {
        match self {
            BuiltinFlag::Property => "DEVS_BUILTIN_FLAG_IS_PROPERTY",
            BuiltinFlag::Async => "DEVS_BUILTIN_FLAG_ASYNC_CALL",
            BuiltinFlag::NoSelf => "DEVS_BUILTIN_FLAG_NO_SELF",
        }
    }
}

/// Set of [`BuiltinFlag`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BuiltinFlags(u8);

impl BuiltinFlags {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, flag: BuiltinFlag) {
        self.0 |= flag.bit();
    }

    pub const fn contains(self, flag: BuiltinFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Iterate set flags in [`EMIT_ORDER`].
    pub fn iter(self) -> impl Iterator<Item = BuiltinFlag> {
        EMIT_ORDER.iter().copied().filter(move |f| self.contains(*f))
    }
}

impl FromIterator<BuiltinFlag> for BuiltinFlags {
    fn from_iter<I: IntoIterator<Item = BuiltinFlag>>(iter: I) -> Self {
        let mut flags = BuiltinFlags::empty();
        for flag in iter {
            flags.insert(flag);
        }
        flags
    }
}

impl fmt::Display for BuiltinFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }
        let aliases: Vec<&str> = self.iter().map(BuiltinFlag::macro_alias).collect();
        write!(f, "{}", aliases.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_are_distinct() {
        let all: BuiltinFlags = ALL_FLAGS.iter().copied().collect();
        assert_eq!(all.bits(), 0x07);
        let bits: Vec<u8> = ALL_FLAGS.iter().map(|f| f.bit()).collect();
        assert_eq!(bits, vec![0x01, 0x02, 0x04]);
    }

    #[test]
    fn test_render_order_is_fixed() {
        let flags: BuiltinFlags = [BuiltinFlag::NoSelf, BuiltinFlag::Property, BuiltinFlag::Async]
            .into_iter()
            .collect();
        assert_eq!(flags.to_string(), "ASYNC | PROP | NO_SELF");
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut flags = BuiltinFlags::empty();
        flags.insert(BuiltinFlag::Property);
        flags.insert(BuiltinFlag::Property);
        assert_eq!(flags.to_string(), "PROP");
        assert!(flags.contains(BuiltinFlag::Property));
        assert!(!flags.contains(BuiltinFlag::Async));
    }
}
