#![forbid(unsafe_code)]
//! Builtin-prototype table generator
//!
//! Scans C sources for builtin declarations (`fun_<Class>_<method>` / `prop_<Class>_<method>`), validates their
//! calling convention, numbers them, and emits the dispatch tables the VM's builtin-call instruction indexes.
//!
//! ## Pipeline
//!
//! [`scanner`] → [`signature`] → [`registry`] → [`emit`], driven by [`driver`].
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` with `?` / `map_err`. The `cli` module enforces `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **True invariants**: compiled-in regexes use `.expect("INVARIANT: reason")`.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod emit;
pub mod registry;
pub mod scanner;
pub mod signature;

pub use config::GenConfig;
pub use diagnostics::{Diagnostic, Diagnostics, GenError, SignatureError};
pub use driver::{Generated, generate, run};
pub use registry::{Registry, RegistryBuilder};
pub use scanner::{DeclPattern, Declaration, Scanner, SourceFile};
pub use signature::{Signature, Validator};
