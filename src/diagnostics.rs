//! Diagnostics for builtin declarations
//!
//! Declaration errors are collected, never thrown: the scan keeps going so a single run reports every defect across
//! all inputs. The run still fails as a whole if anything was collected.

use std::fmt;
use std::io;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// A builtin declaration that cannot go into the tables.
#[derive(Error, Debug, MietteDiagnostic, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("first arg should be ctx")]
    #[diagnostic(
        code(protogen::first_arg),
        help("every builtin takes `devs_ctx_t *ctx` as its first parameter")
    )]
    FirstArgNotCtx { found: String },

    #[error("only void and value_t supported as return")]
    #[diagnostic(
        code(protogen::return_type),
        help("return `value_t` for a synchronous builtin or `void` for an async one")
    )]
    UnsupportedReturn { found: String },

    #[error("invalid param {param}")]
    #[diagnostic(code(protogen::param), help("parameters after ctx/self must be spelled `value_t <name>`"))]
    InvalidParam { param: String },

    #[error("builtin ID overflows u32 (first ID {first_id})")]
    #[diagnostic(
        code(protogen::id_overflow),
        help("lower the first builtin function ID so every builtin fits below u32::MAX")
    )]
    IdOverflow { first_id: u32 },
}

/// A [`SignatureError`] located at a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: String,
    /// 1-based line number
    pub line: usize,
    pub error: SignatureError,
}

impl Diagnostic {
    pub fn new(file: impl Into<String>, line: usize, error: SignatureError) -> Self {
        Self {
            file: file.into(),
            line,
            error,
        }
    }
}

impl Diagnostic {
    /// Help text attached to the error, if any.
    pub fn help(&self) -> Option<String> {
        MietteDiagnostic::help(&self.error).map(|h| h.to_string())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.error)
    }
}

/// Accumulated diagnostics for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(file = %diagnostic.file, line = diagnostic.line, "{}", diagnostic.error);
        self.items.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Error count
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Render for the terminal: each `file:line: msg` followed by its indented help line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for d in &self.items {
            out.push_str(&d.to_string());
            out.push('\n');
            if let Some(help) = d.help() {
                out.push_str(&format!("  help: {help}\n"));
            }
        }
        out
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// Error from a whole generator run.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("no input files")]
    NoInputs,

    #[error("cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("source file '{}' is too large ({size} bytes, max {max} bytes)", .path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("{} error(s) in builtin declarations; {} not written", .diagnostics.len(), .output.display())]
    Invalid { diagnostics: Diagnostics, output: PathBuf },

    #[error("cannot write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
