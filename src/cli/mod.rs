//! CLI module for the builtin-prototype generator
//!
//! ## Usage
//!
//! `protogen <FILE>...` scans every file for builtin declarations and writes `protogen.c` into the directory of the
//! first file.
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Builtin-prototype table generator
#[derive(Parser, Debug)]
#[command(name = "protogen")]
#[command(version = VERSION)]
#[command(
    about = "Generate the VM builtin dispatch tables from annotated C sources",
    long_about = None
)]
pub struct Cli {
    /// Source files to scan; protogen.c is written next to the first one
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    commands::generate_protos(&cli.files)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_single_file() {
        let cli = Cli::try_parse_from(["protogen", "impl_buffer.c"]).unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("impl_buffer.c")]);
    }

    #[test]
    fn test_cli_parse_keeps_file_order() {
        let cli = Cli::try_parse_from(["protogen", "src/b.c", "src/a.c", "other/c.c"]).unwrap();
        assert_eq!(
            cli.files,
            vec![
                PathBuf::from("src/b.c"),
                PathBuf::from("src/a.c"),
                PathBuf::from("other/c.c")
            ]
        );
    }

    #[test]
    fn test_cli_requires_a_file() {
        assert!(Cli::try_parse_from(["protogen"]).is_err());
    }

    #[test]
    fn test_cli_has_no_flags() {
        assert!(Cli::try_parse_from(["protogen", "--out", "x.c", "a.c"]).is_err());
    }

    #[test]
    fn test_cli_error_failure_code() {
        let e = CliError::failure("boom");
        assert_eq!(e.exit_code, ExitCode::FAILURE);
        assert_eq!(e.to_string(), "boom");
    }
}
