//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::PathBuf;

use crate::config::GenConfig;
use crate::diagnostics::GenError;
use crate::driver;

use super::{CliError, CliResult, ExitCode};

/// Generate `protogen.c` from the given sources with the default ABI configuration.
pub fn generate_protos(files: &[PathBuf]) -> CliResult<ExitCode> {
    generate_protos_with(files, &GenConfig::default())
}

/// Generate with an explicit configuration.
pub fn generate_protos_with(files: &[PathBuf], config: &GenConfig) -> CliResult<ExitCode> {
    driver::run(files, config).map_err(to_cli_error)?;
    Ok(ExitCode::SUCCESS)
}

/// Format a generator error for the terminal.
///
/// Declaration errors are listed one per line as `file:line: message` with their help text, followed by the summary.
fn to_cli_error(err: GenError) -> CliError {
    match &err {
        GenError::Invalid { diagnostics, .. } => CliError::failure(format!("{}{err}", diagnostics.render())),
        _ => CliError::failure(format!("Error: {err}")),
    }
}
