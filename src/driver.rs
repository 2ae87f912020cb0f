//! Generator pipeline
//!
//! Runs scanner → validator → registry builder → emitter over a batch of inputs. State (the registry builder and the
//! diagnostics accumulator) is local to one call and threaded through the stages.
//!
//! ## I/O
//!
//! Inputs are read whole before processing; the output is written once, wholesale, and only when no declaration
//! errors were found.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::GenConfig;
use crate::diagnostics::{Diagnostic, Diagnostics, GenError, SignatureError};
use crate::emit::{self, PrototypeGroup};
use crate::registry::{Registry, RegistryBuilder};
use crate::scanner::{DeclPattern, Scanner, SourceFile};
use crate::signature::Validator;

/// Maximum source file size (100 MB)
///
/// Larger inputs are rejected before reading.
pub const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Result of a successful generation.
#[derive(Debug, Clone)]
pub struct Generated {
    /// The generated translation unit
    pub output: String,
    pub registry: Registry,
}

/// Generate tables from in-memory sources.
///
/// ## Errors
///
/// Returns every declaration error found across all sources. Nothing is generated if any error exists.
#[tracing::instrument(skip_all, fields(file_count = sources.len()))]
pub fn generate(sources: &[SourceFile], config: &GenConfig) -> Result<Generated, Diagnostics> {
    let pattern = DeclPattern::new();
    let validator = Validator::new(config);
    let mut builder = RegistryBuilder::new(config.first_builtin_function);
    let mut diagnostics = Diagnostics::new();
    let mut groups = Vec::with_capacity(sources.len());

    for source in sources {
        tracing::debug!(file = %source.display_name(), "scanning");
        let mut group = PrototypeGroup::new(source.base_name());
        for decl in Scanner::new(&pattern, &source.text) {
            group.prototypes.push(decl.forward_declaration());
            match validator.validate(&decl) {
                Ok(signature) => {
                    if builder.register(signature).is_none() {
                        let error = SignatureError::IdOverflow {
                            first_id: builder.first_id(),
                        };
                        diagnostics.push(Diagnostic::new(source.display_name(), decl.line, error));
                    }
                }
                Err(errors) => {
                    for error in errors {
                        diagnostics.push(Diagnostic::new(source.display_name(), decl.line, error));
                    }
                }
            }
        }
        groups.push(group);
    }

    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    let registry = builder.build();
    let output = emit::emit(&registry, &groups, config);
    Ok(Generated { output, registry })
}

/// Read a source file.
///
/// The text is decoded as UTF-8 lossily: a stray non-UTF-8 byte (typically in a comment) is replaced rather than
/// failing the run.
///
/// ## Errors
///
/// Returns an error if the file cannot be read or exceeds [`MAX_SOURCE_SIZE`].
pub fn read_source(path: &Path) -> Result<SourceFile, GenError> {
    read_source_limited(path, MAX_SOURCE_SIZE)
}

fn read_source_limited(path: &Path, max: u64) -> Result<SourceFile, GenError> {
    let metadata = fs::metadata(path).map_err(|source| GenError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if metadata.len() > max {
        return Err(GenError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max,
        });
    }
    let bytes = fs::read(path).map_err(|source| GenError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(file = %path.display(), "source is not valid UTF-8; decoding lossily");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };
    Ok(SourceFile::new(path, text))
}

/// Output path: the configured file name in the directory of the first input.
pub fn output_path(first_input: &Path, config: &GenConfig) -> PathBuf {
    let dir = first_input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    dir.join(&config.output_file_name)
}

/// Read `inputs`, generate, and write the output next to the first input.
///
/// ## Errors
///
/// - [`GenError::NoInputs`] for an empty input list.
/// - [`GenError::Invalid`] if any declaration is malformed; no file is written.
/// - I/O errors for unreadable inputs or an unwritable output.
pub fn run(inputs: &[PathBuf], config: &GenConfig) -> Result<PathBuf, GenError> {
    let first = inputs.first().ok_or(GenError::NoInputs)?;
    let out_path = output_path(first, config);

    let sources = inputs
        .iter()
        .map(|p| read_source(p))
        .collect::<Result<Vec<_>, _>>()?;

    let generated = generate(&sources, config).map_err(|diagnostics| GenError::Invalid {
        diagnostics,
        output: out_path.clone(),
    })?;

    fs::write(&out_path, &generated.output).map_err(|source| GenError::Write {
        path: out_path.clone(),
        source,
    })?;
    tracing::info!(
        path = %out_path.display(),
        functions = generated.registry.functions().len(),
        objects = generated.registry.objects().len(),
        "wrote builtin tables"
    );
    Ok(out_path)
}
