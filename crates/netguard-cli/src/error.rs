use std::path::PathBuf;

use miette::Diagnostic;
use netguard_source::ConfigError;
use netguard_syntax::UnitError;
use thiserror::Error;

/// Errors that stop a command. Findings are not errors.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Unit(#[from] UnitError),

    #[error("I/O error while {operation} at {}", path.display())]
    #[diagnostic(code(netguard::cli::io_error))]
    IoError {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to overwrite {}", path.display())]
    #[diagnostic(code(netguard::cli::exists), help("pass --force to replace it"))]
    AlreadyExists { path: PathBuf },

    #[error("No analysis units found under {}", display_paths(paths))]
    #[diagnostic(
        code(netguard::cli::no_units),
        help("units are `.json` documents with a `unit` and optional `bindings` field")
    )]
    NoUnits { paths: Vec<PathBuf> },

    #[error("Internal error: {0}")]
    #[diagnostic(code(netguard::cli::internal_error))]
    InternalError(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn convert_io_error(error: std::io::Error, path: PathBuf, operation: &str) -> CliError {
    CliError::IoError {
        path,
        operation: operation.to_string(),
        source: error,
    }
}
