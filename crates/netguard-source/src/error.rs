use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors that can occur while locating or reading `netguard.toml`
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read configuration file {}", path.display())]
    #[diagnostic(
        code("CONFIG-001"),
        help("Check that the file exists and has proper permissions")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid
    #[error("Invalid configuration: {message}")]
    #[diagnostic(
        code("CONFIG-002"),
        help("Review the netguard.toml section highlighted above")
    )]
    Parse {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("error occurs here")]
        span: Option<SourceSpan>,
    },

    /// No configuration file in the directory or any of its parents
    #[error("No netguard.toml found in {} or any parent directory", searched_from.display())]
    #[diagnostic(
        code("CONFIG-003"),
        help("Run `netguard init` to create one, or pass --config")
    )]
    NotFound { searched_from: PathBuf },

    /// The configuration could not be written back out
    #[error("Failed to serialize configuration: {0}")]
    #[diagnostic(code("CONFIG-004"))]
    Serialize(String),
}

impl ConfigError {
    pub(crate) fn from_toml(err: toml::de::Error, text: &str, origin: &str) -> Self {
        let span = err
            .span()
            .map(|range| SourceSpan::new(range.start.into(), range.len()));
        ConfigError::Parse {
            message: err.message().to_string(),
            src: NamedSource::new(origin, text.to_string()),
            span,
        }
    }
}
