use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors raised while loading a serialized analysis unit.
#[derive(Debug, Error, Diagnostic)]
pub enum UnitError {
    #[error("Failed to read unit {}", path.display())]
    #[diagnostic(code(netguard_syntax::read_error))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed unit: {message}")]
    #[diagnostic(
        code(netguard_syntax::decode_error),
        help("Units are JSON documents produced by a resolving front end")
    )]
    Decode {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("error occurred here")]
        span: SourceSpan,
    },
}

impl UnitError {
    /// Wrap a JSON decoding failure, pointing at the offending position.
    pub fn decode(err: serde_json::Error, text: &str, origin: &str) -> Self {
        let offset = offset_of(text, err.line(), err.column());
        UnitError::Decode {
            message: err.to_string(),
            src: NamedSource::new(origin, text.to_string()),
            span: SourceSpan::new(offset.into(), 0),
        }
    }
}

/// Byte offset of a 1-based line/column pair as reported by serde_json.
fn offset_of(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(text.len())
}
