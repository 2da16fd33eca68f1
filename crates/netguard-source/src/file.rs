use miette::{NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` into a source file.
///
/// Front ends hand spans over as plain offsets; they convert into
/// `miette::SourceSpan` when a diagnostic is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.len())
    }
}

/// A source file as seen by the analysis: its path and full text.
///
/// Line starts are indexed once on construction so that spans can be mapped
/// to 1-based line/column pairs without rescanning the text.
///
/// # Example
///
/// ```
/// use netguard_source::SourceFile;
///
/// let file = SourceFile::new("Client.kt", "fun a() {}\nfun b() {}\n");
/// assert_eq!(file.line_col(11), (2, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: String,
    text: String,
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        SourceFile {
            path: path.into(),
            text,
            line_starts,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Map a byte offset to a 1-based `(line, column)`.
    ///
    /// Offsets past the end of the text clamp to the last position. Columns
    /// count characters, not bytes.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = self
            .text
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - line_start);
        (line + 1, column + 1)
    }

    /// A named copy of the text for attaching to a miette diagnostic.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.path, self.text.clone())
    }
}
