//! Attaching source text to diagnostics and rendering them.
//!
//! Analysis passes produce diagnostics that only carry spans. Before display
//! they are paired with the text of the file they point into via [`Report`],
//! which delegates everything except `source_code` to the wrapped error.

use std::error::Error;
use std::fmt::{self, Display};
use std::sync::Arc;

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, NamedSource, Severity};
use thiserror::Error;

use crate::SourceFile;

/// A diagnostic paired with the source it points into.
#[derive(Debug, Clone, Error)]
pub struct Report {
    /// The source code text for context in error displays
    pub source_code: NamedSource<String>,

    /// The error report
    pub report: Arc<dyn NetguardError>,
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.report.fmt(f)
    }
}

impl Diagnostic for Report {
    fn code<'b>(&'b self) -> Option<Box<dyn Display + 'b>> {
        self.report.code()
    }

    fn diagnostic_source(&self) -> Option<&dyn Diagnostic> {
        self.report.diagnostic_source()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.report.help()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        self.report.labels()
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        self.report.related()
    }

    /// The only method that does not delegate: the wrapped error carries
    /// spans but no text.
    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.source_code)
    }

    fn url<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.report.url()
    }

    fn severity(&self) -> Option<Severity> {
        self.report.severity()
    }
}

/// Diagnostics that can be reported against a [`SourceFile`].
pub trait NetguardError: Diagnostic + Send + Sync + Display + Error + 'static {
    /// Pair this error with the text of `file`.
    fn report(self, file: &SourceFile) -> Report;
}

impl<T: Diagnostic + Send + Sync + Display + Error + 'static> NetguardError for T {
    fn report(self, file: &SourceFile) -> Report {
        Report {
            source_code: file.named_source(),
            report: Arc::new(self),
        }
    }
}

/// Render a diagnostic with miette's graphical handler, without colors.
///
/// Used for stable output in snapshots and for non-terminal sinks.
pub fn render_plain(diagnostic: &dyn Diagnostic) -> String {
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    let mut out = String::new();
    if handler.render_report(&mut out, diagnostic).is_err() {
        log::warn!("failed to render diagnostic: {}", diagnostic);
        return diagnostic.to_string();
    }
    out
}
