use miette::{Diagnostic, SourceSpan};
use netguard_source::{NetguardError, Report, SourceFile, Span};
use serde::Serialize;
use thiserror::Error;

pub const RULE_ID: &str = "ConnectToInternetEffectRule";
pub const RULE_SET_ID: &str = "SafeInternetAccessRuleSet";
pub const RULE_DESCRIPTION: &str = "Safe Internet Access Rule";

/// The finding message for a call whose source text is `call_text`.
pub fn violation_message(call_text: &str) -> String {
    format!(
        "The call {call_text} initiates an internet connection but is not handled properly. \
         Wrap it in a try-catch block or annotate the enclosing function with @HasRiskyInternetConnection."
    )
}

/// Where a finding points. Line and column are 1-based; the column counts
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    pub span: Span,
    pub line: usize,
    pub column: usize,
}

/// Which classification marked a call as carrying the effect. When several
/// apply, the first in declaration order is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectSource {
    /// The target is a library entry point from the registry
    KnownLibraryCall,
    /// The target is a function of this unit declared risky
    RiskyFunction,
    /// The target carries this risk-indicating annotation
    RiskAnnotation(String),
}

/// An unguarded call that lets the network effect escape a function that
/// does not accept it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub location: Location,
    pub message: String,
    pub call_text: String,
    pub reason: EffectSource,
}

impl Finding {
    /// A diagnostic for this finding with `file`'s text attached.
    pub fn to_diagnostic(&self, file: &SourceFile) -> Report {
        EffectViolation {
            message: self.message.clone(),
            span: self.location.span.into(),
            note: match &self.reason {
                EffectSource::KnownLibraryCall => "opens a network connection".to_string(),
                EffectSource::RiskyFunction => "calls a function declared risky".to_string(),
                EffectSource::RiskAnnotation(annotation) => format!("target is annotated with @{annotation}"),
            },
        }
        .report(file)
    }
}

#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(
    code(netguard::connect_to_internet_effect),
    help("wrap the call in a try-catch block, or annotate the enclosing function with @HasRiskyInternetConnection")
)]
struct EffectViolation {
    message: String,
    #[label("{note}")]
    span: SourceSpan,
    note: String,
}
