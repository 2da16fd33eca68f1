use netguard_source::Span;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
    #[serde(default)]
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Ident {
            name: name.into(),
            span,
        }
    }
}

/// An annotation attached to a declaration, e.g. `@HasRiskyInternetConnection`
/// or `@retrofit2.http.GET("users")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    /// The annotation name as written in source, without the `@`.
    pub name: String,
    /// Fully qualified name, when the front end's binding resolved it.
    #[serde(default)]
    pub qualified_name: Option<String>,
    #[serde(default)]
    pub span: Span,
}

impl Annotation {
    /// The last dotted segment of the written name.
    pub fn short_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}
