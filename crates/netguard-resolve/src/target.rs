use serde::{Deserialize, Serialize};

/// What binding resolution knows about the callee of one call expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedCall {
    /// Fully qualified name of the callee, e.g. `okhttp3.OkHttpClient.newCall`
    pub qualified_name: String,
    /// Fully qualified names of the annotations declared on the callee
    #[serde(default)]
    pub annotations: Vec<String>,
}

impl ResolvedCall {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        ResolvedCall {
            qualified_name: qualified_name.into(),
            annotations: Vec::new(),
        }
    }

    pub fn with_annotations<I, S>(mut self, annotations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.annotations.extend(annotations.into_iter().map(Into::into));
        self
    }
}

/// The resolved identity of a call expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CallTarget {
    Resolved(ResolvedCall),
    /// Resolution could not determine a concrete callee
    Unresolved,
}

impl CallTarget {
    pub fn resolved(&self) -> Option<&ResolvedCall> {
        match self {
            CallTarget::Resolved(call) => Some(call),
            CallTarget::Unresolved => None,
        }
    }
}

impl From<Option<ResolvedCall>> for CallTarget {
    fn from(call: Option<ResolvedCall>) -> Self {
        call.map_or(CallTarget::Unresolved, CallTarget::Resolved)
    }
}
