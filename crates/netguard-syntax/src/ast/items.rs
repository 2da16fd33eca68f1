use super::common::{Annotation, Ident};
use super::expr::Expr;
use netguard_source::{SourceFile, Span};
use serde::{Deserialize, Serialize};

/// One analysis unit: a single parsed source file with binding information
/// already folded into its declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramUnit {
    /// Path of the file the unit was parsed from
    pub path: String,
    /// Full source text; spans index into it
    #[serde(default)]
    pub source: String,
    pub items: Vec<Item>,
}

impl ProgramUnit {
    pub fn source_file(&self) -> SourceFile {
        SourceFile::new(&self.path, &self.source)
    }
}

/// A declaration at file or class level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Function(Function),
    Class(ClassDecl),
    Property(Property),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    /// `None` for anonymous functions
    #[serde(default)]
    pub name: Option<Ident>,
    /// Fully qualified name, when resolution succeeded
    #[serde(default)]
    pub qualified_name: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// `None` for abstract or interface declarations
    #[serde(default)]
    pub body: Option<Expr>,
    #[serde(default)]
    pub span: Span,
}

/// A class, object or interface. Only its members matter to the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: Ident,
    #[serde(default)]
    pub qualified_name: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// A property or top-level value whose initializer runs outside any function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: Ident,
    #[serde(default)]
    pub initializer: Option<Expr>,
}
