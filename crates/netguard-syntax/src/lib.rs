//! The syntax tree netguard analyses.
//!
//! Parsing is not done here. A front end that has already parsed and
//! resolved a source file hands over a [`ProgramUnit`]: declarations with
//! their annotations and best-known qualified names, and expression bodies
//! reduced to the shapes the analysis distinguishes (calls, `try`
//! expressions, nested functions and closures). Everything else is kept only
//! as structure so that traversal still reaches nested calls.

pub mod ast;
pub mod error;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod visitor;

pub use ast::{
    Annotation, CallExpr, CallId, CatchClause, ClassDecl, Expr, ExprKind, Function, Ident, Item, ItemKind,
    ProgramUnit, Property, TryExpr,
};
pub use error::UnitError;
pub use netguard_source::Span;
pub use visitor::{calls, Visitor};

impl ProgramUnit {
    /// Decode a unit from its JSON form. `origin` names the text in errors.
    pub fn from_json_str(text: &str, origin: &str) -> Result<Self, UnitError> {
        serde_json::from_str(text).map_err(|err| UnitError::decode(err, text, origin))
    }
}
