use super::common::Ident;
use super::items::Function;
use netguard_source::Span;
use serde::{Deserialize, Serialize};

/// Identity of a call expression within its unit. Binding information is
/// keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprKind {
    Call(CallExpr),
    Try(TryExpr),
    Block(Vec<Expr>),
    /// A closure; its body shares the enclosing lexical scope.
    Lambda(Box<Expr>),
    /// A named function declared inside another function's body.
    LocalFunction(Box<Function>),
    /// Any other construct, reduced to its subexpressions in source order.
    Compound(Vec<Expr>),
    /// Literals, names and anything without subexpressions.
    Leaf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallExpr {
    pub id: CallId,
    /// Source text of the whole call, used in messages
    pub text: String,
    /// The receiver for `recv.method(..)` calls
    #[serde(default)]
    pub receiver: Option<Box<Expr>>,
    #[serde(default)]
    pub args: Vec<Expr>,
    #[serde(default)]
    pub span: Span,
}

/// `try { body } catch (..) { .. } finally { .. }`
///
/// Only `body` is the protected region; handlers and `finally` run
/// unprotected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TryExpr {
    pub body: Box<Expr>,
    #[serde(default)]
    pub catches: Vec<CatchClause>,
    #[serde(default)]
    pub finally: Option<Box<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatchClause {
    #[serde(default)]
    pub param: Option<Ident>,
    /// The caught type as written, e.g. `IOException`
    #[serde(default)]
    pub ty: Option<String>,
    pub body: Expr,
}
