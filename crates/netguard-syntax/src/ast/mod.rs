pub mod common;
pub mod expr;
pub mod items;

pub use common::{Annotation, Ident};
pub use expr::{CallExpr, CallId, CatchClause, Expr, ExprKind, TryExpr};
pub use items::{ClassDecl, Function, Item, ItemKind, ProgramUnit, Property};
