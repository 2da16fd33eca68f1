//! Builders for hand-written syntax trees in tests.
//!
//! A [`Fixture`] owns the source text of a unit and locates spans by
//! searching it, so trees built in tests point at real text:
//!
//! ```
//! use netguard_syntax::testing::*;
//!
//! let fx = Fixture::new("Client.kt", "fun f() { fetch() }");
//! let unit = fx.unit(vec![item(fx.function("f", "Client.f", vec![], vec![fx.call(1, "fetch()")]))]);
//! assert_eq!(netguard_syntax::calls(&unit).len(), 1);
//! ```

use netguard_source::Span;

use crate::ast::{
    Annotation, CallExpr, CallId, CatchClause, ClassDecl, Expr, ExprKind, Function, Ident, Item, ItemKind,
    ProgramUnit, Property, TryExpr,
};

pub struct Fixture {
    path: String,
    source: String,
}

impl Fixture {
    pub fn new(path: &str, source: &str) -> Self {
        Fixture {
            path: path.to_string(),
            source: source.to_string(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Span of the first occurrence of `text`.
    pub fn span_of(&self, text: &str) -> Span {
        self.span_of_nth(text, 0)
    }

    /// Span of the `n`th (0-based) occurrence of `text`.
    ///
    /// Panics when the text does not occur that often; fixtures are test code.
    pub fn span_of_nth(&self, text: &str, n: usize) -> Span {
        let (start, _) = self
            .source
            .match_indices(text)
            .nth(n)
            .unwrap_or_else(|| panic!("`{text}` does not occur {} time(s) in fixture", n + 1));
        Span::new(start, start + text.len())
    }

    pub fn unit(&self, items: Vec<Item>) -> ProgramUnit {
        ProgramUnit {
            path: self.path.clone(),
            source: self.source.clone(),
            items,
        }
    }

    /// A call located at the first occurrence of `text`.
    pub fn call(&self, id: u32, text: &str) -> Expr {
        self.call_nth(id, text, 0)
    }

    pub fn call_nth(&self, id: u32, text: &str, n: usize) -> Expr {
        call_expr(id, text, self.span_of_nth(text, n), None, vec![])
    }

    /// `receiver.method(..)`, where `text` covers the whole chain.
    pub fn method_call(&self, id: u32, text: &str, receiver: Expr) -> Expr {
        call_expr(id, text, self.span_of(text), Some(receiver), vec![])
    }

    pub fn call_with_args(&self, id: u32, text: &str, args: Vec<Expr>) -> Expr {
        call_expr(id, text, self.span_of(text), None, args)
    }

    /// A function named `name`; an empty `qualified` leaves it unresolved.
    pub fn function(&self, name: &str, qualified: &str, annotations: Vec<Annotation>, body: Vec<Expr>) -> Function {
        function(Some(Ident::new(name, self.span_of(name))), qualified, annotations, body)
    }
}

fn call_expr(id: u32, text: &str, span: Span, receiver: Option<Expr>, args: Vec<Expr>) -> Expr {
    Expr {
        kind: ExprKind::Call(CallExpr {
            id: CallId(id),
            text: text.to_string(),
            receiver: receiver.map(Box::new),
            args,
            span,
        }),
        span,
    }
}

/// A call without a meaningful location.
pub fn call(id: u32, text: &str) -> Expr {
    call_expr(id, text, Span::default(), None, vec![])
}

pub fn function(name: Option<Ident>, qualified: &str, annotations: Vec<Annotation>, body: Vec<Expr>) -> Function {
    Function {
        name,
        qualified_name: (!qualified.is_empty()).then(|| qualified.to_string()),
        annotations,
        body: Some(block(body)),
        span: Span::default(),
    }
}

pub fn named(name: &str) -> Option<Ident> {
    Some(Ident::new(name, Span::default()))
}

/// An annotation as written, without a resolved qualified name.
pub fn annotation(name: &str) -> Annotation {
    Annotation {
        name: name.to_string(),
        qualified_name: None,
        span: Span::default(),
    }
}

pub fn resolved_annotation(name: &str, qualified: &str) -> Annotation {
    Annotation {
        qualified_name: Some(qualified.to_string()),
        ..annotation(name)
    }
}

pub fn block(exprs: Vec<Expr>) -> Expr {
    expr(ExprKind::Block(exprs))
}

pub fn compound(exprs: Vec<Expr>) -> Expr {
    expr(ExprKind::Compound(exprs))
}

pub fn leaf() -> Expr {
    expr(ExprKind::Leaf)
}

pub fn lambda(body: Vec<Expr>) -> Expr {
    expr(ExprKind::Lambda(Box::new(block(body))))
}

pub fn local_function(function: Function) -> Expr {
    expr(ExprKind::LocalFunction(Box::new(function)))
}

/// `try { body } catch (e: Exception) { handler }`
pub fn try_catch(body: Vec<Expr>, handler: Vec<Expr>) -> Expr {
    try_expr(body, vec![handler], None)
}

pub fn try_expr(body: Vec<Expr>, handlers: Vec<Vec<Expr>>, finally: Option<Vec<Expr>>) -> Expr {
    expr(ExprKind::Try(TryExpr {
        body: Box::new(block(body)),
        catches: handlers
            .into_iter()
            .map(|handler| CatchClause {
                param: named("e"),
                ty: Some("Exception".to_string()),
                body: block(handler),
            })
            .collect(),
        finally: finally.map(|exprs| Box::new(block(exprs))),
    }))
}

pub fn item(function: Function) -> Item {
    Item {
        kind: ItemKind::Function(function),
        span: Span::default(),
    }
}

pub fn class(name: &str, qualified: &str, items: Vec<Item>) -> Item {
    Item {
        kind: ItemKind::Class(ClassDecl {
            name: Ident::new(name, Span::default()),
            qualified_name: (!qualified.is_empty()).then(|| qualified.to_string()),
            annotations: vec![],
            items,
        }),
        span: Span::default(),
    }
}

pub fn property(name: &str, initializer: Expr) -> Item {
    Item {
        kind: ItemKind::Property(Property {
            name: Ident::new(name, Span::default()),
            initializer: Some(initializer),
        }),
        span: Span::default(),
    }
}

fn expr(kind: ExprKind) -> Expr {
    Expr {
        kind,
        span: Span::default(),
    }
}
