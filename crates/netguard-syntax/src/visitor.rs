//! Read-only traversal over a [`ProgramUnit`].
//!
//! Implementors override the `visit_*` hooks they care about and call the
//! matching `walk_*` function to continue into children. Children are always
//! visited in source order.

use crate::ast::{CallExpr, ClassDecl, Expr, ExprKind, Function, Item, ItemKind, ProgramUnit, Property, TryExpr};

pub trait Visitor<'ast>: Sized {
    fn visit_item(&mut self, item: &'ast Item) {
        walk_item(self, item)
    }

    fn visit_function(&mut self, function: &'ast Function) {
        walk_function(self, function)
    }

    fn visit_class(&mut self, class: &'ast ClassDecl) {
        walk_class(self, class)
    }

    fn visit_property(&mut self, property: &'ast Property) {
        walk_property(self, property)
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr)
    }

    fn visit_call(&mut self, call: &'ast CallExpr) {
        walk_call(self, call)
    }

    fn visit_try(&mut self, try_expr: &'ast TryExpr) {
        walk_try(self, try_expr)
    }
}

pub fn walk_unit<'ast, V: Visitor<'ast>>(visitor: &mut V, unit: &'ast ProgramUnit) {
    for item in &unit.items {
        visitor.visit_item(item);
    }
}

pub fn walk_item<'ast, V: Visitor<'ast>>(visitor: &mut V, item: &'ast Item) {
    match &item.kind {
        ItemKind::Function(function) => visitor.visit_function(function),
        ItemKind::Class(class) => visitor.visit_class(class),
        ItemKind::Property(property) => visitor.visit_property(property),
    }
}

pub fn walk_function<'ast, V: Visitor<'ast>>(visitor: &mut V, function: &'ast Function) {
    if let Some(body) = &function.body {
        visitor.visit_expr(body);
    }
}

pub fn walk_class<'ast, V: Visitor<'ast>>(visitor: &mut V, class: &'ast ClassDecl) {
    for item in &class.items {
        visitor.visit_item(item);
    }
}

pub fn walk_property<'ast, V: Visitor<'ast>>(visitor: &mut V, property: &'ast Property) {
    if let Some(initializer) = &property.initializer {
        visitor.visit_expr(initializer);
    }
}

/// The effects scanner carries scope state through its own copy of this
/// traversal; a new `ExprKind` must be handled there too.
pub fn walk_expr<'ast, V: Visitor<'ast>>(visitor: &mut V, expr: &'ast Expr) {
    match &expr.kind {
        ExprKind::Call(call) => visitor.visit_call(call),
        ExprKind::Try(try_expr) => visitor.visit_try(try_expr),
        ExprKind::Block(exprs) | ExprKind::Compound(exprs) => {
            for expr in exprs {
                visitor.visit_expr(expr);
            }
        }
        ExprKind::Lambda(body) => visitor.visit_expr(body),
        ExprKind::LocalFunction(function) => visitor.visit_function(function),
        ExprKind::Leaf => {}
    }
}

pub fn walk_call<'ast, V: Visitor<'ast>>(visitor: &mut V, call: &'ast CallExpr) {
    if let Some(receiver) = &call.receiver {
        visitor.visit_expr(receiver);
    }
    for arg in &call.args {
        visitor.visit_expr(arg);
    }
}

pub fn walk_try<'ast, V: Visitor<'ast>>(visitor: &mut V, try_expr: &'ast TryExpr) {
    visitor.visit_expr(&try_expr.body);
    for catch in &try_expr.catches {
        visitor.visit_expr(&catch.body);
    }
    if let Some(finally) = &try_expr.finally {
        visitor.visit_expr(finally);
    }
}

/// Every call expression in the unit, outer calls before the calls nested in
/// their receiver and arguments.
pub fn calls(unit: &ProgramUnit) -> Vec<&CallExpr> {
    struct Calls<'ast>(Vec<&'ast CallExpr>);

    impl<'ast> Visitor<'ast> for Calls<'ast> {
        fn visit_call(&mut self, call: &'ast CallExpr) {
            self.0.push(call);
            walk_call(self, call);
        }
    }

    let mut found = Calls(Vec::new());
    walk_unit(&mut found, unit);
    found.0
}
