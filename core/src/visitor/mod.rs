//! Read-only traversal of syntax trees.
//!
//! Implement [`Visitor`] and override [`Visitor::visit_expr`] to inspect
//! nodes; call [`walk_expr`] from the override to keep descending.

use std::collections::BTreeSet;

use crate::parser::{Expr, ExprKind};

/// Identifier names referenced by an expression, in sorted order.
pub type IdentifierSet = BTreeSet<String>;

pub trait Visitor {
    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
}

/// Visits every direct child of `expr`, in evaluation order.
pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    match &expr.kind {
        ExprKind::Keyword(_) | ExprKind::Number(_) | ExprKind::Str(_) | ExprKind::Ident(_) => {}
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand),
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        ExprKind::Ternary {
            check,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(check);
            visitor.visit_expr(then_branch);
            visitor.visit_expr(else_branch);
        }
        ExprKind::Grouping(inner) => visitor.visit_expr(inner),
        ExprKind::Call { args, .. } => {
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Field { object, .. } => visitor.visit_expr(object),
        ExprKind::Index { object, key } => {
            visitor.visit_expr(key);
            visitor.visit_expr(object);
        }
    }
}

#[derive(Default)]
struct IdentifierCollector {
    identifiers: IdentifierSet,
}

impl Visitor for IdentifierCollector {
    fn visit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Ident(name) | ExprKind::Call { callee: name, .. } => {
                self.identifiers.insert(name.clone());
            }
            _ => {}
        }
        walk_expr(self, expr);
    }
}

/// Every identifier the expression may look up, function names included.
/// Field keys (`b` in `a.b`) are not identifiers.
pub fn find_identifiers(ast: Option<&Expr>) -> IdentifierSet {
    let mut collector = IdentifierCollector::default();
    if let Some(expr) = ast {
        collector.visit_expr(expr);
    }
    collector.identifiers
}

#[derive(Default)]
struct NodeCounter {
    count: usize,
}

impl Visitor for NodeCounter {
    fn visit_expr(&mut self, expr: &Expr) {
        self.count += 1;
        walk_expr(self, expr);
    }
}

/// Number of nodes in the tree, which is the most steps evaluating it can take.
pub fn count_nodes(expr: &Expr) -> usize {
    let mut counter = NodeCounter::default();
    counter.visit_expr(expr);
    counter.count
}
