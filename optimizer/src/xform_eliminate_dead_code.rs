//! Transform that removes statements a literal condition makes
//! unreachable. An `IF` whose condition folded to TRUE is replaced by
//! its then-branch; folded to FALSE, by its else-branch (or nothing).
//! A `WHILE` whose condition folded to FALSE is removed. A `WHILE`
//! whose condition folded to TRUE is retained with its body rewritten:
//! the transform never assumes a loop terminates.
use ferrost_dsl::{
    common::*,
    diagnostic::Diagnostic,
    fold::Fold,
    textual::*,
};

pub fn apply(lib: Library) -> Result<Library, Diagnostic> {
    let mut eliminator = EliminateDeadCode {};
    eliminator.fold_library(lib)
}

struct EliminateDeadCode {}

impl Fold<Diagnostic> for EliminateDeadCode {
    fn fold_stmt_list(&mut self, nodes: Vec<StmtKind>) -> Result<Vec<StmtKind>, Diagnostic> {
        let mut result = Vec::with_capacity(nodes.len());
        for stmt in nodes {
            // Nested lists are rewritten before the statement itself is
            // inspected, so a spliced branch is already clean.
            match self.fold_stmt_kind(stmt)? {
                StmtKind::If(if_stmt) => match decided(&if_stmt.condition) {
                    Some(true) => result.extend(if_stmt.body),
                    Some(false) => result.extend(if_stmt.else_body),
                    None => result.push(StmtKind::If(if_stmt)),
                },
                StmtKind::While(while_stmt) if decided(&while_stmt.condition) == Some(false) => {}
                other => result.push(other),
            }
        }
        Ok(result)
    }
}

/// The condition's literal truth value, if folding reduced it to one.
fn decided(condition: &ExprKind) -> Option<bool> {
    match condition {
        ExprKind::Expression(inner) => decided(inner),
        ExprKind::Const(ConstantKind::Boolean(value)) => Some(*value),
        _ => None,
    }
}
