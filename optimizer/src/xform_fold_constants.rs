//! Transform that rewrites expressions over literal operands into the
//! literal result, matching the runtime semantics: wrapping 64-bit
//! integer arithmetic, truncating integer division, and 64-bit float
//! arithmetic when either operand is Real.
//!
//! Division by a literal zero is never folded. The node stays a binary
//! operation so that the runtime division error still fires.
//!
//! The transform also rewrites the multiplicative and additive
//! identities (`x*1`, `1*x`, `x+0`, `0+x`, `x-0`, `x/1` become `x`;
//! `x*0` and `0*x` become `0`). The two annihilation rules discard an
//! operand, so they apply only when that operand contains no function
//! call.
use core::cmp::Ordering;

use ferrost_dsl::{
    common::*,
    diagnostic::Diagnostic,
    fold::{fold_expr_kind, Fold},
    textual::*,
};

pub fn apply(lib: Library) -> Result<Library, Diagnostic> {
    let mut folder = FoldConstants {};
    folder.fold_library(lib)
}

struct FoldConstants {}

impl Fold<Diagnostic> for FoldConstants {
    fn fold_expr_kind(&mut self, node: ExprKind) -> Result<ExprKind, Diagnostic> {
        // Children first so that nested literal subtrees are already
        // folded when the parent is inspected.
        let node = fold_expr_kind(self, node)?;
        Ok(simplify(node))
    }
}

fn simplify(node: ExprKind) -> ExprKind {
    match node {
        ExprKind::Expression(inner) => match *inner {
            ExprKind::Const(constant) => ExprKind::Const(constant),
            other => ExprKind::paren(other),
        },
        ExprKind::UnaryOp(unary) => simplify_unary(*unary),
        ExprKind::BinaryOp(binary) => simplify_binary(*binary),
        ExprKind::Compare(compare) => simplify_compare(*compare),
        other => other,
    }
}

fn simplify_unary(unary: UnaryExpr) -> ExprKind {
    let UnaryExpr { op, term } = unary;
    match (op, term) {
        (UnaryOp::Neg, ExprKind::Const(ConstantKind::Integer(value))) => {
            ExprKind::integer_literal(value.wrapping_neg())
        }
        (UnaryOp::Neg, ExprKind::Const(ConstantKind::Real(value))) => {
            ExprKind::real_literal(-value)
        }
        (UnaryOp::Not, ExprKind::Const(ConstantKind::Boolean(value))) => {
            ExprKind::boolean_literal(!value)
        }
        (op, term) => ExprKind::unary(op, term),
    }
}

fn simplify_binary(binary: BinaryExpr) -> ExprKind {
    if let (Some(left), Some(right)) = (binary.left.as_const(), binary.right.as_const()) {
        if let Some(folded) = fold_arithmetic(binary.op, left, right) {
            return folded;
        }
    }
    simplify_algebraic(binary)
}

fn fold_arithmetic(op: Operator, left: &ConstantKind, right: &ConstantKind) -> Option<ExprKind> {
    match (left, right) {
        (ConstantKind::Integer(l), ConstantKind::Integer(r)) => fold_integer(op, *l, *r),
        (ConstantKind::Integer(l), ConstantKind::Real(r)) => fold_real(op, *l as f64, *r),
        (ConstantKind::Real(l), ConstantKind::Integer(r)) => fold_real(op, *l, *r as f64),
        (ConstantKind::Real(l), ConstantKind::Real(r)) => fold_real(op, *l, *r),
        _ => None,
    }
}

fn fold_integer(op: Operator, l: i64, r: i64) -> Option<ExprKind> {
    match op {
        Operator::Add => Some(ExprKind::integer_literal(l.wrapping_add(r))),
        Operator::Sub => Some(ExprKind::integer_literal(l.wrapping_sub(r))),
        Operator::Mul => Some(ExprKind::integer_literal(l.wrapping_mul(r))),
        Operator::Div if r != 0 => Some(ExprKind::integer_literal(l.wrapping_div(r))),
        Operator::Div => None,
    }
}

fn fold_real(op: Operator, l: f64, r: f64) -> Option<ExprKind> {
    match op {
        Operator::Add => Some(ExprKind::real_literal(l + r)),
        Operator::Sub => Some(ExprKind::real_literal(l - r)),
        Operator::Mul => Some(ExprKind::real_literal(l * r)),
        Operator::Div if r != 0.0 => Some(ExprKind::real_literal(l / r)),
        Operator::Div => None,
    }
}

fn simplify_algebraic(binary: BinaryExpr) -> ExprKind {
    let BinaryExpr { op, left, right } = binary;
    match op {
        Operator::Mul => {
            if is_integer(&right, 1) {
                return left;
            }
            if is_integer(&left, 1) {
                return right;
            }
            if is_integer(&right, 0) && call_free(&left) {
                return ExprKind::integer_literal(0);
            }
            if is_integer(&left, 0) && call_free(&right) {
                return ExprKind::integer_literal(0);
            }
            ExprKind::binary(op, left, right)
        }
        Operator::Add => {
            if is_integer(&right, 0) {
                return left;
            }
            if is_integer(&left, 0) {
                return right;
            }
            ExprKind::binary(op, left, right)
        }
        Operator::Sub if is_integer(&right, 0) => left,
        Operator::Div if is_integer(&right, 1) => left,
        _ => ExprKind::binary(op, left, right),
    }
}

fn simplify_compare(compare: CompareExpr) -> ExprKind {
    let folded = match (compare.left.as_const(), compare.right.as_const()) {
        (Some(ConstantKind::Boolean(l)), Some(ConstantKind::Boolean(r))) => match compare.op {
            CompareOp::And => Some(*l && *r),
            CompareOp::Or => Some(*l || *r),
            CompareOp::Eq => Some(l == r),
            CompareOp::Ne => Some(l != r),
            _ => None,
        },
        (Some(ConstantKind::Integer(l)), Some(ConstantKind::Integer(r))) => {
            decide_order(compare.op, l.cmp(r))
        }
        (Some(ConstantKind::Integer(l)), Some(ConstantKind::Real(r))) => {
            (*l as f64).partial_cmp(r).and_then(|order| decide_order(compare.op, order))
        }
        (Some(ConstantKind::Real(l)), Some(ConstantKind::Integer(r))) => {
            l.partial_cmp(&(*r as f64)).and_then(|order| decide_order(compare.op, order))
        }
        (Some(ConstantKind::Real(l)), Some(ConstantKind::Real(r))) => {
            l.partial_cmp(r).and_then(|order| decide_order(compare.op, order))
        }
        _ => None,
    };
    match folded {
        Some(value) => ExprKind::boolean_literal(value),
        None => ExprKind::Compare(Box::new(compare)),
    }
}

/// The Boolean a relational operator yields for the operand ordering.
/// AND and OR do not order numbers and never decide.
fn decide_order(op: CompareOp, order: Ordering) -> Option<bool> {
    match op {
        CompareOp::Eq => Some(order == Ordering::Equal),
        CompareOp::Ne => Some(order != Ordering::Equal),
        CompareOp::Lt => Some(order == Ordering::Less),
        CompareOp::Gt => Some(order == Ordering::Greater),
        CompareOp::LtEq => Some(order != Ordering::Greater),
        CompareOp::GtEq => Some(order != Ordering::Less),
        CompareOp::And | CompareOp::Or => None,
    }
}

fn is_integer(expr: &ExprKind, expected: i64) -> bool {
    matches!(expr.as_const(), Some(ConstantKind::Integer(value)) if *value == expected)
}

/// Whether the expression contains no function call anywhere in its
/// tree, including inside array subscripts.
fn call_free(expr: &ExprKind) -> bool {
    match expr {
        ExprKind::Function(_) => false,
        ExprKind::Compare(compare) => call_free(&compare.left) && call_free(&compare.right),
        ExprKind::BinaryOp(binary) => call_free(&binary.left) && call_free(&binary.right),
        ExprKind::UnaryOp(unary) => call_free(&unary.term),
        ExprKind::Expression(inner) => call_free(inner),
        ExprKind::Const(_) => true,
        ExprKind::Variable(Variable::Named(_)) => true,
        ExprKind::Variable(Variable::Array(array)) => array.subscripts.iter().all(call_free),
    }
}
