// Allow large errors because this is a compiler - we expect large errors.
#![allow(clippy::result_large_err)]

mod xform_eliminate_dead_code;
mod xform_fold_constants;

use ferrost_dsl::{common::Library, diagnostic::Diagnostic};
use log::debug;

/// Rewrites the library into a smaller equivalent program: constant
/// subexpressions become literals, then statements that a literal
/// condition makes unreachable are removed.
///
/// Optimizing twice yields the same tree as optimizing once.
pub fn optimize(library: Library) -> Result<Library, Diagnostic> {
    let xforms: Vec<(&str, fn(Library) -> Result<Library, Diagnostic>)> = vec![
        ("fold_constants", xform_fold_constants::apply),
        ("eliminate_dead_code", xform_eliminate_dead_code::apply),
    ];

    let mut library = library;
    for (name, apply) in xforms {
        debug!("Running optimizer pass {}", name);
        library = apply(library)?;
    }

    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrost_dsl::core::{FileId, Id};
    use ferrost_dsl::common::*;
    use ferrost_dsl::textual::*;
    use ferrost_parser::parse_program;
    use proptest::prelude::*;

    fn parse(program: &str) -> Library {
        parse_program(program, &FileId::default()).unwrap()
    }

    #[test]
    fn optimize_when_literal_arithmetic_then_assignment_is_literal() {
        let optimized = optimize(parse(
            "
PROGRAM MAIN
VAR
x : INTEGER;
END_VAR
x := 2 + 3 * 4;
END_PROGRAM",
        ))
        .unwrap();
        let expected = parse(
            "
PROGRAM MAIN
VAR
x : INTEGER;
END_VAR
x := 14;
END_PROGRAM",
        );
        assert_eq!(expected, optimized);
    }

    #[test]
    fn optimize_when_condition_folds_then_branch_spliced() {
        // The folding pass reduces the comparison to TRUE, and only
        // then can the dead code pass splice the branch.
        let optimized = optimize(parse(
            "
PROGRAM main
IF (1 < 2) THEN
x := 1;
END_IF
END_PROGRAM",
        ))
        .unwrap();
        assert_eq!(parse("PROGRAM main x := 1; END_PROGRAM"), optimized);
    }

    fn arb_operator() -> impl Strategy<Value = Operator> {
        prop_oneof![
            Just(Operator::Add),
            Just(Operator::Sub),
            Just(Operator::Mul),
            Just(Operator::Div),
        ]
    }

    fn arb_compare_op() -> impl Strategy<Value = CompareOp> {
        prop_oneof![
            Just(CompareOp::Or),
            Just(CompareOp::And),
            Just(CompareOp::Eq),
            Just(CompareOp::Ne),
            Just(CompareOp::Lt),
            Just(CompareOp::Gt),
            Just(CompareOp::LtEq),
            Just(CompareOp::GtEq),
        ]
    }

    // Integer and Boolean leaves only: a folded Real can be NaN, which
    // is never equal to itself and would fail the comparison below for
    // reasons unrelated to idempotence.
    fn arb_expr() -> impl Strategy<Value = ExprKind> {
        let leaf = prop_oneof![
            any::<i64>().prop_map(ExprKind::integer_literal),
            any::<bool>().prop_map(ExprKind::boolean_literal),
            "[a-z]{1,2}".prop_map(|name| ExprKind::named_variable(&name)),
        ];
        leaf.prop_recursive(4, 32, 2, |inner| {
            prop_oneof![
                (arb_operator(), inner.clone(), inner.clone())
                    .prop_map(|(op, l, r)| ExprKind::binary(op, l, r)),
                (arb_compare_op(), inner.clone(), inner.clone())
                    .prop_map(|(op, l, r)| ExprKind::compare(op, l, r)),
                inner.clone().prop_map(|term| ExprKind::unary(UnaryOp::Neg, term)),
                inner.clone().prop_map(|term| ExprKind::unary(UnaryOp::Not, term)),
                inner.prop_map(ExprKind::paren),
            ]
        })
    }

    proptest! {
        #[test]
        fn optimize_when_applied_twice_then_tree_unchanged(expr in arb_expr()) {
            let library = Library {
                elements: vec![LibraryElementKind::ProgramDeclaration(ProgramDeclaration {
                    name: Id::from("main"),
                    body: vec![
                        StmtKind::simple_assignment("out", expr.clone()),
                        StmtKind::while_loop(
                            expr,
                            vec![StmtKind::simple_assignment(
                                "n",
                                ExprKind::integer_literal(1),
                            )],
                        ),
                    ],
                })],
            };
            let once = optimize(library).unwrap();
            let twice = optimize(once.clone()).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
