//! Integration tests for the errors only execution can raise.

mod common;

use common::run_error;
use ferrost_dsl::common::{Library, LibraryElementKind, ProgramDeclaration};
use ferrost_dsl::core::Id;
use ferrost_dsl::textual::{ExprKind, StmtKind};
use ferrost_interp::{run_library, RuntimeError};

#[test]
fn run_library_when_no_program_then_error() {
    let source = "
        FUNCTION inc : INTEGER
          VAR_INPUT n : INTEGER; END_VAR
          RETURN n + 1;
        END_FUNCTION";

    assert_eq!(RuntimeError::NoProgram, run_error(source));
}

#[test]
fn run_library_when_two_programs_then_error_names_the_second() {
    let source = "
        PROGRAM first
          VAR x : INTEGER; END_VAR
        END_PROGRAM

        PROGRAM second
          VAR x : INTEGER; END_VAR
        END_PROGRAM";

    assert_eq!(
        RuntimeError::DuplicateProgram(String::from("second")),
        run_error(source)
    );
}

#[test]
fn execute_when_literal_division_by_zero_then_error() {
    // Constant folding leaves division by a literal zero alone, so the
    // fault surfaces at run time.
    let source = "
        PROGRAM main
          VAR x : INTEGER; END_VAR
          x := 5 / 0;
        END_PROGRAM";

    assert_eq!(RuntimeError::DivisionByZero, run_error(source));
}

#[test]
fn execute_when_computed_divisor_is_zero_then_error() {
    let source = "
        PROGRAM main
          VAR y : INTEGER; END_VAR
          VAR x : REAL; END_VAR
          x := 5.0 / y;
        END_PROGRAM";

    assert_eq!(RuntimeError::DivisionByZero, run_error(source));
}

#[test]
fn execute_when_left_operand_false_then_right_still_evaluates() {
    // AND does not short circuit: the failing right-hand side runs
    // even though the left already decided the result.
    let source = "
        PROGRAM main
          VAR b : BOOLEAN; END_VAR
          b := FALSE AND (1 / 0 == 0);
        END_PROGRAM";

    assert_eq!(RuntimeError::DivisionByZero, run_error(source));
}

#[test]
fn execute_when_loop_bound_is_not_integer_then_error() {
    // Analysis accepts the Real bound because the promoted comparison
    // is well typed; the end bound itself must still be an Integer
    // value when the loop starts.
    let source = "
        PROGRAM main
          VAR c : INTEGER; END_VAR
          FOR i := 0 TO 2.5 DO
            c := c + 1;
          END_FOR
        END_PROGRAM";

    assert_eq!(
        RuntimeError::InvalidOperandType {
            expected: "INTEGER",
            found: "REAL",
        },
        run_error(source)
    );
}

#[test]
fn run_library_when_analysis_skipped_then_undefined_names_trap() {
    // Running a hand-built library without analysis exercises the
    // executor's own name guard.
    let library = Library {
        elements: vec![LibraryElementKind::ProgramDeclaration(
            ProgramDeclaration {
                name: Id::from("main"),
                body: vec![StmtKind::simple_assignment(
                    "ghost",
                    ExprKind::integer_literal(1),
                )],
            },
        )],
    };

    assert_eq!(
        Err(RuntimeError::UndefinedVariable(String::from("ghost"))),
        run_library(&library).map(|_| ())
    );
}

#[test]
fn run_library_when_analysis_skipped_then_undefined_call_traps() {
    let library = Library {
        elements: vec![LibraryElementKind::ProgramDeclaration(
            ProgramDeclaration {
                name: Id::from("main"),
                body: vec![StmtKind::simple_assignment(
                    "x",
                    ExprKind::function("missing", vec![]),
                )],
            },
        )],
    };

    assert_eq!(
        Err(RuntimeError::UndefinedFunction(String::from("missing"))),
        run_library(&library).map(|_| ())
    );
}
