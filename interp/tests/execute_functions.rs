//! Integration tests for function calls: parameter binding, promotion,
//! recursion, and functions that finish without a RETURN.

mod common;

use common::{run, run_error};
use ferrost_interp::{RuntimeError, Value};

#[test]
fn execute_when_integer_argument_for_real_parameter_then_widens() {
    let source = "
        FUNCTION half : REAL
          VAR_INPUT n : REAL; END_VAR
          RETURN n / 2.0;
        END_FUNCTION

        PROGRAM main
          VAR y : REAL; END_VAR
          y := half(5);
        END_PROGRAM";
    let env = run(source);

    assert_eq!(Some(Value::Real(2.5)), env.value("y"));
}

#[test]
fn execute_when_recursive_call_then_unwinds_with_result() {
    let source = "
        FUNCTION factorial : INTEGER
          VAR_INPUT n : INTEGER; END_VAR
          IF n <= 1 THEN
            RETURN 1;
          END_IF
          RETURN n * factorial(n - 1);
        END_FUNCTION

        PROGRAM main
          VAR f : INTEGER; END_VAR
          f := factorial(5);
        END_PROGRAM";
    let env = run(source);

    assert_eq!(Some(Value::Integer(120)), env.value("f"));
}

#[test]
fn execute_when_two_input_blocks_then_parameters_bind_in_order() {
    let source = "
        FUNCTION weighted : REAL
          VAR_INPUT a : INTEGER; END_VAR
          VAR_INPUT w : REAL; END_VAR
          RETURN a * w;
        END_FUNCTION

        PROGRAM main
          VAR y : REAL; END_VAR
          y := weighted(3, 0.5);
        END_PROGRAM";
    let env = run(source);

    assert_eq!(Some(Value::Real(1.5)), env.value("y"));
}

#[test]
fn execute_when_function_locals_then_caller_state_untouched() {
    let source = "
        FUNCTION double : INTEGER
          VAR_INPUT n : INTEGER; END_VAR
          VAR x : INTEGER; END_VAR
          x := n + n;
          RETURN x;
        END_FUNCTION

        PROGRAM main
          VAR x : INTEGER := 7; END_VAR
          VAR y : INTEGER; END_VAR
          y := double(2);
        END_PROGRAM";
    let env = run(source);

    assert_eq!(Some(Value::Integer(7)), env.value("x"));
    assert_eq!(Some(Value::Integer(4)), env.value("y"));
}

#[test]
fn execute_when_no_return_executes_then_stored_result_is_void() {
    // The declaration promises INTEGER but the body never returns, so
    // the call produces VOID and the assignment stores it as-is.
    let source = "
        FUNCTION noret : INTEGER
          VAR_INPUT n : INTEGER; END_VAR
          n := n + 1;
        END_FUNCTION

        PROGRAM main
          VAR x : INTEGER; END_VAR
          x := noret(1);
        END_PROGRAM";
    let env = run(source);

    assert_eq!(Some(Value::Void), env.value("x"));
}

#[test]
fn execute_when_void_result_used_as_operand_then_error() {
    let source = "
        FUNCTION noret : INTEGER
          VAR_INPUT n : INTEGER; END_VAR
          n := n + 1;
        END_FUNCTION

        PROGRAM main
          VAR x : INTEGER; END_VAR
          x := noret(1) * 2;
        END_PROGRAM";

    assert_eq!(
        RuntimeError::InvalidOperandType {
            expected: "a number",
            found: "VOID",
        },
        run_error(source)
    );
}

#[test]
fn execute_when_argument_is_call_then_inner_call_runs_first() {
    let source = "
        FUNCTION inc : INTEGER
          VAR_INPUT n : INTEGER; END_VAR
          RETURN n + 1;
        END_FUNCTION

        PROGRAM main
          VAR x : INTEGER; END_VAR
          x := inc(inc(inc(0)));
        END_PROGRAM";
    let env = run(source);

    assert_eq!(Some(Value::Integer(3)), env.value("x"));
}
