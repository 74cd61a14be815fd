//! Integration tests for array declarations, element access, and the
//! dense row-major storage behind them.

mod common;

use common::{run, run_error};
use ferrost_interp::{RuntimeError, Value};

#[test]
fn execute_when_loop_fills_array_then_elements_readable() {
    let source = "
        PROGRAM main
          VAR squares : ARRAY [0..4] OF INTEGER; END_VAR
          FOR i := 0 TO 4 DO
            squares[i] := i * i;
          END_FOR
        END_PROGRAM";
    let env = run(source);

    assert_eq!(Some(Value::Integer(0)), env.element("squares", &[0]));
    assert_eq!(Some(Value::Integer(9)), env.element("squares", &[3]));
    assert_eq!(Some(Value::Integer(16)), env.element("squares", &[4]));
}

#[test]
fn execute_when_negative_bounds_then_subscripts_rebase() {
    let source = "
        PROGRAM main
          VAR grid : ARRAY [-1..1, -1..1] OF INTEGER; END_VAR
          grid[-1, 1] := 5;
          grid[1, -1] := 7;
        END_PROGRAM";
    let env = run(source);

    assert_eq!(Some(Value::Integer(5)), env.element("grid", &[-1, 1]));
    assert_eq!(Some(Value::Integer(7)), env.element("grid", &[1, -1]));
    assert_eq!(Some(Value::Integer(0)), env.element("grid", &[0, 0]));
}

#[test]
fn execute_when_initializer_shorter_than_capacity_then_tail_defaults() {
    // Row-major: the three values land in [0,0], [0,1], [1,0].
    let source = "
        PROGRAM main
          VAR t : ARRAY [0..2, 0..1] OF INTEGER := [1, 2, 3]; END_VAR
        END_PROGRAM";
    let env = run(source);

    assert_eq!(Some(Value::Integer(1)), env.element("t", &[0, 0]));
    assert_eq!(Some(Value::Integer(2)), env.element("t", &[0, 1]));
    assert_eq!(Some(Value::Integer(3)), env.element("t", &[1, 0]));
    assert_eq!(Some(Value::Integer(0)), env.element("t", &[1, 1]));
    assert_eq!(Some(Value::Integer(0)), env.element("t", &[2, 1]));
}

#[test]
fn execute_when_integer_stored_in_real_array_then_widens() {
    let source = "
        PROGRAM main
          VAR r : ARRAY [0..1] OF REAL := [1]; END_VAR
          r[1] := 3;
        END_PROGRAM";
    let env = run(source);

    assert_eq!(Some(Value::Real(1.0)), env.element("r", &[0]));
    assert_eq!(Some(Value::Real(3.0)), env.element("r", &[1]));
}

#[test]
fn execute_when_element_read_in_expression_then_value_flows() {
    let source = "
        PROGRAM main
          VAR data : ARRAY [1..3] OF INTEGER := [10, 20, 30]; END_VAR
          VAR sum : INTEGER; END_VAR
          FOR i := 1 TO 3 DO
            sum := sum + data[i];
          END_FOR
        END_PROGRAM";
    let env = run(source);

    assert_eq!(Some(Value::Integer(60)), env.value("sum"));
}

#[test]
fn execute_when_computed_subscript_outside_bounds_then_error() {
    let source = "
        PROGRAM main
          VAR a : ARRAY [0..2] OF INTEGER; END_VAR
          VAR i : INTEGER := 5; END_VAR
          a[i] := 1;
        END_PROGRAM";

    assert_eq!(
        RuntimeError::OutOfBounds {
            variable: String::from("a"),
            subscript: 5,
        },
        run_error(source)
    );
}

#[test]
fn execute_when_subscript_below_lower_bound_then_error() {
    let source = "
        PROGRAM main
          VAR a : ARRAY [1..3] OF INTEGER; END_VAR
          VAR i : INTEGER; END_VAR
          a[i] := 1;
        END_PROGRAM";

    assert_eq!(
        RuntimeError::OutOfBounds {
            variable: String::from("a"),
            subscript: 0,
        },
        run_error(source)
    );
}
