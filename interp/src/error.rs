use std::fmt;

/// Runtime errors that halt execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuntimeError {
    DivisionByZero,
    InvalidOperandType {
        expected: &'static str,
        found: &'static str,
    },
    OutOfBounds {
        variable: String,
        subscript: i64,
    },
    UndefinedVariable(String),
    UndefinedFunction(String),
    NoProgram,
    DuplicateProgram(String),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::DivisionByZero => write!(f, "division by zero"),
            RuntimeError::InvalidOperandType { expected, found } => {
                write!(f, "invalid operand type: expected {expected}, found {found}")
            }
            RuntimeError::OutOfBounds {
                variable,
                subscript,
            } => {
                write!(
                    f,
                    "subscript {subscript} is outside the declared bounds of '{variable}'"
                )
            }
            RuntimeError::UndefinedVariable(name) => write!(f, "undefined variable '{name}'"),
            RuntimeError::UndefinedFunction(name) => write!(f, "undefined function '{name}'"),
            RuntimeError::NoProgram => write!(f, "the library declares no program to run"),
            RuntimeError::DuplicateProgram(name) => {
                write!(f, "more than one program declared: '{name}'")
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
