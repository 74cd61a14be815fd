use core::fmt;

use crate::error::RuntimeError;

/// A value a running program computes. `Void` is the result of a typed
/// function that finished without executing RETURN; any operation on it
/// fails.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Void,
}

impl Value {
    /// The integer this value holds. Reals do not narrow.
    pub fn as_int(self) -> Result<i64, RuntimeError> {
        match self {
            Value::Integer(value) => Ok(value),
            other => Err(RuntimeError::InvalidOperandType {
                expected: "INTEGER",
                found: other.type_name(),
            }),
        }
    }

    /// The float this value holds. An Integer widens; this is the one
    /// implicit conversion.
    pub fn as_real(self) -> Result<f64, RuntimeError> {
        match self {
            Value::Real(value) => Ok(value),
            Value::Integer(value) => Ok(value as f64),
            other => Err(RuntimeError::InvalidOperandType {
                expected: "REAL",
                found: other.type_name(),
            }),
        }
    }

    pub fn as_bool(self) -> Result<bool, RuntimeError> {
        match self {
            Value::Boolean(value) => Ok(value),
            other => Err(RuntimeError::InvalidOperandType {
                expected: "BOOLEAN",
                found: other.type_name(),
            }),
        }
    }

    /// The tag name, for error messages.
    pub fn type_name(self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Boolean(_) => "BOOLEAN",
            Value::Void => "VOID",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{value}"),
            // {:?} keeps the decimal point on whole values.
            Value::Real(value) => write!(f, "{value:?}"),
            Value::Boolean(true) => write!(f, "TRUE"),
            Value::Boolean(false) => write!(f, "FALSE"),
            Value::Void => write!(f, "VOID"),
        }
    }
}
