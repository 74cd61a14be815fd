//! Runtime storage for variables: a stack of scopes that the executor
//! enters and exits in lock-step with the lexical constructs analysis
//! checked.
use std::collections::HashMap;
use std::collections::LinkedList;

use ferrost_dsl::common::Subrange;
use ferrost_dsl::core::Id;

use crate::error::RuntimeError;
use crate::value::Value;

/// Store promotion: an Integer written into a cell that holds a Real
/// widens to Real. Every other store replaces the cell's value.
pub(crate) fn promoted(cell: Value, value: Value) -> Value {
    match (cell, value) {
        (Value::Real(_), Value::Integer(int)) => Value::Real(int as f64),
        _ => value,
    }
}

/// One declared name: a scalar cell or a dense array.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Binding {
    Scalar(Value),
    Array(ArrayValue),
}

/// Dense row-major array storage. Subscripts are rebased by each
/// dimension's declared lower bound before the flat offset is computed.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ArrayValue {
    dims: Vec<Subrange>,
    data: Vec<Value>,
}

impl ArrayValue {
    /// Creates storage with every element set to the default value.
    pub(crate) fn new(dims: Vec<Subrange>, default: Value) -> Self {
        let capacity = dims
            .iter()
            .map(Subrange::capacity)
            .fold(1usize, |acc, dim| acc.saturating_mul(dim));
        ArrayValue {
            dims,
            data: vec![default; capacity],
        }
    }

    /// Stores an initializer element at a row-major position. Analysis
    /// already bounded the initializer list by the capacity.
    pub(crate) fn fill(&mut self, position: usize, value: Value) {
        self.data[position] = promoted(self.data[position], value);
    }

    /// The row-major offset for the subscripts, or the offending
    /// subscript value when one is outside its dimension.
    fn offset(&self, subscripts: &[i64]) -> Result<usize, i64> {
        let mut offset = 0usize;
        for (subscript, dim) in subscripts.iter().zip(self.dims.iter()) {
            if *subscript < dim.lo || *subscript > dim.hi {
                return Err(*subscript);
            }
            offset = offset * dim.capacity() + (*subscript - dim.lo) as usize;
        }
        Ok(offset)
    }

    fn get(&self, name: &Id, subscripts: &[i64]) -> Result<Value, RuntimeError> {
        match self.offset(subscripts) {
            // In-range subscripts always compute an offset inside data.
            Ok(offset) => Ok(self.data[offset]),
            Err(subscript) => Err(RuntimeError::OutOfBounds {
                variable: name.to_string(),
                subscript,
            }),
        }
    }

    fn set(&mut self, name: &Id, subscripts: &[i64], value: Value) -> Result<(), RuntimeError> {
        match self.offset(subscripts) {
            Ok(offset) => {
                self.data[offset] = promoted(self.data[offset], value);
                Ok(())
            }
            Err(subscript) => Err(RuntimeError::OutOfBounds {
                variable: name.to_string(),
                subscript,
            }),
        }
    }
}

/// A stack of name-to-binding scopes. Names resolve innermost-first;
/// stores find the nearest binding, exactly as analysis resolved them.
#[derive(Debug)]
pub struct Environment {
    stack: LinkedList<HashMap<String, Binding>>,
}

impl Environment {
    pub fn new() -> Self {
        let mut stack = LinkedList::new();
        stack.push_front(HashMap::new());
        Environment { stack }
    }

    pub(crate) fn enter(&mut self) {
        self.stack.push_front(HashMap::new());
    }

    pub(crate) fn exit(&mut self) {
        self.stack.pop_front();
    }

    /// Creates (or replaces) a binding in the innermost scope.
    pub(crate) fn declare(&mut self, name: &Id, binding: Binding) {
        if let Some(scope) = self.stack.front_mut() {
            scope.insert(name.lower_case.clone(), binding);
        }
    }

    fn find(&self, key: &str) -> Option<&Binding> {
        self.stack.iter().find_map(|scope| scope.get(key))
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut Binding> {
        self.stack.iter_mut().find_map(|scope| scope.get_mut(key))
    }

    pub(crate) fn read(&self, name: &Id) -> Result<Value, RuntimeError> {
        match self.find(name.lower_case.as_str()) {
            Some(Binding::Scalar(value)) => Ok(*value),
            Some(Binding::Array(_)) => Err(RuntimeError::InvalidOperandType {
                expected: "a scalar variable",
                found: "an array",
            }),
            None => Err(RuntimeError::UndefinedVariable(name.to_string())),
        }
    }

    pub(crate) fn write(&mut self, name: &Id, value: Value) -> Result<(), RuntimeError> {
        match self.find_mut(name.lower_case.as_str()) {
            Some(Binding::Scalar(cell)) => {
                *cell = promoted(*cell, value);
                Ok(())
            }
            Some(Binding::Array(_)) => Err(RuntimeError::InvalidOperandType {
                expected: "a scalar variable",
                found: "an array",
            }),
            None => Err(RuntimeError::UndefinedVariable(name.to_string())),
        }
    }

    pub(crate) fn read_element(&self, name: &Id, subscripts: &[i64]) -> Result<Value, RuntimeError> {
        match self.find(name.lower_case.as_str()) {
            Some(Binding::Array(array)) => array.get(name, subscripts),
            Some(Binding::Scalar(_)) => Err(RuntimeError::InvalidOperandType {
                expected: "an array",
                found: "a scalar variable",
            }),
            None => Err(RuntimeError::UndefinedVariable(name.to_string())),
        }
    }

    pub(crate) fn write_element(
        &mut self,
        name: &Id,
        subscripts: &[i64],
        value: Value,
    ) -> Result<(), RuntimeError> {
        match self.find_mut(name.lower_case.as_str()) {
            Some(Binding::Array(array)) => array.set(name, subscripts, value),
            Some(Binding::Scalar(_)) => Err(RuntimeError::InvalidOperandType {
                expected: "an array",
                found: "a scalar variable",
            }),
            None => Err(RuntimeError::UndefinedVariable(name.to_string())),
        }
    }

    /// The scalar value bound to the name, if any. For observing final
    /// state after a run.
    pub fn value(&self, name: &str) -> Option<Value> {
        match self.find(&name.to_lowercase()) {
            Some(Binding::Scalar(value)) => Some(*value),
            _ => None,
        }
    }

    /// The array element at the subscripts, if the name is an array
    /// and the subscripts are inside the declared bounds.
    pub fn element(&self, name: &str, subscripts: &[i64]) -> Option<Value> {
        match self.find(&name.to_lowercase()) {
            Some(Binding::Array(array)) => array
                .offset(subscripts)
                .ok()
                .map(|offset| array.data[offset]),
            _ => None,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}
