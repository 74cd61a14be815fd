//! Provides definitions of objects from the declaration side of the
//! language: libraries, program organization units and variable
//! declarations.
use core::fmt;

use crate::core::{Id, Located, SourceSpan};
use crate::textual::*;

/// Container for a set of program organization units.
///
/// A library is the result of parsing one source file.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Library {
    pub elements: Vec<LibraryElementKind>,
}

impl Library {
    pub fn new() -> Self {
        Library { elements: vec![] }
    }
}

/// The program organization unit declarations that a library contains.
#[derive(Debug, PartialEq, Clone)]
pub enum LibraryElementKind {
    FunctionDeclaration(FunctionDeclaration),
    FunctionBlockDeclaration(FunctionBlockDeclaration),
    ProgramDeclaration(ProgramDeclaration),
}

/// Elementary type names.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TypeName {
    Integer,
    Real,
    Boolean,
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Integer => write!(f, "INTEGER"),
            TypeName::Real => write!(f, "REAL"),
            TypeName::Boolean => write!(f, "BOOLEAN"),
        }
    }
}

/// Literal constants.
#[derive(Debug, PartialEq, Clone)]
pub enum ConstantKind {
    Integer(i64),
    Real(f64),
    Boolean(bool),
}

impl ConstantKind {
    /// The elementary type that the constant denotes.
    pub fn type_name(&self) -> TypeName {
        match self {
            ConstantKind::Integer(_) => TypeName::Integer,
            ConstantKind::Real(_) => TypeName::Real,
            ConstantKind::Boolean(_) => TypeName::Boolean,
        }
    }
}

impl fmt::Display for ConstantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantKind::Integer(value) => write!(f, "{}", value),
            ConstantKind::Real(value) => write!(f, "{:?}", value),
            ConstantKind::Boolean(true) => write!(f, "TRUE"),
            ConstantKind::Boolean(false) => write!(f, "FALSE"),
        }
    }
}

/// The kind of declaration block that a variable was declared in.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VariableType {
    /// Local variable (`VAR`).
    Var,
    /// Input parameter (`VAR_INPUT`).
    Input,
    /// Output variable (`VAR_OUTPUT`).
    Output,
}

/// One dimension of an array declaration: the inclusive lower and
/// upper index bounds.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Subrange {
    pub lo: i64,
    pub hi: i64,
}

impl Subrange {
    pub fn new(lo: i64, hi: i64) -> Self {
        Subrange { lo, hi }
    }

    /// The number of elements in the dimension. Zero when the bounds
    /// are inverted.
    pub fn capacity(&self) -> usize {
        let count = (self.hi as i128) - (self.lo as i128) + 1;
        count.clamp(0, usize::MAX as i128) as usize
    }
}

impl fmt::Display for Subrange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.lo, self.hi)
    }
}

/// Declaration of a scalar variable.
#[derive(Debug, PartialEq, Clone)]
pub struct VarDecl {
    pub name: Id,
    pub var_type: VariableType,
    pub type_name: TypeName,
    pub initializer: Option<ExprKind>,
}

impl VarDecl {
    pub fn simple(name: &str, type_name: TypeName) -> Self {
        VarDecl {
            name: Id::from(name),
            var_type: VariableType::Var,
            type_name,
            initializer: None,
        }
    }

    pub fn with_initializer(mut self, initializer: ExprKind) -> Self {
        self.initializer = Some(initializer);
        self
    }
}

impl Located for VarDecl {
    fn span(&self) -> SourceSpan {
        self.name.span()
    }
}

/// Declaration of an array variable with one or more dimensions.
///
/// The optional initial values fill the array in row-major order.
#[derive(Debug, PartialEq, Clone)]
pub struct ArrayDecl {
    pub name: Id,
    pub var_type: VariableType,
    pub element_type: TypeName,
    pub dims: Vec<Subrange>,
    pub initial_values: Option<Vec<ExprKind>>,
}

impl ArrayDecl {
    /// The total number of elements across all dimensions.
    pub fn capacity(&self) -> usize {
        self.dims
            .iter()
            .map(Subrange::capacity)
            .fold(1usize, |acc, dim| acc.saturating_mul(dim))
    }
}

impl Located for ArrayDecl {
    fn span(&self) -> SourceSpan {
        self.name.span()
    }
}

/// Function declaration. A function optionally declares a return type;
/// a function without one cannot be used in an expression.
#[derive(Debug, PartialEq, Clone)]
pub struct FunctionDeclaration {
    pub name: Id,
    pub return_type: Option<TypeName>,
    pub body: Vec<StmtKind>,
}

impl Located for FunctionDeclaration {
    fn span(&self) -> SourceSpan {
        self.name.span()
    }
}

/// Function block declaration. Function blocks parse like functions
/// without a return type; without instances they are not callable.
#[derive(Debug, PartialEq, Clone)]
pub struct FunctionBlockDeclaration {
    pub name: Id,
    pub body: Vec<StmtKind>,
}

impl Located for FunctionBlockDeclaration {
    fn span(&self) -> SourceSpan {
        self.name.span()
    }
}

/// Program declaration. The program body is the entry point for
/// execution.
#[derive(Debug, PartialEq, Clone)]
pub struct ProgramDeclaration {
    pub name: Id,
    pub body: Vec<StmtKind>,
}

impl Located for ProgramDeclaration {
    fn span(&self) -> SourceSpan {
        self.name.span()
    }
}
