//! Provides definitions of objects from the textual side of the
//! language: statements and expressions.
use core::fmt;

use crate::common::*;
use crate::core::{Id, Located, SourceSpan};

/// A variable reference: either a plain name or an array element
/// selected by subscripts. Used both as an expression and as the
/// target of an assignment.
#[derive(Debug, PartialEq, Clone)]
pub enum Variable {
    Named(NamedVariable),
    Array(ArrayVariable),
}

impl Variable {
    pub fn named(name: &str) -> Variable {
        Variable::Named(NamedVariable {
            name: Id::from(name),
        })
    }

    pub fn array(name: &str, subscripts: Vec<ExprKind>) -> Variable {
        Variable::Array(ArrayVariable {
            variable: Id::from(name),
            subscripts,
        })
    }

    /// The name through which the variable is reached.
    pub fn name(&self) -> &Id {
        match self {
            Variable::Named(named) => &named.name,
            Variable::Array(array) => &array.variable,
        }
    }
}

impl Located for Variable {
    fn span(&self) -> SourceSpan {
        self.name().span()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Named(named) => write!(f, "{}", named),
            Variable::Array(array) => write!(f, "{}", array),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct NamedVariable {
    pub name: Id,
}

impl fmt::Display for NamedVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{}", self.name))
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct ArrayVariable {
    /// The variable that is being accessed by subscript (the array).
    pub variable: Id,
    /// The ordered set of subscripts. These should be expressions that
    /// evaluate to an index.
    pub subscripts: Vec<ExprKind>,
}

impl fmt::Display for ArrayVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{}[...]", self.variable))
    }
}

/// Function call with positional arguments.
#[derive(Debug, PartialEq, Clone)]
pub struct Function {
    pub name: Id,
    pub arguments: Vec<ExprKind>,
}

/// Expression that yields a value derived from the input(s) to the
/// expression.
#[derive(Debug, PartialEq, Clone)]
pub enum ExprKind {
    Compare(Box<CompareExpr>),
    BinaryOp(Box<BinaryExpr>),
    UnaryOp(Box<UnaryExpr>),
    Expression(Box<ExprKind>),
    Const(ConstantKind),
    Variable(Variable),
    Function(Function),
}

impl ExprKind {
    pub fn compare(op: CompareOp, left: ExprKind, right: ExprKind) -> ExprKind {
        ExprKind::Compare(Box::new(CompareExpr { op, left, right }))
    }

    pub fn binary(op: Operator, left: ExprKind, right: ExprKind) -> ExprKind {
        ExprKind::BinaryOp(Box::new(BinaryExpr { op, left, right }))
    }

    pub fn unary(op: UnaryOp, term: ExprKind) -> ExprKind {
        ExprKind::UnaryOp(Box::new(UnaryExpr { op, term }))
    }

    pub fn paren(inner: ExprKind) -> ExprKind {
        ExprKind::Expression(Box::new(inner))
    }

    pub fn named_variable(name: &str) -> ExprKind {
        ExprKind::Variable(Variable::named(name))
    }

    pub fn array_variable(name: &str, subscripts: Vec<ExprKind>) -> ExprKind {
        ExprKind::Variable(Variable::array(name, subscripts))
    }

    pub fn integer_literal(value: i64) -> ExprKind {
        ExprKind::Const(ConstantKind::Integer(value))
    }

    pub fn real_literal(value: f64) -> ExprKind {
        ExprKind::Const(ConstantKind::Real(value))
    }

    pub fn boolean_literal(value: bool) -> ExprKind {
        ExprKind::Const(ConstantKind::Boolean(value))
    }

    pub fn function(name: &str, arguments: Vec<ExprKind>) -> ExprKind {
        ExprKind::Function(Function {
            name: Id::from(name),
            arguments,
        })
    }

    /// The literal the expression denotes, if it is one.
    pub fn as_const(&self) -> Option<&ConstantKind> {
        match self {
            ExprKind::Const(constant) => Some(constant),
            _ => None,
        }
    }
}

impl Located for ExprKind {
    fn span(&self) -> SourceSpan {
        match self {
            ExprKind::Compare(compare) => compare.left.span(),
            ExprKind::BinaryOp(binary) => binary.left.span(),
            ExprKind::UnaryOp(unary) => unary.term.span(),
            ExprKind::Expression(inner) => inner.span(),
            ExprKind::Const(_) => SourceSpan::default(),
            ExprKind::Variable(variable) => variable.span(),
            ExprKind::Function(function) => function.name.span(),
        }
    }
}

/// Comparison and logical operators. These yield a Boolean value.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CompareOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Gt,
    LtEq,
    GtEq,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Or => write!(f, "OR"),
            CompareOp::And => write!(f, "AND"),
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Ne => write!(f, "!="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::LtEq => write!(f, "<="),
            CompareOp::GtEq => write!(f, ">="),
        }
    }
}

/// Arithmetic operators. These yield a number.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Add => write!(f, "+"),
            Operator::Sub => write!(f, "-"),
            Operator::Mul => write!(f, "*"),
            Operator::Div => write!(f, "/"),
        }
    }
}

/// Unary operators.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum UnaryOp {
    /// Arithmetic negation.
    Neg,
    /// Boolean complement.
    Not,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "NOT"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct CompareExpr {
    pub op: CompareOp,
    pub left: ExprKind,
    pub right: ExprKind,
}

#[derive(Debug, PartialEq, Clone)]
pub struct BinaryExpr {
    pub op: Operator,
    pub left: ExprKind,
    pub right: ExprKind,
}

#[derive(Debug, PartialEq, Clone)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub term: ExprKind,
}

/// Statements.
#[derive(Debug, PartialEq, Clone)]
pub enum StmtKind {
    // Declarations (a VAR block contributes one per entry)
    VarDecl(VarDecl),
    ArrayDecl(ArrayDecl),
    Assignment(Assignment),
    // Selection statements
    If(If),
    // Iteration statements
    For(For),
    While(While),
    Return(Return),
}

impl StmtKind {
    pub fn assignment(target: Variable, value: ExprKind) -> StmtKind {
        StmtKind::Assignment(Assignment { target, value })
    }

    pub fn simple_assignment(target: &str, value: ExprKind) -> StmtKind {
        StmtKind::Assignment(Assignment {
            target: Variable::named(target),
            value,
        })
    }

    pub fn if_then(condition: ExprKind, body: Vec<StmtKind>) -> StmtKind {
        StmtKind::If(If {
            condition,
            body,
            else_body: vec![],
        })
    }

    pub fn if_then_else(
        condition: ExprKind,
        body: Vec<StmtKind>,
        else_body: Vec<StmtKind>,
    ) -> StmtKind {
        StmtKind::If(If {
            condition,
            body,
            else_body,
        })
    }

    pub fn while_loop(condition: ExprKind, body: Vec<StmtKind>) -> StmtKind {
        StmtKind::While(While { condition, body })
    }

    pub fn for_loop(control: &str, from: ExprKind, to: ExprKind, body: Vec<StmtKind>) -> StmtKind {
        StmtKind::For(For {
            control: Id::from(control),
            from,
            to,
            body,
        })
    }

    pub fn return_value(value: ExprKind) -> StmtKind {
        StmtKind::Return(Return { value: Some(value) })
    }

    pub fn return_void() -> StmtKind {
        StmtKind::Return(Return { value: None })
    }
}

/// Assigns the value of the expression on the right to the variable on
/// the left.
#[derive(Debug, PartialEq, Clone)]
pub struct Assignment {
    pub target: Variable,
    pub value: ExprKind,
}

/// If selection statement. The else body is empty when no ELSE branch
/// was written.
#[derive(Debug, PartialEq, Clone)]
pub struct If {
    pub condition: ExprKind,
    pub body: Vec<StmtKind>,
    pub else_body: Vec<StmtKind>,
}

/// The for loop statement. The control variable is declared by the
/// loop itself, in the loop's own scope.
#[derive(Debug, PartialEq, Clone)]
pub struct For {
    /// The variable that is assigned and contains the value for each
    /// loop iteration.
    pub control: Id,
    pub from: ExprKind,
    pub to: ExprKind,
    pub body: Vec<StmtKind>,
}

/// The while loop statement.
#[derive(Debug, PartialEq, Clone)]
pub struct While {
    pub condition: ExprKind,
    pub body: Vec<StmtKind>,
}

/// Return from the enclosing program organization unit, optionally
/// with a result value.
#[derive(Debug, PartialEq, Clone)]
pub struct Return {
    pub value: Option<ExprKind>,
}
