//! Tree-walking execution of a library. The executor trusts the
//! semantic rules: it assumes every name resolves and every operand
//! has a usable type, and raises a [RuntimeError] only for conditions
//! that analysis cannot decide, such as division by a computed zero or
//! a subscript outside the declared bounds.
use std::cmp::Ordering;
use std::collections::HashMap;

use ferrost_dsl::common::{
    ArrayDecl, ConstantKind, FunctionDeclaration, Library, LibraryElementKind, ProgramDeclaration,
    TypeName, VarDecl, VariableType,
};
use ferrost_dsl::textual::{
    ArrayVariable, Assignment, BinaryExpr, CompareExpr, CompareOp, ExprKind, For, Function, If,
    Operator, Return, StmtKind, UnaryExpr, UnaryOp, Variable, While,
};
use log::{debug, trace};

use crate::environment::{promoted, ArrayValue, Binding, Environment};
use crate::error::RuntimeError;
use crate::value::Value;

/// Runs the single program that the library declares and returns the
/// program's final variable state.
///
/// The library must have passed semantic analysis. Functions are
/// callable from the program and from each other; function blocks
/// have no caller here and never execute.
pub fn run_library(library: &Library) -> Result<Environment, RuntimeError> {
    let mut functions: HashMap<String, &FunctionDeclaration> = HashMap::new();
    let mut program: Option<&ProgramDeclaration> = None;

    for element in &library.elements {
        match element {
            LibraryElementKind::FunctionDeclaration(function) => {
                functions.insert(function.name.lower_case.clone(), function);
            }
            LibraryElementKind::ProgramDeclaration(declaration) => {
                if program.is_some() {
                    return Err(RuntimeError::DuplicateProgram(declaration.name.to_string()));
                }
                program = Some(declaration);
            }
            LibraryElementKind::FunctionBlockDeclaration(_) => {}
        }
    }

    let program = program.ok_or(RuntimeError::NoProgram)?;
    debug!("Running program {}", program.name);

    let interpreter = Interpreter { functions };
    let mut environment = Environment::new();
    interpreter.execute_list(&program.body, &mut environment)?;
    Ok(environment)
}

/// What a completed statement tells the enclosing block: carry on, or
/// unwind to the end of the program organization unit with a value.
enum Flow {
    Normal,
    Return(Value),
}

struct Interpreter<'a> {
    functions: HashMap<String, &'a FunctionDeclaration>,
}

impl Interpreter<'_> {
    fn execute_list(
        &self,
        statements: &[StmtKind],
        env: &mut Environment,
    ) -> Result<Flow, RuntimeError> {
        for statement in statements {
            if let Flow::Return(value) = self.execute(statement, env)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn execute(&self, statement: &StmtKind, env: &mut Environment) -> Result<Flow, RuntimeError> {
        match statement {
            StmtKind::VarDecl(declaration) => self.execute_var_decl(declaration, env),
            StmtKind::ArrayDecl(declaration) => self.execute_array_decl(declaration, env),
            StmtKind::Assignment(assignment) => self.execute_assignment(assignment, env),
            StmtKind::If(statement) => self.execute_if(statement, env),
            StmtKind::While(statement) => self.execute_while(statement, env),
            StmtKind::For(statement) => self.execute_for(statement, env),
            StmtKind::Return(statement) => self.execute_return(statement, env),
        }
    }

    fn execute_var_decl(
        &self,
        declaration: &VarDecl,
        env: &mut Environment,
    ) -> Result<Flow, RuntimeError> {
        let value = match &declaration.initializer {
            Some(initializer) => {
                let value = self.evaluate(initializer, env)?;
                promoted(default_value(declaration.type_name), value)
            }
            None => default_value(declaration.type_name),
        };
        env.declare(&declaration.name, Binding::Scalar(value));
        Ok(Flow::Normal)
    }

    fn execute_array_decl(
        &self,
        declaration: &ArrayDecl,
        env: &mut Environment,
    ) -> Result<Flow, RuntimeError> {
        let mut array = ArrayValue::new(
            declaration.dims.clone(),
            default_value(declaration.element_type),
        );
        if let Some(initial_values) = &declaration.initial_values {
            // Initializers fill elements in row-major order; elements
            // past the list keep the default.
            for (position, initializer) in initial_values.iter().enumerate() {
                let value = self.evaluate(initializer, env)?;
                array.fill(position, value);
            }
        }
        env.declare(&declaration.name, Binding::Array(array));
        Ok(Flow::Normal)
    }

    fn execute_assignment(
        &self,
        assignment: &Assignment,
        env: &mut Environment,
    ) -> Result<Flow, RuntimeError> {
        let value = self.evaluate(&assignment.value, env)?;
        match &assignment.target {
            Variable::Named(named) => env.write(&named.name, value)?,
            Variable::Array(array) => {
                let subscripts = self.subscripts(array, env)?;
                env.write_element(&array.variable, &subscripts, value)?;
            }
        }
        Ok(Flow::Normal)
    }

    fn subscripts(
        &self,
        array: &ArrayVariable,
        env: &mut Environment,
    ) -> Result<Vec<i64>, RuntimeError> {
        array
            .subscripts
            .iter()
            .map(|subscript| self.evaluate(subscript, env)?.as_int())
            .collect()
    }

    fn execute_if(&self, statement: &If, env: &mut Environment) -> Result<Flow, RuntimeError> {
        let condition = self.evaluate(&statement.condition, env)?.as_bool()?;
        let branch = if condition {
            &statement.body
        } else {
            &statement.else_body
        };
        env.enter();
        let flow = self.execute_list(branch, env);
        env.exit();
        flow
    }

    fn execute_while(&self, statement: &While, env: &mut Environment) -> Result<Flow, RuntimeError> {
        loop {
            if !self.evaluate(&statement.condition, env)?.as_bool()? {
                return Ok(Flow::Normal);
            }
            // Declarations in the body do not survive into the next
            // iteration.
            env.enter();
            let flow = self.execute_list(&statement.body, env);
            env.exit();
            if let Flow::Return(value) = flow? {
                return Ok(Flow::Return(value));
            }
        }
    }

    fn execute_for(&self, statement: &For, env: &mut Environment) -> Result<Flow, RuntimeError> {
        // Both bounds evaluate once, in the enclosing scope.
        let start = self.evaluate(&statement.from, env)?;
        let end = self.evaluate(&statement.to, env)?.as_int()?;
        env.enter();
        let flow = self.run_for(statement, start, end, env);
        env.exit();
        flow
    }

    fn run_for(
        &self,
        statement: &For,
        start: Value,
        end: i64,
        env: &mut Environment,
    ) -> Result<Flow, RuntimeError> {
        env.declare(&statement.control, Binding::Scalar(start));
        loop {
            // The control value is read once per iteration; the step
            // rebinds that value plus one, so a body assignment to the
            // control does not change the trip count.
            let current = env.read(&statement.control)?.as_int()?;
            if current > end {
                return Ok(Flow::Normal);
            }
            if let Flow::Return(value) = self.execute_list(&statement.body, env)? {
                return Ok(Flow::Return(value));
            }
            env.write(&statement.control, Value::Integer(current.wrapping_add(1)))?;
        }
    }

    fn execute_return(
        &self,
        statement: &Return,
        env: &mut Environment,
    ) -> Result<Flow, RuntimeError> {
        let value = match &statement.value {
            Some(expression) => self.evaluate(expression, env)?,
            None => Value::Void,
        };
        Ok(Flow::Return(value))
    }

    fn evaluate(&self, expression: &ExprKind, env: &mut Environment) -> Result<Value, RuntimeError> {
        match expression {
            ExprKind::Const(constant) => Ok(literal(constant)),
            ExprKind::Expression(inner) => self.evaluate(inner, env),
            ExprKind::Variable(variable) => self.evaluate_variable(variable, env),
            ExprKind::Function(function) => self.call(function, env),
            ExprKind::UnaryOp(unary) => self.evaluate_unary(unary, env),
            ExprKind::BinaryOp(binary) => self.evaluate_binary(binary, env),
            ExprKind::Compare(compare) => self.evaluate_compare(compare, env),
        }
    }

    fn evaluate_variable(
        &self,
        variable: &Variable,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        match variable {
            Variable::Named(named) => env.read(&named.name),
            Variable::Array(array) => {
                let subscripts = self.subscripts(array, env)?;
                env.read_element(&array.variable, &subscripts)
            }
        }
    }

    fn call(&self, function: &Function, env: &mut Environment) -> Result<Value, RuntimeError> {
        let declaration = self
            .functions
            .get(function.name.lower_case.as_str())
            .copied()
            .ok_or_else(|| RuntimeError::UndefinedFunction(function.name.to_string()))?;

        // Arguments evaluate in the caller's environment, left to
        // right, before the callee's scope exists.
        let mut arguments = Vec::with_capacity(function.arguments.len());
        for argument in &function.arguments {
            arguments.push(self.evaluate(argument, env)?);
        }

        trace!("Calling {}", declaration.name);
        let mut local = Environment::new();
        let parameters = declaration.body.iter().filter_map(input_decl);
        for (parameter, argument) in parameters.zip(arguments) {
            let value = promoted(default_value(parameter.type_name), argument);
            local.declare(&parameter.name, Binding::Scalar(value));
        }

        match self.execute_unit_body(&declaration.body, &mut local)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Void),
        }
    }

    /// Executes a called unit's body. Top-level input declarations
    /// were already bound to the call's arguments, so they do not
    /// execute again.
    fn execute_unit_body(
        &self,
        statements: &[StmtKind],
        env: &mut Environment,
    ) -> Result<Flow, RuntimeError> {
        for statement in statements {
            if input_decl(statement).is_some() {
                continue;
            }
            if let Flow::Return(value) = self.execute(statement, env)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn evaluate_unary(
        &self,
        unary: &UnaryExpr,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        let value = self.evaluate(&unary.term, env)?;
        match unary.op {
            UnaryOp::Neg => match value {
                Value::Integer(term) => Ok(Value::Integer(term.wrapping_neg())),
                Value::Real(term) => Ok(Value::Real(-term)),
                other => Err(RuntimeError::InvalidOperandType {
                    expected: "a number",
                    found: other.type_name(),
                }),
            },
            UnaryOp::Not => Ok(Value::Boolean(!value.as_bool()?)),
        }
    }

    fn evaluate_binary(
        &self,
        binary: &BinaryExpr,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        let left = self.evaluate(&binary.left, env)?;
        let right = self.evaluate(&binary.right, env)?;
        arithmetic(binary.op, left, right)
    }

    fn evaluate_compare(
        &self,
        compare: &CompareExpr,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        // Both operands always evaluate; AND and OR do not short
        // circuit.
        let left = self.evaluate(&compare.left, env)?;
        let right = self.evaluate(&compare.right, env)?;
        comparison(compare.op, left, right)
    }
}

/// The input parameter declaration inside a statement, if the
/// statement is one. Only top-level `VAR_INPUT` declarations of a
/// function body are parameters.
fn input_decl(statement: &StmtKind) -> Option<&VarDecl> {
    match statement {
        StmtKind::VarDecl(declaration) if declaration.var_type == VariableType::Input => {
            Some(declaration)
        }
        _ => None,
    }
}

fn literal(constant: &ConstantKind) -> Value {
    match constant {
        ConstantKind::Integer(value) => Value::Integer(*value),
        ConstantKind::Real(value) => Value::Real(*value),
        ConstantKind::Boolean(value) => Value::Boolean(*value),
    }
}

/// The value a declaration starts with when it has no initializer.
fn default_value(type_name: TypeName) -> Value {
    match type_name {
        TypeName::Integer => Value::Integer(0),
        TypeName::Real => Value::Real(0.0),
        TypeName::Boolean => Value::Boolean(false),
    }
}

/// Integer pairs use wrapping integer arithmetic; any other pair of
/// numbers computes in floating point.
fn arithmetic(op: Operator, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => integer_arithmetic(op, l, r),
        (Value::Integer(_), Value::Real(_))
        | (Value::Real(_), Value::Integer(_))
        | (Value::Real(_), Value::Real(_)) => real_arithmetic(op, left.as_real()?, right.as_real()?),
        _ => {
            // Name the side that is not a number.
            let offender = match left {
                Value::Integer(_) | Value::Real(_) => right,
                _ => left,
            };
            Err(RuntimeError::InvalidOperandType {
                expected: "a number",
                found: offender.type_name(),
            })
        }
    }
}

fn integer_arithmetic(op: Operator, left: i64, right: i64) -> Result<Value, RuntimeError> {
    match op {
        Operator::Add => Ok(Value::Integer(left.wrapping_add(right))),
        Operator::Sub => Ok(Value::Integer(left.wrapping_sub(right))),
        Operator::Mul => Ok(Value::Integer(left.wrapping_mul(right))),
        Operator::Div => {
            if right == 0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Value::Integer(left.wrapping_div(right)))
            }
        }
    }
}

fn real_arithmetic(op: Operator, left: f64, right: f64) -> Result<Value, RuntimeError> {
    match op {
        Operator::Add => Ok(Value::Real(left + right)),
        Operator::Sub => Ok(Value::Real(left - right)),
        Operator::Mul => Ok(Value::Real(left * right)),
        Operator::Div => {
            if right == 0.0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Value::Real(left / right))
            }
        }
    }
}

fn comparison(op: CompareOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match op {
        CompareOp::And => Ok(Value::Boolean(left.as_bool()? && right.as_bool()?)),
        CompareOp::Or => Ok(Value::Boolean(left.as_bool()? || right.as_bool()?)),
        CompareOp::Eq => Ok(Value::Boolean(equals(left, right)?)),
        CompareOp::Ne => Ok(Value::Boolean(!equals(left, right)?)),
        CompareOp::Lt => Ok(Value::Boolean(ordering(left, right)? == Ordering::Less)),
        CompareOp::Gt => Ok(Value::Boolean(ordering(left, right)? == Ordering::Greater)),
        CompareOp::LtEq => Ok(Value::Boolean(ordering(left, right)? != Ordering::Greater)),
        CompareOp::GtEq => Ok(Value::Boolean(ordering(left, right)? != Ordering::Less)),
    }
}

fn equals(left: Value, right: Value) -> Result<bool, RuntimeError> {
    match (left, right) {
        (Value::Boolean(l), Value::Boolean(r)) => Ok(l == r),
        (Value::Integer(l), Value::Integer(r)) => Ok(l == r),
        _ => Ok(left.as_real()? == right.as_real()?),
    }
}

fn ordering(left: Value, right: Value) -> Result<Ordering, RuntimeError> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => Ok(l.cmp(&r)),
        _ => left
            .as_real()?
            .partial_cmp(&right.as_real()?)
            .ok_or(RuntimeError::InvalidOperandType {
                expected: "a comparable number",
                found: "NaN",
            }),
    }
}
