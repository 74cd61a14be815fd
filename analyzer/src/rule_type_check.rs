//! Semantic rule that declares every name, synthesizes one elementary
//! type per expression, and checks each use against its declaration.
//!
//! Numeric promotion is the only implicit conversion: when the two
//! operand types are Integer and Real, the result type is Real, and a
//! store accepts an Integer value where a Real is declared but never
//! the reverse.
//!
//! ## Passes
//!
//! ```ignore
//! PROGRAM main
//! VAR
//! ratio : REAL;
//! count : INTEGER;
//! END_VAR
//! ratio := count + 1;
//! END_PROGRAM
//! ```
//!
//! ## Fails
//!
//! ```ignore
//! PROGRAM main
//! VAR
//! count : INTEGER;
//! END_VAR
//! count := 0.5;
//! END_PROGRAM
//! ```
use ferrost_dsl::{
    common::*,
    core::{Id, Located},
    diagnostic::{Diagnostic, Label},
    textual::*,
    visitor::Visitor,
};
use ferrost_problems::Problem;

use crate::symbol_table::{Key, SymbolTable};

pub fn apply(lib: &Library) -> Result<(), Diagnostic> {
    let mut visitor = RuleTypeCheck {
        table: SymbolTable::new(),
        unit: Id::from(""),
        return_type: None,
    };
    visitor.walk(lib)
}

impl Key for Id {}

/// What a name in scope denotes.
#[derive(Clone)]
enum SymbolKind {
    /// Scalar variable with its declared type.
    Variable { type_name: TypeName },
    /// Array variable with its element type and declared dimensions.
    Array {
        type_name: TypeName,
        dims: Vec<Subrange>,
    },
    /// Callable function: parameter types in declaration order and the
    /// optional result type.
    Function {
        params: Vec<TypeName>,
        return_type: Option<TypeName>,
    },
    /// Function block or program name. Declared at the top level but
    /// not callable and not usable as a value.
    Unit,
}

/// Whether a value of the source type can be stored where the target
/// type is declared.
fn assignable(target: TypeName, source: TypeName) -> bool {
    target == source || (target == TypeName::Real && source == TypeName::Integer)
}

/// The type of an arithmetic result over the two operand types, or
/// `None` when either operand is not a number.
fn promote(left: TypeName, right: TypeName) -> Option<TypeName> {
    match (left, right) {
        (TypeName::Integer, TypeName::Integer) => Some(TypeName::Integer),
        (TypeName::Integer, TypeName::Real)
        | (TypeName::Real, TypeName::Integer)
        | (TypeName::Real, TypeName::Real) => Some(TypeName::Real),
        _ => None,
    }
}

/// The call signature of a unit: the types of the scalar `VAR_INPUT`
/// declarations at the top level of the body, in declaration order.
fn parameter_types(body: &[StmtKind]) -> Vec<TypeName> {
    body.iter()
        .filter_map(|stmt| match stmt {
            StmtKind::VarDecl(decl) if decl.var_type == VariableType::Input => {
                Some(decl.type_name)
            }
            _ => None,
        })
        .collect()
}

struct RuleTypeCheck {
    table: SymbolTable<Id, SymbolKind>,
    /// The unit whose body is being checked, for anchoring RETURN
    /// diagnostics that have no expression of their own.
    unit: Id,
    /// Declared result type of that unit. RETURN statements are
    /// validated against it.
    return_type: Option<TypeName>,
}

impl RuleTypeCheck {
    fn resolve(&self, name: &Id) -> Result<SymbolKind, Diagnostic> {
        match self.table.find(name) {
            Some(kind) => Ok(kind.clone()),
            None => Err(Diagnostic::problem(
                Problem::UndeclaredSymbol,
                Label::span(
                    &name.span(),
                    format!("'{}' has no declaration in any enclosing scope", name),
                ),
            )),
        }
    }

    /// Checks a statement list in the current scope, stopping at the
    /// first diagnostic.
    fn check_list(&mut self, body: &[StmtKind]) -> Result<(), Diagnostic> {
        for stmt in body {
            self.visit_stmt_kind(stmt)?;
        }
        Ok(())
    }

    /// Checks a statement list inside a fresh scope. The scope is
    /// exited on both the normal and the error path.
    fn check_scope(&mut self, body: &[StmtKind]) -> Result<(), Diagnostic> {
        self.table.enter();
        let result = self.check_list(body);
        self.table.exit();
        result
    }

    /// An IF or WHILE condition must synthesize Boolean.
    fn condition(&mut self, condition: &ExprKind) -> Result<(), Diagnostic> {
        let condition_type = self.expr_type(condition)?;
        if condition_type != TypeName::Boolean {
            return Err(Diagnostic::problem(
                Problem::ConditionTypeError,
                Label::span(&condition.span(), "Condition does not yield TRUE or FALSE"),
            )
            .with_context("actual", &condition_type.to_string()));
        }
        Ok(())
    }

    /// Synthesizes the one elementary type that the expression yields.
    fn expr_type(&mut self, expr: &ExprKind) -> Result<TypeName, Diagnostic> {
        match expr {
            ExprKind::Const(constant) => Ok(constant.type_name()),
            ExprKind::Expression(inner) => self.expr_type(inner),
            ExprKind::Variable(variable) => self.variable_type(variable),
            ExprKind::Function(function) => self.call_type(function),
            ExprKind::UnaryOp(unary) => self.unary_type(unary),
            ExprKind::BinaryOp(binary) => self.binary_type(binary),
            ExprKind::Compare(compare) => self.compare_type(compare),
        }
    }

    /// The scalar type a variable reference yields: the declared type
    /// of a named variable or the element type of a subscripted array.
    fn variable_type(&mut self, variable: &Variable) -> Result<TypeName, Diagnostic> {
        match variable {
            Variable::Named(named) => match self.resolve(&named.name)? {
                SymbolKind::Variable { type_name } => Ok(type_name),
                SymbolKind::Array { .. } => Err(Diagnostic::problem(
                    Problem::TypeMismatch,
                    Label::span(
                        &named.name.span(),
                        format!("Array '{}' requires subscripts here", named.name),
                    ),
                )),
                SymbolKind::Function { .. } | SymbolKind::Unit => Err(Diagnostic::problem(
                    Problem::TypeMismatch,
                    Label::span(
                        &named.name.span(),
                        format!("'{}' is not a variable", named.name),
                    ),
                )),
            },
            Variable::Array(array) => {
                let (element_type, dims) = match self.resolve(&array.variable)? {
                    SymbolKind::Array { type_name, dims } => (type_name, dims),
                    _ => {
                        return Err(Diagnostic::problem(
                            Problem::TypeMismatch,
                            Label::span(
                                &array.variable.span(),
                                format!("'{}' is not an array", array.variable),
                            ),
                        ))
                    }
                };
                if array.subscripts.len() != dims.len() {
                    return Err(Diagnostic::problem(
                        Problem::ArityError,
                        Label::span(
                            &array.variable.span(),
                            format!(
                                "{} subscripts for {} dimensions",
                                array.subscripts.len(),
                                dims.len()
                            ),
                        ),
                    )
                    .with_context_id("array", &array.variable));
                }
                for subscript in &array.subscripts {
                    let subscript_type = self.expr_type(subscript)?;
                    if subscript_type != TypeName::Integer {
                        return Err(Diagnostic::problem(
                            Problem::IndexTypeError,
                            Label::span(
                                &array.variable.span(),
                                format!("Subscript of '{}' is {}", array.variable, subscript_type),
                            ),
                        ));
                    }
                }
                Ok(element_type)
            }
        }
    }

    fn call_type(&mut self, function: &Function) -> Result<TypeName, Diagnostic> {
        let (params, return_type) = match self.resolve(&function.name)? {
            SymbolKind::Function {
                params,
                return_type,
            } => (params, return_type),
            SymbolKind::Unit => {
                return Err(Diagnostic::problem(
                    Problem::TypeMismatch,
                    Label::span(
                        &function.name.span(),
                        format!("'{}' cannot be called without an instance", function.name),
                    ),
                ))
            }
            SymbolKind::Variable { .. } | SymbolKind::Array { .. } => {
                return Err(Diagnostic::problem(
                    Problem::TypeMismatch,
                    Label::span(
                        &function.name.span(),
                        format!("'{}' is not a function", function.name),
                    ),
                ))
            }
        };
        if function.arguments.len() != params.len() {
            return Err(Diagnostic::problem(
                Problem::ArityError,
                Label::span(
                    &function.name.span(),
                    format!(
                        "{} arguments for {} parameters",
                        function.arguments.len(),
                        params.len()
                    ),
                ),
            )
            .with_context_id("function", &function.name));
        }
        for (argument, param) in function.arguments.iter().zip(params.iter()) {
            let argument_type = self.expr_type(argument)?;
            if !assignable(*param, argument_type) {
                return Err(Diagnostic::problem(
                    Problem::TypeMismatch,
                    Label::span(
                        &argument.span(),
                        format!("Argument is not assignable to the {} parameter", param),
                    ),
                )
                .with_context_id("function", &function.name));
            }
        }
        match return_type {
            Some(type_name) => Ok(type_name),
            None => Err(Diagnostic::problem(
                Problem::TypeMismatch,
                Label::span(
                    &function.name.span(),
                    format!("'{}' does not return a value", function.name),
                ),
            )),
        }
    }

    fn unary_type(&mut self, unary: &UnaryExpr) -> Result<TypeName, Diagnostic> {
        let term_type = self.expr_type(&unary.term)?;
        match unary.op {
            UnaryOp::Neg if term_type != TypeName::Boolean => Ok(term_type),
            UnaryOp::Not if term_type == TypeName::Boolean => Ok(TypeName::Boolean),
            _ => Err(Diagnostic::problem(
                Problem::TypeMismatch,
                Label::span(
                    &unary.term.span(),
                    format!("Operator {} does not accept {}", unary.op, term_type),
                ),
            )),
        }
    }

    fn binary_type(&mut self, binary: &BinaryExpr) -> Result<TypeName, Diagnostic> {
        let left = self.expr_type(&binary.left)?;
        let right = self.expr_type(&binary.right)?;
        promote(left, right).ok_or_else(|| {
            Diagnostic::problem(
                Problem::TypeMismatch,
                Label::span(
                    &binary.left.span(),
                    format!("Operator {} requires number operands", binary.op),
                ),
            )
            .with_context("left", &left.to_string())
            .with_context("right", &right.to_string())
        })
    }

    fn compare_type(&mut self, compare: &CompareExpr) -> Result<TypeName, Diagnostic> {
        let left = self.expr_type(&compare.left)?;
        let right = self.expr_type(&compare.right)?;
        let accepted = match compare.op {
            CompareOp::And | CompareOp::Or => {
                left == TypeName::Boolean && right == TypeName::Boolean
            }
            CompareOp::Eq | CompareOp::Ne => {
                promote(left, right).is_some()
                    || (left == TypeName::Boolean && right == TypeName::Boolean)
            }
            CompareOp::Lt | CompareOp::Gt | CompareOp::LtEq | CompareOp::GtEq => {
                promote(left, right).is_some()
            }
        };
        if !accepted {
            return Err(Diagnostic::problem(
                Problem::TypeMismatch,
                Label::span(
                    &compare.left.span(),
                    format!("Operator {} does not accept these operands", compare.op),
                ),
            )
            .with_context("left", &left.to_string())
            .with_context("right", &right.to_string()));
        }
        Ok(TypeName::Boolean)
    }
}

impl Visitor<Diagnostic> for RuleTypeCheck {
    type Value = ();

    fn visit_function_declaration(&mut self, node: &FunctionDeclaration) -> Result<(), Diagnostic> {
        // Declared before the body is checked so the function can call
        // itself.
        self.table.add(
            &node.name,
            SymbolKind::Function {
                params: parameter_types(&node.body),
                return_type: node.return_type,
            },
        )?;
        self.unit = node.name.clone();
        self.return_type = node.return_type;
        let result = self.check_scope(&node.body);
        self.return_type = None;
        result
    }

    fn visit_function_block_declaration(
        &mut self,
        node: &FunctionBlockDeclaration,
    ) -> Result<(), Diagnostic> {
        self.table.add(&node.name, SymbolKind::Unit)?;
        self.unit = node.name.clone();
        self.return_type = None;
        self.check_scope(&node.body)
    }

    fn visit_program_declaration(&mut self, node: &ProgramDeclaration) -> Result<(), Diagnostic> {
        self.table.add(&node.name, SymbolKind::Unit)?;
        self.unit = node.name.clone();
        self.return_type = None;
        self.check_scope(&node.body)
    }

    fn visit_var_decl(&mut self, node: &VarDecl) -> Result<(), Diagnostic> {
        // The initializer is typed before the name is declared, so a
        // self-reference reports the name as undeclared.
        if let Some(initializer) = &node.initializer {
            let initializer_type = self.expr_type(initializer)?;
            if !assignable(node.type_name, initializer_type) {
                return Err(Diagnostic::problem(
                    Problem::TypeMismatch,
                    Label::span(
                        &node.span(),
                        format!("Initializer is not assignable to {}", node.type_name),
                    ),
                )
                .with_context("declared", &node.type_name.to_string())
                .with_context("actual", &initializer_type.to_string()));
            }
        }
        self.table.add(
            &node.name,
            SymbolKind::Variable {
                type_name: node.type_name,
            },
        )
    }

    fn visit_array_decl(&mut self, node: &ArrayDecl) -> Result<(), Diagnostic> {
        if let Some(values) = &node.initial_values {
            if values.len() > node.capacity() {
                return Err(Diagnostic::problem(
                    Problem::InvalidInitializer,
                    Label::span(
                        &node.span(),
                        format!("{} values for {} elements", values.len(), node.capacity()),
                    ),
                )
                .with_context_id("array", &node.name));
            }
            for value in values {
                let value_type = self.expr_type(value)?;
                if !assignable(node.element_type, value_type) {
                    return Err(Diagnostic::problem(
                        Problem::TypeMismatch,
                        Label::span(
                            &node.span(),
                            format!("Element initializer is not assignable to {}", node.element_type),
                        ),
                    )
                    .with_context_id("array", &node.name));
                }
            }
        }
        self.table.add(
            &node.name,
            SymbolKind::Array {
                type_name: node.element_type,
                dims: node.dims.clone(),
            },
        )
    }

    fn visit_assignment(&mut self, node: &Assignment) -> Result<(), Diagnostic> {
        let target_type = self.variable_type(&node.target)?;
        let value_type = self.expr_type(&node.value)?;
        if !assignable(target_type, value_type) {
            return Err(Diagnostic::problem(
                Problem::TypeMismatch,
                Label::span(
                    &node.target.span(),
                    format!("Cannot assign {} to '{}'", value_type, node.target),
                ),
            )
            .with_context("target", &target_type.to_string())
            .with_context("value", &value_type.to_string()));
        }
        Ok(())
    }

    fn visit_if(&mut self, node: &If) -> Result<(), Diagnostic> {
        self.condition(&node.condition)?;
        self.check_scope(&node.body)?;
        self.check_scope(&node.else_body)
    }

    fn visit_while(&mut self, node: &While) -> Result<(), Diagnostic> {
        self.condition(&node.condition)?;
        self.check_scope(&node.body)
    }

    fn visit_for(&mut self, node: &For) -> Result<(), Diagnostic> {
        // Both bounds are typed in the enclosing scope; the control
        // variable is not visible in its own initializer.
        let control_type = self.expr_type(&node.from)?;
        let end_type = self.expr_type(&node.to)?;
        if promote(control_type, end_type).is_none() {
            return Err(Diagnostic::problem(
                Problem::TypeMismatch,
                Label::span(
                    &node.control.span(),
                    "Loop bound is not comparable to the control variable",
                ),
            )
            .with_context("control", &control_type.to_string())
            .with_context("bound", &end_type.to_string()));
        }
        self.table.enter();
        let result = self
            .table
            .add(
                &node.control,
                SymbolKind::Variable {
                    type_name: control_type,
                },
            )
            .and_then(|()| self.check_list(&node.body));
        self.table.exit();
        result
    }

    fn visit_return(&mut self, node: &Return) -> Result<(), Diagnostic> {
        match (self.return_type, &node.value) {
            (None, None) => Ok(()),
            (Some(declared), Some(value)) => {
                let value_type = self.expr_type(value)?;
                if !assignable(declared, value_type) {
                    return Err(Diagnostic::problem(
                        Problem::TypeMismatch,
                        Label::span(
                            &value.span(),
                            format!("Return value is not assignable to {}", declared),
                        ),
                    )
                    .with_context("declared", &declared.to_string())
                    .with_context("actual", &value_type.to_string()));
                }
                Ok(())
            }
            (Some(declared), None) => Err(Diagnostic::problem(
                Problem::TypeMismatch,
                Label::span(
                    &self.unit.span(),
                    format!("RETURN in '{}' requires a {} value", self.unit, declared),
                ),
            )),
            (None, Some(value)) => Err(Diagnostic::problem(
                Problem::TypeMismatch,
                Label::span(
                    &value.span(),
                    format!("'{}' does not declare a return type", self.unit),
                ),
            )),
        }
    }
}
