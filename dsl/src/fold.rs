//! A set of traits and functions for folding all nodes in a library.
//!
//! Folding the library returns a new instance with changes to the
//! library defined based on the fold_* functions. The default behavior
//! returns a copy of the input.
//!
//! To fold a library, define a struct and implement the Fold trait for
//! the struct. Then implement fold_* functions from the trait to
//! customize the behavior.
use crate::common::*;
use crate::core::Id;
use crate::textual::*;
use paste::paste;

/// Defines a macro for the `Fold` trait that dispatches folding to a
/// function. In other words, creates a function of the form:
///
/// ```ignore
/// fn fold_type_name(&mut self, node: TypeName) -> Result<TypeName, E> {
///    fold_type_name(self, node)
/// }
/// ```
macro_rules! dispatch {
    ($struct_name:ident) => {
        paste! {
            fn [<fold_ $struct_name:snake >](&mut self, node: $struct_name) -> Result<$struct_name, E> {
                [< fold_ $struct_name:snake >](self, node)
            }
        }
    };
}

/// Defines a macro for the `Fold` trait that returns the node
/// unchanged.
macro_rules! leaf {
    ($struct_name:ident) => {
        paste! {
            fn [<fold_ $struct_name:snake >](&mut self, node: $struct_name) -> Result<$struct_name, E> {
                Ok(node)
            }
        }
    };
}

/// Rebuilds a library, node by node.
///
/// Implementations override individual fold_* functions to replace
/// subtrees; the default for every function reconstructs the node from
/// its folded children. `fold_stmt_list` folds a whole statement list
/// so that an implementation can splice statements in or out.
pub trait Fold<E> {
    fn fold_library(&mut self, node: Library) -> Result<Library, E> {
        fold_library(self, node)
    }

    dispatch!(LibraryElementKind);
    dispatch!(FunctionDeclaration);
    dispatch!(FunctionBlockDeclaration);
    dispatch!(ProgramDeclaration);

    fn fold_stmt_list(&mut self, nodes: Vec<StmtKind>) -> Result<Vec<StmtKind>, E> {
        fold_stmt_list(self, nodes)
    }

    dispatch!(StmtKind);
    dispatch!(VarDecl);
    dispatch!(ArrayDecl);
    dispatch!(Assignment);
    dispatch!(If);
    dispatch!(For);
    dispatch!(While);
    dispatch!(Return);

    dispatch!(ExprKind);
    dispatch!(CompareExpr);
    dispatch!(BinaryExpr);
    dispatch!(UnaryExpr);
    dispatch!(Function);
    dispatch!(Variable);
    dispatch!(ArrayVariable);

    leaf!(Id);
    leaf!(ConstantKind);
    leaf!(Subrange);
}

pub fn fold_library<F: Fold<E> + ?Sized, E>(f: &mut F, node: Library) -> Result<Library, E> {
    Ok(Library {
        elements: node
            .elements
            .into_iter()
            .map(|element| f.fold_library_element_kind(element))
            .collect::<Result<Vec<_>, E>>()?,
    })
}

pub fn fold_library_element_kind<F: Fold<E> + ?Sized, E>(
    f: &mut F,
    node: LibraryElementKind,
) -> Result<LibraryElementKind, E> {
    match node {
        LibraryElementKind::FunctionDeclaration(func_decl) => Ok(
            LibraryElementKind::FunctionDeclaration(f.fold_function_declaration(func_decl)?),
        ),
        LibraryElementKind::FunctionBlockDeclaration(func_block_decl) => {
            Ok(LibraryElementKind::FunctionBlockDeclaration(
                f.fold_function_block_declaration(func_block_decl)?,
            ))
        }
        LibraryElementKind::ProgramDeclaration(prog_decl) => Ok(
            LibraryElementKind::ProgramDeclaration(f.fold_program_declaration(prog_decl)?),
        ),
    }
}

pub fn fold_function_declaration<F: Fold<E> + ?Sized, E>(
    f: &mut F,
    node: FunctionDeclaration,
) -> Result<FunctionDeclaration, E> {
    Ok(FunctionDeclaration {
        name: f.fold_id(node.name)?,
        return_type: node.return_type,
        body: f.fold_stmt_list(node.body)?,
    })
}

pub fn fold_function_block_declaration<F: Fold<E> + ?Sized, E>(
    f: &mut F,
    node: FunctionBlockDeclaration,
) -> Result<FunctionBlockDeclaration, E> {
    Ok(FunctionBlockDeclaration {
        name: f.fold_id(node.name)?,
        body: f.fold_stmt_list(node.body)?,
    })
}

pub fn fold_program_declaration<F: Fold<E> + ?Sized, E>(
    f: &mut F,
    node: ProgramDeclaration,
) -> Result<ProgramDeclaration, E> {
    Ok(ProgramDeclaration {
        name: f.fold_id(node.name)?,
        body: f.fold_stmt_list(node.body)?,
    })
}

pub fn fold_stmt_list<F: Fold<E> + ?Sized, E>(
    f: &mut F,
    nodes: Vec<StmtKind>,
) -> Result<Vec<StmtKind>, E> {
    nodes
        .into_iter()
        .map(|stmt| f.fold_stmt_kind(stmt))
        .collect()
}

pub fn fold_stmt_kind<F: Fold<E> + ?Sized, E>(f: &mut F, node: StmtKind) -> Result<StmtKind, E> {
    match node {
        StmtKind::VarDecl(var_decl) => Ok(StmtKind::VarDecl(f.fold_var_decl(var_decl)?)),
        StmtKind::ArrayDecl(array_decl) => Ok(StmtKind::ArrayDecl(f.fold_array_decl(array_decl)?)),
        StmtKind::Assignment(assignment) => {
            Ok(StmtKind::Assignment(f.fold_assignment(assignment)?))
        }
        StmtKind::If(if_stmt) => Ok(StmtKind::If(f.fold_if(if_stmt)?)),
        StmtKind::For(for_stmt) => Ok(StmtKind::For(f.fold_for(for_stmt)?)),
        StmtKind::While(while_stmt) => Ok(StmtKind::While(f.fold_while(while_stmt)?)),
        StmtKind::Return(return_stmt) => Ok(StmtKind::Return(f.fold_return(return_stmt)?)),
    }
}

pub fn fold_var_decl<F: Fold<E> + ?Sized, E>(f: &mut F, node: VarDecl) -> Result<VarDecl, E> {
    Ok(VarDecl {
        name: f.fold_id(node.name)?,
        var_type: node.var_type,
        type_name: node.type_name,
        initializer: node
            .initializer
            .map(|init| f.fold_expr_kind(init))
            .transpose()?,
    })
}

pub fn fold_array_decl<F: Fold<E> + ?Sized, E>(f: &mut F, node: ArrayDecl) -> Result<ArrayDecl, E> {
    Ok(ArrayDecl {
        name: f.fold_id(node.name)?,
        var_type: node.var_type,
        element_type: node.element_type,
        dims: node
            .dims
            .into_iter()
            .map(|dim| f.fold_subrange(dim))
            .collect::<Result<Vec<_>, E>>()?,
        initial_values: node
            .initial_values
            .map(|values| {
                values
                    .into_iter()
                    .map(|value| f.fold_expr_kind(value))
                    .collect::<Result<Vec<_>, E>>()
            })
            .transpose()?,
    })
}

pub fn fold_assignment<F: Fold<E> + ?Sized, E>(
    f: &mut F,
    node: Assignment,
) -> Result<Assignment, E> {
    Ok(Assignment {
        target: f.fold_variable(node.target)?,
        value: f.fold_expr_kind(node.value)?,
    })
}

pub fn fold_if<F: Fold<E> + ?Sized, E>(f: &mut F, node: If) -> Result<If, E> {
    Ok(If {
        condition: f.fold_expr_kind(node.condition)?,
        body: f.fold_stmt_list(node.body)?,
        else_body: f.fold_stmt_list(node.else_body)?,
    })
}

pub fn fold_for<F: Fold<E> + ?Sized, E>(f: &mut F, node: For) -> Result<For, E> {
    Ok(For {
        control: f.fold_id(node.control)?,
        from: f.fold_expr_kind(node.from)?,
        to: f.fold_expr_kind(node.to)?,
        body: f.fold_stmt_list(node.body)?,
    })
}

pub fn fold_while<F: Fold<E> + ?Sized, E>(f: &mut F, node: While) -> Result<While, E> {
    Ok(While {
        condition: f.fold_expr_kind(node.condition)?,
        body: f.fold_stmt_list(node.body)?,
    })
}

pub fn fold_return<F: Fold<E> + ?Sized, E>(f: &mut F, node: Return) -> Result<Return, E> {
    Ok(Return {
        value: node.value.map(|value| f.fold_expr_kind(value)).transpose()?,
    })
}

pub fn fold_expr_kind<F: Fold<E> + ?Sized, E>(f: &mut F, node: ExprKind) -> Result<ExprKind, E> {
    match node {
        ExprKind::Compare(compare) => Ok(ExprKind::Compare(Box::new(
            f.fold_compare_expr(*compare)?,
        ))),
        ExprKind::BinaryOp(binary) => {
            Ok(ExprKind::BinaryOp(Box::new(f.fold_binary_expr(*binary)?)))
        }
        ExprKind::UnaryOp(unary) => Ok(ExprKind::UnaryOp(Box::new(f.fold_unary_expr(*unary)?))),
        ExprKind::Expression(inner) => {
            Ok(ExprKind::Expression(Box::new(f.fold_expr_kind(*inner)?)))
        }
        ExprKind::Const(constant) => Ok(ExprKind::Const(f.fold_constant_kind(constant)?)),
        ExprKind::Variable(variable) => Ok(ExprKind::Variable(f.fold_variable(variable)?)),
        ExprKind::Function(function) => Ok(ExprKind::Function(f.fold_function(function)?)),
    }
}

pub fn fold_compare_expr<F: Fold<E> + ?Sized, E>(
    f: &mut F,
    node: CompareExpr,
) -> Result<CompareExpr, E> {
    Ok(CompareExpr {
        op: node.op,
        left: f.fold_expr_kind(node.left)?,
        right: f.fold_expr_kind(node.right)?,
    })
}

pub fn fold_binary_expr<F: Fold<E> + ?Sized, E>(
    f: &mut F,
    node: BinaryExpr,
) -> Result<BinaryExpr, E> {
    Ok(BinaryExpr {
        op: node.op,
        left: f.fold_expr_kind(node.left)?,
        right: f.fold_expr_kind(node.right)?,
    })
}

pub fn fold_unary_expr<F: Fold<E> + ?Sized, E>(
    f: &mut F,
    node: UnaryExpr,
) -> Result<UnaryExpr, E> {
    Ok(UnaryExpr {
        op: node.op,
        term: f.fold_expr_kind(node.term)?,
    })
}

pub fn fold_function<F: Fold<E> + ?Sized, E>(f: &mut F, node: Function) -> Result<Function, E> {
    Ok(Function {
        name: f.fold_id(node.name)?,
        arguments: node
            .arguments
            .into_iter()
            .map(|argument| f.fold_expr_kind(argument))
            .collect::<Result<Vec<_>, E>>()?,
    })
}

pub fn fold_variable<F: Fold<E> + ?Sized, E>(f: &mut F, node: Variable) -> Result<Variable, E> {
    match node {
        Variable::Named(named) => Ok(Variable::Named(NamedVariable {
            name: f.fold_id(named.name)?,
        })),
        Variable::Array(array) => Ok(Variable::Array(f.fold_array_variable(array)?)),
    }
}

pub fn fold_array_variable<F: Fold<E> + ?Sized, E>(
    f: &mut F,
    node: ArrayVariable,
) -> Result<ArrayVariable, E> {
    Ok(ArrayVariable {
        variable: f.fold_id(node.variable)?,
        subscripts: node
            .subscripts
            .into_iter()
            .map(|subscript| f.fold_expr_kind(subscript))
            .collect::<Result<Vec<_>, E>>()?,
    })
}
