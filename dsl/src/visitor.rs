//! A set of traits and functions for visiting all nodes in a library.
//!
//! To use the visitor, define a struct and implement the Visitor trait
//! for the struct.
//!
//! Visitor trait functions call functions that implement walking
//! through the library. Selectively call these functions to
//! selectively descend into the library.
//!
//! # Example
//!
//! ```
//! use ferrost_dsl::common::FunctionDeclaration;
//! use ferrost_dsl::diagnostic::Diagnostic;
//! use ferrost_dsl::visitor::{ Visitor, visit_function_declaration };
//!
//! struct Dummy {}
//! impl Dummy {
//!   fn do_work() {}
//! }
//!
//! impl Visitor<Diagnostic> for Dummy {
//!     type Value = ();
//!
//!     fn visit_function_declaration(&mut self, node: &FunctionDeclaration) -> Result<Self::Value, Diagnostic> {
//!         // Do something custom before visiting the FunctionDeclaration node
//!         Dummy::do_work();
//!
//!         // Continue the recursion
//!         visit_function_declaration(self, node)
//!     }
//! }
//! ```

use crate::common::*;
use crate::core::Id;
use crate::textual::*;
use paste::paste;

/// Defines a macro for the `Visitor` trait that dispatches visiting
/// to a function. In other words, creates a function of the form:
///
/// ```ignore
/// fn visit_type_name(&mut self, node: &TypeName) -> Result<Self::Value, E> {
///    visit_type_name(self, node)
/// }
/// ```
///
/// The visitor generally dispatches to a dedicated function so that
/// implementations can re-use the behavior.
macro_rules! dispatch {
    ($struct_name:ident) => {
        paste! {
            fn [<visit_ $struct_name:snake >](&mut self, node: &$struct_name) -> Result<Self::Value, E> {
                [< visit_ $struct_name:snake >](self, node)
            }
        }
    };
}

/// Defines a macro for the `Visitor` trait that returns `Ok`.
/// In other words, creates a function of the form:
///
/// ```ignore
/// fn visit_type_name(&mut self, node: &TypeName) -> Result<Self::Value, E> {
///    Ok(Self::Value::default())
/// }
/// ```
macro_rules! leaf {
    ($struct_name:ident) => {
        paste! {
            fn [<visit_ $struct_name:snake >](&mut self, node: &$struct_name) -> Result<Self::Value, E> {
                Ok(Self::Value::default())
            }
        }
    };
}

/// Defines a way to recurse into an object in the AST.
pub trait Acceptor {
    fn accept<V: Visitor<E> + ?Sized, E>(&self, visitor: &mut V) -> Result<V::Value, E>;
}

/// Recurses into a vec of objects.
impl<X> Acceptor for Vec<X>
where
    X: Acceptor,
{
    fn accept<V: Visitor<E> + ?Sized, E>(&self, visitor: &mut V) -> Result<V::Value, E> {
        match self.iter().map(|x| x.accept(visitor)).find(|r| r.is_err()) {
            Some(err) => {
                // At least one of the items returned an error, so
                // return the first error.
                err
            }
            None => {
                // There were no errors, so return the default value
                Ok(V::Value::default())
            }
        }
    }
}

/// Recurses into an optional object.
impl<X> Acceptor for Option<X>
where
    X: Acceptor,
{
    fn accept<V: Visitor<E> + ?Sized, E>(&self, visitor: &mut V) -> Result<V::Value, E> {
        match self.as_ref() {
            Some(x) => x.accept(visitor),
            None => Ok(V::Value::default()),
        }
    }
}

impl Acceptor for LibraryElementKind {
    fn accept<V: Visitor<E> + ?Sized, E>(&self, visitor: &mut V) -> Result<V::Value, E> {
        visitor.visit_library_element_kind(self)
    }
}

impl Acceptor for StmtKind {
    fn accept<V: Visitor<E> + ?Sized, E>(&self, visitor: &mut V) -> Result<V::Value, E> {
        visitor.visit_stmt_kind(self)
    }
}

impl Acceptor for ExprKind {
    fn accept<V: Visitor<E> + ?Sized, E>(&self, visitor: &mut V) -> Result<V::Value, E> {
        visitor.visit_expr_kind(self)
    }
}

impl Acceptor for Subrange {
    fn accept<V: Visitor<E> + ?Sized, E>(&self, visitor: &mut V) -> Result<V::Value, E> {
        visitor.visit_subrange(self)
    }
}

/// Walks all nodes in a library.
///
/// Functions in the trait dispatch to a walking function with the same
/// name so that implementations can handle a node and then continue
/// the recursion into the children.
pub trait Visitor<E> {
    /// Value produced by this visitor when the result is Ok.
    type Value: Default;

    fn walk(&mut self, node: &Library) -> Result<Self::Value, E> {
        Acceptor::accept(&node.elements, self)
    }

    dispatch!(LibraryElementKind);
    dispatch!(FunctionDeclaration);
    dispatch!(FunctionBlockDeclaration);
    dispatch!(ProgramDeclaration);

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
    dispatch!(NamedVariable);
    dispatch!(ArrayVariable);

    leaf!(Id);
    leaf!(TypeName);
    leaf!(ConstantKind);
    leaf!(Subrange);
}

pub fn visit_library_element_kind<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &LibraryElementKind,
) -> Result<V::Value, E> {
    match node {
        LibraryElementKind::FunctionDeclaration(func_decl) => {
            v.visit_function_declaration(func_decl)
        }
        LibraryElementKind::FunctionBlockDeclaration(func_block_decl) => {
            v.visit_function_block_declaration(func_block_decl)
        }
        LibraryElementKind::ProgramDeclaration(prog_decl) => v.visit_program_declaration(prog_decl),
    }
}

pub fn visit_function_declaration<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &FunctionDeclaration,
) -> Result<V::Value, E> {
    v.visit_id(&node.name)?;
    Acceptor::accept(&node.body, v)
}

pub fn visit_function_block_declaration<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &FunctionBlockDeclaration,
) -> Result<V::Value, E> {
    v.visit_id(&node.name)?;
    Acceptor::accept(&node.body, v)
}

pub fn visit_program_declaration<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &ProgramDeclaration,
) -> Result<V::Value, E> {
    v.visit_id(&node.name)?;
    Acceptor::accept(&node.body, v)
}

pub fn visit_stmt_kind<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &StmtKind,
) -> Result<V::Value, E> {
    match node {
        StmtKind::VarDecl(var_decl) => v.visit_var_decl(var_decl),
        StmtKind::ArrayDecl(array_decl) => v.visit_array_decl(array_decl),
        StmtKind::Assignment(assignment) => v.visit_assignment(assignment),
        StmtKind::If(if_stmt) => v.visit_if(if_stmt),
        StmtKind::For(for_stmt) => v.visit_for(for_stmt),
        StmtKind::While(while_stmt) => v.visit_while(while_stmt),
        StmtKind::Return(return_stmt) => v.visit_return(return_stmt),
    }
}

pub fn visit_var_decl<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &VarDecl,
) -> Result<V::Value, E> {
    v.visit_id(&node.name)?;
    v.visit_type_name(&node.type_name)?;
    Acceptor::accept(&node.initializer, v)
}

pub fn visit_array_decl<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &ArrayDecl,
) -> Result<V::Value, E> {
    v.visit_id(&node.name)?;
    v.visit_type_name(&node.element_type)?;
    Acceptor::accept(&node.dims, v)?;
    Acceptor::accept(&node.initial_values, v)
}

pub fn visit_assignment<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &Assignment,
) -> Result<V::Value, E> {
    v.visit_variable(&node.target)?;
    v.visit_expr_kind(&node.value)
}

pub fn visit_if<V: Visitor<E> + ?Sized, E>(v: &mut V, node: &If) -> Result<V::Value, E> {
    v.visit_expr_kind(&node.condition)?;
    Acceptor::accept(&node.body, v)?;
    Acceptor::accept(&node.else_body, v)
}

pub fn visit_for<V: Visitor<E> + ?Sized, E>(v: &mut V, node: &For) -> Result<V::Value, E> {
    v.visit_id(&node.control)?;
    v.visit_expr_kind(&node.from)?;
    v.visit_expr_kind(&node.to)?;
    Acceptor::accept(&node.body, v)
}

pub fn visit_while<V: Visitor<E> + ?Sized, E>(v: &mut V, node: &While) -> Result<V::Value, E> {
    v.visit_expr_kind(&node.condition)?;
    Acceptor::accept(&node.body, v)
}

pub fn visit_return<V: Visitor<E> + ?Sized, E>(v: &mut V, node: &Return) -> Result<V::Value, E> {
    Acceptor::accept(&node.value, v)
}

pub fn visit_expr_kind<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &ExprKind,
) -> Result<V::Value, E> {
    match node {
        ExprKind::Compare(compare) => v.visit_compare_expr(compare),
        ExprKind::BinaryOp(binary) => v.visit_binary_expr(binary),
        ExprKind::UnaryOp(unary) => v.visit_unary_expr(unary),
        ExprKind::Expression(inner) => v.visit_expr_kind(inner),
        ExprKind::Const(constant) => v.visit_constant_kind(constant),
        ExprKind::Variable(variable) => v.visit_variable(variable),
        ExprKind::Function(function) => v.visit_function(function),
    }
}

pub fn visit_compare_expr<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &CompareExpr,
) -> Result<V::Value, E> {
    v.visit_expr_kind(&node.left)?;
    v.visit_expr_kind(&node.right)
}

pub fn visit_binary_expr<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &BinaryExpr,
) -> Result<V::Value, E> {
    v.visit_expr_kind(&node.left)?;
    v.visit_expr_kind(&node.right)
}

pub fn visit_unary_expr<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &UnaryExpr,
) -> Result<V::Value, E> {
    v.visit_expr_kind(&node.term)
}

pub fn visit_function<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &Function,
) -> Result<V::Value, E> {
    v.visit_id(&node.name)?;
    Acceptor::accept(&node.arguments, v)
}

pub fn visit_variable<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &Variable,
) -> Result<V::Value, E> {
    match node {
        Variable::Named(named) => v.visit_named_variable(named),
        Variable::Array(array) => v.visit_array_variable(array),
    }
}

pub fn visit_named_variable<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &NamedVariable,
) -> Result<V::Value, E> {
    v.visit_id(&node.name)
}

pub fn visit_array_variable<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &ArrayVariable,
) -> Result<V::Value, E> {
    v.visit_id(&node.variable)?;
    Acceptor::accept(&node.subscripts, v)
}
