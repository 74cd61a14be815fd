//! Semantic rule that every dimension of an array declaration has a
//! lower bound that does not exceed its upper bound.
//!
//! ## Passes
//!
//! ```ignore
//! PROGRAM main
//! VAR
//! samples : ARRAY[0..9] OF INTEGER;
//! grid : ARRAY[-1..1, -1..1] OF REAL;
//! END_VAR
//! END_PROGRAM
//! ```
//!
//! ## Fails
//!
//! ```ignore
//! PROGRAM main
//! VAR
//! samples : ARRAY[9..0] OF INTEGER;
//! END_VAR
//! END_PROGRAM
//! ```
use ferrost_dsl::{
    common::{ArrayDecl, Library},
    core::Located,
    diagnostic::{Diagnostic, Label},
    visitor::Visitor,
};
use ferrost_problems::Problem;

pub fn apply(lib: &Library) -> Result<(), Diagnostic> {
    let mut visitor = RuleDeclBounds {};
    visitor.walk(lib)
}

struct RuleDeclBounds {}

impl Visitor<Diagnostic> for RuleDeclBounds {
    type Value = ();

    fn visit_array_decl(&mut self, node: &ArrayDecl) -> Result<(), Diagnostic> {
        for dim in &node.dims {
            if dim.lo > dim.hi {
                return Err(Diagnostic::problem(
                    Problem::InvalidArrayBounds,
                    Label::span(
                        &node.span(),
                        format!("Dimension {} has no valid indices", dim),
                    ),
                )
                .with_context_id("array", &node.name));
            }
        }
        Ok(())
    }
}
