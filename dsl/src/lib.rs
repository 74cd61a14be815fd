//! Provides definitions of objects from the FerroST language elements
//! and base implementations of common patterns for working with
//! libraries.

#[allow(unused)]
pub mod common;
#[allow(unused)]
pub mod core;
#[allow(unused)]
pub mod diagnostic;
#[allow(unused)]
pub mod fold;
#[allow(unused)]
pub mod textual;
#[allow(unused)]
pub mod visitor;
