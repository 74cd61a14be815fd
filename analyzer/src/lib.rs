// Allow large errors because this is a compiler - we expect large errors.
#![allow(clippy::result_large_err)]

mod rule_decl_bounds;
mod rule_type_check;
pub mod stages;
mod symbol_table;
