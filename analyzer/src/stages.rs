//! The semantic rules as ordered stages (to enable testing).
use ferrost_dsl::{common::Library, diagnostic::Diagnostic};
use log::debug;

use crate::{rule_decl_bounds, rule_type_check};

/// Checks the library against every semantic rule, stopping at the
/// first diagnostic.
///
/// Returns `Ok(())` if the library is free of semantic errors.
/// Returns `Err(Diagnostic)` describing the first error found.
pub fn analyze(library: &Library) -> Result<(), Diagnostic> {
    let rules: Vec<(&str, fn(&Library) -> Result<(), Diagnostic>)> = vec![
        ("decl_bounds", rule_decl_bounds::apply),
        ("type_check", rule_type_check::apply),
    ];

    for (name, apply) in rules {
        debug!("Running semantic rule {}", name);
        apply(library)?;
    }

    Ok(())
}
