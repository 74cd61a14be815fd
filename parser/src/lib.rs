// Allow large errors because this is a compiler - we expect large errors.
#![allow(clippy::result_large_err)]

mod lexer;
mod parser;

pub mod token;

use ferrost_dsl::common::Library;
use ferrost_dsl::core::FileId;
use ferrost_dsl::diagnostic::Diagnostic;

pub use crate::lexer::tokenize;
pub use crate::parser::parse_library;

#[cfg(test)]
mod tests;

/// Parse a full structured text program.
///
/// The first lexical or grammatical error aborts with a diagnostic that
/// names the offending text and its line.
pub fn parse_program(source: &str, file_id: &FileId) -> Result<Library, Diagnostic> {
    let tokens = tokenize(source, file_id)?;
    parse_library(tokens, file_id)
}
