//! Shared test helpers for interpreter integration tests.

use ferrost_analyzer::stages::analyze;
use ferrost_dsl::common::Library;
use ferrost_dsl::core::FileId;
use ferrost_interp::{run_library, Environment, RuntimeError};
use ferrost_optimizer::optimize;
use ferrost_parser::parse_program;

/// Takes source through the stages before execution: parse, analyze,
/// optimize.
pub fn compile(source: &str) -> Library {
    let library = parse_program(source, &FileId::default()).unwrap();
    analyze(&library).unwrap();
    optimize(library).unwrap()
}

/// Compiles and runs the source, returning the final program state.
#[allow(dead_code)]
pub fn run(source: &str) -> Environment {
    run_library(&compile(source)).unwrap()
}

/// Compiles source that analysis accepts but execution must reject.
#[allow(dead_code)]
pub fn run_error(source: &str) -> RuntimeError {
    run_library(&compile(source)).unwrap_err()
}
