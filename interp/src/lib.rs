pub(crate) mod environment;
pub mod error;
mod exec;
pub(crate) mod value;

pub use environment::Environment;
pub use error::RuntimeError;
pub use exec::run_library;
pub use value::Value;
