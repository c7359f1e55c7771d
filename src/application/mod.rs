//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic behind the interpreter and the
//! tree library service, and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod interpreter;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use interpreter::{render_values, Command, ParseError, Reply, RuleInterpreter, HELP_TEXT};
