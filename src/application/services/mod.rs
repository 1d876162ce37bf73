//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, CommandRunner)
//! but are themselves concrete structs, not traits.

mod compile;
mod document;

pub use compile::{CompileService, INTERMEDIATE_EXTENSIONS};
pub use document::DocumentService;
