//! Infrastructure-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// Infrastructure errors wrap application errors and add I/O-level concerns.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The compiler ran and failed. `log` is its combined output, unparsed.
    #[error("{compiler} failed with exit code {}", .exit_code.map(|c| c.to_string()).unwrap_or_else(|| "none".into()))]
    Compile {
        compiler: String,
        exit_code: Option<i32>,
        log: String,
    },

    #[error("compiler not found: {compiler}")]
    CompilerNotFound { compiler: String },
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
