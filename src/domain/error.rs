//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent misuse of the document model.
/// They are raised where the violation happens and are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Document metadata on a non-root node, or a required field missing.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A heading was requested outside the supported nesting levels.
    #[error("unsupported heading depth: {level} (supported: 1..=3)")]
    UnsupportedDepth { level: usize },

    /// Item data does not match its declared column or series count.
    #[error("item shape error: {message}")]
    ItemShape { message: String },

    #[error("node not found in document tree")]
    NodeNotFound,
}

impl DomainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn item_shape(message: impl Into<String>) -> Self {
        Self::ItemShape {
            message: message.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
