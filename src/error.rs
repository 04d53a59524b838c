//! Error types for the structure accessibility library.
//!
//! Most failures in this crate are local: a single child or attribute that
//! the viewer's DOM could not resolve. Those are represented here so accessor
//! implementations can report them, but the role and MathML cores absorb them
//! and degrade to omission instead of returning them.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while querying a structure tree.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No role or markup could be produced for the node
    #[error("Not found")]
    NotFound,

    /// A call on the foreign DOM failed (node died, interface missing, ...)
    #[error("DOM call {operation} failed: {reason}")]
    Accessor {
        /// Name of the failed accessor operation
        operation: &'static str,
        /// Reason reported by the accessor
        reason: String,
    },

    /// Referenced structure element could not be resolved
    #[error("Object not found: {0} {1} R")]
    ObjectNotFound(u32, u16),

    /// Node has the wrong type for the requested view
    #[error("Invalid object type: expected {expected}, found {found}")]
    InvalidObjectType {
        /// Expected object type
        expected: String,
        /// Actual object type found
        found: String,
    },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for an [`Error::Accessor`] failure.
    pub fn accessor(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Accessor {
            operation,
            reason: reason.into(),
        }
    }
}
