//! Error types for rs-textextract.
//!
//! Tree-shape anomalies met during a walk (detached or replaced nodes) are
//! ordinary control flow and never surface here.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A precondition of the traversal was violated, e.g. the root id does not
    /// belong to the document.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A scope pattern could not be parsed by the selector service.
    #[error("Invalid selector '{pattern}': {reason}")]
    Selector {
        /// The pattern as configured.
        pattern: String,
        /// Parser message from the selector service.
        reason: String,
    },

    /// The configuration map could not be deserialized.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
