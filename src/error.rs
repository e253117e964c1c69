use thiserror::Error;

/// Errors surfaced by the resource cache to query callers.
///
/// Cloneable so that a single failed build can be handed to every request
/// that was waiting on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CounterError {
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Resource {id} could not be read: {reason}")]
    ResourceUnreadable { id: String, reason: String },

    #[error("Invalid resource identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Failed to index resource {id}: {reason}")]
    IndexBuild { id: String, reason: String },
}

/// Result type alias for counter operations
pub type Result<T> = std::result::Result<T, CounterError>;

impl CounterError {
    /// The resource identifier the error refers to.
    pub fn resource(&self) -> &str {
        match self {
            CounterError::ResourceNotFound(id) | CounterError::InvalidIdentifier(id) => id,
            CounterError::ResourceUnreadable { id, .. } | CounterError::IndexBuild { id, .. } => id,
        }
    }

    /// True when the request itself was at fault rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CounterError::ResourceNotFound(_) | CounterError::InvalidIdentifier(_)
        )
    }
}
