use thiserror::Error;

/// Failures raised by user operations.
///
/// Each variant carries the exact text returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidInput(String),

    /// Reserved for storage-backed implementations; the stub never raises it.
    #[error("{0}")]
    Persistence(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
