// ============================================================================
// Order Errors
// ============================================================================

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl OrderError {
    pub fn not_found() -> Self {
        OrderError::NotFound("order not found".to_string())
    }

    /// Only storage faults may succeed on a plain retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, OrderError::Storage(_))
    }
}

/// Faults raised below the repository contract.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage backend failure: {0}")]
    Backend(#[source] BoxError),

    #[error("storage operation timed out")]
    TimedOut,

    #[error("stored row is not a valid order: {0}")]
    Corrupt(String),
}

impl StorageError {
    pub fn backend<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        StorageError::Backend(err.into())
    }
}
