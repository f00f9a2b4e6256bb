/// Errors from operand store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// An operand is larger than the backend accepts.
    #[error("operand of {size} bytes exceeds maximum of {max} bytes")]
    CapacityExceeded { size: usize, max: usize },

    /// A lock guarding the backend was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    Poisoned(String),

    /// Storage backend is unavailable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
