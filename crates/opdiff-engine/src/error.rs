use thiserror::Error;

use opdiff_store::StoreError;
use opdiff_types::{Side, TransactionKey};

/// Errors returned by the transaction engine.
///
/// Every error is scoped to the transaction key of the failing call; none is
/// retried by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A zero-length payload was submitted.
    #[error("{0} payload must not be empty")]
    EmptyPayload(Side),

    /// A right operand was submitted before any left operand.
    #[error("must submit left before right for ID [{0}]")]
    OutOfOrderSubmission(TransactionKey),

    /// The duplicate policy forbids replacing an unconsumed operand.
    #[error("Transaction [{key}] already holds an unconsumed {side} operand")]
    DuplicateTransaction { key: TransactionKey, side: Side },

    /// Nothing is stored for the key.
    #[error("No comparison pending for ID [{0}]")]
    NoPendingTransaction(TransactionKey),

    /// Only the left operand is stored for the key.
    #[error("Comparison for ID [{0}] is missing its right operand")]
    IncompleteTransaction(TransactionKey),

    /// The storage backend refused an oversized operand.
    #[error("payload of {size} bytes exceeds the maximum of {max} bytes")]
    BackendCapacityExceeded { size: usize, max: usize },

    /// Any other storage failure.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CapacityExceeded { size, max } => Self::BackendCapacityExceeded { size, max },
            other => Self::Store(other),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
