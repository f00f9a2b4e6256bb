use opdiff_types::{OperandPair, TransactionKey};

use crate::error::StoreResult;

/// Keyed storage for pending operand pairs.
///
/// All implementations must satisfy these invariants:
/// - `set` is insert-or-overwrite; a failed `set` leaves the previous value
///   in place.
/// - `remove` returns the old value and is atomic: two concurrent `remove`
///   calls for the same key never both observe the pair.
/// - A capacity limit is reported as `StoreError::CapacityExceeded`.
/// - Implementations are `Send + Sync`; callers share one store across
///   threads.
pub trait OperandStore: Send + Sync {
    /// Insert or overwrite the pair stored under `key`.
    fn set(&self, key: &TransactionKey, pair: OperandPair) -> StoreResult<()>;

    /// Read the pair stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored.
    fn get(&self, key: &TransactionKey) -> StoreResult<Option<OperandPair>>;

    /// Remove and return the pair stored under `key`.
    fn remove(&self, key: &TransactionKey) -> StoreResult<Option<OperandPair>>;

    /// Check whether anything is stored under `key`.
    fn exists(&self, key: &TransactionKey) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: OperandStore + ?Sized> OperandStore for std::sync::Arc<S> {
    fn set(&self, key: &TransactionKey, pair: OperandPair) -> StoreResult<()> {
        (**self).set(key, pair)
    }

    fn get(&self, key: &TransactionKey) -> StoreResult<Option<OperandPair>> {
        (**self).get(key)
    }

    fn remove(&self, key: &TransactionKey) -> StoreResult<Option<OperandPair>> {
        (**self).remove(key)
    }

    fn exists(&self, key: &TransactionKey) -> StoreResult<bool> {
        (**self).exists(key)
    }
}
