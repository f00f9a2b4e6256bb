use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use opdiff_types::{OperandPair, TransactionKey};

use crate::error::{StoreError, StoreResult};
use crate::traits::OperandStore;

/// Largest operand accepted by default: 1 MiB.
pub const DEFAULT_MAX_OPERAND_SIZE: usize = 1024 * 1024;

/// In-memory, HashMap-based operand store.
///
/// All pairs are held behind a `RwLock` for safe concurrent access. Pairs are
/// cloned on read; operand bytes are reference counted, so a clone does not
/// copy the payload.
pub struct InMemoryOperandStore {
    pairs: RwLock<HashMap<TransactionKey, OperandPair>>,
    max_operand_size: usize,
}

impl InMemoryOperandStore {
    /// Create a new empty store with the default operand size limit.
    pub fn new() -> Self {
        Self::with_max_operand_size(DEFAULT_MAX_OPERAND_SIZE)
    }

    /// Create a new empty store rejecting operands larger than `max` bytes.
    pub fn with_max_operand_size(max: usize) -> Self {
        Self {
            pairs: RwLock::new(HashMap::new()),
            max_operand_size: max,
        }
    }

    pub fn max_operand_size(&self) -> usize {
        self.max_operand_size
    }

    /// Number of keys currently holding a pair.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.pairs.read().map_err(poisoned)?.len())
    }

    /// Returns `true` if no key holds a pair.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.pairs.read().map_err(poisoned)?.is_empty())
    }

    /// Remove every pair.
    pub fn clear(&self) -> StoreResult<()> {
        self.pairs.write().map_err(poisoned)?.clear();
        Ok(())
    }

    /// Sorted list of all keys holding a pair.
    pub fn keys(&self) -> StoreResult<Vec<TransactionKey>> {
        let map = self.pairs.read().map_err(poisoned)?;
        let mut keys: Vec<TransactionKey> = map.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

impl Default for InMemoryOperandStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(e: PoisonError<T>) -> StoreError {
    StoreError::Poisoned(e.to_string())
}

impl OperandStore for InMemoryOperandStore {
    fn set(&self, key: &TransactionKey, pair: OperandPair) -> StoreResult<()> {
        let size = pair.largest_operand();
        if size > self.max_operand_size {
            tracing::warn!(%key, size, max = self.max_operand_size, "operand rejected: too large");
            return Err(StoreError::CapacityExceeded {
                size,
                max: self.max_operand_size,
            });
        }
        let mut map = self.pairs.write().map_err(poisoned)?;
        map.insert(key.clone(), pair);
        Ok(())
    }

    fn get(&self, key: &TransactionKey) -> StoreResult<Option<OperandPair>> {
        let map = self.pairs.read().map_err(poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn remove(&self, key: &TransactionKey) -> StoreResult<Option<OperandPair>> {
        let mut map = self.pairs.write().map_err(poisoned)?;
        Ok(map.remove(key))
    }

    fn exists(&self, key: &TransactionKey) -> StoreResult<bool> {
        let map = self.pairs.read().map_err(poisoned)?;
        Ok(map.contains_key(key))
    }
}

impl std::fmt::Debug for InMemoryOperandStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.pairs.read().map(|m| m.len()).unwrap_or(0);
        f.debug_struct("InMemoryOperandStore")
            .field("pair_count", &count)
            .field("max_operand_size", &self.max_operand_size)
            .finish()
    }
}
