//! Striped per-key locks.
//!
//! Mutations of one transaction key are serialized by hashing the key onto a
//! fixed set of mutexes. Distinct keys usually land on distinct stripes and
//! proceed in parallel; keys sharing a stripe simply take turns.

use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;
use std::sync::{Mutex, MutexGuard, PoisonError};

use opdiff_types::TransactionKey;

pub struct KeyLocks {
    stripes: Vec<Mutex<()>>,
    hasher: RandomState,
}

impl KeyLocks {
    /// Create a lock table with `stripes` mutexes (at least one).
    pub fn new(stripes: usize) -> Self {
        Self {
            stripes: (0..stripes.max(1)).map(|_| Mutex::new(())).collect(),
            hasher: RandomState::new(),
        }
    }

    pub fn stripe_count(&self) -> usize {
        self.stripes.len()
    }

    /// Lock the stripe owning `key` until the guard is dropped.
    pub fn lock(&self, key: &TransactionKey) -> MutexGuard<'_, ()> {
        // The guarded value is `()`, so a poisoned stripe carries no broken
        // state and is safe to reuse.
        self.stripes[self.stripe_of(key)]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn stripe_of(&self, key: &TransactionKey) -> usize {
        (self.hasher.hash_one(key) % self.stripes.len() as u64) as usize
    }
}

impl std::fmt::Debug for KeyLocks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyLocks")
            .field("stripes", &self.stripes.len())
            .finish()
    }
}
