use bytes::Bytes;
use tracing::debug;

use opdiff_compare::{ByteComparator, Comparator};
use opdiff_store::{InMemoryOperandStore, OperandStore};
use opdiff_types::{Operand, OperandPair, Side, TransactionKey, TransactionState};

use crate::config::{DuplicatePolicy, EngineConfig};
use crate::error::{EngineError, EngineResult};
use crate::locks::KeyLocks;
use crate::report::{Ack, ComparisonReport};

/// Orchestrates operand submission and comparison over an [`OperandStore`].
///
/// The engine is `Send + Sync` whenever its store and comparator are, and is
/// meant to be shared behind an `Arc` by concurrent callers. Every operation
/// on a key runs under that key's stripe lock, so `submit_right`'s
/// check-then-attach and `compare`'s check-then-consume are each a single
/// step with respect to other engine calls on the same key.
pub struct TransactionEngine<S, C = ByteComparator> {
    store: S,
    comparator: C,
    config: EngineConfig,
    locks: KeyLocks,
}

impl TransactionEngine<InMemoryOperandStore> {
    /// An engine over a fresh in-memory store with default settings.
    pub fn in_memory() -> Self {
        Self::new(InMemoryOperandStore::new())
    }
}

impl<S: OperandStore> TransactionEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    pub fn with_config(store: S, config: EngineConfig) -> Self {
        Self::with_comparator(store, ByteComparator, config)
    }
}

impl<S: OperandStore, C: Comparator> TransactionEngine<S, C> {
    pub fn with_comparator(store: S, comparator: C, config: EngineConfig) -> Self {
        let locks = KeyLocks::new(config.lock_stripes);
        Self {
            store,
            comparator,
            config,
            locks,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ---- Submission ----

    /// Store `data` as the left operand of `key`.
    ///
    /// Any previous left operand is replaced. A stored right operand is kept,
    /// so the next `compare` pairs it with the new left.
    pub fn submit_left(&self, key: &TransactionKey, data: impl Into<Bytes>) -> EngineResult<Ack> {
        let data = data.into();
        if data.is_empty() {
            return Err(EngineError::EmptyPayload(Side::Left));
        }

        let _guard = self.locks.lock(key);
        let size = data.len();
        let operand = Operand::new(key.clone(), Side::Left, data);
        let pair = match self.store.get(key)? {
            Some(_) if self.config.duplicate_policy == DuplicatePolicy::Reject => {
                return Err(EngineError::DuplicateTransaction {
                    key: key.clone(),
                    side: Side::Left,
                });
            }
            Some(pair) => pair.replace_left(operand),
            None => OperandPair::with_left(operand),
        };
        let state = pair.state();
        self.store.set(key, pair)?;
        debug!(%key, size, %state, "left operand accepted");

        Ok(Ack {
            key: key.clone(),
            side: Side::Left,
            state,
        })
    }

    /// Attach `data` as the right operand of `key`, keeping its left operand.
    ///
    /// Fails with `OutOfOrderSubmission` if no left operand is stored.
    pub fn submit_right(&self, key: &TransactionKey, data: impl Into<Bytes>) -> EngineResult<Ack> {
        let data = data.into();
        if data.is_empty() {
            return Err(EngineError::EmptyPayload(Side::Right));
        }

        let _guard = self.locks.lock(key);
        let Some(pair) = self.store.get(key)? else {
            return Err(EngineError::OutOfOrderSubmission(key.clone()));
        };
        if self.config.duplicate_policy == DuplicatePolicy::Reject && pair.right.is_some() {
            return Err(EngineError::DuplicateTransaction {
                key: key.clone(),
                side: Side::Right,
            });
        }

        let size = data.len();
        let pair = pair.attach_right(Operand::new(key.clone(), Side::Right, data));
        self.store.set(key, pair)?;
        debug!(%key, size, "right operand accepted");

        Ok(Ack {
            key: key.clone(),
            side: Side::Right,
            state: TransactionState::BothSet,
        })
    }

    // ---- Comparison ----

    /// Consume the pair stored under `key` and compare its operands.
    ///
    /// A pair is handed out at most once: after a successful call, the key is
    /// empty and a repeat call fails with `NoPendingTransaction` until new
    /// operands are submitted. An incomplete pair is left in place.
    pub fn compare(&self, key: &TransactionKey) -> EngineResult<ComparisonReport> {
        let _guard = self.locks.lock(key);

        let Some(pair) = self.store.get(key)? else {
            return Err(EngineError::NoPendingTransaction(key.clone()));
        };
        if !pair.is_complete() {
            return Err(EngineError::IncompleteTransaction(key.clone()));
        }

        // The atomic pop is the authority on consumption; the read above only
        // classifies the failure.
        let Some(OperandPair {
            left,
            right: Some(right),
        }) = self.store.remove(key)?
        else {
            return Err(EngineError::NoPendingTransaction(key.clone()));
        };
        debug!(
            %key,
            from = %TransactionState::BothSet,
            to = %TransactionState::Consumed,
            left_age_ms = left.age().num_milliseconds(),
            right_age_ms = right.age().num_milliseconds(),
            "pair consumed"
        );

        let outcome = self.comparator.compare(&left.data, &right.data);
        debug!(%key, runs = outcome.runs().len(), equal = outcome.is_equal(), "comparison finished");

        Ok(ComparisonReport {
            key: key.clone(),
            outcome,
        })
    }

    /// Current lifecycle state of `key`.
    pub fn state(&self, key: &TransactionKey) -> EngineResult<TransactionState> {
        let pair = self.store.get(key)?;
        Ok(TransactionState::of(pair.as_ref()))
    }

    /// Whether `key` holds any unconsumed operand.
    pub fn is_pending(&self, key: &TransactionKey) -> EngineResult<bool> {
        Ok(self.store.exists(key)?)
    }
}

impl<S: std::fmt::Debug, C> std::fmt::Debug for TransactionEngine<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionEngine")
            .field("store", &self.store)
            .field("config", &self.config)
            .field("locks", &self.locks)
            .finish()
    }
}
