//! Transaction engine for opdiff.
//!
//! Accepts left and right operands under a caller-chosen key, enforces
//! submission order and the duplicate policy, and hands a completed pair to
//! the comparator exactly once.
//!
//! ```text
//! EMPTY --submit_left--> LEFT_SET --submit_right--> BOTH_SET --compare--> CONSUMED -> EMPTY
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod locks;
pub mod report;

pub use config::{DuplicatePolicy, EngineConfig};
pub use engine::TransactionEngine;
pub use error::{EngineError, EngineResult};
pub use report::{
    outcome_message, Ack, ComparisonReport, DONE_MESSAGE, EQUAL_MESSAGE, NOT_EQUAL_MESSAGE,
};

// Re-export key types
pub use opdiff_compare::{ByteComparator, Comparator};
pub use opdiff_store::{InMemoryOperandStore, OperandStore, StoreError};
pub use opdiff_types::{
    ComparisonOutcome, DifferenceRun, Side, TransactionKey, TransactionState,
};
