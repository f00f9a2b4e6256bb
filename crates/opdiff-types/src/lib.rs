//! Foundation types for opdiff.
//!
//! This crate provides the identifiers and value types shared by every other
//! opdiff crate: the comparator, the operand store, the transaction engine,
//! and the HTTP transport.
//!
//! # Key Types
//!
//! - [`TransactionKey`] — Caller-chosen identifier grouping a left and right operand
//! - [`Side`] — Which half of a pair an operand fills
//! - [`Operand`] / [`OperandPair`] — Submitted payloads as held by the store
//! - [`TransactionState`] — Lifecycle state of a transaction key
//! - [`DifferenceRun`] — A maximal span of differing byte positions
//! - [`ComparisonOutcome`] — Result of comparing two byte sequences

pub mod error;
pub mod key;
pub mod operand;
pub mod outcome;

pub use error::TypeError;
pub use key::TransactionKey;
pub use operand::{Operand, OperandPair, Side, TransactionState};
pub use outcome::{ComparisonOutcome, DifferenceRun};
