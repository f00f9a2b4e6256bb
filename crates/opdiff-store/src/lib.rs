//! Keyed storage of pending operand pairs.
//!
//! Every transaction key maps to one [`OperandPair`](opdiff_types::OperandPair)
//! that evolves as the left and right operands arrive. The transaction engine
//! is the only writer; it relies on nothing beyond the four operations of the
//! [`OperandStore`] trait.
//!
//! # Storage Backends
//!
//! - [`InMemoryOperandStore`] -- `HashMap`-based store for the server and tests
//!
//! # Design Rules
//!
//! 1. `set` inserts or overwrites; there is no partial update.
//! 2. `remove` is an atomic pop: at most one caller receives a given pair.
//! 3. Oversized operands are rejected with [`StoreError::CapacityExceeded`],
//!    never truncated.
//! 4. All backend failures are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryOperandStore, DEFAULT_MAX_OPERAND_SIZE};
pub use traits::OperandStore;
