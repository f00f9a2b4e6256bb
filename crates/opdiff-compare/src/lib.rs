//! Byte comparator for opdiff.
//!
//! Turns two byte sequences into a [`ComparisonOutcome`]: equal, unequal in
//! length, or a list of [`DifferenceRun`]s describing each maximal span of
//! differing positions.
//!
//! # Key Items
//!
//! - [`compare`] / [`compare_bytes`] -- the comparison itself
//! - [`Comparator`] -- injection seam used by the transaction engine
//! - [`ByteComparator`] -- the default implementation

pub mod byte_compare;

pub use byte_compare::{compare, compare_bytes, ByteComparator, Comparator};
pub use opdiff_types::{ComparisonOutcome, DifferenceRun};
