//! Run-length byte comparison.
//!
//! A single linear pass over two equal-length sequences, tracking the start
//! of the currently open run of mismatches. Adjacent differing bytes merge
//! into one run, so consecutive runs are always separated by at least one
//! matching byte.

use opdiff_types::{ComparisonOutcome, DifferenceRun};

/// Something that can compare a left and right operand.
///
/// The transaction engine takes its comparator through this trait so the
/// comparison strategy can be swapped without touching the state machine.
pub trait Comparator: Send + Sync {
    fn compare(&self, left: &[u8], right: &[u8]) -> ComparisonOutcome;
}

/// The default comparator, backed by [`compare_bytes`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ByteComparator;

impl Comparator for ByteComparator {
    fn compare(&self, left: &[u8], right: &[u8]) -> ComparisonOutcome {
        compare_bytes(left, right)
    }
}

/// Compare two possibly absent byte sequences.
///
/// An absent sequence is treated as zero-length, so this never fails.
pub fn compare(left: Option<&[u8]>, right: Option<&[u8]>) -> ComparisonOutcome {
    compare_bytes(left.unwrap_or_default(), right.unwrap_or_default())
}

/// Compare two byte sequences.
///
/// Sequences of different length short-circuit to
/// [`ComparisonOutcome::UnequalLength`] without looking at any byte.
pub fn compare_bytes(left: &[u8], right: &[u8]) -> ComparisonOutcome {
    if left.len() != right.len() {
        return ComparisonOutcome::UnequalLength;
    }

    let mut runs = Vec::new();
    let mut open: Option<usize> = None;

    for (i, (l, r)) in left.iter().zip(right).enumerate() {
        match (l != r, open) {
            (true, None) => open = Some(i),
            (false, Some(start)) => {
                close_run(&mut runs, start, i);
                open = None;
            }
            // Mismatch inside an open run extends it; a match with nothing
            // open needs no action.
            (true, Some(_)) | (false, None) => {}
        }
    }

    if let Some(start) = open {
        close_run(&mut runs, start, left.len());
    }

    if runs.is_empty() {
        ComparisonOutcome::Equal
    } else {
        ComparisonOutcome::Unequal(runs)
    }
}

/// Emit the run `[start, end)`. Callers only close a run after at least one
/// mismatch, so `end > start`.
fn close_run(runs: &mut Vec<DifferenceRun>, start: usize, end: usize) {
    runs.push(DifferenceRun::spanning(start, end));
}
