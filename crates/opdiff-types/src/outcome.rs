use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A maximal contiguous span of positions at which two equal-length byte
/// sequences disagree: bytes `[position, position + length)`.
///
/// `length` is never zero. On the wire the length is carried under the name
/// `offset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawRun")]
pub struct DifferenceRun {
    position: usize,
    #[serde(rename = "offset")]
    length: usize,
}

#[derive(Deserialize)]
struct RawRun {
    position: usize,
    offset: usize,
}

impl TryFrom<RawRun> for DifferenceRun {
    type Error = TypeError;

    fn try_from(raw: RawRun) -> Result<Self, Self::Error> {
        Self::new(raw.position, raw.offset)
    }
}

impl DifferenceRun {
    pub fn new(position: usize, length: usize) -> Result<Self, TypeError> {
        if length == 0 {
            return Err(TypeError::ZeroLengthRun { position });
        }
        Ok(Self { position, length })
    }

    /// The run covering `[start, end)`. `end` must be past `start`.
    pub fn spanning(start: usize, end: usize) -> Self {
        debug_assert!(end > start, "empty difference run {start}..{end}");
        Self {
            position: start,
            length: end.saturating_sub(start).max(1),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// One past the last differing position.
    pub fn end(&self) -> usize {
        self.position + self.length
    }
}

/// Result of comparing two byte sequences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComparisonOutcome {
    /// Same length, no differing positions.
    Equal,
    /// Lengths differ; runs are never computed.
    UnequalLength,
    /// Same length, at least one run, ordered by ascending position.
    Unequal(Vec<DifferenceRun>),
}

impl ComparisonOutcome {
    pub fn is_equal(&self) -> bool {
        matches!(self, Self::Equal)
    }

    /// The difference runs; empty unless the outcome is `Unequal`.
    pub fn runs(&self) -> &[DifferenceRun] {
        match self {
            Self::Unequal(runs) => runs,
            Self::Equal | Self::UnequalLength => &[],
        }
    }

    pub fn into_runs(self) -> Vec<DifferenceRun> {
        match self {
            Self::Unequal(runs) => runs,
            Self::Equal | Self::UnequalLength => Vec::new(),
        }
    }
}
