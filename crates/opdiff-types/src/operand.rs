use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::key::TransactionKey;

/// Which half of a comparison an operand fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// A submitted payload, owned by the store until consumed or overwritten.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operand {
    pub key: TransactionKey,
    pub side: Side,
    pub data: Bytes,
    /// When the payload was accepted.
    pub submitted_at: DateTime<Utc>,
}

impl Operand {
    /// Create an operand stamped with the current time.
    pub fn new(key: TransactionKey, side: Side, data: impl Into<Bytes>) -> Self {
        Self {
            key,
            side,
            data: data.into(),
            submitted_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Time elapsed since the operand was accepted.
    pub fn age(&self) -> Duration {
        Utc::now() - self.submitted_at
    }
}

/// The evolving pair held under a single transaction key.
///
/// A stored pair always carries a left operand; a key with nothing stored is
/// simply absent from the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperandPair {
    pub left: Operand,
    pub right: Option<Operand>,
}

impl OperandPair {
    /// A pair holding only a left operand.
    pub fn with_left(left: Operand) -> Self {
        Self { left, right: None }
    }

    /// Replace the left operand, keeping any right one.
    pub fn replace_left(mut self, left: Operand) -> Self {
        self.left = left;
        self
    }

    /// Replace the right operand, keeping the left one.
    pub fn attach_right(mut self, right: Operand) -> Self {
        self.right = Some(right);
        self
    }

    /// Both operands are present.
    pub fn is_complete(&self) -> bool {
        self.right.is_some()
    }

    /// Size in bytes of the larger operand.
    pub fn largest_operand(&self) -> usize {
        self.right
            .as_ref()
            .map_or(0, Operand::len)
            .max(self.left.len())
    }

    pub fn state(&self) -> TransactionState {
        if self.is_complete() {
            TransactionState::BothSet
        } else {
            TransactionState::LeftSet
        }
    }
}

/// Lifecycle of a transaction key.
///
/// `Empty -> LeftSet -> BothSet -> Consumed`, after which the key is `Empty`
/// again. `Consumed` is only ever observed as a transition: once a pair is
/// consumed it is gone from the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionState {
    Empty,
    LeftSet,
    BothSet,
    Consumed,
}

impl TransactionState {
    /// The state of a key given what the store currently holds for it.
    pub fn of(pair: Option<&OperandPair>) -> Self {
        pair.map_or(Self::Empty, OperandPair::state)
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "EMPTY",
            Self::LeftSet => "LEFT_SET",
            Self::BothSet => "BOTH_SET",
            Self::Consumed => "CONSUMED",
        };
        f.write_str(name)
    }
}
