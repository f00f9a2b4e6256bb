use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of a comparison transaction.
///
/// Keys are chosen by the caller, never generated here. Any non-blank string
/// is accepted; numeric ids are carried as their decimal text so that `42`
/// and `"42"` name the same transaction.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionKey(String);

impl TransactionKey {
    /// Create a key, rejecting empty or whitespace-only input.
    pub fn new(key: impl Into<String>) -> Result<Self, TypeError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(TypeError::BlankKey);
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TransactionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionKey({})", self.0)
    }
}

impl fmt::Display for TransactionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TransactionKey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TransactionKey {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TransactionKey> for String {
    fn from(key: TransactionKey) -> Self {
        key.0
    }
}

impl From<u64> for TransactionKey {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for TransactionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
