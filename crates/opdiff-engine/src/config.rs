use serde::{Deserialize, Serialize};

/// What happens when an operand is submitted into a transaction that already
/// holds an unconsumed operand on the same side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// The new operand replaces the old one (last write wins).
    #[default]
    Overwrite,
    /// The submission fails with `DuplicateTransaction`.
    Reject,
}

/// Configuration for the transaction engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub duplicate_policy: DuplicatePolicy,
    /// Number of lock stripes used to serialize mutations per key.
    pub lock_stripes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Overwrite,
            lock_stripes: 64,
        }
    }
}

impl EngineConfig {
    /// Default configuration with resubmission rejected.
    pub fn strict() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
            ..Default::default()
        }
    }
}
