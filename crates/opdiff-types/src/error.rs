use thiserror::Error;

/// Errors produced by type construction and validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("transaction key must not be blank")]
    BlankKey,

    #[error("difference run at position {position} has zero length")]
    ZeroLengthRun { position: usize },
}
