use opdiff_types::{ComparisonOutcome, DifferenceRun, Side, TransactionKey, TransactionState};

/// Acknowledgement text for an accepted operand.
pub const DONE_MESSAGE: &str = "Done";
/// Message for an `Equal` outcome.
pub const EQUAL_MESSAGE: &str = "Byte arrays are equal!";
/// Message for `UnequalLength` and `Unequal` outcomes.
pub const NOT_EQUAL_MESSAGE: &str = "Byte arrays are NOT equal!";

/// Human-facing summary of a comparison outcome.
pub fn outcome_message(outcome: &ComparisonOutcome) -> &'static str {
    match outcome {
        ComparisonOutcome::Equal => EQUAL_MESSAGE,
        ComparisonOutcome::UnequalLength | ComparisonOutcome::Unequal(_) => NOT_EQUAL_MESSAGE,
    }
}

/// Successful submission of an operand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ack {
    pub key: TransactionKey,
    pub side: Side,
    /// State of the transaction after the submission.
    pub state: TransactionState,
}

impl Ack {
    pub fn message(&self) -> &'static str {
        DONE_MESSAGE
    }
}

/// Result of consuming a completed pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonReport {
    pub key: TransactionKey,
    pub outcome: ComparisonOutcome,
}

impl ComparisonReport {
    pub fn message(&self) -> &'static str {
        outcome_message(&self.outcome)
    }

    pub fn runs(&self) -> &[DifferenceRun] {
        self.outcome.runs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outcome: ComparisonOutcome) -> ComparisonReport {
        ComparisonReport {
            key: TransactionKey::new("r").unwrap(),
            outcome,
        }
    }

    #[test]
    fn messages() {
        assert_eq!(report(ComparisonOutcome::Equal).message(), "Byte arrays are equal!");
        assert_eq!(
            report(ComparisonOutcome::UnequalLength).message(),
            "Byte arrays are NOT equal!"
        );

        let runs = vec![DifferenceRun::new(1, 1).unwrap()];
        let unequal = report(ComparisonOutcome::Unequal(runs.clone()));
        assert_eq!(unequal.message(), "Byte arrays are NOT equal!");
        assert_eq!(unequal.runs(), runs.as_slice());
    }

    #[test]
    fn unequal_length_has_no_runs() {
        assert!(report(ComparisonOutcome::UnequalLength).runs().is_empty());
    }
}
