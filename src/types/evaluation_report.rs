use std::fmt;
use std::time::Duration;

use super::condition::Operator;

/// Outcome of one condition within an [`EvaluationReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionOutcome {
    /// Position of the condition in the rule set.
    pub index: usize,
    pub field: String,
    pub operator: Operator,
    pub matched: bool,
}

/// Detailed evaluation report returned by
/// [`Predicate::explain()`](super::predicate::Predicate::explain).
///
/// Every condition is evaluated (no short-circuiting), so the report shows
/// which conditions held for the record. [`result()`](Self::result) is the
/// connector fold of those outcomes and always agrees with
/// [`Predicate::matches()`](super::predicate::Predicate::matches).
#[derive(Debug, Clone)]
#[must_use]
pub struct EvaluationReport {
    result: bool,
    outcomes: Vec<ConditionOutcome>,
    duration: Duration,
}

impl EvaluationReport {
    pub(crate) fn new(result: bool, outcomes: Vec<ConditionOutcome>, duration: Duration) -> Self {
        Self {
            result,
            outcomes,
            duration,
        }
    }

    /// Whether the record satisfied the predicate.
    #[must_use]
    pub fn result(&self) -> bool {
        self.result
    }

    /// Per-condition outcomes, in condition order.
    #[must_use]
    pub fn outcomes(&self) -> &[ConditionOutcome] {
        &self.outcomes
    }

    /// Field paths of the conditions that held, in condition order.
    pub fn matched_fields(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| o.matched)
            .map(|o| o.field.as_str())
    }

    /// Wall-clock duration of the evaluation.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "result: {}", self.result)?;
        let matched: Vec<&str> = self.matched_fields().collect();
        write!(f, ", matched: [{}]", matched.join(", "))?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
