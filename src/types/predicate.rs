use std::fmt;
use std::sync::Arc;

use super::evaluation_report::EvaluationReport;
use super::ruleset::Connector;
use crate::evaluate::CompiledCondition;

/// A compiled, reusable filter over records of type `T`.
///
/// All field lookups and literal conversions were done at compile time;
/// evaluation only reads fields and compares. A predicate holds no
/// reference to the [`RuleSet`](super::RuleSet) it came from, is cheap to
/// clone, and is `Send + Sync`, so it can live behind an `Arc` and be shared
/// between threads.
///
/// Evaluation never fails. A condition whose field value is absent (an
/// optional field or an optional record on the path is `None`) evaluates to
/// `false`.
pub struct Predicate<T> {
    connector: Connector,
    conditions: Arc<[CompiledCondition<T>]>,
}

impl<T> Predicate<T> {
    pub(crate) fn new(connector: Connector, conditions: Vec<CompiledCondition<T>>) -> Self {
        Self {
            connector,
            conditions: conditions.into(),
        }
    }

    /// Test a record. `And` stops at the first failing condition and `Or`
    /// at the first passing one.
    #[must_use]
    pub fn matches(&self, record: &T) -> bool {
        crate::evaluate::evaluate(self.connector, &self.conditions, record)
    }

    /// Evaluate every condition and report each outcome.
    pub fn explain(&self, record: &T) -> EvaluationReport {
        crate::evaluate::evaluate_detailed(self.connector, &self.conditions, record)
    }

    #[must_use]
    pub fn connector(&self) -> Connector {
        self.connector
    }

    /// The number of compiled conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Always `false` for a predicate produced by compilation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Field paths in condition order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.conditions.iter().map(|c| c.field.as_str())
    }
}

#[cfg(feature = "json")]
impl<T: super::Record> Predicate<T> {
    /// Decode a JSON rule set and compile it against `T` in one step.
    ///
    /// # Errors
    ///
    /// Returns [`SifterError`](crate::SifterError) on decoding or compile failure.
    pub fn from_json(input: &str) -> Result<Self, crate::SifterError> {
        let ruleset = super::RuleSet::from_json(input)?;
        Ok(ruleset.compile::<T>()?)
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            connector: self.connector,
            conditions: Arc::clone(&self.conditions),
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("record", &std::any::type_name::<T>())
            .field("connector", &self.connector)
            .field(
                "conditions",
                &self
                    .conditions
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<T> fmt::Display for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joiner = format!(" {} ", self.connector.keyword());
        let parts: Vec<String> = self.conditions.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(&joiner))
    }
}
