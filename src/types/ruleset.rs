use std::fmt;

use super::condition::RuleCondition;
use super::error::CompileError;
use super::options::CompileOptions;
use super::predicate::Predicate;
use super::schema::{Record, Schema};

/// How the conditions of a [`RuleSet`] combine. Applies to all conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum Connector {
    /// Every condition must hold.
    #[default]
    And,
    /// At least one condition must hold.
    Or,
}

impl Connector {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connector::And => write!(f, "And"),
            Connector::Or => write!(f, "Or"),
        }
    }
}

/// A flat rule set: one connector across an ordered list of conditions.
///
/// Build one in code or decode it from JSON, then compile it into a
/// [`Predicate`] for a concrete [`Record`] type.
///
/// # Example
///
/// ```
/// use sifter::{Record, RuleSet, Schema, field};
///
/// struct User {
///     age: i64,
/// }
///
/// impl Record for User {
///     fn schema() -> Schema<Self> {
///         Schema::<Self>::builder().int("Age", |u| u.age).build()
///     }
/// }
///
/// let adults = RuleSet::all(vec![field("Age").gt(17_i64)])
///     .compile::<User>()
///     .unwrap();
///
/// assert!(adults.matches(&User { age: 30 }));
/// assert!(!adults.matches(&User { age: 12 }));
/// ```
///
/// `connector` is `None` when a decoded rule set did not name one; such a
/// rule set is rejected at compile time with
/// [`CompileError::InvalidRuleSet`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(deny_unknown_fields))]
pub struct RuleSet {
    #[cfg_attr(
        feature = "json",
        serde(
            default,
            alias = "Connector",
            deserialize_with = "connector_or_empty",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub connector: Option<Connector>,
    #[cfg_attr(feature = "json", serde(default, alias = "Conditions"))]
    pub conditions: Vec<RuleCondition>,
}

/// An empty connector name decodes as a missing connector.
#[cfg(feature = "json")]
fn connector_or_empty<'de, D>(deserializer: D) -> Result<Option<Connector>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some("And") => Ok(Some(Connector::And)),
        Some("Or") => Ok(Some(Connector::Or)),
        Some(other) => Err(serde::de::Error::unknown_variant(other, &["And", "Or"])),
    }
}

impl RuleSet {
    #[must_use]
    pub fn new(connector: Connector, conditions: Vec<RuleCondition>) -> Self {
        Self {
            connector: Some(connector),
            conditions,
        }
    }

    /// A rule set that holds when every condition holds.
    #[must_use]
    pub fn all(conditions: Vec<RuleCondition>) -> Self {
        Self::new(Connector::And, conditions)
    }

    /// A rule set that holds when any condition holds.
    #[must_use]
    pub fn any(conditions: Vec<RuleCondition>) -> Self {
        Self::new(Connector::Or, conditions)
    }

    /// Compile against the schema declared by `T`.
    ///
    /// # Errors
    ///
    /// Returns the first [`CompileError`] encountered.
    pub fn compile<T: Record>(&self) -> Result<Predicate<T>, CompileError> {
        self.compile_with(&T::schema())
    }

    /// Compile against an explicit schema.
    ///
    /// # Errors
    ///
    /// Returns the first [`CompileError`] encountered.
    pub fn compile_with<T: 'static>(
        &self,
        schema: &Schema<T>,
    ) -> Result<Predicate<T>, CompileError> {
        self.compile_with_options(schema, &CompileOptions::default())
    }

    /// Compile against an explicit schema with non-default options.
    ///
    /// # Errors
    ///
    /// Returns the first [`CompileError`] encountered.
    pub fn compile_with_options<T: 'static>(
        &self,
        schema: &Schema<T>,
        options: &CompileOptions,
    ) -> Result<Predicate<T>, CompileError> {
        crate::compile::compile(self, schema, options)
    }
}

#[cfg(feature = "json")]
impl RuleSet {
    /// Decode a rule set from JSON.
    ///
    /// Decoding checks the shape and rejects unknown keys. A missing or
    /// empty connector, field paths, literal types and the condition count
    /// are checked when compiling.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the input is not a rule set, for
    /// example when an operator or connector name is unknown.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Decode a rule set from a JSON byte stream.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] on I/O or decoding failure.
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    /// Read a JSON file and decode the rule set it contains.
    ///
    /// # Errors
    ///
    /// Returns [`SifterError`](crate::SifterError) on I/O or decoding failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::SifterError> {
        let input = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&input)?)
    }

    /// Encode this rule set as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if encoding fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(connector) = self.connector {
            write!(f, "{connector}")?;
        }
        write!(f, "[")?;
        for (i, cond) in self.conditions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{cond}")?;
        }
        write!(f, "]")
    }
}
