use std::fmt;

use super::Value;

/// Comparison operators supported in rule conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    Contains,
}

impl Operator {
    /// All operators, in declaration order.
    pub const ALL: [Operator; 5] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::Contains,
    ];

    /// The operator's name as written in rule JSON.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Operator::Equal => "Equal",
            Operator::NotEqual => "NotEqual",
            Operator::GreaterThan => "GreaterThan",
            Operator::LessThan => "LessThan",
            Operator::Contains => "Contains",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single comparison of one (possibly nested) field against one literal.
///
/// `value` is `None` when the source had a `null` or no value at all; the
/// compiler rejects such conditions with
/// [`CompileError::InvalidCondition`](crate::CompileError::InvalidCondition).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(deny_unknown_fields))]
pub struct RuleCondition {
    #[cfg_attr(feature = "json", serde(default, alias = "Field"))]
    pub field: String,
    #[cfg_attr(feature = "json", serde(alias = "Operator"))]
    pub operator: Operator,
    #[cfg_attr(feature = "json", serde(default, alias = "Value"))]
    pub value: Option<Value>,
}

impl RuleCondition {
    #[must_use]
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: Some(value.into()),
        }
    }
}

impl fmt::Display for RuleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "({} {} {value})", self.field, self.operator),
            None => write!(f, "({} {} null)", self.field, self.operator),
        }
    }
}

/// Intermediate builder for conditions.
/// Created by [`field()`]; requires an operator method to produce a [`RuleCondition`].
#[derive(Debug, Clone)]
pub struct FieldCondition {
    path: String,
}

impl FieldCondition {
    fn with(self, operator: Operator, value: impl Into<Value>) -> RuleCondition {
        RuleCondition {
            field: self.path,
            operator,
            value: Some(value.into()),
        }
    }

    #[must_use]
    pub fn eq(self, value: impl Into<Value>) -> RuleCondition {
        self.with(Operator::Equal, value)
    }

    #[must_use]
    pub fn neq(self, value: impl Into<Value>) -> RuleCondition {
        self.with(Operator::NotEqual, value)
    }

    #[must_use]
    pub fn gt(self, value: impl Into<Value>) -> RuleCondition {
        self.with(Operator::GreaterThan, value)
    }

    #[must_use]
    pub fn lt(self, value: impl Into<Value>) -> RuleCondition {
        self.with(Operator::LessThan, value)
    }

    #[must_use]
    pub fn contains(self, value: impl Into<Value>) -> RuleCondition {
        self.with(Operator::Contains, value)
    }
}

#[must_use]
pub fn field(path: &str) -> FieldCondition {
    FieldCondition {
        path: path.to_owned(),
    }
}
