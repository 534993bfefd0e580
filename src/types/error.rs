use thiserror::Error;

use super::{FieldType, Operator};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("invalid rule set: {reason}")]
    InvalidRuleSet { reason: String },

    #[error("invalid condition #{index} on field '{field}': {reason}")]
    InvalidCondition {
        index: usize,
        field: String,
        reason: String,
    },

    #[error("field '{segment}' not found while resolving '{path}'")]
    FieldNotFound { segment: String, path: String },

    #[error("type mismatch on field '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        found: String,
    },

    #[error("operator {operator} is not supported on {field_type} field '{field}'")]
    UnsupportedOperator {
        operator: Operator,
        field: String,
        field_type: FieldType,
    },
}
