//! Literal coercion: converts an untyped [`Value`] into the native type of
//! the field it is compared against.
//!
//! | literal \ field | int | float | bool | string |
//! |---|---|---|---|---|
//! | int | as is | widened | - | stringified* |
//! | float | if integral and in range | as is | - | stringified* |
//! | bool | - | - | as is | stringified* |
//! | string | parsed | parsed (finite) | `true` / `false`, any case | as is |
//!
//! `*` unless [`StringCoercion::Strict`] is selected.

use crate::{CompileError, FieldType, StringCoercion, Value};

// 2^63 as f64; every integral float in [-2^63, 2^63) fits in an i64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn to_int(value: &Value, field: &str) -> Result<i64, CompileError> {
    match value {
        Value::Int(v) => Some(*v),
        Value::Float(v) => {
            let integral = v.is_finite() && v.fract() == 0.0;
            (integral && *v >= -I64_BOUND && *v < I64_BOUND).then(|| *v as i64)
        }
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(_) => None,
    }
    .ok_or_else(|| mismatch(field, FieldType::Int, value))
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn to_float(value: &Value, field: &str) -> Result<f64, CompileError> {
    match value {
        Value::Int(v) => Some(*v as f64),
        Value::Float(v) => Some(*v),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Value::Bool(_) => None,
    }
    .ok_or_else(|| mismatch(field, FieldType::Float, value))
}

pub(crate) fn to_bool(value: &Value, field: &str) -> Result<bool, CompileError> {
    match value {
        Value::Bool(v) => Some(*v),
        Value::String(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("true") {
                Some(true)
            } else if s.eq_ignore_ascii_case("false") {
                Some(false)
            } else {
                None
            }
        }
        Value::Int(_) | Value::Float(_) => None,
    }
    .ok_or_else(|| mismatch(field, FieldType::Bool, value))
}

pub(crate) fn to_string(
    value: &Value,
    field: &str,
    mode: StringCoercion,
) -> Result<String, CompileError> {
    match (value, mode) {
        (Value::String(s), _) => Ok(s.clone()),
        (Value::Int(v), StringCoercion::Stringify) => Ok(v.to_string()),
        (Value::Float(v), StringCoercion::Stringify) => Ok(v.to_string()),
        (Value::Bool(v), StringCoercion::Stringify) => Ok(v.to_string()),
        (_, StringCoercion::Strict) => Err(mismatch(field, FieldType::String, value)),
    }
}

fn mismatch(field: &str, expected: FieldType, value: &Value) -> CompileError {
    CompileError::TypeMismatch {
        field: field.to_owned(),
        expected,
        found: format!("{} literal {value}", value.kind()),
    }
}
