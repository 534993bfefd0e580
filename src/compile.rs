use tracing::{debug, trace};

use crate::evaluate::{CompiledCondition, Equality, Ordered, Test, Textual};
use crate::types::{Accessor, Resolved};
use crate::{
    CompileError, CompileOptions, Connector, FieldType, Operator, Predicate, RuleCondition,
    RuleSet, Schema, Value, coerce,
};

pub(crate) fn compile<T: 'static>(
    ruleset: &RuleSet,
    schema: &Schema<T>,
    options: &CompileOptions,
) -> Result<Predicate<T>, CompileError> {
    let connector = check_rule_set(ruleset)?;

    let conditions = ruleset
        .conditions
        .iter()
        .enumerate()
        .map(|(index, cond)| compile_condition(index, cond, schema, options))
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|err| debug!(error = %err, "rule set rejected"))?;

    debug!(
        record = std::any::type_name::<T>(),
        connector = %connector,
        conditions = conditions.len(),
        "compiled rule set"
    );

    Ok(Predicate::new(connector, conditions))
}

fn check_rule_set(ruleset: &RuleSet) -> Result<Connector, CompileError> {
    let invalid = |reason: &str| CompileError::InvalidRuleSet {
        reason: reason.to_owned(),
    };
    let connector = ruleset
        .connector
        .ok_or_else(|| invalid("connector is missing"))?;
    if ruleset.conditions.is_empty() {
        return Err(invalid("a rule set needs at least one condition"));
    }
    Ok(connector)
}

fn check_condition(index: usize, cond: &RuleCondition) -> Result<&Value, CompileError> {
    let invalid = |reason: &str| CompileError::InvalidCondition {
        index,
        field: cond.field.clone(),
        reason: reason.to_owned(),
    };
    if cond.field.trim().is_empty() {
        return Err(invalid("field path is empty"));
    }
    cond.value.as_ref().ok_or_else(|| invalid("value is null"))
}

fn compile_condition<T: 'static>(
    index: usize,
    cond: &RuleCondition,
    schema: &Schema<T>,
    options: &CompileOptions,
) -> Result<CompiledCondition<T>, CompileError> {
    let value = check_condition(index, cond)?;
    let field = cond.field.as_str();
    let op = cond.operator;

    let accessor = match crate::resolve::resolve(schema, field)? {
        Resolved::Scalar(accessor) => accessor,
        Resolved::Record => return Err(operator_error(op, field, FieldType::Record)),
    };

    let test = match accessor {
        Accessor::Int(get) => {
            let rhs = coerce::to_int(value, field)?;
            let cmp = Ordered::from_operator(op)
                .ok_or_else(|| operator_error(op, field, FieldType::Int))?;
            Test::Int { get, cmp, rhs }
        }
        Accessor::Float(get) => {
            let rhs = coerce::to_float(value, field)?;
            let cmp = Ordered::from_operator(op)
                .ok_or_else(|| operator_error(op, field, FieldType::Float))?;
            Test::Float { get, cmp, rhs }
        }
        Accessor::Bool(get) => {
            let rhs = coerce::to_bool(value, field)?;
            let cmp = Equality::from_operator(op)
                .ok_or_else(|| operator_error(op, field, FieldType::Bool))?;
            Test::Bool { get, cmp, rhs }
        }
        Accessor::Str(get) => {
            let rhs = coerce::to_string(value, field, options.string_coercion)?;
            let cmp = Textual::from_operator(op)
                .ok_or_else(|| operator_error(op, field, FieldType::String))?;
            Test::Str { get, cmp, rhs }
        }
    };

    trace!(index, field, operator = %op, "compiled condition");

    Ok(CompiledCondition {
        field: cond.field.clone(),
        operator: op,
        test,
    })
}

/// `Contains` on a non-text field is a type error; any other operator the
/// field type lacks is unsupported.
fn operator_error(op: Operator, field: &str, field_type: FieldType) -> CompileError {
    match op {
        Operator::Contains if field_type != FieldType::Record => CompileError::TypeMismatch {
            field: field.to_owned(),
            expected: FieldType::String,
            found: format!("{field_type} field"),
        },
        _ => CompileError::UnsupportedOperator {
            operator: op,
            field: field.to_owned(),
            field_type,
        },
    }
}
