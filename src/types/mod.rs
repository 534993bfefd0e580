mod condition;
mod error;
mod evaluation_report;
mod options;
mod predicate;
mod ruleset;
mod schema;
mod value;

pub use condition::{FieldCondition, Operator, RuleCondition, field};
pub use error::CompileError;
pub use evaluation_report::{ConditionOutcome, EvaluationReport};
pub use options::{CompileOptions, StringCoercion};
pub use predicate::Predicate;
pub use ruleset::{Connector, RuleSet};
pub use schema::{FieldType, Record, Schema, SchemaBuilder};
pub use value::Value;

pub(crate) use schema::{Accessor, FieldKind, Getter, Resolved, StrGetter};
