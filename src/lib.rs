//! Compiles declarative rule sets into typed, reusable record predicates.
//!
//! A [`RuleSet`] is a connector (`And` / `Or`) over a list of conditions,
//! each comparing a dotted field path such as `"Bio.Age"` with a literal.
//! Compiling it against a [`Record`] type resolves every path and converts
//! every literal up front, producing a [`Predicate`] that only reads fields
//! and compares when applied to a record.
//!
//! ```
//! use sifter::{Record, RuleSet, Schema, field};
//!
//! struct Customer {
//!     name: String,
//!     city: String,
//! }
//!
//! impl Record for Customer {
//!     fn schema() -> Schema<Self> {
//!         Schema::<Self>::builder()
//!             .string("Name", |c| c.name.as_str())
//!             .string("City", |c| c.city.as_str())
//!             .build()
//!     }
//! }
//!
//! let in_mumbai = RuleSet::all(vec![field("City").contains("Mumbai")])
//!     .compile::<Customer>()
//!     .unwrap();
//!
//! let customers = vec![
//!     Customer { name: "John".into(), city: "Mumbai".into() },
//!     Customer { name: "Sara".into(), city: "Delhi".into() },
//! ];
//! let names: Vec<&str> = customers
//!     .iter()
//!     .filter(|c| in_mumbai.matches(c))
//!     .map(|c| c.name.as_str())
//!     .collect();
//! assert_eq!(names, ["John"]);
//! ```

#[cfg(feature = "cache")]
mod cache;
mod coerce;
mod compile;
mod error;
mod evaluate;
mod resolve;
mod types;

#[cfg(feature = "cache")]
pub use cache::PredicateCache;
pub use error::SifterError;
pub use types::{
    CompileError, CompileOptions, ConditionOutcome, Connector, EvaluationReport, FieldCondition,
    FieldType, Operator, Predicate, Record, RuleCondition, RuleSet, Schema, SchemaBuilder,
    StringCoercion, Value, field,
};
