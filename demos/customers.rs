//! Filter an in-memory customer list with rule sets decoded from JSON.
//!
//! Run with `RUST_LOG=sifter=trace cargo run --example customers` to see
//! compilation logged per condition.

use sifter::{Predicate, Record, Schema};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct Bio {
    age: i32,
}

struct Customer {
    name: String,
    bio: Bio,
    city: String,
}

impl Record for Bio {
    fn schema() -> Schema<Self> {
        Schema::<Self>::builder().int("Age", |b| i64::from(b.age)).build()
    }
}

impl Record for Customer {
    fn schema() -> Schema<Self> {
        Schema::<Self>::builder()
            .string("Name", |c| c.name.as_str())
            .nested("Bio", |c| &c.bio)
            .string("City", |c| c.city.as_str())
            .build()
    }
}

const RULES: [(&str, &str); 2] = [
    (
        "and",
        r#"{
            "connector": "And",
            "conditions": [
                { "field": "Bio.Age", "operator": "GreaterThan", "value": 20 },
                { "field": "City", "operator": "Contains", "value": "Mumbai" },
                { "field": "Name", "operator": "Equal", "value": "John" }
            ]
        }"#,
    ),
    (
        "or",
        r#"{
            "connector": "Or",
            "conditions": [
                { "field": "Bio.Age", "operator": "GreaterThan", "value": 20 },
                { "field": "City", "operator": "Contains", "value": "Mumbai" }
            ]
        }"#,
    ),
];

fn customer(name: &str, age: i32, city: &str) -> Customer {
    Customer {
        name: name.to_owned(),
        bio: Bio { age },
        city: city.to_owned(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,sifter=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let customers = [
        customer("John", 30, "Mumbai"),
        customer("Sara", 22, "Delhi"),
        customer("Aman", 29, "Mumbai"),
    ];

    for (label, json) in RULES {
        let predicate = Predicate::<Customer>::from_json(json)?;
        let selected: Vec<&str> = customers
            .iter()
            .filter(|c| predicate.matches(c))
            .map(|c| c.name.as_str())
            .collect();
        tracing::info!(rules = label, %predicate, ?selected, "filtered customers");
    }

    // A typo in a path is caught before any record is read.
    let broken =
        r#"{"connector":"And","conditions":[{"field":"Bio.Agee","operator":"Equal","value":1}]}"#;
    if let Err(err) = Predicate::<Customer>::from_json(broken) {
        tracing::warn!(%err, "rule set rejected");
    }

    Ok(())
}
