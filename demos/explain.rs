//! Build a rule set in code and explain its outcome for each record.

use sifter::{field, CompileOptions, Connector, Record, RuleSet, Schema, StringCoercion};

struct Sensor {
    id: String,
    reading: f64,
    online: bool,
    firmware: Option<i64>,
}

impl Record for Sensor {
    fn schema() -> Schema<Self> {
        Schema::<Self>::builder()
            .string("Id", |s| s.id.as_str())
            .float("Reading", |s| s.reading)
            .bool("Online", |s| s.online)
            .optional_int("Firmware", |s| s.firmware)
            .build()
    }
}

fn main() -> Result<(), sifter::CompileError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let ruleset = RuleSet::new(
        Connector::And,
        vec![
            field("Online").eq(true),
            field("Reading").lt(80.5_f64),
            field("Firmware").gt(2_i64),
            field("Id").contains("north"),
        ],
    );
    let options = CompileOptions::new().string_coercion(StringCoercion::Strict);
    let predicate = ruleset.compile_with_options(&Sensor::schema(), &options)?;
    println!("{predicate}");

    let sensors = [
        Sensor {
            id: "north-01".into(),
            reading: 61.2,
            online: true,
            firmware: Some(3),
        },
        Sensor {
            id: "north-02".into(),
            reading: 92.0,
            online: true,
            firmware: None,
        },
        Sensor {
            id: "south-01".into(),
            reading: 40.0,
            online: false,
            firmware: Some(4),
        },
    ];

    for sensor in &sensors {
        let report = predicate.explain(sensor);
        println!("{}: {report}", sensor.id);
        for outcome in report.outcomes() {
            println!(
                "  #{} {} {}: {}",
                outcome.index, outcome.field, outcome.operator, outcome.matched
            );
        }
    }

    Ok(())
}
