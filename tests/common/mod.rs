#![allow(dead_code)]

use sifter::{Predicate, Record, Schema};

#[derive(Debug, Clone)]
pub struct Bio {
    pub age: i32,
    pub nickname: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Geo {
    pub region: String,
    pub elevation: f64,
}

#[derive(Debug, Clone)]
pub struct Address {
    pub geo: Geo,
    pub floor: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct Customer {
    pub name: String,
    pub bio: Bio,
    pub city: String,
    pub vip: bool,
    pub address: Option<Address>,
}

impl Record for Bio {
    fn schema() -> Schema<Self> {
        Schema::<Self>::builder()
            .int("Age", |b| i64::from(b.age))
            .optional_string("Nickname", |b| b.nickname.as_deref())
            .build()
    }
}

impl Record for Geo {
    fn schema() -> Schema<Self> {
        Schema::<Self>::builder()
            .string("Region", |g| g.region.as_str())
            .float("Elevation", |g| g.elevation)
            .build()
    }
}

impl Record for Address {
    fn schema() -> Schema<Self> {
        Schema::<Self>::builder()
            .nested("Geo", |a| &a.geo)
            .optional_int("Floor", |a| a.floor)
            .build()
    }
}

impl Record for Customer {
    fn schema() -> Schema<Self> {
        Schema::<Self>::builder()
            .string("Name", |c| c.name.as_str())
            .nested("Bio", |c| &c.bio)
            .string("City", |c| c.city.as_str())
            .bool("Vip", |c| c.vip)
            .optional_nested("Address", |c| c.address.as_ref())
            .build()
    }
}

pub fn customer(name: &str, age: i32, city: &str) -> Customer {
    Customer {
        name: name.to_owned(),
        bio: Bio {
            age,
            nickname: None,
        },
        city: city.to_owned(),
        vip: false,
        address: None,
    }
}

/// The three demo customers: John (30, Mumbai), Sara (22, Delhi), Aman (29, Mumbai).
pub fn customers() -> Vec<Customer> {
    vec![
        customer("John", 30, "Mumbai"),
        customer("Sara", 22, "Delhi"),
        customer("Aman", 29, "Mumbai"),
    ]
}

pub fn names<'a>(records: &'a [Customer], predicate: &Predicate<Customer>) -> Vec<&'a str> {
    records
        .iter()
        .filter(|c| predicate.matches(c))
        .map(|c| c.name.as_str())
        .collect()
}
