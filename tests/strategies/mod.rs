#![allow(dead_code)]

use proptest::prelude::*;
use sifter::{field, RuleCondition};

use crate::common::{Address, Bio, Customer, Geo};

// --- Fixed record shape ---
// Name            : string, one of NAMES
// Bio.Age         : int (0..=120)
// Bio.Nickname    : optional string
// City            : string, one of CITIES
// Vip             : bool
// Address.Floor   : optional int, under an optional record

const NAMES: &[&str] = &["John", "Sara", "Aman", "Ravi"];
const CITIES: &[&str] = &["Mumbai", "Delhi", "Navi Mumbai", "Pune"];
const NEEDLES: &[&str] = &["Mumbai", "Del", "Pu", "x", ""];

/// Generate a customer that aligns with the fixed record shape.
pub fn arb_customer() -> impl Strategy<Value = Customer> {
    (
        prop::sample::select(NAMES),
        0_i32..=120,
        prop::option::of(prop::sample::select(NAMES)),
        prop::sample::select(CITIES),
        any::<bool>(),
        prop::option::of(prop::option::of(0_i64..10)),
    )
        .prop_map(|(name, age, nickname, city, vip, address)| Customer {
            name: name.to_owned(),
            bio: Bio {
                age,
                nickname: nickname.map(str::to_owned),
            },
            city: city.to_owned(),
            vip,
            address: address.map(|floor| Address {
                geo: Geo {
                    region: "west".to_owned(),
                    elevation: 0.0,
                },
                floor,
            }),
        })
}

/// A generated condition paired with an independent evaluation of it.
#[derive(Clone)]
pub struct GenCondition {
    pub condition: RuleCondition,
    pub oracle: fn(&Customer, &RuleCondition) -> bool,
}

impl std::fmt::Debug for GenCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.condition)
    }
}

fn literal_int(cond: &RuleCondition) -> i64 {
    match cond.value {
        Some(sifter::Value::Int(v)) => v,
        _ => unreachable!("int conditions carry int literals"),
    }
}

fn literal_str(cond: &RuleCondition) -> &str {
    match &cond.value {
        Some(sifter::Value::String(v)) => v,
        _ => unreachable!("string conditions carry string literals"),
    }
}

fn literal_bool(cond: &RuleCondition) -> bool {
    match cond.value {
        Some(sifter::Value::Bool(v)) => v,
        _ => unreachable!("bool conditions carry bool literals"),
    }
}

fn compare_int(actual: i64, cond: &RuleCondition) -> bool {
    let rhs = literal_int(cond);
    match cond.operator {
        sifter::Operator::Equal => actual == rhs,
        sifter::Operator::NotEqual => actual != rhs,
        sifter::Operator::GreaterThan => actual > rhs,
        sifter::Operator::LessThan => actual < rhs,
        sifter::Operator::Contains => unreachable!(),
    }
}

fn compare_str(actual: &str, cond: &RuleCondition) -> bool {
    let rhs = literal_str(cond);
    match cond.operator {
        sifter::Operator::Equal => actual == rhs,
        sifter::Operator::NotEqual => actual != rhs,
        sifter::Operator::Contains => actual.contains(rhs),
        _ => unreachable!(),
    }
}

/// Generate a condition on a random field of the record shape.
pub fn arb_condition() -> impl Strategy<Value = GenCondition> {
    let ordered = prop::sample::select(&[0u8, 1, 2, 3][..]);
    prop_oneof![
        // Bio.Age comparisons
        (0_i64..=120, ordered.clone()).prop_map(|(val, op)| {
            let f = field("Bio.Age");
            let condition = match op {
                0 => f.eq(val),
                1 => f.neq(val),
                2 => f.gt(val),
                _ => f.lt(val),
            };
            GenCondition {
                condition,
                oracle: |c, cond| compare_int(i64::from(c.bio.age), cond),
            }
        }),
        // Address.Floor comparisons, absent when either level is None
        (0_i64..10, ordered).prop_map(|(val, op)| {
            let f = field("Address.Floor");
            let condition = match op {
                0 => f.eq(val),
                1 => f.neq(val),
                2 => f.gt(val),
                _ => f.lt(val),
            };
            GenCondition {
                condition,
                oracle: |c, cond| {
                    c.address
                        .as_ref()
                        .and_then(|a| a.floor)
                        .is_some_and(|floor| compare_int(floor, cond))
                },
            }
        }),
        // City equality and substring tests
        (prop::sample::select(NEEDLES), prop::sample::select(&[0u8, 1, 2][..])).prop_map(
            |(val, op)| {
                let f = field("City");
                let condition = match op {
                    0 => f.eq(val),
                    1 => f.neq(val),
                    _ => f.contains(val),
                };
                GenCondition {
                    condition,
                    oracle: |c, cond| compare_str(&c.city, cond),
                }
            }
        ),
        // Bio.Nickname, absent when None
        (prop::sample::select(NAMES), prop::bool::ANY).prop_map(|(val, is_eq)| {
            let f = field("Bio.Nickname");
            GenCondition {
                condition: if is_eq { f.eq(val) } else { f.neq(val) },
                oracle: |c, cond| {
                    c.bio
                        .nickname
                        .as_deref()
                        .is_some_and(|nick| compare_str(nick, cond))
                },
            }
        }),
        // Vip flag
        (any::<bool>(), prop::bool::ANY).prop_map(|(val, is_eq)| {
            let f = field("Vip");
            GenCondition {
                condition: if is_eq { f.eq(val) } else { f.neq(val) },
                oracle: |c, cond| match cond.operator {
                    sifter::Operator::Equal => c.vip == literal_bool(cond),
                    _ => c.vip != literal_bool(cond),
                },
            }
        }),
    ]
}

/// Generate between one and eight conditions.
pub fn arb_conditions() -> impl Strategy<Value = Vec<GenCondition>> {
    prop::collection::vec(arb_condition(), 1..=8)
}

/// Independently evaluate each condition against `customer`.
pub fn oracle(conditions: &[GenCondition], customer: &Customer) -> Vec<bool> {
    conditions
        .iter()
        .map(|g| (g.oracle)(customer, &g.condition))
        .collect()
}

pub fn rule_conditions(conditions: &[GenCondition]) -> Vec<RuleCondition> {
    conditions.iter().map(|g| g.condition.clone()).collect()
}
