use std::fmt;
use std::time::Instant;

use crate::types::{ConditionOutcome, Connector, EvaluationReport, Getter, Operator, StrGetter};

/// Operators valid on ordered (numeric) fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Ordered {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
}

impl Ordered {
    pub(crate) fn from_operator(op: Operator) -> Option<Self> {
        match op {
            Operator::Equal => Some(Ordered::Equal),
            Operator::NotEqual => Some(Ordered::NotEqual),
            Operator::GreaterThan => Some(Ordered::GreaterThan),
            Operator::LessThan => Some(Ordered::LessThan),
            Operator::Contains => None,
        }
    }

    fn apply<V: PartialOrd>(self, lhs: V, rhs: V) -> bool {
        match self {
            Ordered::Equal => lhs == rhs,
            Ordered::NotEqual => lhs != rhs,
            Ordered::GreaterThan => lhs > rhs,
            Ordered::LessThan => lhs < rhs,
        }
    }
}

/// Operators valid on booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Equality {
    Equal,
    NotEqual,
}

impl Equality {
    pub(crate) fn from_operator(op: Operator) -> Option<Self> {
        match op {
            Operator::Equal => Some(Equality::Equal),
            Operator::NotEqual => Some(Equality::NotEqual),
            Operator::GreaterThan | Operator::LessThan | Operator::Contains => None,
        }
    }

    fn apply(self, lhs: bool, rhs: bool) -> bool {
        match self {
            Equality::Equal => lhs == rhs,
            Equality::NotEqual => lhs != rhs,
        }
    }
}

/// Operators valid on strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Textual {
    Equal,
    NotEqual,
    Contains,
}

impl Textual {
    pub(crate) fn from_operator(op: Operator) -> Option<Self> {
        match op {
            Operator::Equal => Some(Textual::Equal),
            Operator::NotEqual => Some(Textual::NotEqual),
            Operator::Contains => Some(Textual::Contains),
            Operator::GreaterThan | Operator::LessThan => None,
        }
    }

    fn apply(self, haystack: &str, needle: &str) -> bool {
        match self {
            Textual::Equal => haystack == needle,
            Textual::NotEqual => haystack != needle,
            Textual::Contains => haystack.contains(needle),
        }
    }
}

/// A fully typed comparison: accessor, operator and coerced literal.
pub(crate) enum Test<T> {
    Int {
        get: Getter<T, i64>,
        cmp: Ordered,
        rhs: i64,
    },
    Float {
        get: Getter<T, f64>,
        cmp: Ordered,
        rhs: f64,
    },
    Bool {
        get: Getter<T, bool>,
        cmp: Equality,
        rhs: bool,
    },
    Str {
        get: StrGetter<T>,
        cmp: Textual,
        rhs: String,
    },
}

impl<T> Test<T> {
    /// An absent field value fails the test, whatever the operator.
    #[inline]
    fn eval(&self, record: &T) -> bool {
        match self {
            Test::Int { get, cmp, rhs } => get(record).is_some_and(|v| cmp.apply(v, *rhs)),
            Test::Float { get, cmp, rhs } => get(record).is_some_and(|v| cmp.apply(v, *rhs)),
            Test::Bool { get, cmp, rhs } => get(record).is_some_and(|v| cmp.apply(v, *rhs)),
            Test::Str { get, cmp, rhs } => get(record).is_some_and(|v| cmp.apply(v, rhs)),
        }
    }

    fn fmt_rhs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Test::Int { rhs, .. } => write!(f, "{rhs}"),
            Test::Float { rhs, .. } => write!(f, "{rhs}"),
            Test::Bool { rhs, .. } => write!(f, "{rhs}"),
            Test::Str { rhs, .. } => write!(f, "\"{rhs}\""),
        }
    }
}

/// A condition after resolution and coercion.
pub(crate) struct CompiledCondition<T> {
    pub(crate) field: String,
    pub(crate) operator: Operator,
    pub(crate) test: Test<T>,
}

impl<T> fmt::Display for CompiledCondition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} ", self.field, self.operator)?;
        self.test.fmt_rhs(f)?;
        write!(f, ")")
    }
}

pub(crate) fn evaluate<T>(
    connector: Connector,
    conditions: &[CompiledCondition<T>],
    record: &T,
) -> bool {
    match connector {
        Connector::And => conditions.iter().all(|c| c.test.eval(record)),
        Connector::Or => conditions.iter().any(|c| c.test.eval(record)),
    }
}

/// Evaluates every condition, without short-circuiting, and records each outcome.
pub(crate) fn evaluate_detailed<T>(
    connector: Connector,
    conditions: &[CompiledCondition<T>],
    record: &T,
) -> EvaluationReport {
    let start = Instant::now();

    let outcomes: Vec<ConditionOutcome> = conditions
        .iter()
        .enumerate()
        .map(|(index, c)| ConditionOutcome {
            index,
            field: c.field.clone(),
            operator: c.operator,
            matched: c.test.eval(record),
        })
        .collect();

    let result = match connector {
        Connector::And => outcomes.iter().all(|o| o.matched),
        Connector::Or => outcomes.iter().any(|o| o.matched),
    };

    EvaluationReport::new(result, outcomes, start.elapsed())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    struct Row {
        n: Option<i64>,
        x: f64,
        s: &'static str,
    }

    fn int_test(cmp: Ordered, rhs: i64) -> Test<Row> {
        Test::Int {
            get: Arc::new(|r: &Row| r.n),
            cmp,
            rhs,
        }
    }

    fn str_test(cmp: Textual, rhs: &str) -> Test<Row> {
        fn get(r: &Row) -> Option<&str> {
            Some(r.s)
        }
        Test::Str {
            get: Arc::new(get),
            cmp,
            rhs: rhs.to_owned(),
        }
    }

    fn row(n: Option<i64>, s: &'static str) -> Row {
        Row { n, x: 0.0, s }
    }

    #[test]
    fn ordered_ops_on_ints() {
        let r = row(Some(20), "");
        assert!(int_test(Ordered::Equal, 20).eval(&r));
        assert!(!int_test(Ordered::NotEqual, 20).eval(&r));
        assert!(!int_test(Ordered::GreaterThan, 20).eval(&r));
        assert!(int_test(Ordered::GreaterThan, 19).eval(&r));
        assert!(int_test(Ordered::LessThan, 21).eval(&r));
        assert!(!int_test(Ordered::LessThan, 20).eval(&r));
    }

    #[test]
    fn absent_value_fails_every_operator() {
        let r = row(None, "");
        for cmp in [
            Ordered::Equal,
            Ordered::NotEqual,
            Ordered::GreaterThan,
            Ordered::LessThan,
        ] {
            assert!(!int_test(cmp, 0).eval(&r), "{cmp:?} matched an absent value");
        }
    }

    #[test]
    fn nan_float_never_orders() {
        let test: Test<Row> = Test::Float {
            get: Arc::new(|r: &Row| Some(r.x)),
            cmp: Ordered::Equal,
            rhs: f64::NAN,
        };
        assert!(!test.eval(&row(None, "")));
    }

    #[test]
    fn contains_is_case_sensitive_substring() {
        assert!(str_test(Textual::Contains, "Mumba").eval(&row(None, "Mumbai")));
        assert!(!str_test(Textual::Contains, "Mumbai").eval(&row(None, "mumbai")));
        assert!(str_test(Textual::Contains, "").eval(&row(None, "anything")));
    }

    #[test]
    fn equality_on_bools() {
        assert!(Equality::Equal.apply(true, true));
        assert!(Equality::NotEqual.apply(true, false));
        assert!(!Equality::Equal.apply(false, true));
    }

    #[test]
    fn operator_narrowing() {
        assert_eq!(Ordered::from_operator(Operator::Contains), None);
        assert_eq!(Equality::from_operator(Operator::GreaterThan), None);
        assert_eq!(Textual::from_operator(Operator::LessThan), None);
        assert_eq!(
            Textual::from_operator(Operator::Contains),
            Some(Textual::Contains)
        );
    }

    #[test]
    fn fold_and_or() {
        let conditions = vec![
            CompiledCondition {
                field: "n".into(),
                operator: Operator::GreaterThan,
                test: int_test(Ordered::GreaterThan, 10),
            },
            CompiledCondition {
                field: "s".into(),
                operator: Operator::Equal,
                test: str_test(Textual::Equal, "yes"),
            },
        ];
        let both = row(Some(11), "yes");
        let one = row(Some(11), "no");
        let none = row(Some(1), "no");

        assert!(evaluate(Connector::And, &conditions, &both));
        assert!(!evaluate(Connector::And, &conditions, &one));
        assert!(evaluate(Connector::Or, &conditions, &one));
        assert!(!evaluate(Connector::Or, &conditions, &none));
    }

    #[test]
    fn detailed_reports_every_condition() {
        let conditions = vec![
            CompiledCondition {
                field: "n".into(),
                operator: Operator::GreaterThan,
                test: int_test(Ordered::GreaterThan, 10),
            },
            CompiledCondition {
                field: "s".into(),
                operator: Operator::Equal,
                test: str_test(Textual::Equal, "yes"),
            },
        ];
        let report = evaluate_detailed(Connector::And, &conditions, &row(Some(1), "yes"));
        assert!(!report.result());
        let matched: Vec<bool> = report.outcomes().iter().map(|o| o.matched).collect();
        assert_eq!(matched, vec![false, true]);
    }

    #[test]
    fn display_compiled_condition() {
        let c = CompiledCondition {
            field: "City".into(),
            operator: Operator::Contains,
            test: str_test(Textual::Contains, "Mumbai"),
        };
        assert_eq!(c.to_string(), "(City Contains \"Mumbai\")");
    }
}
