//! Translate where clause predicates into a filter over records.
//!
//! Each predicate is compiled once into a condition holding its parsed field
//! path, typed literals and, for `like`, a compiled expression. Matching a
//! record only walks those conditions.

use std::cmp::Ordering;

use query_engine_metadata::metadata::Record;
use query_engine_ql::ql::ast::{Operator, Predicate};
use query_engine_ql::ql::helpers::like_to_regex;
use serde_json::Value;

use super::super::error::Error;
use super::path::FieldPath;
use super::values::to_literal;

/// A conjunction of compiled conditions. The empty filter keeps every record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn accept_all() -> Self {
        Filter::default()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.matches(record))
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Condition {
    path: FieldPath,
    test: Test,
}

#[derive(Debug, Clone, PartialEq)]
enum Test {
    Compare { operator: Operator, literal: Value },
    Range { low: Value, high: Value, negated: bool },
    Membership { literals: Vec<Value>, negated: bool },
    Pattern { pattern: LikePattern, negated: bool },
    Null { negated: bool },
}

/// A compiled `like` expression, compared by its source.
#[derive(Debug, Clone)]
struct LikePattern(regex::Regex);

impl PartialEq for LikePattern {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_str() == other.0.as_str()
    }
}

impl Condition {
    /// A missing field fails every test except the null checks, where it
    /// counts as null.
    fn matches(&self, record: &Record) -> bool {
        let value = self.path.lookup(record);
        match (&self.test, value) {
            (Test::Null { negated }, value) => value.is_some() == *negated,
            (_, None) => false,
            (Test::Compare { operator, literal }, Some(value)) => compare(*operator, value, literal),
            (
                Test::Range {
                    low,
                    high,
                    negated,
                },
                Some(value),
            ) => match (order(value, low), order(value, high)) {
                (Some(from_low), Some(from_high)) => {
                    let inside = from_low != Ordering::Less && from_high == Ordering::Less;
                    inside != *negated
                }
                _ => false,
            },
            (Test::Membership { literals, negated }, Some(value)) => {
                let found = literals.iter().any(|literal| equal(value, literal));
                found != *negated
            }
            (Test::Pattern { pattern, negated }, Some(value)) => match value.as_str() {
                Some(text) => pattern.0.is_match(text) != *negated,
                None => false,
            },
        }
    }
}

fn compare(operator: Operator, value: &Value, literal: &Value) -> bool {
    match operator {
        Operator::Equals => equal(value, literal),
        Operator::NotEquals => !equal(value, literal),
        Operator::GreaterThan => order(value, literal) == Some(Ordering::Greater),
        Operator::GreaterThanOrEqualTo => {
            matches!(order(value, literal), Some(Ordering::Greater | Ordering::Equal))
        }
        Operator::LessThan => order(value, literal) == Some(Ordering::Less),
        Operator::LessThanOrEqualTo => {
            matches!(order(value, literal), Some(Ordering::Less | Ordering::Equal))
        }
        _ => false,
    }
}

/// Numbers are equal by value whatever their representation.
fn equal(value: &Value, literal: &Value) -> bool {
    match (value, literal) {
        (Value::Number(_), Value::Number(_)) => order(value, literal) == Some(Ordering::Equal),
        _ => value == literal,
    }
}

/// Numbers order numerically and strings lexically. Nothing else orders.
fn order(value: &Value, literal: &Value) -> Option<Ordering> {
    match (value, literal) {
        (Value::Number(left), Value::Number(right)) => match (left.as_i64(), right.as_i64()) {
            (Some(left), Some(right)) => Some(left.cmp(&right)),
            _ => left.as_f64()?.partial_cmp(&right.as_f64()?),
        },
        (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
        _ => None,
    }
}

/// Translate every predicate into one filter.
pub fn translate_predicates(predicates: &[Predicate]) -> Result<Filter, Error> {
    Ok(Filter {
        conditions: predicates
            .iter()
            .map(translate_predicate)
            .collect::<Result<Vec<_>, Error>>()?,
    })
}

fn translate_predicate(predicate: &Predicate) -> Result<Condition, Error> {
    let literals: Vec<Value> = predicate
        .rhs()
        .iter()
        .map(|value| to_literal(value, predicate.is_quoted()))
        .collect();

    let operator = predicate.operator();
    let test = match operator {
        Operator::IsNull | Operator::IsNotNull => Test::Null {
            negated: operator.is_negative(),
        },
        Operator::In | Operator::NotIn => Test::Membership {
            literals,
            negated: operator.is_negative(),
        },
        Operator::Between | Operator::NotBetween => {
            let [low, high] = exactly(predicate, literals)?;
            Test::Range {
                low,
                high,
                negated: operator.is_negative(),
            }
        }
        Operator::Like | Operator::NotLike => {
            let [_] = exactly(predicate, literals)?;
            let pattern = &predicate.rhs()[0];
            let regex = regex::Regex::new(&like_to_regex(pattern)).map_err(|error| {
                Error::InvalidLikePattern {
                    pattern: pattern.clone(),
                    message: error.to_string(),
                }
            })?;
            Test::Pattern {
                pattern: LikePattern(regex),
                negated: operator.is_negative(),
            }
        }
        _ => {
            let [literal] = exactly(predicate, literals)?;
            Test::Compare { operator, literal }
        }
    };

    Ok(Condition {
        path: FieldPath::new(predicate.lhs()),
        test,
    })
}

fn exactly<const N: usize>(predicate: &Predicate, literals: Vec<Value>) -> Result<[Value; N], Error> {
    let actual = literals.len();
    literals.try_into().map_err(|_| Error::WrongOperandCount {
        lhs: predicate.lhs().to_string(),
        operator: predicate.operator().to_string(),
        expected: N,
        actual,
    })
}
