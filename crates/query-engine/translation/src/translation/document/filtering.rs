//! Translate where clause predicates into a document-store filter.

use bson::{doc, Bson, Document, Regex};
use query_engine_ql::ql::ast::{Operator, Predicate};
use query_engine_ql::ql::helpers::like_to_regex;

use super::super::error::Error;
use super::values::to_operand;

/// Translate every predicate and combine them with a logical AND.
/// No predicates give the empty filter, which matches everything.
pub fn translate_predicates(predicates: &[Predicate]) -> Result<Document, Error> {
    let mut filters = predicates
        .iter()
        .map(translate_predicate)
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(match filters.len() {
        0 => Document::new(),
        1 => filters.remove(0),
        _ => doc! { "$and": filters },
    })
}

/// Translate a single predicate.
pub fn translate_predicate(predicate: &Predicate) -> Result<Document, Error> {
    let operands = predicate
        .rhs()
        .iter()
        .map(|value| to_operand(value, predicate.is_quoted()))
        .collect::<Result<Vec<_>, Error>>()?;

    let condition: Bson = match predicate.operator() {
        Operator::Equals => single(predicate, operands)?,
        Operator::NotEquals => doc! { "$ne": single(predicate, operands)? }.into(),
        Operator::GreaterThan => doc! { "$gt": single(predicate, operands)? }.into(),
        Operator::GreaterThanOrEqualTo => doc! { "$gte": single(predicate, operands)? }.into(),
        Operator::LessThan => doc! { "$lt": single(predicate, operands)? }.into(),
        Operator::LessThanOrEqualTo => doc! { "$lte": single(predicate, operands)? }.into(),
        Operator::In => doc! { "$in": operands }.into(),
        Operator::NotIn => doc! { "$nin": operands }.into(),
        Operator::Between => range(predicate, operands)?.into(),
        Operator::NotBetween => doc! { "$not": range(predicate, operands)? }.into(),
        Operator::Like => pattern(predicate)?.into(),
        Operator::NotLike => doc! { "$not": pattern(predicate)? }.into(),
        Operator::IsNull => Bson::Null,
        Operator::IsNotNull => doc! { "$ne": Bson::Null }.into(),
    };

    let mut filter = Document::new();
    filter.insert(predicate.lhs(), condition);
    Ok(filter)
}

fn exactly<const N: usize>(predicate: &Predicate, operands: Vec<Bson>) -> Result<[Bson; N], Error> {
    let actual = operands.len();
    operands
        .try_into()
        .map_err(|_| wrong_operand_count(predicate, N, actual))
}

fn wrong_operand_count(predicate: &Predicate, expected: usize, actual: usize) -> Error {
    Error::WrongOperandCount {
        lhs: predicate.lhs().to_string(),
        operator: predicate.operator().to_string(),
        expected,
        actual,
    }
}

fn single(predicate: &Predicate, operands: Vec<Bson>) -> Result<Bson, Error> {
    let [operand] = exactly(predicate, operands)?;
    Ok(operand)
}

/// `between low and high` includes `low` and excludes `high`.
fn range(predicate: &Predicate, operands: Vec<Bson>) -> Result<Document, Error> {
    let [low, high] = exactly(predicate, operands)?;
    Ok(doc! { "$gte": low, "$lt": high })
}

fn pattern(predicate: &Predicate) -> Result<Regex, Error> {
    match predicate.rhs() {
        [like] => Ok(Regex {
            pattern: like_to_regex(like),
            options: String::new(),
        }),
        other => Err(wrong_operand_count(predicate, 1, other.len())),
    }
}
