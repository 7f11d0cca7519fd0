//! Type definitions of the clause intermediate representation.
//!
//! Values of these types are produced by the grammar and consumed by exactly
//! one backend compiler. They are never mutated once a parse has finished.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::UnknownOperator;

/// A dotted field path selected by a `select` clause, such as `a.b.c`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Projection {
    name: String,
}

impl Projection {
    pub fn new(name: impl Into<String>) -> Self {
        Projection { name: name.into() }
    }

    /// Append one more name part, separated from the existing path by a dot.
    pub fn append(&mut self, part: &str) {
        if !self.name.is_empty() {
            self.name.push('.');
        }
        self.name.push_str(part);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name parts of this path.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.name.split('.')
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Comparison operators of a `where` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    In,
    NotIn,
    Between,
    NotBetween,
    Like,
    NotLike,
    IsNull,
    IsNotNull,
}

impl Operator {
    /// The surface syntax of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqualTo => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqualTo => "<=",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Between => "between",
            Operator::NotBetween => "not between",
            Operator::Like => "like",
            Operator::NotLike => "not like",
            Operator::IsNull => "is null",
            Operator::IsNotNull => "is not null",
        }
    }

    /// The operator matching exactly the values this one rejects.
    pub fn complement(self) -> Operator {
        match self {
            Operator::Equals => Operator::NotEquals,
            Operator::NotEquals => Operator::Equals,
            Operator::GreaterThan => Operator::LessThanOrEqualTo,
            Operator::GreaterThanOrEqualTo => Operator::LessThan,
            Operator::LessThan => Operator::GreaterThanOrEqualTo,
            Operator::LessThanOrEqualTo => Operator::GreaterThan,
            Operator::In => Operator::NotIn,
            Operator::NotIn => Operator::In,
            Operator::Between => Operator::NotBetween,
            Operator::NotBetween => Operator::Between,
            Operator::Like => Operator::NotLike,
            Operator::NotLike => Operator::Like,
            Operator::IsNull => Operator::IsNotNull,
            Operator::IsNotNull => Operator::IsNull,
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(
            self,
            Operator::NotEquals
                | Operator::NotIn
                | Operator::NotBetween
                | Operator::NotLike
                | Operator::IsNotNull
        )
    }

    pub fn is_in(self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    pub fn is_between(self) -> bool {
        matches!(self, Operator::Between | Operator::NotBetween)
    }

    pub fn is_like(self) -> bool {
        matches!(self, Operator::Like | Operator::NotLike)
    }

    pub fn is_null_check(self) -> bool {
        matches!(self, Operator::IsNull | Operator::IsNotNull)
    }
}

impl FromStr for Operator {
    type Err = UnknownOperator;

    /// Operator text is matched case-insensitively, with runs of whitespace
    /// between words treated as a single space.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let normalized = text
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        match normalized.as_str() {
            "=" => Ok(Operator::Equals),
            "!=" | "<>" => Ok(Operator::NotEquals),
            ">" => Ok(Operator::GreaterThan),
            ">=" => Ok(Operator::GreaterThanOrEqualTo),
            "<" => Ok(Operator::LessThan),
            "<=" => Ok(Operator::LessThanOrEqualTo),
            "in" => Ok(Operator::In),
            "not in" => Ok(Operator::NotIn),
            "between" => Ok(Operator::Between),
            "not between" => Ok(Operator::NotBetween),
            "like" => Ok(Operator::Like),
            "not like" => Ok(Operator::NotLike),
            "is null" => Ok(Operator::IsNull),
            "is not null" => Ok(Operator::IsNotNull),
            _ => Err(UnknownOperator(text.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single condition of a `where` clause.
///
/// `rhs` holds one literal for comparisons and `like`, two for `between`, any
/// number for `in` and none for null checks. `quoted` records whether the
/// literals were written as string literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predicate {
    lhs: String,
    operator: Operator,
    rhs: Vec<String>,
    quoted: bool,
}

impl Predicate {
    pub fn new(lhs: impl Into<String>, operator: Operator) -> Self {
        Predicate {
            lhs: lhs.into(),
            operator,
            rhs: vec![],
            quoted: false,
        }
    }

    /// Build a predicate from the textual form of its operator.
    pub fn with_operator_text(
        lhs: impl Into<String>,
        operator: &str,
    ) -> Result<Self, UnknownOperator> {
        Ok(Predicate::new(lhs, operator.parse()?))
    }

    /// Append a literal. A value wrapped in single quotes is unwrapped and
    /// marks the predicate as quoted.
    pub fn add_rhs(&mut self, value: &str) {
        match value
            .strip_prefix('\'')
            .and_then(|inner| inner.strip_suffix('\''))
        {
            Some(inner) => {
                self.quoted = true;
                self.rhs.push(inner.replace("''", "'"));
            }
            None => self.rhs.push(value.to_string()),
        }
    }

    /// Append an already unwrapped literal.
    pub fn push_rhs(&mut self, value: impl Into<String>, quoted: bool) {
        self.quoted |= quoted;
        self.rhs.push(value.into());
    }

    /// Replace the operator by its complement. Negating `=` gives exactly the
    /// predicate that `!=` would have built.
    #[must_use]
    pub fn negate(mut self) -> Self {
        self.operator = self.operator.complement();
        self
    }

    pub fn lhs(&self) -> &str {
        &self.lhs
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn rhs(&self) -> &[String] {
        &self.rhs
    }

    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    pub fn is_negated(&self) -> bool {
        self.operator.is_negative()
    }

    fn write_literal(&self, f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
        if self.quoted {
            write!(f, "'{}'", value.replace('\'', "''"))
        } else {
            write!(f, "{value}")
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.lhs, self.operator)?;
        match self.operator {
            Operator::IsNull | Operator::IsNotNull => Ok(()),
            Operator::In | Operator::NotIn => {
                write!(f, " (")?;
                for (index, value) in self.rhs.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    self.write_literal(f, value)?;
                }
                write!(f, ")")
            }
            Operator::Between | Operator::NotBetween => {
                write!(f, " ")?;
                for (index, value) in self.rhs.iter().enumerate() {
                    if index > 0 {
                        write!(f, " and ")?;
                    }
                    self.write_literal(f, value)?;
                }
                Ok(())
            }
            _ => {
                for value in &self.rhs {
                    write!(f, " ")?;
                    self.write_literal(f, value)?;
                }
                Ok(())
            }
        }
    }
}

/// One sort key of an `order by` clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderBy {
    name: String,
    ascending: bool,
}

impl OrderBy {
    pub fn new(name: impl Into<String>, ascending: bool) -> Self {
        OrderBy {
            name: name.into(),
            ascending,
        }
    }

    /// A sort key with no explicit direction, which sorts descending.
    pub fn descending(name: impl Into<String>) -> Self {
        OrderBy::new(name, false)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_ascending(&self) -> bool {
        self.ascending
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.ascending { "asc" } else { "desc" };
        write!(f, "{} {direction}", self.name)
    }
}
