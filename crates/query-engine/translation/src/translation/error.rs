//! Errors for translation.

use query_engine_ql::ql::error::SyntaxError;
use thiserror::Error;

use super::target::{ClauseKind, Target};

/// A type for translation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(
        "Type: '{requested}' is not supported for {clause} clauses, the supported types are: [{}]",
        display_targets(.supported)
    )]
    UnsupportedTarget {
        clause: ClauseKind,
        requested: String,
        supported: Vec<Target>,
    },
    #[error("Failed to parse date/time literal: {0}, you must supply date/time literals in ISO8601 format!")]
    InvalidDateLiteral(String),
    #[error("Invalid like pattern '{pattern}': {message}")]
    InvalidLikePattern { pattern: String, message: String },
    #[error("Predicate on '{lhs}' needs {expected} value(s) for '{operator}', got {actual}")]
    WrongOperandCount {
        lhs: String,
        operator: String,
        expected: usize,
        actual: usize,
    },
}

fn display_targets(targets: &[Target]) -> String {
    targets
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
