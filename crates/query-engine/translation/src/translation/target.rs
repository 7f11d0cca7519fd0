//! The closed set of compilation targets.

use std::fmt;
use std::str::FromStr;

use enum_iterator::Sequence;
use thiserror::Error;

/// What a clause is compiled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum Target {
    /// Native document-store query documents.
    DocumentStore,
    /// Filters and projectors evaluated over records in process.
    InProcess,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::DocumentStore => write!(f, "document-store"),
            Target::InProcess => write!(f, "in-process"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown target '{0}'")]
pub struct UnknownTarget(pub String);

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        enum_iterator::all::<Target>()
            .find(|target| target.to_string().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| UnknownTarget(name.to_string()))
    }
}

/// The three kinds of clause a caller can supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum ClauseKind {
    Select,
    Where,
    OrderBy,
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClauseKind::Select => write!(f, "select"),
            ClauseKind::Where => write!(f, "where"),
            ClauseKind::OrderBy => write!(f, "order by"),
        }
    }
}
