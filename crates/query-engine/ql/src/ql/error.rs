//! Errors raised while reading a clause.

use std::fmt;

use thiserror::Error;

/// A single problem found in a clause, with its 1-based line and column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Line: {line}, Position: {column}: {message}")]
pub struct LocatedError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl LocatedError {
    /// Locate a character offset of `source`.
    pub fn at_offset(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let mut line = 1;
        let mut column = 1;
        for c in source.chars().take(offset) {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        LocatedError {
            line,
            column,
            message: message.into(),
        }
    }
}

/// A clause that could not be read. Holds every problem reported for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct SyntaxError {
    errors: Vec<LocatedError>,
}

impl SyntaxError {
    pub fn new(errors: Vec<LocatedError>) -> Self {
        SyntaxError { errors }
    }

    pub fn errors(&self) -> &[LocatedError] {
        &self.errors
    }

    /// The first reported problem.
    pub fn first(&self) -> Option<&LocatedError> {
        self.errors.first()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// Operator text that names no known comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operator: '{0}'")]
pub struct UnknownOperator(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_located_per_line() {
        let source = "a = 1\nand b";
        let error = LocatedError::at_offset(source, 10, "boom");
        assert_eq!((error.line, error.column), (2, 5));
        let error = LocatedError::at_offset(source, 0, "boom");
        assert_eq!((error.line, error.column), (1, 1));
    }

    #[test]
    fn several_errors_are_joined() {
        let error = SyntaxError::new(vec![
            LocatedError::at_offset("a b c", 2, "first"),
            LocatedError::at_offset("a b c", 4, "second"),
        ]);
        insta::assert_snapshot!(error, @"Line: 1, Position: 3: first, Line: 1, Position: 5: second");
    }
}
