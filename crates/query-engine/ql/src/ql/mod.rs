//! The clause language: intermediate representation, lexer and grammar for
//! `select`, `where` and `order by` clauses.

pub mod ast;
pub mod error;
pub mod grammar;
pub mod helpers;
pub mod lexer;
