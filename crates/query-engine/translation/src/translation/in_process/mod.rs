//! Compile clauses into filters and projectors evaluated over records held
//! in memory.

pub mod filtering;
pub mod path;
pub mod projection;
pub mod values;
