//! Compile clauses into a form a backend can execute: native document-store
//! queries, or filters and projectors applied to records in process.

pub mod clause;
pub mod document;
pub mod error;
pub mod in_process;
pub mod target;
