//! Compile clauses into native document-store query documents.

pub mod filtering;
pub mod projection;
pub mod sorting;
pub mod values;
