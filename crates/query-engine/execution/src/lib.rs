//! Query execution against the backends that hold dataset records.

pub mod document_store;
pub mod error;
pub mod metrics;
pub mod reader;
pub mod repository;
pub mod router;
pub mod stream;
