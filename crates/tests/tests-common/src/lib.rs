//! Helpers shared by the integration tests of every crate.

pub mod document_store;
pub mod fixtures;
pub mod http_source;
