//! Repositories find the records of a dataset in one kind of backend.

pub mod document;
pub mod http;

use query_engine_metadata::metadata::Dataset;

use crate::error::Error;
use crate::stream::RecordStream;

pub use document::DocumentStoreRepository;
pub use http::HttpRepository;

/// A backend that can answer clause queries for the datasets it claims.
///
/// `find` compiles its clauses before returning, so malformed clauses fail
/// straight away. Every backend call is deferred into the returned stream.
pub trait Repository: Send + Sync {
    /// A short name used in logs and errors.
    fn name(&self) -> &str;

    fn applies_to(&self, dataset: &Dataset) -> bool;

    /// `max_results` of zero or less means unbounded.
    fn find(
        &self,
        dataset: &Dataset,
        select: Option<&str>,
        where_clause: Option<&str>,
        order_by: Option<&str>,
        max_results: i64,
    ) -> Result<RecordStream, Error>;
}

/// The positive limit implied by `max_results`, if any.
pub fn limit(max_results: i64) -> Option<i64> {
    (max_results > 0).then_some(max_results)
}
