//! Errors for query execution.

use query_engine_metadata::metadata::InvalidStorageCoordinates;
use query_engine_translation::translation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Translation(#[from] translation::error::Error),
    #[error("No repository exists for dataset: {dataset_id}")]
    NoRepositoryAvailable { dataset_id: String },
    #[error(
        "More than one repository claims dataset: {dataset_id} ({})",
        .repositories.join(", ")
    )]
    AmbiguousRepository {
        dataset_id: String,
        repositories: Vec<String>,
    },
    #[error(transparent)]
    InvalidSource(#[from] InvalidStorageCoordinates),
    #[error("Failed to read from: {url}, caused by: {source}")]
    HttpRequest { url: String, source: reqwest::Error },
    #[error("Failed to read response from: {url}, got: {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("Failed to decode records from: {address}, caused by: {source}")]
    Decode {
        address: String,
        source: serde_json::Error,
    },
    #[error("Failed to read from document store: {address}, caused by: {source}")]
    DocumentStore {
        address: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
