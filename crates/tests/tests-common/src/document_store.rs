//! An in-memory document store that remembers every query it is given.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bson::Document;
use futures::{stream, StreamExt};
use query_engine_execution::document_store::{into_record, DocumentQuery, DocumentStore};
use query_engine_execution::error::Error;
use query_engine_execution::stream::RecordStream;
use query_engine_metadata::metadata::StorageCoordinates;

/// Returns the stored documents of a collection as they are, honouring only
/// the limit. Evaluating the filter is left to the real store.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: HashMap<String, Vec<Document>>,
    queries: Mutex<Vec<(StorageCoordinates, DocumentQuery)>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_collection(mut self, coordinates: &str, documents: Vec<Document>) -> Self {
        self.collections.insert(coordinates.to_string(), documents);
        self
    }

    /// Every query received so far, oldest first.
    pub fn queries(&self) -> Vec<(StorageCoordinates, DocumentQuery)> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find(
        &self,
        coordinates: &StorageCoordinates,
        query: DocumentQuery,
    ) -> Result<RecordStream, Error> {
        let limit = query
            .limit
            .and_then(|limit| usize::try_from(limit).ok())
            .unwrap_or(usize::MAX);
        if let Ok(mut queries) = self.queries.lock() {
            queries.push((coordinates.clone(), query));
        }

        let documents = self
            .collections
            .get(&coordinates.to_string())
            .cloned()
            .unwrap_or_default();
        let records = documents
            .into_iter()
            .take(limit)
            .map(|document| Ok(into_record(document)));
        Ok(stream::iter(records).boxed())
    }
}
