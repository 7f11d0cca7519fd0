//! The document-store seam and its MongoDB implementation.

use async_trait::async_trait;
use bson::{Bson, Document};
use futures::StreamExt;
use mongodb::options::{ClientOptions, FindOptions};
use query_engine_metadata::metadata::{Record, StorageCoordinates};

use crate::error::Error;
use crate::stream::{stop_after_error, RecordStream};

/// A fully compiled query for one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentQuery {
    pub filter: Document,
    pub projection: Document,
    pub sort: Option<Document>,
    pub limit: Option<i64>,
}

/// Somewhere documents can be found.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(
        &self,
        coordinates: &StorageCoordinates,
        query: DocumentQuery,
    ) -> Result<RecordStream, Error>;
}

/// Convert a stored document into a record, dropping its identifier.
pub fn into_record(mut document: Document) -> Record {
    document.remove("_id");
    match Bson::Document(document).into_relaxed_extjson() {
        serde_json::Value::Object(record) => record,
        _ => Record::new(),
    }
}

/// A document store backed by a MongoDB deployment.
#[derive(Debug, Clone)]
pub struct MongoDocumentStore {
    client: mongodb::Client,
}

impl MongoDocumentStore {
    pub fn new(client: mongodb::Client) -> Self {
        MongoDocumentStore { client }
    }

    /// Create a client for `connection_uri`. No connection is made until the
    /// first query.
    pub async fn connect(
        connection_uri: &str,
        app_name: Option<String>,
    ) -> Result<Self, mongodb::error::Error> {
        let mut options = ClientOptions::parse(connection_uri).await?;
        if app_name.is_some() {
            options.app_name = app_name;
        }
        let client = mongodb::Client::with_options(options)?;
        Ok(MongoDocumentStore::new(client))
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn find(
        &self,
        coordinates: &StorageCoordinates,
        query: DocumentQuery,
    ) -> Result<RecordStream, Error> {
        let collection = self
            .client
            .database(&coordinates.database_name)
            .collection::<Document>(&coordinates.collection_name);

        let mut options = FindOptions::default();
        options.projection = Some(query.projection);
        options.sort = query.sort;
        options.limit = query.limit;

        let address = coordinates.to_string();
        let cursor = collection
            .find(query.filter, options)
            .await
            .map_err(|error| Error::DocumentStore {
                address: address.clone(),
                source: Box::new(error),
            })?;

        let records = cursor.map(move |document| {
            document.map(into_record).map_err(|error| Error::DocumentStore {
                address: address.clone(),
                source: Box::new(error),
            })
        });
        Ok(stop_after_error(records).boxed())
    }
}
