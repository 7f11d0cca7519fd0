//! Classification of a dataset's `source` string.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// URL schemes that address an HTTP source.
const URL_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// The kind of backend a source string addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum SourceKind {
    Http,
    DocumentStore,
}

impl SourceKind {
    /// Decide which backend a source addresses, if any. A source never
    /// classifies as more than one kind.
    pub fn classify(source: &str) -> Option<SourceKind> {
        if is_url(source) {
            Some(SourceKind::Http)
        } else if StorageCoordinates::parse(source).is_ok() {
            Some(SourceKind::DocumentStore)
        } else {
            None
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Http => write!(f, "http"),
            SourceKind::DocumentStore => write!(f, "document-store"),
        }
    }
}

/// Whether `source` is an absolute URL with a host and a supported scheme.
pub fn is_url(source: &str) -> bool {
    url::Url::parse(source)
        .is_ok_and(|url| URL_SCHEMES.contains(&url.scheme()) && url.has_host())
}

/// Database and collection named by a `<database>:<collection>` source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageCoordinates {
    pub database_name: String,
    pub collection_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid storage coordinates '{0}', expected '<database>:<collection>'")]
pub struct InvalidStorageCoordinates(pub String);

impl StorageCoordinates {
    pub fn parse(source: &str) -> Result<Self, InvalidStorageCoordinates> {
        let invalid = || InvalidStorageCoordinates(source.to_string());
        let (database_name, collection_name) = source.split_once(':').ok_or_else(invalid)?;
        if database_name.trim().is_empty()
            || collection_name.trim().is_empty()
            || collection_name.contains(':')
        {
            return Err(invalid());
        }
        Ok(StorageCoordinates {
            database_name: database_name.to_string(),
            collection_name: collection_name.to_string(),
        })
    }
}

impl FromStr for StorageCoordinates {
    type Err = InvalidStorageCoordinates;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        StorageCoordinates::parse(source)
    }
}

impl fmt::Display for StorageCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.database_name, self.collection_name)
    }
}
