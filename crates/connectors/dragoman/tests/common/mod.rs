//! Common functions used across test cases.

use std::sync::Arc;
use std::time::Duration;

use dragoman::state::{create_state_with_store, State};
use dragoman_configuration::Configuration;
use tests_common::document_store::InMemoryDocumentStore;
use tests_common::fixtures::people_documents;

pub fn configuration() -> Configuration {
    Configuration {
        connection_uri: "mongodb://localhost:27017".to_string(),
        app_name: None,
        http_timeout: Duration::from_secs(5),
        user_agent: "dragoman-tests".to_string(),
        cache_capacity: 10,
        cache_expiry: Duration::from_secs(60),
    }
}

/// A fresh state whose document store holds the people fixtures under
/// `crm:people`.
pub async fn create_state() -> (State, Arc<InMemoryDocumentStore>) {
    tests_common::fixtures::init_logging();
    let store = Arc::new(
        InMemoryDocumentStore::new().with_collection("crm:people", people_documents()),
    );
    let state = create_state_with_store(
        &configuration(),
        &mut prometheus::Registry::new(),
        Arc::clone(&store) as _,
    )
    .await
    .unwrap();
    (state, store)
}
