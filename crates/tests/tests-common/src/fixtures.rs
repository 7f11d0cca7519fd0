//! Records shared between tests.

use bson::{doc, Document};
use prometheus::Registry;
use query_engine_execution::metrics::Metrics;
use serde_json::json;

/// Install a test logger once. Later calls do nothing.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Metrics registered against a throwaway registry.
pub fn metrics() -> Metrics {
    Metrics::initialize(&mut Registry::new()).expect("metrics register")
}

/// The people payload served by the simulated HTTP source.
pub fn people_json() -> String {
    json!([
        { "name": "Bill", "age": 35, "address": { "city": "Cork" } },
        { "name": "Bob", "age": 42, "address": { "city": "Galway" } },
        { "name": "Mary", "age": 28, "address": { "city": "Cork" } },
        { "name": "Anne", "age": 51 },
    ])
    .to_string()
}

/// The same people as stored documents.
pub fn people_documents() -> Vec<Document> {
    vec![
        doc! { "_id": 1, "name": "Bill", "age": 35, "address": { "city": "Cork" } },
        doc! { "_id": 2, "name": "Bob", "age": 42, "address": { "city": "Galway" } },
        doc! { "_id": 3, "name": "Mary", "age": 28, "address": { "city": "Cork" } },
        doc! { "_id": 4, "name": "Anne", "age": 51 },
    ]
}
