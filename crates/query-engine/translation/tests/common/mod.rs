//! Common functions used across test cases.

use query_engine_metadata::metadata::Record;

/// Turn a JSON object literal into a record.
pub fn record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(record) => record,
        other => panic!("expected a JSON object, got {other}"),
    }
}
