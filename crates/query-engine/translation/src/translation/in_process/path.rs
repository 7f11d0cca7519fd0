//! Null-safe navigation of dotted field paths.

use query_engine_metadata::metadata::Record;
use serde_json::Value;

/// A dotted field path split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    name: String,
    parts: Vec<String>,
}

impl FieldPath {
    pub fn new(name: &str) -> Self {
        FieldPath {
            name: name.to_string(),
            parts: name.split('.').map(ToString::to_string).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value at this path. A missing field, or an intermediate value that
    /// is not an object, gives `None`. An explicit `null` also gives `None`.
    pub fn lookup<'a>(&self, record: &'a Record) -> Option<&'a Value> {
        let (first, rest) = self.parts.split_first()?;
        let mut current = record.get(first)?;
        for part in rest {
            current = current.as_object()?.get(part)?;
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: &Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn nested_fields_are_found() {
        let record = record(&json!({ "a": { "b": { "c": 3 } } }));
        assert_eq!(FieldPath::new("a.b.c").lookup(&record), Some(&json!(3)));
        assert_eq!(
            FieldPath::new("a.b").lookup(&record),
            Some(&json!({ "c": 3 }))
        );
    }

    #[test]
    fn missing_fields_are_absent() {
        let record = record(&json!({ "a": { "b": 1 }, "n": null }));
        assert_eq!(FieldPath::new("a.x.y").lookup(&record), None);
        assert_eq!(FieldPath::new("a.b.c").lookup(&record), None);
        assert_eq!(FieldPath::new("z").lookup(&record), None);
        assert_eq!(FieldPath::new("n").lookup(&record), None);
    }
}
