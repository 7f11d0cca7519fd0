//! Translate a select list into a projector over records.

use indexmap::IndexSet;
use query_engine_metadata::metadata::Record;
use query_engine_ql::ql::ast::Projection;
use serde_json::Value;

use super::path::FieldPath;

/// Builds a new record keyed by each selected dotted path. With no paths
/// every record passes through untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projector {
    fields: Vec<FieldPath>,
}

impl Projector {
    pub fn identity() -> Self {
        Projector::default()
    }

    pub fn is_identity(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn project(&self, record: Record) -> Record {
        if self.is_identity() {
            return record;
        }
        self.fields
            .iter()
            .map(|field| {
                let value = field.lookup(&record).cloned().unwrap_or(Value::Null);
                (field.name().to_string(), value)
            })
            .collect()
    }
}

/// Repeated paths are kept once, in the order they were first selected.
pub fn translate_projections(projections: &[Projection]) -> Projector {
    let names: IndexSet<&str> = projections.iter().map(Projection::name).collect();
    Projector {
        fields: names.into_iter().map(FieldPath::new).collect(),
    }
}
