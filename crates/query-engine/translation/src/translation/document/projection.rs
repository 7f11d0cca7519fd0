//! Translate a select list into a projection document.

use bson::{doc, Document};
use query_engine_ql::ql::ast::Projection;

const ID_FIELD: &str = "_id";

/// Include each selected path and always suppress the document identifier.
/// An empty list keeps every field except the identifier.
pub fn translate_projections(projections: &[Projection]) -> Document {
    let mut document = doc! { "_id": 0 };
    for projection in projections {
        if projection.name() != ID_FIELD {
            document.insert(projection.name(), 1);
        }
    }
    document
}
