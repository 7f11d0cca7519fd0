//! Translate an order by list into a sort document.

use bson::Document;
use query_engine_ql::ql::ast::OrderBy;

pub fn translate_order_by(order_by: &[OrderBy]) -> Document {
    let mut document = Document::new();
    for element in order_by {
        let direction: i32 = if element.is_ascending() { 1 } else { -1 };
        document.insert(element.name(), direction);
    }
    document
}
