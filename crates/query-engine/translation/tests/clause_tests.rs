mod common;

use bson::doc;
use query_engine_translation::translation::clause::{
    CompiledSelect, CompiledWhere, OrderByClauseParser, SelectClauseParser, WhereClauseParser,
};
use query_engine_translation::translation::error::Error;
use query_engine_translation::translation::target::Target;
use serde_json::json;

use common::record;

#[test]
fn select_for_the_document_store_suppresses_the_identifier() {
    let compiled = SelectClauseParser
        .compile(Target::DocumentStore, Some("a, b.c"))
        .unwrap();
    similar_asserts::assert_eq!(
        compiled,
        CompiledSelect::Document(doc! { "_id": 0, "a": 1, "b.c": 1 })
    );
}

#[test]
fn order_by_for_the_document_store() {
    similar_asserts::assert_eq!(
        OrderByClauseParser
            .document(Some("a asc, b desc, c.d.e asc"))
            .unwrap(),
        doc! { "a": 1, "b": -1, "c.d.e": 1 }
    );
    similar_asserts::assert_eq!(
        OrderByClauseParser.document(Some("a, b.c")).unwrap(),
        doc! { "a": -1, "b.c": -1 }
    );
}

#[test]
fn where_in_process_keeps_matching_records() {
    let filter = WhereClauseParser
        .filter(Some("name = 'Bill' and name != 'Bob'"))
        .unwrap();
    assert!(filter.matches(&record(json!({ "name": "Bill" }))));
    assert!(!filter.matches(&record(json!({ "name": "Bob" }))));
}

#[test]
fn between_agrees_across_targets() {
    let filter = WhereClauseParser
        .filter(Some("age between 30 and 40"))
        .unwrap();
    assert!(filter.matches(&record(json!({ "age": 35 }))));
    assert!(!filter.matches(&record(json!({ "age": 41 }))));

    similar_asserts::assert_eq!(
        WhereClauseParser
            .document(Some("age between 30 and 40"))
            .unwrap(),
        doc! { "age": { "$gte": 30, "$lt": 40 } }
    );
}

#[test]
fn blank_clauses_are_no_constraint() {
    for clause in [None, Some(""), Some("   ")] {
        similar_asserts::assert_eq!(
            SelectClauseParser.document(clause).unwrap(),
            doc! { "_id": 0 }
        );
        assert!(SelectClauseParser.projector(clause).unwrap().is_identity());
        assert!(WhereClauseParser.filter(clause).unwrap().is_empty());
        similar_asserts::assert_eq!(WhereClauseParser.document(clause).unwrap(), doc! {});
        similar_asserts::assert_eq!(OrderByClauseParser.document(clause).unwrap(), doc! {});
    }
}

#[test]
fn compiling_twice_gives_equal_output() {
    let select = Some("a, b.c, a");
    let where_clause = Some("name like 'B%' and age not in (1, 2) and a.b is not null");
    for target in [Target::DocumentStore, Target::InProcess] {
        assert_eq!(
            SelectClauseParser.compile(target, select).unwrap(),
            SelectClauseParser.compile(target, select).unwrap()
        );
        assert_eq!(
            WhereClauseParser.compile(target, where_clause).unwrap(),
            WhereClauseParser.compile(target, where_clause).unwrap()
        );
    }

    let order_by = Some("a asc, b.c, d desc");
    assert_eq!(
        OrderByClauseParser
            .compile(Target::DocumentStore, order_by)
            .unwrap(),
        OrderByClauseParser
            .compile(Target::DocumentStore, order_by)
            .unwrap()
    );
}

#[test]
fn malformed_clauses_report_their_position() {
    let Err(Error::Syntax(error)) = SelectClauseParser.document(Some("a, ")) else {
        panic!("expected a syntax error");
    };
    let first = error.first().unwrap();
    assert_eq!((first.line, first.column), (1, 4));

    let Err(Error::Syntax(error)) = OrderByClauseParser.document(Some("a, ")) else {
        panic!("expected a syntax error");
    };
    assert_eq!(error.first().unwrap().column, 4);

    let error = WhereClauseParser.filter(Some("a, ")).unwrap_err();
    insta::assert_snapshot!(error, @"Line: 1, Position: 4: no viable alternative at input '<EOF>'");

    let error = WhereClauseParser.document(Some("a = ")).unwrap_err();
    insta::assert_snapshot!(error, @"Line: 1, Position: 5: no viable alternative at input '<EOF>'");
}

#[test]
fn order_by_has_no_in_process_form() {
    let error = OrderByClauseParser
        .compile(Target::InProcess, Some("a"))
        .unwrap_err();
    insta::assert_snapshot!(error, @"Type: 'in-process' is not supported for order by clauses, the supported types are: [document-store]");
}

#[test]
fn unknown_targets_list_the_supported_ones() {
    let error = WhereClauseParser
        .compile_for("groovy", Some("a = 1"))
        .unwrap_err();
    insta::assert_snapshot!(error, @"Type: 'groovy' is not supported for where clauses, the supported types are: [document-store, in-process]");

    let compiled = WhereClauseParser
        .compile_for("in-process", Some("a = 1"))
        .unwrap();
    assert!(matches!(compiled, CompiledWhere::InProcess(_)));
}
