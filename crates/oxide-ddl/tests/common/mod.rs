#![allow(dead_code)]

use oxide_ddl::{
    DdlStatement, IndexDescriptor, ParseError, Parser, TableDescriptor, ViewDescriptor,
};

pub fn parse(sql: &str) -> DdlStatement {
    Parser::new(sql)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    Parser::new(sql)
        .parse_statement()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_table_ok(sql: &str) -> TableDescriptor {
    match parse(sql) {
        DdlStatement::Table(t) => t,
        other => panic!("Expected CREATE TABLE, got {other:?}"),
    }
}

pub fn parse_view_ok(sql: &str) -> ViewDescriptor {
    match parse(sql) {
        DdlStatement::View(v) => v,
        other => panic!("Expected CREATE VIEW, got {other:?}"),
    }
}

pub fn parse_index_ok(sql: &str) -> IndexDescriptor {
    match parse(sql) {
        DdlStatement::Index(i) => i,
        other => panic!("Expected CREATE INDEX, got {other:?}"),
    }
}

/// Asserts `sql` fails with `Malformed` at `offset`.
pub fn assert_malformed_at(sql: &str, offset: usize) {
    let err = parse_err(sql);
    assert!(
        matches!(err, ParseError::Malformed { .. }),
        "Expected Malformed for: {sql}\nGot: {err:?}"
    );
    assert_eq!(err.offset(), offset, "Wrong offset for: {sql}\nGot: {err:?}");
}
