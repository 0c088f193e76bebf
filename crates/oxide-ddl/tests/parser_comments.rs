//! Tests for comment handling.

mod common;
use common::*;

#[test]
fn comment_after_comma() {
    let t = parse_table_ok(
        "CREATE TABLE t (\n  id INTEGER, -- identifier\n  name TEXT -- display name\n)",
    );
    assert_eq!(t.columns[0].comment.as_deref(), Some("identifier"));
    assert_eq!(t.columns[1].comment.as_deref(), Some("display name"));
}

#[test]
fn comment_block_style() {
    let t = parse_table_ok("CREATE TABLE t (a INT /* first */, b INT /*second*/)");
    assert_eq!(t.columns[0].comment.as_deref(), Some("first"));
    assert_eq!(t.columns[1].comment.as_deref(), Some("second"));
}

#[test]
fn comment_on_next_line_is_not_attached() {
    let t = parse_table_ok("CREATE TABLE t (\n  a INT,\n  -- about b\n  b INT\n)");
    assert_eq!(t.columns[0].comment, None);
    assert_eq!(t.columns[1].comment, None);
}

#[test]
fn comment_with_parens_and_commas_is_ignored() {
    let t = parse_table_ok(
        "CREATE TABLE t (\n  a INT, -- not (a column, really\n  b TEXT /* ), c INT */\n)",
    );
    assert_eq!(t.column_names(), vec!["a", "b"]);
    assert_eq!(t.columns[0].comment.as_deref(), Some("not (a column, really"));
    assert_eq!(t.columns[1].comment.as_deref(), Some("), c INT"));
}

#[test]
fn comment_inside_clause_is_not_a_trailing_comment() {
    let t = parse_table_ok("CREATE TABLE t (a /* type follows */ INT NOT NULL, b INT)");
    assert_eq!(t.columns[0].declared_type, "INT");
    assert!(t.columns[0].not_null);
    assert_eq!(t.columns[0].comment, None);
}

#[test]
fn comment_before_statement() {
    let t = parse_table_ok("-- users\n/* v2 */ CREATE TABLE users (id INTEGER) -- end");
    assert_eq!(t.name, "users");
    assert_eq!(t.columns[0].comment, None);
}

#[test]
fn comment_in_table_constraint_clause() {
    let t = parse_table_ok(
        "CREATE TABLE t (\n  a INT, -- key part\n  PRIMARY KEY (a) -- pk\n)",
    );
    assert_eq!(t.primary_key(), vec!["a"]);
    assert_eq!(t.columns[0].comment.as_deref(), Some("key part"));
}

#[test]
fn comment_after_comma_leads_next_column() {
    let t = parse_table_ok("CREATE TABLE t (a INT, /* about b */ b TEXT)");
    assert_eq!(t.columns[0].comment, None);
    assert_eq!(t.columns[1].comment, None);

    let t = parse_table_ok("CREATE TABLE t (a INT /* first */, b INT)");
    assert_eq!(t.columns[0].comment.as_deref(), Some("first"));

    let t = parse_table_ok("CREATE TABLE t (a INT, -- about a\n b TEXT)");
    assert_eq!(t.columns[0].comment.as_deref(), Some("about a"));
}
