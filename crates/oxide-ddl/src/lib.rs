//! # oxide-ddl
//!
//! Parses the `CREATE TABLE`, `CREATE VIEW` and `CREATE INDEX` statements
//! SQLite keeps in its catalogue into structured schema descriptors.
//!
//! This crate provides:
//! - A hand-written lexer that resolves quoting variants and records comments
//! - A recursive descent parser that tolerates SQLite's non-standard syntax
//! - Serializable descriptors for tables, columns, constraints, views and indexes
//!
//! ## Tables
//!
//! ```rust
//! use oxide_ddl::parse_table;
//!
//! let table = parse_table(
//!     "CREATE TABLE \"user\" (
//!         id INTEGER PRIMARY KEY AUTOINCREMENT,
//!         [e-mail] VARCHAR(254) NOT NULL UNIQUE, -- login
//!         balance DECIMAL(10,2) DEFAULT (0)
//!     )",
//! )
//! .unwrap();
//!
//! assert_eq!(table.column_names(), vec!["id", "e-mail", "balance"]);
//! assert_eq!(table.primary_key(), vec!["id"]);
//! assert_eq!(table.columns[1].comment.as_deref(), Some("login"));
//! assert_eq!(table.columns[1].type_info().size, Some(254));
//! ```
//!
//! ## Views
//!
//! ```rust
//! use oxide_ddl::view_body;
//!
//! let body = view_body("CREATE VIEW v AS SELECT 'AS' AS x FROM t;").unwrap();
//! assert_eq!(body, "SELECT 'AS' AS x FROM t");
//! ```
//!
//! ## Errors
//!
//! Every failure is a [`ParseError`] with the byte offset of the problem. No
//! partial descriptor is ever returned.
//!
//! ```rust
//! use oxide_ddl::{ParseError, parse_table};
//!
//! let err = parse_table("CREATE TABLE t (a INT, a TEXT)").unwrap_err();
//! assert!(matches!(err, ParseError::DuplicateColumn { offset: 23, .. }));
//! ```

pub mod lexer;
pub mod parser;
pub mod schema;

pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseError, Parser};
pub use schema::{
    Affinity, ColumnDescriptor, ConstraintKind, DdlStatement, ForeignKeyAction, ForeignKeyRef,
    IndexDescriptor, IndexedColumn, SortOrder, TableConstraint, TableDescriptor, TypeInfo,
    ViewDescriptor,
};

/// Parses one `CREATE TABLE`, `CREATE VIEW` or `CREATE INDEX` statement.
///
/// # Errors
///
/// Returns a [`ParseError`] if the statement cannot be parsed.
pub fn parse_ddl(sql: &str) -> Result<DdlStatement, ParseError> {
    Parser::new(sql).parse_statement()
}

/// Parses a `CREATE TABLE` statement.
///
/// # Errors
///
/// Returns a [`ParseError`] if the statement cannot be parsed or is not a
/// `CREATE TABLE`.
pub fn parse_table(sql: &str) -> Result<TableDescriptor, ParseError> {
    Parser::new(sql).parse_table()
}

/// Parses a `CREATE VIEW` statement.
///
/// # Errors
///
/// Returns a [`ParseError`] if the statement cannot be parsed or is not a
/// `CREATE VIEW`.
pub fn parse_view(sql: &str) -> Result<ViewDescriptor, ParseError> {
    Parser::new(sql).parse_view()
}

/// Parses a `CREATE INDEX` statement.
///
/// # Errors
///
/// Returns a [`ParseError`] if the statement cannot be parsed or is not a
/// `CREATE INDEX`.
pub fn parse_index(sql: &str) -> Result<IndexDescriptor, ParseError> {
    Parser::new(sql).parse_index()
}

/// Returns the `SELECT` text of a `CREATE VIEW` statement.
///
/// # Errors
///
/// Returns a [`ParseError`] if the statement cannot be parsed or is not a
/// `CREATE VIEW`.
pub fn view_body(sql: &str) -> Result<String, ParseError> {
    parse_view(sql).map(|view| view.body)
}
