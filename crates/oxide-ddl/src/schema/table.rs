//! Parse results: table, view and index descriptors.

use serde::Serialize;

use super::column::ColumnDescriptor;
use super::constraint::{ConstraintKind, TableConstraint};
use super::same_name;

/// The structure of a `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDescriptor {
    /// Table name, unquoted.
    pub name: String,
    /// Schema qualifier (`main`, `temp`, an attached database), if written.
    pub schema: Option<String>,
    /// `TEMP`/`TEMPORARY` table.
    pub temporary: bool,
    /// `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// `WITHOUT ROWID` table option.
    pub without_rowid: bool,
    /// `STRICT` table option.
    pub strict: bool,
    /// Columns in physical order.
    pub columns: Vec<ColumnDescriptor>,
    /// Constraints not attached to a single column.
    pub constraints: Vec<TableConstraint>,
}

impl TableDescriptor {
    /// Looks up a column by name, case-insensitively.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.is_named(name))
    }

    /// Returns the column names in physical order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Returns the primary-key column names.
    ///
    /// Table-level `PRIMARY KEY` lists come first in their declared order,
    /// followed by columns marked `PRIMARY KEY` inline, in physical order.
    #[must_use]
    pub fn primary_key(&self) -> Vec<&str> {
        let mut key: Vec<&str> = Vec::new();
        let table_level = self
            .constraints
            .iter()
            .filter(|c| c.is_primary_key())
            .flat_map(TableConstraint::column_names);
        for name in table_level {
            // Report the column's declared spelling, not the constraint's.
            let name = self.column(name).map_or(name, |c| c.name.as_str());
            if !key.iter().any(|k| same_name(k, name)) {
                key.push(name);
            }
        }
        for column in self.columns.iter().filter(|c| c.is_part_of_primary_key) {
            if !key.iter().any(|k| same_name(k, &column.name)) {
                key.push(&column.name);
            }
        }
        key
    }

    /// Returns true if any primary key was declared.
    #[must_use]
    pub fn has_primary_key(&self) -> bool {
        self.columns.iter().any(|c| c.is_part_of_primary_key)
    }

    /// Returns the table-level `CHECK` expressions.
    #[must_use]
    pub fn checks(&self) -> Vec<&str> {
        self.constraints
            .iter()
            .filter_map(|c| match &c.kind {
                ConstraintKind::Check { expr } => Some(expr.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// The structure of a `CREATE VIEW` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewDescriptor {
    /// View name, unquoted.
    pub name: String,
    /// Schema qualifier, if written.
    pub schema: Option<String>,
    /// `TEMP`/`TEMPORARY` view.
    pub temporary: bool,
    /// `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// Explicit column names, `CREATE VIEW v (a, b) AS ...`.
    pub columns: Vec<String>,
    /// The select statement after `AS`, verbatim.
    pub body: String,
}

/// The header of a `CREATE INDEX` statement.
///
/// Key columns are read from the engine (`PRAGMA index_info`), not from the
/// statement text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDescriptor {
    /// Index name, unquoted.
    pub name: String,
    /// Schema qualifier, if written.
    pub schema: Option<String>,
    /// Indexed table.
    pub table: String,
    /// `UNIQUE` index.
    pub unique: bool,
    /// `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// Partial index condition, verbatim.
    pub where_clause: Option<String>,
}

/// Any statement the parser understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DdlStatement {
    /// `CREATE TABLE`
    Table(TableDescriptor),
    /// `CREATE VIEW`
    View(ViewDescriptor),
    /// `CREATE INDEX`
    Index(IndexDescriptor),
}

impl DdlStatement {
    /// Returns the name of the created object.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Table(t) => &t.name,
            Self::View(v) => &v.name,
            Self::Index(i) => &i.name,
        }
    }

    /// Returns `"table"`, `"view"` or `"index"`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Table(_) => "table",
            Self::View(_) => "view",
            Self::Index(_) => "index",
        }
    }

    /// Returns the table descriptor, if this is a `CREATE TABLE`.
    #[must_use]
    pub const fn as_table(&self) -> Option<&TableDescriptor> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the view descriptor, if this is a `CREATE VIEW`.
    #[must_use]
    pub const fn as_view(&self) -> Option<&ViewDescriptor> {
        match self {
            Self::View(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the index descriptor, if this is a `CREATE INDEX`.
    #[must_use]
    pub const fn as_index(&self) -> Option<&IndexDescriptor> {
        match self {
            Self::Index(i) => Some(i),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::IndexedColumn;

    fn table(columns: Vec<ColumnDescriptor>, constraints: Vec<TableConstraint>) -> TableDescriptor {
        TableDescriptor {
            name: "t".to_string(),
            schema: None,
            temporary: false,
            if_not_exists: false,
            without_rowid: false,
            strict: false,
            columns,
            constraints,
        }
    }

    fn pk_column(name: &str) -> ColumnDescriptor {
        let mut col = ColumnDescriptor::new(name, "INTEGER");
        col.is_part_of_primary_key = true;
        col
    }

    #[test]
    fn test_column_lookup_is_case_insensitive() {
        let t = table(vec![ColumnDescriptor::new("Email", "TEXT")], vec![]);
        assert!(t.column("EMAIL").is_some());
        assert!(t.column("mail").is_none());
        assert_eq!(t.column_names(), vec!["Email"]);
    }

    #[test]
    fn test_primary_key_follows_table_level_order() {
        let constraint = TableConstraint {
            name: None,
            kind: ConstraintKind::PrimaryKey {
                columns: vec![
                    IndexedColumn {
                        name: "B".to_string(),
                        collation: None,
                        order: None,
                    },
                    IndexedColumn {
                        name: "a".to_string(),
                        collation: None,
                        order: None,
                    },
                ],
            },
            text: "PRIMARY KEY (B, a)".to_string(),
        };
        let t = table(vec![pk_column("a"), pk_column("b")], vec![constraint]);
        assert_eq!(t.primary_key(), vec!["b", "a"]);
        assert!(t.has_primary_key());
    }

    #[test]
    fn test_no_primary_key() {
        let t = table(vec![ColumnDescriptor::new("a", "")], vec![]);
        assert!(t.primary_key().is_empty());
        assert!(!t.has_primary_key());
    }

    #[test]
    fn test_statement_accessors() {
        let stmt = DdlStatement::Table(table(vec![], vec![]));
        assert_eq!(stmt.name(), "t");
        assert!(stmt.as_table().is_some());
        assert!(stmt.as_view().is_none());
        assert!(stmt.as_index().is_none());
    }
}
