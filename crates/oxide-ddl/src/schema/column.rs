//! Column descriptors.

use serde::Serialize;

use super::constraint::{ForeignKeyRef, SortOrder};
use super::type_info::TypeInfo;
use super::same_name;

/// One declared column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    /// Column name as declared, quotes removed, case preserved.
    pub name: String,
    /// Type text exactly as written, e.g. `VARCHAR(32)`; empty if untyped.
    pub declared_type: String,
    /// `NOT NULL` was declared.
    pub not_null: bool,
    /// `DEFAULT` literal or expression text.
    pub default_value: Option<String>,
    /// Named by a column-level or table-level `PRIMARY KEY`.
    pub is_part_of_primary_key: bool,
    /// Direction of a column-level `PRIMARY KEY ASC|DESC`.
    pub primary_key_order: Option<SortOrder>,
    /// `AUTOINCREMENT` was declared.
    pub auto_increment: bool,
    /// Column-level `UNIQUE` was declared.
    pub unique: bool,
    /// `COLLATE` name.
    pub collation: Option<String>,
    /// Column-level `CHECK` expressions, verbatim.
    pub checks: Vec<String>,
    /// Column-level `REFERENCES` target.
    pub references: Option<ForeignKeyRef>,
    /// Trailing inline comment on the column's line.
    pub comment: Option<String>,
}

impl ColumnDescriptor {
    /// Creates a column with no constraints.
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            not_null: false,
            default_value: None,
            is_part_of_primary_key: false,
            primary_key_order: None,
            auto_increment: false,
            unique: false,
            collation: None,
            checks: Vec::new(),
            references: None,
            comment: None,
        }
    }

    /// Splits the declared type into base name, size and affinity.
    #[must_use]
    pub fn type_info(&self) -> TypeInfo {
        TypeInfo::from_declared(&self.declared_type)
    }

    /// Returns true if `name` refers to this column (ASCII case-insensitive).
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        same_name(&self.name, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Affinity;

    #[test]
    fn test_new_column_defaults() {
        let col = ColumnDescriptor::new("id", "INTEGER");
        assert!(!col.not_null);
        assert!(!col.is_part_of_primary_key);
        assert!(col.default_value.is_none());
        assert!(col.checks.is_empty());
    }

    #[test]
    fn test_is_named() {
        let col = ColumnDescriptor::new("UserId", "");
        assert!(col.is_named("userid"));
        assert!(col.is_named("USERID"));
        assert!(!col.is_named("user_id"));
    }

    #[test]
    fn test_type_info() {
        let info = ColumnDescriptor::new("name", "varchar(64)").type_info();
        assert_eq!(info.base, "VARCHAR");
        assert_eq!(info.size, Some(64));
        assert_eq!(info.affinity, Affinity::Text);
    }
}
