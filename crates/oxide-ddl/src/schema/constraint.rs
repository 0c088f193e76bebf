//! Table-level constraints and foreign key references.

use serde::Serialize;

/// Sort direction on a key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// `ASC`
    Asc,
    /// `DESC`
    Desc,
}

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForeignKeyAction {
    /// No action.
    NoAction,
    /// Restrict deletion/update.
    Restrict,
    /// Cascade the operation.
    Cascade,
    /// Set to NULL.
    SetNull,
    /// Set to default value.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// The target of a `REFERENCES` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyRef {
    /// Referenced table.
    pub table: String,
    /// Referenced columns; empty means the parent's primary key.
    pub columns: Vec<String>,
    /// ON DELETE action.
    pub on_delete: Option<ForeignKeyAction>,
    /// ON UPDATE action.
    pub on_update: Option<ForeignKeyAction>,
}

/// One entry of a `PRIMARY KEY (...)` or `UNIQUE (...)` column list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedColumn {
    /// Column name, unquoted.
    pub name: String,
    /// `COLLATE` name, if given.
    pub collation: Option<String>,
    /// `ASC`/`DESC`, if given.
    pub order: Option<SortOrder>,
}

/// What a table-level constraint enforces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintKind {
    /// `PRIMARY KEY (a, b)`
    PrimaryKey {
        /// Key columns in declaration order.
        columns: Vec<IndexedColumn>,
    },
    /// `UNIQUE (a, b)`
    Unique {
        /// Unique columns in declaration order.
        columns: Vec<IndexedColumn>,
    },
    /// `FOREIGN KEY (a) REFERENCES p (x)`
    ForeignKey {
        /// Child columns.
        columns: Vec<String>,
        /// Parent reference.
        references: ForeignKeyRef,
    },
    /// `CHECK (expr)`
    Check {
        /// Expression text inside the parens, verbatim.
        expr: String,
    },
}

/// A constraint clause in the column list that is not bound to one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableConstraint {
    /// `CONSTRAINT name`, if given.
    pub name: Option<String>,
    /// The constraint itself.
    pub kind: ConstraintKind,
    /// The whole clause as written.
    pub text: String,
}

impl TableConstraint {
    /// Returns the names of the columns this constraint covers.
    ///
    /// `CHECK` constraints cover no named columns.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        match &self.kind {
            ConstraintKind::PrimaryKey { columns } | ConstraintKind::Unique { columns } => {
                columns.iter().map(|c| c.name.as_str()).collect()
            }
            ConstraintKind::ForeignKey { columns, .. } => {
                columns.iter().map(String::as_str).collect()
            }
            ConstraintKind::Check { .. } => Vec::new(),
        }
    }

    /// Returns true for a `PRIMARY KEY` constraint.
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        matches!(self.kind, ConstraintKind::PrimaryKey { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexed(name: &str) -> IndexedColumn {
        IndexedColumn {
            name: name.to_string(),
            collation: None,
            order: None,
        }
    }

    #[test]
    fn test_column_names() {
        let pk = TableConstraint {
            name: None,
            kind: ConstraintKind::PrimaryKey {
                columns: vec![indexed("a"), indexed("b")],
            },
            text: "PRIMARY KEY (a, b)".to_string(),
        };
        assert!(pk.is_primary_key());
        assert_eq!(pk.column_names(), vec!["a", "b"]);

        let check = TableConstraint {
            name: Some("positive".to_string()),
            kind: ConstraintKind::Check {
                expr: "a > 0".to_string(),
            },
            text: "CONSTRAINT positive CHECK (a > 0)".to_string(),
        };
        assert!(!check.is_primary_key());
        assert!(check.column_names().is_empty());
    }

    #[test]
    fn test_action_sql() {
        assert_eq!(ForeignKeyAction::SetNull.as_sql(), "SET NULL");
        assert_eq!(ForeignKeyAction::NoAction.as_sql(), "NO ACTION");
    }
}
