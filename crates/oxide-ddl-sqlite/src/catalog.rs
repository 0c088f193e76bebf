//! Schema objects read from `sqlite_master`.
//!
//! Every lookup takes the schema name (`main`, `temp` or an attached
//! database) and matches object names case-insensitively, as SQLite does.

use std::fmt;

use oxide_ddl::{
    ColumnDescriptor, IndexDescriptor, TableDescriptor, parse_index, parse_table, view_body,
};
use serde::Serialize;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

use crate::error::{CatalogError, Result};

/// Kind of object stored in the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    /// A table.
    Table,
    /// A view.
    View,
    /// An index.
    Index,
    /// A trigger.
    Trigger,
}

impl ObjectType {
    /// Returns the value SQLite stores in the `type` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::View => "view",
            Self::Index => "index",
            Self::Trigger => "trigger",
        }
    }

    /// Parses the `type` column of `sqlite_master`.
    #[must_use]
    pub fn from_catalog(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "table" => Some(Self::Table),
            "view" => Some(Self::View),
            "index" => Some(Self::Index),
            "trigger" => Some(Self::Trigger),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of `sqlite_master`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogObject {
    /// Object name.
    pub name: String,
    /// Table the object belongs to; equal to `name` for tables and views.
    pub tbl_name: String,
    /// Object type.
    pub object_type: ObjectType,
    /// Stored `CREATE` statement; `None` for automatic indexes.
    pub sql: Option<String>,
}

/// An index definition together with its key columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexInfo {
    /// Parsed `CREATE INDEX` statement.
    pub descriptor: IndexDescriptor,
    /// Key columns in index order; `None` for an expression key.
    pub columns: Vec<Option<String>>,
}

/// Quotes an identifier with double quotes, doubling any embedded `"`.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Returns the catalogue table for a schema.
///
/// `temp` has its own `sqlite_temp_master`; every other schema is addressed
/// as `"schema".sqlite_master`.
#[must_use]
pub fn master_table(schema: &str) -> String {
    if schema.eq_ignore_ascii_case("temp") {
        "sqlite_temp_master".to_string()
    } else {
        format!("{}.sqlite_master", quote_identifier(schema))
    }
}

/// Reads schema objects through a SQLite connection pool.
pub struct Catalog {
    pool: SqlitePool,
}

impl Catalog {
    /// Creates a new catalogue reader.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Lists the objects in a schema.
    ///
    /// With a type filter, SQLite's reserved `sqlite_%` objects are left out.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the query fails, for example
    /// when the schema is not attached.
    pub async fn objects(
        &self,
        schema: &str,
        object_type: Option<ObjectType>,
    ) -> Result<Vec<CatalogObject>> {
        let master = master_table(schema);
        let rows: Vec<(String, String, String, Option<String>)> = match object_type {
            Some(object_type) => {
                let sql = format!(
                    "SELECT name, tbl_name, type, sql FROM {master} \
                     WHERE lower(type) = ? AND name NOT LIKE 'sqlite_%' ORDER BY name"
                );
                sqlx::query_as(&sql)
                    .bind(object_type.as_str())
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT name, tbl_name, type, sql FROM {master} ORDER BY name");
                sqlx::query_as(&sql).fetch_all(&self.pool).await?
            }
        };

        let objects: Vec<CatalogObject> = rows
            .into_iter()
            .filter_map(|(name, tbl_name, kind, sql)| {
                ObjectType::from_catalog(&kind).map(|object_type| CatalogObject {
                    name,
                    tbl_name,
                    object_type,
                    sql,
                })
            })
            .collect();
        debug!(schema, count = objects.len(), "listed catalogue objects");
        Ok(objects)
    }

    /// Returns the stored `CREATE` statement of an object.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ObjectNotFound`] if no such object exists,
    /// [`CatalogError::NoDefinition`] if it has no stored DDL, or
    /// [`CatalogError::Database`] if the query fails.
    pub async fn create_sql(
        &self,
        schema: &str,
        name: &str,
        object_type: ObjectType,
    ) -> Result<String> {
        let sql = format!(
            "SELECT sql FROM {} WHERE lower(name) = lower(?) AND lower(type) = ?",
            master_table(schema)
        );
        let row: Option<(Option<String>,)> = sqlx::query_as(&sql)
            .bind(name)
            .bind(object_type.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some((Some(ddl),)) => Ok(ddl),
            Some((None,)) => Err(CatalogError::NoDefinition {
                name: name.to_string(),
                object_type,
            }),
            None => Err(CatalogError::ObjectNotFound {
                schema: schema.to_string(),
                name: name.to_string(),
                object_type,
            }),
        }
    }

    /// Parses the definition of a table.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Catalog::create_sql`], or
    /// [`CatalogError::Parse`] if the stored DDL cannot be parsed.
    pub async fn describe_table(&self, schema: &str, name: &str) -> Result<TableDescriptor> {
        let ddl = self.create_sql(schema, name, ObjectType::Table).await?;
        let table = parse_table(&ddl)?;
        debug!(schema, table = %table.name, columns = table.columns.len(), "described table");
        Ok(table)
    }

    /// Returns the columns of a table in physical order.
    ///
    /// # Errors
    ///
    /// Same as [`Catalog::describe_table`].
    pub async fn table_fields(&self, schema: &str, name: &str) -> Result<Vec<ColumnDescriptor>> {
        Ok(self.describe_table(schema, name).await?.columns)
    }

    /// Returns the `SELECT` text of a view.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Catalog::create_sql`], or
    /// [`CatalogError::Parse`] if the stored DDL cannot be parsed.
    pub async fn view_body(&self, schema: &str, name: &str) -> Result<String> {
        let ddl = self.create_sql(schema, name, ObjectType::View).await?;
        Ok(view_body(&ddl)?)
    }

    /// Returns the key column names of an index in index order.
    ///
    /// Expression keys have no column name and are reported as `None`. An
    /// unknown index yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the pragma fails.
    pub async fn index_columns(
        &self,
        schema: &str,
        index: &str,
    ) -> Result<Vec<Option<String>>> {
        let sql = format!(
            "PRAGMA {}.index_info({})",
            quote_identifier(schema),
            quote_identifier(index)
        );
        let mut rows: Vec<(i64, i64, Option<String>)> =
            sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        rows.sort_by_key(|(seqno, _, _)| *seqno);
        Ok(rows.into_iter().map(|(_, _, name)| name).collect())
    }

    /// Parses the definition of an index and resolves its key columns.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Catalog::create_sql`], or
    /// [`CatalogError::Parse`] if the stored DDL cannot be parsed.
    pub async fn describe_index(&self, schema: &str, name: &str) -> Result<IndexInfo> {
        let ddl = self.create_sql(schema, name, ObjectType::Index).await?;
        let descriptor = parse_index(&ddl)?;
        let columns = self.index_columns(schema, &descriptor.name).await?;
        Ok(IndexInfo {
            descriptor,
            columns,
        })
    }
}
