//! SQLite catalogue access for `oxide-ddl`.
//!
//! Reads the `CREATE` statements SQLite stores in `sqlite_master` and turns
//! them into [`oxide_ddl`] descriptors. Index key columns come from
//! `PRAGMA index_info`, since the stored DDL may index expressions.
//!
//! ```rust,ignore
//! use oxide_ddl_sqlite::Catalog;
//! use sqlx::sqlite::SqlitePoolOptions;
//!
//! let pool = SqlitePoolOptions::new().connect("sqlite:app.db").await?;
//! let catalog = Catalog::new(pool);
//!
//! let users = catalog.describe_table("main", "users").await?;
//! println!("primary key: {:?}", users.primary_key());
//! ```

pub mod catalog;
pub mod error;
pub mod output;

pub use catalog::{Catalog, CatalogObject, IndexInfo, ObjectType, master_table, quote_identifier};
pub use error::{CatalogError, Result};
