//! Schema descriptors produced by the parser.
//!
//! Every descriptor is built fresh for one statement and never mutated by
//! the parser afterwards. All of them serialize to JSON through `serde`.

mod column;
mod constraint;
mod table;
mod type_info;

pub use column::ColumnDescriptor;
pub use constraint::{
    ConstraintKind, ForeignKeyAction, ForeignKeyRef, IndexedColumn, SortOrder, TableConstraint,
};
pub use table::{DdlStatement, IndexDescriptor, TableDescriptor, ViewDescriptor};
pub use type_info::{Affinity, TypeInfo};

/// Compares two identifiers the way SQLite does: ASCII case-insensitively.
#[must_use]
pub fn same_name(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
