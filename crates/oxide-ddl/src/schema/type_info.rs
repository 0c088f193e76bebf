//! Declared-type inspection: base type, nominal size and SQLite affinity.

use core::fmt;

use serde::Serialize;

/// SQLite column affinity, derived from the declared type name.
///
/// See <https://www.sqlite.org/datatype3.html#determination_of_column_affinity>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Affinity {
    /// Type contains `INT`.
    Integer,
    /// Type contains `CHAR`, `CLOB` or `TEXT`.
    Text,
    /// Type contains `BLOB`, or no type was declared.
    Blob,
    /// Type contains `REAL`, `FLOA` or `DOUB`.
    Real,
    /// Anything else.
    Numeric,
}

impl Affinity {
    /// Applies SQLite's affinity rules, in their documented precedence.
    #[must_use]
    pub fn of(declared_type: &str) -> Self {
        let upper = declared_type.to_ascii_uppercase();
        if upper.contains("INT") {
            Self::Integer
        } else if ["CHAR", "CLOB", "TEXT"].iter().any(|s| upper.contains(s)) {
            Self::Text
        } else if upper.contains("BLOB") || upper.trim().is_empty() {
            Self::Blob
        } else if ["REAL", "FLOA", "DOUB"].iter().any(|s| upper.contains(s)) {
            Self::Real
        } else {
            Self::Numeric
        }
    }

    /// Returns the affinity name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Text => "TEXT",
            Self::Blob => "BLOB",
            Self::Real => "REAL",
            Self::Numeric => "NUMERIC",
        }
    }
}

impl fmt::Display for Affinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared type split into its base name and nominal size.
///
/// `VARCHAR(32)` has base `VARCHAR` and size 32. For `DECIMAL(10,2)` the
/// first numeric component (10) is the size; the full text stays available
/// in [`ColumnDescriptor::declared_type`](super::ColumnDescriptor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    /// Type words before any parenthetical, uppercased, single-spaced.
    pub base: String,
    /// First numeric component of the first balanced parenthetical.
    pub size: Option<u32>,
    /// SQLite affinity of the whole declared type.
    pub affinity: Affinity,
}

impl TypeInfo {
    /// Inspects a declared type string.
    #[must_use]
    pub fn from_declared(declared_type: &str) -> Self {
        let (words, group) = match declared_type.find('(') {
            Some(open) => (
                &declared_type[..open],
                balanced_group(&declared_type[open..]),
            ),
            None => (declared_type, None),
        };

        let base = words
            .split_whitespace()
            .map(str::to_ascii_uppercase)
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            base,
            size: group.and_then(leading_number),
            affinity: Affinity::of(declared_type),
        }
    }
}

/// Returns the contents of the balanced group starting at `text[0] == '('`,
/// without the outer parens. `None` if the group never closes.
fn balanced_group(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[1..i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parses the first comma-separated component as an unsigned size.
fn leading_number(group: &str) -> Option<u32> {
    let first = group.split(',').next()?.trim();
    let digits = first.strip_prefix('+').unwrap_or(first);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
