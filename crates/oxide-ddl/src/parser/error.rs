//! Parser error types.

use crate::lexer::Span;

/// Why a statement could not be turned into a descriptor.
///
/// Every variant carries the byte offset into the statement where the
/// problem was detected. No partial result ever accompanies an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Structural problem: unbalanced parens, unterminated quote or comment,
    /// empty statement, missing keyword or token.
    #[error("Malformed statement at offset {offset}: {message}")]
    Malformed {
        /// Byte offset where the problem was detected.
        offset: usize,
        /// What was wrong.
        message: String,
    },

    /// A clause in the column list that is neither a column definition nor
    /// a known constraint.
    #[error("Unrecognized clause at offset {offset}: {text}")]
    UnrecognizedClause {
        /// Byte offset of the clause.
        offset: usize,
        /// The whole clause as written.
        text: String,
    },

    /// Valid SQL that this parser does not model, such as a generated
    /// column or `CREATE TABLE ... AS SELECT`.
    #[error("Unsupported construct at offset {offset}: {construct}")]
    UnsupportedConstruct {
        /// Byte offset of the construct.
        offset: usize,
        /// Description of the construct.
        construct: String,
    },

    /// Two columns share a name (case-insensitively).
    #[error("Duplicate column '{name}' at offset {offset}")]
    DuplicateColumn {
        /// Byte offset of the second declaration.
        offset: usize,
        /// The repeated name, as spelled in the second declaration.
        name: String,
    },

    /// A constraint names a column the table does not declare.
    #[error("Unknown column '{name}' at offset {offset}")]
    UnknownColumn {
        /// Byte offset of the reference.
        offset: usize,
        /// The missing column name.
        name: String,
    },
}

impl ParseError {
    /// Creates a malformed-statement error.
    #[must_use]
    pub fn malformed(message: impl Into<String>, span: Span) -> Self {
        Self::Malformed {
            offset: span.start,
            message: message.into(),
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: &str, found: &str, span: Span) -> Self {
        if found.is_empty() {
            Self::malformed(format!("Unexpected end of input: expected {expected}"), span)
        } else {
            Self::malformed(
                format!("Unexpected token: expected {expected}, found '{found}'"),
                span,
            )
        }
    }

    /// Creates an unsupported-construct error.
    #[must_use]
    pub fn unsupported(construct: impl Into<String>, span: Span) -> Self {
        Self::UnsupportedConstruct {
            offset: span.start,
            construct: construct.into(),
        }
    }

    /// Returns the byte offset the error refers to.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Malformed { offset, .. }
            | Self::UnrecognizedClause { offset, .. }
            | Self::UnsupportedConstruct { offset, .. }
            | Self::DuplicateColumn { offset, .. }
            | Self::UnknownColumn { offset, .. } => *offset,
        }
    }

    /// Returns true for [`ParseError::Malformed`].
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_message() {
        let err = ParseError::unexpected("'('", "AS", Span::new(14, 16));
        assert_eq!(err.offset(), 14);
        assert!(err.is_malformed());
        assert_eq!(
            err.to_string(),
            "Malformed statement at offset 14: Unexpected token: expected '(', found 'AS'"
        );
    }

    #[test]
    fn test_unexpected_eof_message() {
        let err = ParseError::unexpected("')'", "", Span::new(30, 30));
        assert_eq!(
            err.to_string(),
            "Malformed statement at offset 30: Unexpected end of input: expected ')'"
        );
    }

    #[test]
    fn test_offset_for_every_variant() {
        let errors = [
            ParseError::UnrecognizedClause {
                offset: 3,
                text: "x".into(),
            },
            ParseError::unsupported("generated column", Span::new(3, 9)),
            ParseError::DuplicateColumn {
                offset: 3,
                name: "a".into(),
            },
            ParseError::UnknownColumn {
                offset: 3,
                name: "b".into(),
            },
        ];
        for err in errors {
            assert_eq!(err.offset(), 3);
            assert!(!err.is_malformed());
        }
    }
}
