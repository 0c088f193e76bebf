//! Token types for the DDL lexer.

use super::Span;

/// Keywords the DDL grammar branches on.
///
/// Type names (`INTEGER`, `TEXT`, `VARCHAR`, ...) are deliberately not
/// keywords: SQLite accepts any sequence of words as a declared type, so the
/// lexer hands them to the parser as plain identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Statement heads
    Create,
    Temp,
    Temporary,
    Table,
    View,
    Index,
    Trigger,
    Virtual,
    If,
    Not,
    Exists,
    As,
    On,
    Where,
    Without,

    // Select heads (view bodies)
    Select,
    With,
    Values,

    // Constraints
    Constraint,
    Primary,
    Key,
    Foreign,
    References,
    Unique,
    Check,
    Default,
    Collate,
    Null,
    Autoincrement,
    Asc,
    Desc,
    Generated,
    Always,

    // Conflict resolution
    Conflict,
    Rollback,
    Abort,
    Fail,
    Ignore,
    Replace,

    // Foreign key actions
    Delete,
    Update,
    Set,
    Cascade,
    Restrict,
    No,
    Action,
    Match,
    Deferrable,
    Initially,
    Deferred,
    Immediate,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CREATE" => Some(Self::Create),
            "TEMP" => Some(Self::Temp),
            "TEMPORARY" => Some(Self::Temporary),
            "TABLE" => Some(Self::Table),
            "VIEW" => Some(Self::View),
            "INDEX" => Some(Self::Index),
            "TRIGGER" => Some(Self::Trigger),
            "VIRTUAL" => Some(Self::Virtual),
            "IF" => Some(Self::If),
            "NOT" => Some(Self::Not),
            "EXISTS" => Some(Self::Exists),
            "AS" => Some(Self::As),
            "ON" => Some(Self::On),
            "WHERE" => Some(Self::Where),
            "WITHOUT" => Some(Self::Without),
            "SELECT" => Some(Self::Select),
            "WITH" => Some(Self::With),
            "VALUES" => Some(Self::Values),
            "CONSTRAINT" => Some(Self::Constraint),
            "PRIMARY" => Some(Self::Primary),
            "KEY" => Some(Self::Key),
            "FOREIGN" => Some(Self::Foreign),
            "REFERENCES" => Some(Self::References),
            "UNIQUE" => Some(Self::Unique),
            "CHECK" => Some(Self::Check),
            "DEFAULT" => Some(Self::Default),
            "COLLATE" => Some(Self::Collate),
            "NULL" => Some(Self::Null),
            "AUTOINCREMENT" => Some(Self::Autoincrement),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "GENERATED" => Some(Self::Generated),
            "ALWAYS" => Some(Self::Always),
            "CONFLICT" => Some(Self::Conflict),
            "ROLLBACK" => Some(Self::Rollback),
            "ABORT" => Some(Self::Abort),
            "FAIL" => Some(Self::Fail),
            "IGNORE" => Some(Self::Ignore),
            "REPLACE" => Some(Self::Replace),
            "DELETE" => Some(Self::Delete),
            "UPDATE" => Some(Self::Update),
            "SET" => Some(Self::Set),
            "CASCADE" => Some(Self::Cascade),
            "RESTRICT" => Some(Self::Restrict),
            "NO" => Some(Self::No),
            "ACTION" => Some(Self::Action),
            "MATCH" => Some(Self::Match),
            "DEFERRABLE" => Some(Self::Deferrable),
            "INITIALLY" => Some(Self::Initially),
            "DEFERRED" => Some(Self::Deferred),
            "IMMEDIATE" => Some(Self::Immediate),
            _ => None,
        }
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Temp => "TEMP",
            Self::Temporary => "TEMPORARY",
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Index => "INDEX",
            Self::Trigger => "TRIGGER",
            Self::Virtual => "VIRTUAL",
            Self::If => "IF",
            Self::Not => "NOT",
            Self::Exists => "EXISTS",
            Self::As => "AS",
            Self::On => "ON",
            Self::Where => "WHERE",
            Self::Without => "WITHOUT",
            Self::Select => "SELECT",
            Self::With => "WITH",
            Self::Values => "VALUES",
            Self::Constraint => "CONSTRAINT",
            Self::Primary => "PRIMARY",
            Self::Key => "KEY",
            Self::Foreign => "FOREIGN",
            Self::References => "REFERENCES",
            Self::Unique => "UNIQUE",
            Self::Check => "CHECK",
            Self::Default => "DEFAULT",
            Self::Collate => "COLLATE",
            Self::Null => "NULL",
            Self::Autoincrement => "AUTOINCREMENT",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Generated => "GENERATED",
            Self::Always => "ALWAYS",
            Self::Conflict => "CONFLICT",
            Self::Rollback => "ROLLBACK",
            Self::Abort => "ABORT",
            Self::Fail => "FAIL",
            Self::Ignore => "IGNORE",
            Self::Replace => "REPLACE",
            Self::Delete => "DELETE",
            Self::Update => "UPDATE",
            Self::Set => "SET",
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::No => "NO",
            Self::Action => "ACTION",
            Self::Match => "MATCH",
            Self::Deferrable => "DEFERRABLE",
            Self::Initially => "INITIALLY",
            Self::Deferred => "DEFERRED",
            Self::Immediate => "IMMEDIATE",
        }
    }

    /// Returns true if this keyword opens a table-level constraint clause.
    #[must_use]
    pub const fn starts_table_constraint(self) -> bool {
        matches!(
            self,
            Self::Primary | Self::Unique | Self::Foreign | Self::Check | Self::Constraint
        )
    }

    /// Returns true if this keyword opens a column constraint, which also
    /// ends the declared type of a column.
    #[must_use]
    pub const fn starts_column_constraint(self) -> bool {
        matches!(
            self,
            Self::Constraint
                | Self::Primary
                | Self::Not
                | Self::Null
                | Self::Unique
                | Self::Check
                | Self::Default
                | Self::Collate
                | Self::References
                | Self::Generated
                | Self::As
        )
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    /// Numeric literal (e.g., 42, 3.14, 1e10, 0x1F). The text lives in the span.
    Number,
    /// String literal with quotes removed and `''` unescaped (e.g., 'hello')
    String(String),
    /// Blob literal (e.g., X'1234')
    Blob,

    // Identifiers and keywords
    /// Identifier, unquoted (e.g., column_name, "col", `col`, [col])
    Identifier(String),
    /// SQL keyword
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// = or ==
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,
    /// -> or ->>
    Arrow,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ~
    BitNot,
    /// <<
    LeftShift,
    /// >>
    RightShift,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// ? ?NNN :name @name $name
    Parameter,

    // Special
    /// End of input
    Eof,
    /// Invalid input: unterminated literal, stray character
    Error(String),
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns true if this token is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.as_keyword() == Some(keyword)
    }
}

/// A comment skipped by the lexer, kept so the parser can attach it to the
/// nearest column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment body with `--`, `/*` and `*/` removed and whitespace trimmed.
    pub text: String,
    /// Location of the whole comment, markers included.
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("CREATE"), Some(Keyword::Create));
        assert_eq!(Keyword::from_str("create"), Some(Keyword::Create));
        assert_eq!(Keyword::from_str("AutoIncrement"), Some(Keyword::Autoincrement));
        assert_eq!(Keyword::from_str("integer"), None);
        assert_eq!(Keyword::from_str("varchar"), None);
    }

    #[test]
    fn test_keyword_as_str_round_trips() {
        for kw in [Keyword::Primary, Keyword::Without, Keyword::Deferrable] {
            assert_eq!(Keyword::from_str(kw.as_str()), Some(kw));
        }
    }

    #[test]
    fn test_constraint_starters() {
        assert!(Keyword::Foreign.starts_table_constraint());
        assert!(!Keyword::Foreign.starts_column_constraint());
        assert!(Keyword::Default.starts_column_constraint());
        assert!(!Keyword::Default.starts_table_constraint());
        assert!(!Keyword::Key.starts_column_constraint());
    }

    #[test]
    fn test_token_as_keyword() {
        let create = Token::new(TokenKind::Keyword(Keyword::Create), Span::new(0, 6));
        let comma = Token::new(TokenKind::Comma, Span::new(6, 7));
        assert_eq!(create.as_keyword(), Some(Keyword::Create));
        assert!(create.is_keyword(Keyword::Create));
        assert_eq!(comma.as_keyword(), None);
        assert!(!comma.is_eof());
    }
}
