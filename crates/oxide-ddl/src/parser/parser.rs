//! DDL statement parser.

use tracing::debug;

use super::clause::{Clause, ParsedConstraint, parse_clause};
use super::cursor::Cursor;
use super::error::ParseError;
use super::split::{check_balance, slice_span, split_top_level};
use crate::lexer::{Comment, Keyword, Lexer, Span, Token, TokenKind, line_of};
use crate::schema::{
    ColumnDescriptor, DdlStatement, IndexDescriptor, TableDescriptor, ViewDescriptor,
};

/// Recursive-descent parser for one `CREATE TABLE`, `CREATE VIEW` or
/// `CREATE INDEX` statement.
///
/// The parser is a pure function of its input: it holds no global state,
/// performs no I/O, and either returns a complete descriptor or an error.
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    comments: Vec<Comment>,
}

/// Options written between `CREATE` and the object keyword.
#[derive(Debug, Default, Clone, Copy)]
struct CreateFlags {
    temporary: bool,
    unique: bool,
}

/// `[schema.]name`.
struct QualifiedName {
    schema: Option<String>,
    name: String,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let tokens = lexer.tokenize();
        Self {
            source: input,
            tokens,
            comments: lexer.into_comments(),
        }
    }

    /// Parses the statement.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the input is not exactly one well-formed
    /// `CREATE TABLE`, `CREATE VIEW` or `CREATE INDEX` statement.
    pub fn parse_statement(&self) -> Result<DdlStatement, ParseError> {
        let tokens = self.statement_tokens()?;
        let end = Span::new(self.source.len(), self.source.len());
        let mut cursor = Cursor::new(self.source, tokens, end);

        cursor.expect_keyword(Keyword::Create)?;
        let mut flags = CreateFlags::default();
        if cursor.eat_keyword(Keyword::Temp) || cursor.eat_keyword(Keyword::Temporary) {
            flags.temporary = true;
        }
        if cursor.eat_keyword(Keyword::Unique) {
            flags.unique = true;
        }

        let object = cursor.current_span();
        let statement = match cursor.peek().and_then(Token::as_keyword) {
            Some(Keyword::Table) if !flags.unique => {
                cursor.advance();
                DdlStatement::Table(self.parse_table_body(&mut cursor, flags)?)
            }
            Some(Keyword::View) if !flags.unique => {
                cursor.advance();
                DdlStatement::View(Self::parse_view_body(&mut cursor, flags)?)
            }
            Some(Keyword::Index) if !flags.temporary => {
                cursor.advance();
                DdlStatement::Index(Self::parse_index_body(&mut cursor, flags)?)
            }
            Some(Keyword::Virtual) if !flags.temporary && !flags.unique => {
                return Err(ParseError::unsupported("CREATE VIRTUAL TABLE", object));
            }
            Some(Keyword::Trigger) if !flags.unique => {
                return Err(ParseError::unsupported("CREATE TRIGGER", object));
            }
            _ => {
                let expected = match (flags.temporary, flags.unique) {
                    (_, true) => "INDEX",
                    (true, false) => "TABLE or VIEW",
                    (false, false) => "TABLE, VIEW or INDEX",
                };
                return Err(cursor.unexpected(expected));
            }
        };

        debug!(
            kind = statement.kind(),
            name = statement.name(),
            "parsed DDL statement"
        );
        Ok(statement)
    }

    /// Parses a `CREATE TABLE` statement.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if parsing fails, or
    /// [`ParseError::Malformed`] if the statement creates something else.
    pub fn parse_table(&self) -> Result<TableDescriptor, ParseError> {
        match self.parse_statement()? {
            DdlStatement::Table(table) => Ok(table),
            _ => Err(self.wrong_kind("CREATE TABLE")),
        }
    }

    /// Parses a `CREATE VIEW` statement.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if parsing fails, or
    /// [`ParseError::Malformed`] if the statement creates something else.
    pub fn parse_view(&self) -> Result<ViewDescriptor, ParseError> {
        match self.parse_statement()? {
            DdlStatement::View(view) => Ok(view),
            _ => Err(self.wrong_kind("CREATE VIEW")),
        }
    }

    /// Parses a `CREATE INDEX` statement.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if parsing fails, or
    /// [`ParseError::Malformed`] if the statement creates something else.
    pub fn parse_index(&self) -> Result<IndexDescriptor, ParseError> {
        match self.parse_statement()? {
            DdlStatement::Index(index) => Ok(index),
            _ => Err(self.wrong_kind("CREATE INDEX")),
        }
    }

    fn wrong_kind(&self, expected: &str) -> ParseError {
        let first = self.tokens.first().map(|t| t.span).unwrap_or_default();
        ParseError::malformed(format!("Expected a {expected} statement"), first)
    }

    /// Returns the statement tokens without `Eof` and without one trailing
    /// `;`, after checking for lexer errors and paren balance.
    fn statement_tokens(&self) -> Result<&[Token], ParseError> {
        let mut tokens = self.tokens.as_slice();

        if let Some(last) = tokens.last() {
            if let TokenKind::Error(message) = &last.kind {
                return Err(ParseError::malformed(message.clone(), last.span));
            }
        }
        if tokens.last().is_some_and(Token::is_eof) {
            tokens = &tokens[..tokens.len() - 1];
        }
        if tokens
            .last()
            .is_some_and(|t| matches!(t.kind, TokenKind::Semicolon))
        {
            tokens = &tokens[..tokens.len() - 1];
        }

        if tokens.is_empty() {
            return Err(ParseError::malformed(
                "Empty statement",
                Span::new(0, self.source.len()),
            ));
        }
        if let Some(semi) = tokens
            .iter()
            .find(|t| matches!(t.kind, TokenKind::Semicolon))
        {
            return Err(ParseError::malformed(
                "Expected a single statement",
                semi.span,
            ));
        }

        check_balance(tokens, self.source.len())?;
        Ok(tokens)
    }

    /// Parses `[IF NOT EXISTS]`.
    fn parse_if_not_exists(cursor: &mut Cursor<'_, '_>) -> Result<bool, ParseError> {
        if cursor.eat_keyword(Keyword::If) {
            cursor.expect_keyword(Keyword::Not)?;
            cursor.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Parses `[schema.]name`.
    fn parse_qualified_name(
        cursor: &mut Cursor<'_, '_>,
        what: &str,
    ) -> Result<QualifiedName, ParseError> {
        let (first, _) = cursor.expect_name(what)?;
        if cursor.eat(&TokenKind::Dot) {
            let (name, _) = cursor.expect_name(what)?;
            Ok(QualifiedName {
                schema: Some(first),
                name,
            })
        } else {
            Ok(QualifiedName {
                schema: None,
                name: first,
            })
        }
    }

    /// Parses everything after `CREATE [TEMP] TABLE`.
    fn parse_table_body(
        &self,
        cursor: &mut Cursor<'_, '_>,
        flags: CreateFlags,
    ) -> Result<TableDescriptor, ParseError> {
        let if_not_exists = Self::parse_if_not_exists(cursor)?;
        let QualifiedName { schema, name } = Self::parse_qualified_name(cursor, "table name")?;

        if cursor.check_keyword(Keyword::As) {
            return Err(ParseError::unsupported(
                "CREATE TABLE ... AS SELECT",
                cursor.current_span(),
            ));
        }

        let (body, parens) = cursor.expect_parenthesized("'(' after table name")?;
        let close = Span::new(parens.end - 1, parens.end);
        let clauses = split_top_level(body, close)?;
        if clauses.is_empty() {
            return Err(ParseError::malformed("Table has no columns", parens));
        }
        debug!(table = %name, clauses = clauses.len(), "split column list");

        let (without_rowid, strict) = Self::parse_table_options(cursor)?;

        let mut columns: Vec<ColumnDescriptor> = Vec::new();
        let mut constraints: Vec<ParsedConstraint> = Vec::new();

        for (i, clause_tokens) in clauses.iter().enumerate() {
            match parse_clause(self.source, clause_tokens)? {
                Clause::Column {
                    mut column,
                    name_span,
                    span,
                } => {
                    if columns.iter().any(|c| c.is_named(&column.name)) {
                        return Err(ParseError::DuplicateColumn {
                            offset: name_span.start,
                            name: column.name,
                        });
                    }
                    let boundary = clauses
                        .get(i + 1)
                        .map_or(close.start, |next| slice_span(next).start);
                    let comma = clauses.get(i + 1).and_then(|_| {
                        body.iter()
                            .find(|t| {
                                matches!(t.kind, TokenKind::Comma) && t.span.start >= span.end
                            })
                            .map(|t| t.span.start)
                    });
                    column.comment = self.trailing_comment(span.end, comma, boundary);
                    columns.push(column);
                }
                Clause::Constraints(parsed) => constraints.extend(parsed),
            }
        }

        if columns.is_empty() {
            return Err(ParseError::malformed("Table has no columns", parens));
        }

        for ParsedConstraint {
            constraint,
            referenced,
        } in &constraints
        {
            for (column_name, span) in referenced {
                let Some(column) = columns.iter_mut().find(|c| c.is_named(column_name)) else {
                    return Err(ParseError::UnknownColumn {
                        offset: span.start,
                        name: column_name.clone(),
                    });
                };
                if constraint.is_primary_key() {
                    column.is_part_of_primary_key = true;
                }
            }
        }

        Ok(TableDescriptor {
            name,
            schema,
            temporary: flags.temporary,
            if_not_exists,
            without_rowid,
            strict,
            columns,
            constraints: constraints.into_iter().map(|p| p.constraint).collect(),
        })
    }

    /// Parses `WITHOUT ROWID` and `STRICT` after the column list.
    fn parse_table_options(cursor: &mut Cursor<'_, '_>) -> Result<(bool, bool), ParseError> {
        let mut without_rowid = false;
        let mut strict = false;
        if cursor.is_done() {
            return Ok((without_rowid, strict));
        }

        loop {
            if cursor.eat_keyword(Keyword::Without) {
                if !cursor.check_word("ROWID") {
                    return Err(cursor.unexpected("ROWID"));
                }
                cursor.advance();
                without_rowid = true;
            } else if cursor.check_word("STRICT") {
                cursor.advance();
                strict = true;
            } else {
                return Err(cursor.unexpected("WITHOUT ROWID, STRICT or end of statement"));
            }

            if cursor.is_done() {
                return Ok((without_rowid, strict));
            }
            if !cursor.eat(&TokenKind::Comma) {
                return Err(cursor.unexpected("',' or end of statement"));
            }
        }
    }

    /// Collects comments that start between `clause_end` and `boundary` on
    /// the same line the clause ends on.
    ///
    /// `comma` is the separator before the next clause, if any. A comment
    /// after it that ends on the line where the next clause starts belongs
    /// to that clause and is skipped.
    fn trailing_comment(
        &self,
        clause_end: usize,
        comma: Option<usize>,
        boundary: usize,
    ) -> Option<String> {
        let line = line_of(self.source, clause_end);
        let boundary_line = line_of(self.source, boundary);
        let parts: Vec<&str> = self
            .comments
            .iter()
            .filter(|c| c.span.start >= clause_end && c.span.start < boundary)
            .filter(|c| line_of(self.source, c.span.start) == line)
            .filter(|c| {
                comma.is_none_or(|comma| {
                    c.span.start < comma
                        || line_of(self.source, c.span.end.saturating_sub(1)) != boundary_line
                })
            })
            .map(|c| c.text.as_str())
            .filter(|text| !text.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// Parses everything after `CREATE [TEMP] VIEW`.
    fn parse_view_body(
        cursor: &mut Cursor<'_, '_>,
        flags: CreateFlags,
    ) -> Result<ViewDescriptor, ParseError> {
        let if_not_exists = Self::parse_if_not_exists(cursor)?;
        let QualifiedName { schema, name } = Self::parse_qualified_name(cursor, "view name")?;

        let columns = if cursor.check(&TokenKind::LeftParen) {
            let (inner, parens) = cursor.expect_parenthesized("'('")?;
            let close = Span::new(parens.end - 1, parens.end);
            let segments = split_top_level(inner, close)?;
            if segments.is_empty() {
                return Err(ParseError::malformed("Empty column list", parens));
            }
            let mut names = Vec::with_capacity(segments.len());
            for segment in segments {
                let span = slice_span(segment);
                let mut sub = Cursor::new(cursor.source(), segment, Span::new(span.end, span.end));
                names.push(sub.expect_name("column name")?.0);
                if !sub.is_done() {
                    return Err(sub.unexpected("',' or ')'"));
                }
            }
            names
        } else {
            Vec::new()
        };

        if !cursor.check_keyword(Keyword::As) {
            // AS later on belongs to a construct the header grammar doesn't cover.
            if let Some(nested) = cursor.remaining().iter().find(|t| t.is_keyword(Keyword::As)) {
                return Err(ParseError::unsupported(
                    "view definition with AS outside the view header",
                    nested.span,
                ));
            }
            return Err(cursor.unexpected("AS"));
        }
        let as_span = cursor.expect_keyword(Keyword::As)?;

        let Some(first) = cursor.peek() else {
            return Err(ParseError::malformed(
                "Missing SELECT after AS",
                Span::new(as_span.end, as_span.end),
            ));
        };
        if !matches!(
            first.as_keyword(),
            Some(Keyword::Select | Keyword::With | Keyword::Values)
        ) && !matches!(first.kind, TokenKind::LeftParen)
        {
            return Err(ParseError::unsupported(
                "view body that is not a SELECT",
                first.span,
            ));
        }

        let body = cursor
            .rest_span()
            .map(|span| cursor.text(span).to_string())
            .unwrap_or_default();
        cursor.skip_rest();

        Ok(ViewDescriptor {
            name,
            schema,
            temporary: flags.temporary,
            if_not_exists,
            columns,
            body,
        })
    }

    /// Parses everything after `CREATE [UNIQUE] INDEX`.
    ///
    /// The key column list is checked for shape only; column order comes
    /// from the engine's index introspection.
    fn parse_index_body(
        cursor: &mut Cursor<'_, '_>,
        flags: CreateFlags,
    ) -> Result<IndexDescriptor, ParseError> {
        let if_not_exists = Self::parse_if_not_exists(cursor)?;
        let QualifiedName { schema, name } = Self::parse_qualified_name(cursor, "index name")?;
        cursor.expect_keyword(Keyword::On)?;
        let (table, _) = cursor.expect_name("table name")?;

        let (inner, parens) = cursor.expect_parenthesized("'(' after table name")?;
        if inner.is_empty() {
            return Err(ParseError::malformed("Empty column list", parens));
        }
        split_top_level(inner, Span::new(parens.end - 1, parens.end))?;

        let where_clause = if cursor.eat_keyword(Keyword::Where) {
            let Some(span) = cursor.rest_span() else {
                return Err(cursor.unexpected("expression after WHERE"));
            };
            cursor.skip_rest();
            Some(cursor.text(span).to_string())
        } else {
            None
        };

        if !cursor.is_done() {
            return Err(cursor.unexpected("WHERE or end of statement"));
        }

        Ok(IndexDescriptor {
            name,
            schema,
            table,
            unique: flags.unique,
            if_not_exists,
            where_clause,
        })
    }
}
