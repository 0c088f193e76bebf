//! Parsing of one clause of a `CREATE TABLE` column list.
//!
//! A clause is either a column definition or a table-level constraint.
//! The first token decides which.

use tracing::trace;

use super::cursor::Cursor;
use super::error::ParseError;
use super::split::{slice_span, split_top_level};
use crate::lexer::{Keyword, Span, Token, TokenKind};
use crate::schema::{
    ColumnDescriptor, ConstraintKind, ForeignKeyAction, ForeignKeyRef, IndexedColumn, SortOrder,
    TableConstraint,
};

/// A parsed clause, with the spans needed for table-wide validation.
#[derive(Debug)]
pub(crate) enum Clause {
    Column {
        column: ColumnDescriptor,
        /// Location of the column name.
        name_span: Span,
        /// Location of the whole clause.
        span: Span,
    },
    /// One or more table constraints; SQLite lets them follow each other
    /// without a separating comma.
    Constraints(Vec<ParsedConstraint>),
}

/// A table constraint and the column names it refers to, with their
/// locations.
#[derive(Debug)]
pub(crate) struct ParsedConstraint {
    pub(crate) constraint: TableConstraint,
    pub(crate) referenced: Vec<(String, Span)>,
}

/// Parses one clause. `tokens` must be non-empty.
pub(crate) fn parse_clause(source: &str, tokens: &[Token]) -> Result<Clause, ParseError> {
    let span = slice_span(tokens);
    let mut cursor = Cursor::new(source, tokens, Span::new(span.end, span.end));

    let is_constraint = tokens
        .first()
        .and_then(Token::as_keyword)
        .is_some_and(Keyword::starts_table_constraint);

    if is_constraint {
        trace!(clause = span.text(source), "table constraint");
        let mut constraints = vec![parse_table_constraint(&mut cursor, span)?];
        while let Some(token) = cursor.peek() {
            if !token
                .as_keyword()
                .is_some_and(Keyword::starts_table_constraint)
            {
                return Err(unrecognized(&cursor, span));
            }
            constraints.push(parse_table_constraint(&mut cursor, span)?);
        }
        return Ok(Clause::Constraints(constraints));
    }

    let starts_with_name = tokens.first().is_some_and(|t| {
        matches!(
            t.kind,
            TokenKind::Identifier(_) | TokenKind::String(_) | TokenKind::Keyword(_)
        )
    });
    if !starts_with_name {
        return Err(unrecognized(&cursor, span));
    }

    trace!(clause = span.text(source), "column definition");
    let (column, name_span) = parse_column(&mut cursor, span)?;
    Ok(Clause::Column {
        column,
        name_span,
        span,
    })
}

/// Parses `name [type] [column-constraint ...]`.
fn parse_column(
    cursor: &mut Cursor<'_, '_>,
    clause: Span,
) -> Result<(ColumnDescriptor, Span), ParseError> {
    let (name, name_span) = cursor.expect_name("column name")?;
    let declared_type = parse_type_name(cursor)?;
    let mut column = ColumnDescriptor::new(name, declared_type);

    while let Some(token) = cursor.peek() {
        match token.as_keyword() {
            Some(Keyword::Constraint) => {
                cursor.advance();
                cursor.expect_name("constraint name")?;
            }
            Some(Keyword::Primary) => {
                cursor.advance();
                cursor.expect_keyword(Keyword::Key)?;
                column.is_part_of_primary_key = true;
                column.primary_key_order = parse_sort_order(cursor);
                parse_conflict_clause(cursor)?;
                if cursor.eat_keyword(Keyword::Autoincrement) {
                    column.auto_increment = true;
                }
            }
            Some(Keyword::Not) => {
                cursor.advance();
                cursor.expect_keyword(Keyword::Null)?;
                column.not_null = true;
                parse_conflict_clause(cursor)?;
            }
            Some(Keyword::Null) => {
                cursor.advance();
                parse_conflict_clause(cursor)?;
            }
            Some(Keyword::Unique) => {
                cursor.advance();
                column.unique = true;
                parse_conflict_clause(cursor)?;
            }
            Some(Keyword::Check) => {
                cursor.advance();
                let (inner, _) = cursor.expect_parenthesized("'(' after CHECK")?;
                column.checks.push(inner_text(cursor, inner)?);
            }
            Some(Keyword::Default) => {
                cursor.advance();
                column.default_value = Some(parse_default_value(cursor)?);
            }
            Some(Keyword::Collate) => {
                cursor.advance();
                column.collation = Some(cursor.expect_name("collation name")?.0);
            }
            Some(Keyword::References) => {
                cursor.advance();
                column.references = Some(parse_foreign_key_clause(cursor)?);
            }
            Some(Keyword::Generated | Keyword::As) => {
                return Err(ParseError::unsupported(
                    format!("generated column '{}'", column.name),
                    token.span,
                ));
            }
            _ => return Err(unrecognized(cursor, clause)),
        }
    }

    Ok((column, name_span))
}

/// Parses an optional type: one or more words, then an optional balanced
/// parenthetical. Returns the verbatim text, or `""` when no type is given.
fn parse_type_name(cursor: &mut Cursor<'_, '_>) -> Result<String, ParseError> {
    let mut span: Option<Span> = None;

    while let Some(token) = cursor.peek() {
        let is_word = match &token.kind {
            TokenKind::Identifier(_) => true,
            TokenKind::Keyword(kw) => !kw.starts_column_constraint(),
            _ => false,
        };
        if !is_word {
            break;
        }
        cursor.advance();
        span = Some(span.map_or(token.span, |s| s.merge(token.span)));
    }

    let Some(mut span) = span else {
        return Ok(String::new());
    };

    if cursor.check(&TokenKind::LeftParen) {
        let (_, parens) = cursor.expect_parenthesized("'('")?;
        span = span.merge(parens);
    }

    Ok(cursor.text(span).to_string())
}

/// Parses the value after `DEFAULT`.
fn parse_default_value(cursor: &mut Cursor<'_, '_>) -> Result<String, ParseError> {
    let Some(token) = cursor.peek() else {
        return Err(cursor.unexpected("default value"));
    };

    let span = match &token.kind {
        TokenKind::LeftParen => cursor.expect_parenthesized("'('")?.1,
        TokenKind::Plus | TokenKind::Minus => {
            cursor.advance();
            let number = cursor.expect(&TokenKind::Number, "number after sign")?;
            token.span.merge(number.span)
        }
        TokenKind::Number
        | TokenKind::String(_)
        | TokenKind::Blob
        | TokenKind::Identifier(_)
        | TokenKind::Keyword(Keyword::Null) => {
            cursor.advance();
            token.span
        }
        _ => return Err(cursor.unexpected("default value")),
    };

    Ok(cursor.text(span).to_string())
}

/// Parses an optional `ASC` or `DESC`.
fn parse_sort_order(cursor: &mut Cursor<'_, '_>) -> Option<SortOrder> {
    if cursor.eat_keyword(Keyword::Asc) {
        Some(SortOrder::Asc)
    } else if cursor.eat_keyword(Keyword::Desc) {
        Some(SortOrder::Desc)
    } else {
        None
    }
}

/// Consumes an optional `ON CONFLICT <resolution>`.
///
/// The resolution does not change the schema shape, so it is not kept.
fn parse_conflict_clause(cursor: &mut Cursor<'_, '_>) -> Result<(), ParseError> {
    let conflict_follows = cursor
        .peek_nth(1)
        .is_some_and(|t| t.is_keyword(Keyword::Conflict));
    if !(cursor.check_keyword(Keyword::On) && conflict_follows) {
        return Ok(());
    }
    cursor.advance();
    cursor.advance();

    match cursor.peek().and_then(Token::as_keyword) {
        Some(
            Keyword::Rollback | Keyword::Abort | Keyword::Fail | Keyword::Ignore | Keyword::Replace,
        ) => {
            cursor.advance();
            Ok(())
        }
        _ => Err(cursor.unexpected("ROLLBACK, ABORT, FAIL, IGNORE or REPLACE")),
    }
}

/// Parses what follows `REFERENCES`.
fn parse_foreign_key_clause(cursor: &mut Cursor<'_, '_>) -> Result<ForeignKeyRef, ParseError> {
    let (table, _) = cursor.expect_name("referenced table")?;
    let columns = if cursor.check(&TokenKind::LeftParen) {
        let (inner, parens) = cursor.expect_parenthesized("'('")?;
        parse_name_list(cursor, inner, parens)?
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    } else {
        Vec::new()
    };

    let mut reference = ForeignKeyRef {
        table,
        columns,
        on_delete: None,
        on_update: None,
    };

    loop {
        if cursor.eat_keyword(Keyword::On) {
            if cursor.eat_keyword(Keyword::Delete) {
                reference.on_delete = Some(parse_foreign_key_action(cursor)?);
            } else if cursor.eat_keyword(Keyword::Update) {
                reference.on_update = Some(parse_foreign_key_action(cursor)?);
            } else {
                return Err(cursor.unexpected("DELETE or UPDATE"));
            }
        } else if cursor.eat_keyword(Keyword::Match) {
            cursor.expect_name("match type")?;
        } else if cursor.check_keyword(Keyword::Not)
            && cursor
                .peek_nth(1)
                .is_some_and(|t| t.is_keyword(Keyword::Deferrable))
        {
            cursor.advance();
            cursor.advance();
            parse_deferral(cursor)?;
        } else if cursor.eat_keyword(Keyword::Deferrable) {
            parse_deferral(cursor)?;
        } else {
            break;
        }
    }

    Ok(reference)
}

/// Consumes an optional `INITIALLY DEFERRED|IMMEDIATE`.
fn parse_deferral(cursor: &mut Cursor<'_, '_>) -> Result<(), ParseError> {
    if cursor.eat_keyword(Keyword::Initially)
        && !cursor.eat_keyword(Keyword::Deferred)
        && !cursor.eat_keyword(Keyword::Immediate)
    {
        return Err(cursor.unexpected("DEFERRED or IMMEDIATE"));
    }
    Ok(())
}

fn parse_foreign_key_action(cursor: &mut Cursor<'_, '_>) -> Result<ForeignKeyAction, ParseError> {
    if cursor.eat_keyword(Keyword::Set) {
        if cursor.eat_keyword(Keyword::Null) {
            return Ok(ForeignKeyAction::SetNull);
        }
        if cursor.eat_keyword(Keyword::Default) {
            return Ok(ForeignKeyAction::SetDefault);
        }
        return Err(cursor.unexpected("NULL or DEFAULT"));
    }
    if cursor.eat_keyword(Keyword::Cascade) {
        return Ok(ForeignKeyAction::Cascade);
    }
    if cursor.eat_keyword(Keyword::Restrict) {
        return Ok(ForeignKeyAction::Restrict);
    }
    if cursor.eat_keyword(Keyword::No) {
        cursor.expect_keyword(Keyword::Action)?;
        return Ok(ForeignKeyAction::NoAction);
    }
    Err(cursor.unexpected("SET NULL, SET DEFAULT, CASCADE, RESTRICT or NO ACTION"))
}

/// Parses `[CONSTRAINT name] PRIMARY KEY|UNIQUE|CHECK|FOREIGN KEY ...`,
/// stopping after the constraint's last token.
fn parse_table_constraint(
    cursor: &mut Cursor<'_, '_>,
    clause: Span,
) -> Result<ParsedConstraint, ParseError> {
    let start = cursor.current_span();
    let name = if cursor.eat_keyword(Keyword::Constraint) {
        Some(cursor.expect_name("constraint name")?.0)
    } else {
        None
    };

    let Some(token) = cursor.peek() else {
        return Err(cursor.unexpected("PRIMARY KEY, UNIQUE, CHECK or FOREIGN KEY"));
    };

    let (kind, referenced) = match token.as_keyword() {
        Some(Keyword::Primary) => {
            cursor.advance();
            cursor.expect_keyword(Keyword::Key)?;
            let (inner, parens) = cursor.expect_parenthesized("'(' after PRIMARY KEY")?;
            let (columns, referenced) = parse_indexed_columns(cursor, inner, parens)?;
            parse_conflict_clause(cursor)?;
            (ConstraintKind::PrimaryKey { columns }, referenced)
        }
        Some(Keyword::Unique) => {
            cursor.advance();
            let (inner, parens) = cursor.expect_parenthesized("'(' after UNIQUE")?;
            let (columns, referenced) = parse_indexed_columns(cursor, inner, parens)?;
            parse_conflict_clause(cursor)?;
            (ConstraintKind::Unique { columns }, referenced)
        }
        Some(Keyword::Check) => {
            cursor.advance();
            let (inner, _) = cursor.expect_parenthesized("'(' after CHECK")?;
            let expr = inner_text(cursor, inner)?;
            (ConstraintKind::Check { expr }, Vec::new())
        }
        Some(Keyword::Foreign) => {
            cursor.advance();
            cursor.expect_keyword(Keyword::Key)?;
            let (inner, parens) = cursor.expect_parenthesized("'(' after FOREIGN KEY")?;
            let referenced = parse_name_list(cursor, inner, parens)?;
            cursor.expect_keyword(Keyword::References)?;
            let references = parse_foreign_key_clause(cursor)?;
            let columns = referenced.iter().map(|(n, _)| n.clone()).collect();
            (
                ConstraintKind::ForeignKey {
                    columns,
                    references,
                },
                referenced,
            )
        }
        _ => return Err(unrecognized(cursor, clause)),
    };

    let constraint = TableConstraint {
        name,
        kind,
        text: cursor.text(start.merge(cursor.previous_span())).to_string(),
    };
    Ok(ParsedConstraint {
        constraint,
        referenced,
    })
}

/// Parses `name [COLLATE c] [ASC|DESC], ...` from the inside of a paren group.
fn parse_indexed_columns(
    cursor: &Cursor<'_, '_>,
    inner: &[Token],
    parens: Span,
) -> Result<(Vec<IndexedColumn>, Vec<(String, Span)>), ParseError> {
    let segments = split_top_level(inner, Span::new(parens.end - 1, parens.end))?;
    if segments.is_empty() {
        return Err(ParseError::malformed("Empty column list", parens));
    }

    let mut columns = Vec::with_capacity(segments.len());
    let mut referenced = Vec::with_capacity(segments.len());
    for segment in segments {
        let span = slice_span(segment);
        let mut sub = Cursor::new(cursor.source(), segment, Span::new(span.end, span.end));

        let is_expression = segment
            .get(1)
            .is_some_and(|t| matches!(t.kind, TokenKind::LeftParen | TokenKind::Dot))
            || !matches!(
                segment[0].kind,
                TokenKind::Identifier(_) | TokenKind::String(_) | TokenKind::Keyword(_)
            );
        if is_expression {
            return Err(ParseError::unsupported(
                format!("expression in key column list '{}'", sub.text(span)),
                span,
            ));
        }

        let (name, name_span) = sub.expect_name("column name")?;
        let collation = if sub.eat_keyword(Keyword::Collate) {
            Some(sub.expect_name("collation name")?.0)
        } else {
            None
        };
        let order = parse_sort_order(&mut sub);
        if !sub.is_done() {
            return Err(sub.unexpected("',' or ')'"));
        }

        referenced.push((name.clone(), name_span));
        columns.push(IndexedColumn {
            name,
            collation,
            order,
        });
    }
    Ok((columns, referenced))
}

/// Parses a plain `name, name, ...` list from the inside of a paren group.
fn parse_name_list(
    cursor: &Cursor<'_, '_>,
    inner: &[Token],
    parens: Span,
) -> Result<Vec<(String, Span)>, ParseError> {
    let segments = split_top_level(inner, Span::new(parens.end - 1, parens.end))?;
    if segments.is_empty() {
        return Err(ParseError::malformed("Empty column list", parens));
    }

    segments
        .into_iter()
        .map(|segment| {
            let span = slice_span(segment);
            let mut sub = Cursor::new(cursor.source(), segment, Span::new(span.end, span.end));
            let name = sub.expect_name("column name")?;
            if sub.is_done() {
                Ok(name)
            } else {
                Err(sub.unexpected("',' or ')'"))
            }
        })
        .collect()
}

/// Builds the error for a clause that is not valid as written.
fn unrecognized(cursor: &Cursor<'_, '_>, clause: Span) -> ParseError {
    ParseError::UnrecognizedClause {
        offset: clause.start,
        text: cursor.text(clause).to_string(),
    }
}

/// Returns the verbatim text of the tokens inside a paren group.
fn inner_text(cursor: &Cursor<'_, '_>, inner: &[Token]) -> Result<String, ParseError> {
    if inner.is_empty() {
        return Err(cursor.unexpected("expression"));
    }
    Ok(cursor.text(slice_span(inner)).to_string())
}
