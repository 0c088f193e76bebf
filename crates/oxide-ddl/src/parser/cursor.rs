//! Token cursor shared by the statement and clause parsers.

use super::error::ParseError;
use crate::lexer::{Keyword, Span, Token, TokenKind};

/// A position in a slice of tokens, plus the source text the spans index.
///
/// The slice never contains `Eof`; running off the end is reported with
/// the `end` span.
pub(crate) struct Cursor<'s, 't> {
    source: &'s str,
    tokens: &'t [Token],
    pos: usize,
    end: Span,
}

impl<'s, 't> Cursor<'s, 't> {
    /// Creates a cursor over `tokens`; `end` locates errors past the last token.
    pub(crate) const fn new(source: &'s str, tokens: &'t [Token], end: Span) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            end,
        }
    }

    /// Returns the whole statement text.
    pub(crate) const fn source(&self) -> &'s str {
        self.source
    }

    /// Returns the source text covered by `span`.
    pub(crate) fn text(&self, span: Span) -> &'s str {
        span.text(self.source)
    }

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    /// Returns the token `n` positions ahead without advancing.
    pub(crate) fn peek_nth(&self, n: usize) -> Option<&'t Token> {
        self.tokens.get(self.pos + n)
    }

    /// Advances to the next token and returns the consumed one.
    pub(crate) fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Returns true once every token has been consumed.
    pub(crate) fn is_done(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Returns the tokens not yet consumed.
    pub(crate) fn remaining(&self) -> &'t [Token] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }

    /// Returns the span of the current token, or the end span.
    pub(crate) fn current_span(&self) -> Span {
        self.peek().map_or(self.end, |t| t.span)
    }

    /// Returns the span of the last consumed token, or the end span if
    /// nothing was consumed yet.
    pub(crate) fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(self.end, |t| t.span)
    }

    /// Returns the text of the current token, or `""` at the end.
    fn current_text(&self) -> &'s str {
        self.peek().map_or("", |t| self.text(t.span))
    }

    /// Checks if the current token matches the given kind.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek()
            .is_some_and(|t| core::mem::discriminant(&t.kind) == core::mem::discriminant(kind))
    }

    /// Checks if the current token is the given keyword.
    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    /// Checks if the current token is a bare word equal to `word`,
    /// for words like `ROWID` that are not keywords.
    pub(crate) fn check_word(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| {
            matches!(t.kind, TokenKind::Identifier(_))
                && self.text(t.span).eq_ignore_ascii_case(word)
        })
    }

    /// Consumes the keyword if it is next.
    pub(crate) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes a token of the given kind if it is next.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Builds an "unexpected token" error at the current position.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::unexpected(expected, self.current_text(), self.current_span())
    }

    /// Expects the current token to be the given keyword.
    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> Result<Span, ParseError> {
        match self.peek() {
            Some(t) if t.is_keyword(keyword) => {
                self.pos += 1;
                Ok(t.span)
            }
            _ => Err(self.unexpected(keyword.as_str())),
        }
    }

    /// Expects the current token to be the given kind.
    pub(crate) fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<&'t Token, ParseError> {
        if self.check(kind) {
            self.advance().ok_or_else(|| self.unexpected(what))
        } else {
            Err(self.unexpected(what))
        }
    }

    /// Expects and returns a name: a bare or quoted identifier, a string
    /// literal used as an identifier, or a keyword used as an identifier.
    pub(crate) fn expect_name(&mut self, what: &str) -> Result<(String, Span), ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected(what));
        };
        let name = match &token.kind {
            TokenKind::Identifier(name) | TokenKind::String(name) => name.clone(),
            TokenKind::Keyword(_) => self.text(token.span).to_string(),
            _ => return Err(self.unexpected(what)),
        };
        self.pos += 1;
        Ok((name, token.span))
    }

    /// Consumes a parenthesized group and returns the tokens inside it
    /// together with the span from `(` to `)` inclusive.
    pub(crate) fn expect_parenthesized(
        &mut self,
        what: &str,
    ) -> Result<(&'t [Token], Span), ParseError> {
        let open = self.expect(&TokenKind::LeftParen, what)?;
        let inner_start = self.pos;
        let mut depth = 1usize;
        while let Some(token) = self.advance() {
            match token.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth -= 1;
                    if depth == 0 {
                        let inner = &self.tokens[inner_start..self.pos - 1];
                        return Ok((inner, open.span.merge(token.span)));
                    }
                }
                _ => {}
            }
        }
        Err(ParseError::malformed("Unclosed '('", open.span))
    }

    /// Returns the span from the current token to the last token, or `None`
    /// when nothing is left.
    pub(crate) fn rest_span(&self) -> Option<Span> {
        let rest = self.remaining();
        Some(rest.first()?.span.merge(rest.last()?.span))
    }

    /// Consumes everything that is left.
    pub(crate) fn skip_rest(&mut self) {
        self.pos = self.tokens.len();
    }
}
