//! Paren-depth scanning over token slices.
//!
//! Quotes and comments are already gone by the time tokens reach here, so
//! depth tracking only has to count `(` and `)`.

use super::error::ParseError;
use crate::lexer::{Span, Token, TokenKind};

/// Verifies that every `(` has a matching `)` and no `)` closes nothing.
pub(crate) fn check_balance(tokens: &[Token], input_len: usize) -> Result<(), ParseError> {
    let mut open: Vec<Span> = Vec::new();
    for token in tokens {
        match token.kind {
            TokenKind::LeftParen => open.push(token.span),
            TokenKind::RightParen => {
                if open.pop().is_none() {
                    return Err(ParseError::malformed("Unbalanced ')'", token.span));
                }
            }
            _ => {}
        }
    }
    match open.last() {
        Some(&span) => Err(ParseError::malformed(
            format!("Unclosed '(' (input ends at offset {input_len})"),
            span,
        )),
        None => Ok(()),
    }
}

/// Splits `tokens` at commas that sit at paren depth zero.
///
/// `close` is the span of whatever ends the list (usually its `)`); an empty
/// segment is reported at the comma, or at `close` for a trailing comma.
/// An empty input yields no segments.
pub(crate) fn split_top_level(tokens: &[Token], close: Span) -> Result<Vec<&[Token]>, ParseError> {
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LeftParen => depth += 1,
            TokenKind::RightParen => depth = depth.saturating_sub(1),
            TokenKind::Comma if depth == 0 => {
                if i == start {
                    return Err(ParseError::malformed("Empty clause before ','", token.span));
                }
                segments.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if start == tokens.len() {
        return Err(ParseError::malformed("Empty clause after ','", close));
    }
    segments.push(&tokens[start..]);
    Ok(segments)
}

/// Returns the span covering a non-empty token slice.
pub(crate) fn slice_span(tokens: &[Token]) -> Span {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => first.span.merge(last.span),
        _ => Span::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn tokens(sql: &str) -> Vec<Token> {
        let mut tokens = Lexer::new(sql).tokenize();
        tokens.pop();
        tokens
    }

    fn segment_texts<'a>(sql: &'a str, segments: &[&[Token]]) -> Vec<&'a str> {
        segments.iter().map(|s| slice_span(s).text(sql)).collect()
    }

    #[test]
    fn test_split_respects_nesting_and_quotes() {
        let sql = "a DECIMAL(10,2) DEFAULT (1+2), b TEXT CHECK (length(b) < 10), 'x,y' c";
        let toks = tokens(sql);
        let segments = split_top_level(&toks, Span::new(sql.len(), sql.len())).unwrap();
        assert_eq!(
            segment_texts(sql, &segments),
            vec![
                "a DECIMAL(10,2) DEFAULT (1+2)",
                "b TEXT CHECK (length(b) < 10)",
                "'x,y' c",
            ]
        );
    }

    #[test]
    fn test_split_ignores_commas_in_comments() {
        let sql = "a INT /* , fake */, b -- , also fake\n TEXT";
        let toks = tokens(sql);
        let segments = split_top_level(&toks, Span::new(sql.len(), sql.len())).unwrap();
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_split_rejects_empty_segments() {
        let sql = "a,,b";
        let toks = tokens(sql);
        let err = split_top_level(&toks, Span::new(4, 4)).unwrap_err();
        assert_eq!(err.offset(), 2);

        let sql = "a,";
        let toks = tokens(sql);
        let err = split_top_level(&toks, Span::new(2, 3)).unwrap_err();
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn test_split_empty_input() {
        assert!(split_top_level(&[], Span::default()).unwrap().is_empty());
    }

    #[test]
    fn test_check_balance() {
        assert!(check_balance(&tokens("(a (b) c)"), 9).is_ok());

        let err = check_balance(&tokens("t (a INT, b TEXT"), 16).unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(err.offset(), 2);

        let err = check_balance(&tokens("t (a)) x"), 8).unwrap_err();
        assert_eq!(err.offset(), 5);
    }
}
