//! DDL tokenizer implementation.

use super::{Comment, Keyword, Span, Token, TokenKind};

/// A lexer that tokenizes a single DDL statement.
///
/// Quoted identifiers, string literals and comments are resolved here, so
/// everything downstream can track paren depth on plain tokens without
/// worrying about a `,` or `)` hidden inside quotes.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Comments skipped so far, in source order.
    comments: Vec<Comment>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            comments: Vec::new(),
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips whitespace and comments, recording each comment.
    ///
    /// Returns an error token if a block comment is never closed.
    fn skip_whitespace_and_comments(&mut self) -> Option<Token> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            let comment_start = self.pos;

            // -- line comment
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                self.advance();
                self.advance();
                let body_start = self.pos;
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                self.push_comment(comment_start, body_start, self.pos);
                continue;
            }

            // /* block comment */
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance();
                self.advance();
                let body_start = self.pos;
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            let body_end = self.pos - 1;
                            self.advance();
                            self.push_comment(comment_start, body_start, body_end);
                            break;
                        }
                        Some(_) => {}
                        None => {
                            return Some(Token::new(
                                TokenKind::Error(String::from("Unterminated block comment")),
                                Span::new(comment_start, self.pos),
                            ));
                        }
                    }
                }
                continue;
            }

            return None;
        }
    }

    fn push_comment(&mut self, start: usize, body_start: usize, body_end: usize) {
        self.comments.push(Comment {
            text: self.input[body_start..body_end].trim().to_string(),
            span: Span::new(start, self.pos),
        });
    }

    /// Creates a span from start to current position.
    const fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token with the current span.
    const fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    fn error(&self, message: &str) -> Token {
        self.make_token(TokenKind::Error(String::from(message)))
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self.peek().is_some_and(is_identifier_char) {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];

        if let Some(keyword) = Keyword::from_str(text) {
            self.make_token(TokenKind::Keyword(keyword))
        } else {
            self.make_token(TokenKind::Identifier(String::from(text)))
        }
    }

    /// Scans a quoted identifier: `"name"` or `` `name` `` with doubled-quote
    /// escapes, or `[name]` which has no escape.
    fn scan_quoted_identifier(&mut self, open: char, close: char) -> Token {
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == close => {
                    if open == close && self.peek() == Some(close) {
                        self.advance();
                        value.push(close);
                    } else {
                        break;
                    }
                }
                Some(c) => value.push(c),
                None => return self.error("Unterminated quoted identifier"),
            }
        }

        self.make_token(TokenKind::Identifier(value))
    }

    /// Scans a number: decimal, float with optional exponent, or hex.
    fn scan_number(&mut self) -> Token {
        if self.peek() == Some('0')
            && matches!(self.peek_next(), Some('x' | 'X'))
            && self.input[self.pos + 2..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_hexdigit())
        {
            self.advance();
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
            }
            return self.make_token(TokenKind::Number);
        }

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let mark = self.pos;
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            } else {
                // `1e` without digits: leave the `e` for the next token.
                self.pos = mark;
            }
        }

        self.make_token(TokenKind::Number)
    }

    /// Scans a string literal.
    fn scan_string(&mut self) -> Token {
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('\'') => {
                    if self.peek() == Some('\'') {
                        self.advance();
                        value.push('\'');
                    } else {
                        break;
                    }
                }
                Some(c) => value.push(c),
                None => return self.error("Unterminated string literal"),
            }
        }

        self.make_token(TokenKind::String(value))
    }

    /// Scans a blob literal (X'...' or x'...').
    fn scan_blob(&mut self) -> Token {
        self.advance(); // X/x
        self.advance(); // opening quote
        let mut digits = 0usize;

        loop {
            match self.advance() {
                Some('\'') => break,
                Some(c) if c.is_ascii_hexdigit() => digits += 1,
                Some(_) => {
                    // Keep scanning to the closing quote so the error span
                    // covers the literal, but still report it.
                    while self.peek().is_some_and(|c| c != '\'') {
                        self.advance();
                    }
                    if self.advance().is_none() {
                        return self.error("Unterminated blob literal");
                    }
                    return self.error("Invalid character in blob literal");
                }
                None => return self.error("Unterminated blob literal"),
            }
        }

        if digits % 2 == 1 {
            return self.error("Odd number of hex digits in blob literal");
        }
        self.make_token(TokenKind::Blob)
    }

    /// Scans a bind parameter such as `?1`, `:name`, `@name` or `$name`.
    fn scan_parameter(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }
        self.make_token(TokenKind::Parameter)
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        if let Some(error) = self.skip_whitespace_and_comments() {
            return error;
        }
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '+' => self.make_token(TokenKind::Plus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '~' => self.make_token(TokenKind::BitNot),
            '&' => self.make_token(TokenKind::BitAnd),
            '-' => {
                if self.peek() == Some('>') {
                    self.advance();
                    if self.peek() == Some('>') {
                        self.advance();
                    }
                    self.make_token(TokenKind::Arrow)
                } else {
                    self.make_token(TokenKind::Minus)
                }
            }
            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.pos = self.start;
                    self.scan_number()
                } else {
                    self.make_token(TokenKind::Dot)
                }
            }
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                }
                self.make_token(TokenKind::Eq)
            }
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    self.make_token(TokenKind::LtEq)
                }
                Some('>') => {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                }
                Some('<') => {
                    self.advance();
                    self.make_token(TokenKind::LeftShift)
                }
                _ => self.make_token(TokenKind::Lt),
            },
            '>' => match self.peek() {
                Some('=') => {
                    self.advance();
                    self.make_token(TokenKind::GtEq)
                }
                Some('>') => {
                    self.advance();
                    self.make_token(TokenKind::RightShift)
                }
                _ => self.make_token(TokenKind::Gt),
            },
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                } else {
                    self.error("Unexpected character: !")
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    self.make_token(TokenKind::Concat)
                } else {
                    self.make_token(TokenKind::BitOr)
                }
            }

            '?' | ':' | '@' | '$' => self.scan_parameter(),

            '\'' => {
                self.pos = self.start;
                self.scan_string()
            }

            '"' => {
                self.pos = self.start;
                self.scan_quoted_identifier('"', '"')
            }
            '`' => {
                self.pos = self.start;
                self.scan_quoted_identifier('`', '`')
            }
            '[' => {
                self.pos = self.start;
                self.scan_quoted_identifier('[', ']')
            }

            'X' | 'x' if self.peek() == Some('\'') => {
                self.pos = self.start;
                self.scan_blob()
            }

            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number()
            }

            c if is_identifier_start(c) => {
                self.pos = self.start;
                self.scan_identifier()
            }

            _ => self.make_token(TokenKind::Error(format!("Unexpected character: {c}"))),
        }
    }

    /// Tokenizes the entire input and returns all tokens, ending with `Eof`.
    ///
    /// Lexing stops at the first error token, which is returned last in
    /// place of `Eof`.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = matches!(token.kind, TokenKind::Eof | TokenKind::Error(_));
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    /// Returns the comments skipped so far.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Consumes the lexer, returning the recorded comments.
    #[must_use]
    pub fn into_comments(self) -> Vec<Comment> {
        self.comments
    }
}

/// SQLite treats every non-ASCII character as part of an identifier.
const fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

const fn is_identifier_char(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit() || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize()
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    fn ident(s: &str) -> TokenKind {
        TokenKind::Identifier(String::from(s))
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(token_kinds(""), vec![TokenKind::Eof]);
        assert_eq!(token_kinds("   \n\t  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_comments_are_skipped_and_recorded() {
        let mut lexer = Lexer::new("CREATE -- line one\nTABLE /* block */ t");
        let kinds: Vec<_> = lexer.tokenize().into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::Create),
                TokenKind::Keyword(Keyword::Table),
                ident("t"),
                TokenKind::Eof,
            ]
        );
        let comments = lexer.into_comments();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text, "line one");
        assert_eq!(comments[0].span, Span::new(7, 18));
        assert_eq!(comments[1].text, "block");
    }

    #[test]
    fn test_unterminated_block_comment() {
        let tokens = tokenize("CREATE /* never closed");
        let last = tokens.last().unwrap();
        assert!(matches!(last.kind, TokenKind::Error(_)));
        assert_eq!(last.span.start, 7);
    }

    #[test]
    fn test_quoted_identifiers() {
        assert_eq!(
            token_kinds("\"column name\" `another` [third one] \"a\"\"b\""),
            vec![
                ident("column name"),
                ident("another"),
                ident("third one"),
                ident("a\"b"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_quoted_keyword_is_identifier() {
        assert_eq!(
            token_kinds("\"primary\" [check]"),
            vec![ident("primary"), ident("check"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_identifier_reports_start() {
        let tokens = tokenize("a [oops");
        let last = tokens.last().unwrap();
        assert!(matches!(last.kind, TokenKind::Error(_)));
        assert_eq!(last.span.start, 2);
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            token_kinds("'hello' 'it''s' 'a,b)'"),
            vec![
                TokenKind::String(String::from("hello")),
                TokenKind::String(String::from("it's")),
                TokenKind::String(String::from("a,b)")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let tokens = tokenize("DEFAULT 'abc");
        assert!(matches!(tokens.last().unwrap().kind, TokenKind::Error(_)));
        assert_eq!(tokens.last().unwrap().span.start, 8);
    }

    #[test]
    fn test_numbers_keep_source_text() {
        let sql = "42 3.14 .5 1e10 2.5e-3 0x1F";
        let tokens = tokenize(sql);
        let texts: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Number)
            .map(|t| t.span.text(sql))
            .collect();
        assert_eq!(texts, vec!["42", "3.14", ".5", "1e10", "2.5e-3", "0x1F"]);
    }

    #[test]
    fn test_huge_integer_is_not_an_error() {
        assert_eq!(
            token_kinds("99999999999999999999999"),
            vec![TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn test_blob() {
        assert_eq!(token_kinds("X'48454C'"), vec![TokenKind::Blob, TokenKind::Eof]);
        assert!(matches!(
            token_kinds("x'123'")[0],
            TokenKind::Error(_)
        ));
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            token_kinds("+ - * / % = == != <> < <= > >= || -> ->>"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eq,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Concat,
                TokenKind::Arrow,
                TokenKind::Arrow,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_column_definition() {
        assert_eq!(
            token_kinds("price DECIMAL(10,2) NOT NULL"),
            vec![
                ident("price"),
                ident("DECIMAL"),
                TokenKind::LeftParen,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::RightParen,
                TokenKind::Keyword(Keyword::Not),
                TokenKind::Keyword(Keyword::Null),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("CREATE  [t x]");
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(8, 13));
    }

    #[test]
    fn test_unexpected_character() {
        let tokens = tokenize("a # b");
        assert_eq!(tokens.len(), 2);
        assert!(matches!(tokens[1].kind, TokenKind::Error(_)));
        assert_eq!(tokens[1].span, Span::new(2, 3));
    }

    #[test]
    fn test_non_ascii_identifiers() {
        let tokens = tokenize("😀 größe naïve$1");
        assert_eq!(tokens[0].kind, TokenKind::Identifier("😀".into()));
        assert_eq!(tokens[1].kind, TokenKind::Identifier("größe".into()));
        assert_eq!(tokens[2].kind, TokenKind::Identifier("naïve$1".into()));
        assert!(tokens[3].is_eof());
    }
}
