//! DDL Lexer/Tokenizer
//!
//! A hand-written lexer that turns one statement into spanned tokens and
//! records the comments it skips.

mod span;
mod token;
mod tokenizer;

pub use span::{Span, line_of};
pub use token::{Comment, Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
