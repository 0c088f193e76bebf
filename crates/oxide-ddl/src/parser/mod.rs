//! DDL parser
//!
//! A hand-written recursive descent parser over the lexer's token stream.
//! Column lists are split at depth-zero commas before each clause is parsed
//! on its own.

mod clause;
mod cursor;
mod error;
mod parser;
mod split;

pub use error::ParseError;
pub use parser::Parser;
