//! Lexical analysis for Barq and Cerium sources.
//!
//! The `Lexer` turns UTF-8 text into a lazy stream of tokens that covers the
//! whole input and ends with `Token::Eof`. Unrecognised input becomes a
//! `Token::Error` and lexing resumes at the next byte. `TriviaFilter` strips
//! whitespace and comments from that stream while keeping them with their
//! spans.

mod lexer;
pub mod literal_parser;
mod token;
mod trivia;

pub use lexer::{format_tokens, Lexer, Position, TokenWithPosition};
pub use token::{Token, TokenKind};
pub use trivia::{Trivia, TriviaFilter, TriviaKind};
