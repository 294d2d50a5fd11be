//! Barq Language Front End
//!
//! This library turns Barq and Cerium source text into a typed syntax tree.
//! It provides the lexer, the recursive-descent parser, a pretty-printer, and
//! a small driver for parsing many files at once.

pub mod ast;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;

// Re-export commonly used types
pub use ast::{Expression, Item, Module, Span, Statement, Type};
pub use dialect::{Dialect, DialectFeatures, ParserConfig, DEFAULT_MAX_DEPTH};
pub use driver::{parse_files, Session, SourceFile};
pub use error::{BarqError, BarqResult, ErrorCollector, ParserError};
pub use lexer::{Lexer, Token, TokenWithPosition, TriviaFilter};
pub use parser::{parse_module, parse_module_with, ParseError, ParseOutput, ParseResult, Parser};
pub use printer::print_module;
