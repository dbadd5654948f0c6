//! Reference tokenizer and parser for the benchmarked Python-like subset
//!
//! This crate is the in-process baseline the harness times against the
//! external compiler:
//! - `logos` tokenizer with indentation tracking
//! - Recursive-descent parser producing a small AST
//! - No semantic analysis

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::Program;
pub use error::{BaselineError, Result};
pub use lexer::{tokenize, Spanned, Token};
pub use parser::Parser;

/// Tokenize and parse a source file
pub fn parse(source: &str) -> Result<Program> {
    let tokens = tokenize(source)?;
    Parser::new(tokens).parse_program()
}
