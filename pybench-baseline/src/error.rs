//! Baseline tokenizer and parser errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BaselineError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BaselineError {
    #[error("Unexpected character at position {position}: {text:?}")]
    UnexpectedCharacter { position: usize, text: String },

    #[error("Dedent at position {position} does not match any outer indentation level")]
    InconsistentDedent { position: usize },

    #[error("Unexpected token at position {position}: expected {expected}, found {found}")]
    UnexpectedToken {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String },
}
