//! Error types for netlint core

use thiserror::Error;

/// netlint core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration parsing error
    #[error("Parser error: {0}")]
    Parser(#[from] config_parser::ParserError),

    /// Host configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rule definition or dispatch error
    #[error("Rule error: {0}")]
    Rule(String),

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

/// netlint core result type
pub type Result<T> = std::result::Result<T, Error>;
