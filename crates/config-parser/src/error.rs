//! Error types for config-parser

use thiserror::Error;

/// Config-parser error type
#[derive(Error, Debug)]
pub enum ParserError {
    /// Input exceeded a configured size cap
    #[error("Size limit exceeded: {0}")]
    SizeLimit(String),

    /// Parsing error with an optional source line number
    #[error("Parsing error: {message}")]
    Parse {
        /// Human-readable description
        message: String,
        /// Zero-based line number, when known
        line: Option<usize>,
    },
}

impl ParserError {
    /// Build a [`ParserError::Parse`] without a line number
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            line: None,
        }
    }

    /// Build a [`ParserError::Parse`] anchored to a source line
    #[must_use]
    pub fn parse_at(message: impl Into<String>, line: usize) -> Self {
        Self::Parse {
            message: message.into(),
            line: Some(line),
        }
    }
}

/// Config-parser result type
pub type Result<T> = std::result::Result<T, ParserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_limit_message() {
        let err = ParserError::SizeLimit("configuration exceeds 50 MiB".to_string());
        assert_eq!(
            err.to_string(),
            "Size limit exceeded: configuration exceeds 50 MiB"
        );
    }

    #[test]
    fn parse_error_carries_line() {
        let err = ParserError::parse_at("unexpected token", 42);
        match err {
            ParserError::Parse { line, .. } => assert_eq!(line, Some(42)),
            ParserError::SizeLimit(_) => panic!("expected parse error"),
        }
    }
}
