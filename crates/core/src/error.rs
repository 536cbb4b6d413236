//! Error types for Tersa operations.
//!
//! The summarizer and the translator are total functions and never return
//! errors. Everything in [`TersaError`] originates at the edges: reading the
//! source (network, files, stdin), loading a lexicon asset, or rendering a
//! finished record.
//!
//! # Example
//!
//! ```rust
//! use tersa_core::{TersaError, Result};
//!
//! fn require_text(text: &str) -> Result<&str> {
//!     if text.trim().is_empty() {
//!         return Err(TersaError::NoContent);
//!     }
//!     Ok(text)
//! }
//! # assert!(require_text("  ").is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Tersa.
///
/// # Example
///
/// ```rust
/// use tersa_core::{Pipeline, SourceText, TersaError};
///
/// match Pipeline::new().process(SourceText::new("")) {
///     Ok(record) => println!("{}", record.summary),
///     Err(TersaError::NoContent) => println!("nothing to summarize"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum TersaError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps DNS failures, refused connections and other transport problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("Page is not accessible (HTTP {status})")]
    HttpStatus { status: u16 },

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No usable source text.
    ///
    /// Returned when the caller supplies empty or whitespace-only text, or when
    /// nothing meaningful could be extracted from a fetched page.
    #[error("No content could be extracted from the source")]
    NoContent,

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Standard I/O errors while reading input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A lexicon asset could not be parsed.
    #[error("Invalid lexicon: {0}")]
    Lexicon(String),

    /// A record could not be rendered to the requested format.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl TersaError {
    /// Whether the error means the caller supplied no usable source.
    ///
    /// Fetch failures count as input errors: the pipeline never ran.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, TersaError::Lexicon(_) | TersaError::Serialization(_))
    }
}

/// Result type alias for TersaError.
pub type Result<T> = std::result::Result<T, TersaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TersaError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_http_status_error() {
        let err = TersaError::HttpStatus { status: 404 };
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_timeout_error() {
        let err = TersaError::Timeout { timeout: 10 };
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_input_error_classification() {
        assert!(TersaError::NoContent.is_input_error());
        assert!(TersaError::FileNotFound(PathBuf::from("/missing")).is_input_error());
        assert!(!TersaError::Lexicon("bad".to_string()).is_input_error());
        assert!(!TersaError::Serialization("bad".to_string()).is_input_error());
    }
}
