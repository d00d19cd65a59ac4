//! Unified error handling for the ytcomments crate
//!
//! This module provides a unified error type that consolidates all domain-specific
//! errors into a single `Error` enum, while maintaining the ability to use
//! domain-specific errors when needed.
//!
//! # Architecture
//!
//! - [`ClassifiedError`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use ytcomments::error::{ClassifiedError, Error};
//!
//! fn handle_error(err: Error) {
//!     if err.is_recoverable() {
//!         println!("Retrying: {}", err.user_message());
//!     } else {
//!         eprintln!("Fatal error: {}", err);
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::utils::error::{FetchError, ParseError, TraversalError};

/// Common trait for all ytcomments error types
pub trait ClassifiedError: std::error::Error {
    /// Check if this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Short message suitable for showing to the user
    fn user_message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, rejected status)
    Network,
    /// Parsing and data extraction errors
    Parsing,
    /// Errors reported by the remote server
    Server,
    /// Configuration and validation errors
    Config,
    /// Storage and I/O errors
    Storage,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Human readable name for the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Server => "server",
            Self::Config => "config",
            Self::Storage => "storage",
            Self::Other => "other",
        }
    }
}

impl ClassifiedError for FetchError {
    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidUrl(_) => ErrorCategory::Config,
            Self::Decode(_) => ErrorCategory::Parsing,
            _ => ErrorCategory::Network,
        }
    }
}

impl ClassifiedError for ParseError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Parsing
    }
}

impl ClassifiedError for TraversalError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Server(_) => ErrorCategory::Server,
            Self::SortUnavailable { .. } => ErrorCategory::Config,
            Self::CommentsDisabled => ErrorCategory::Other,
        }
    }
}

/// Unified error type for the ytcomments crate
#[derive(Error, Debug)]
pub enum Error {
    /// Fetch-specific errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Parse-specific errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Traversal errors (server messages, sorting)
    #[error("{0}")]
    Traversal(#[from] TraversalError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ClassifiedError for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_recoverable(),
            Self::Parse(e) => e.is_recoverable(),
            Self::Traversal(e) => e.is_recoverable(),
            Self::Io(_) => true,
            Self::Json(_) => false,
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::Fetch(e) => e.user_message(),
            Self::Parse(e) => e.user_message(),
            Self::Traversal(e) => e.user_message(),
            Self::Config(msg) => format!("invalid configuration: {msg}"),
            other => other.to_string(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(e) => e.category(),
            Self::Parse(e) => e.category(),
            Self::Traversal(e) => e.category(),
            Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) => ErrorCategory::Parsing,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// True when the video simply has no comments to offer
    pub fn is_comments_disabled(&self) -> bool {
        matches!(self, Self::Traversal(TraversalError::CommentsDisabled))
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        let fetch_err = Error::Fetch(FetchError::Rejected { status: 404 });
        assert_eq!(fetch_err.category(), ErrorCategory::Network);

        let parse_err = Error::Parse(ParseError::MarkerNotFound("XSRF_TOKEN"));
        assert_eq!(parse_err.category(), ErrorCategory::Parsing);

        let server_err = Error::Traversal(TraversalError::Server("quota".into()));
        assert_eq!(server_err.category(), ErrorCategory::Server);
    }

    #[test]
    fn test_is_recoverable() {
        let rejected = Error::Fetch(FetchError::Rejected { status: 403 });
        assert!(!rejected.is_recoverable());

        let parse_err = Error::Parse(ParseError::MissingField("commentId".into()));
        assert!(!parse_err.is_recoverable());
    }

    #[test]
    fn test_server_message_is_preserved() {
        let err: Error = TraversalError::Server("Comments are turned off".into()).into();
        assert_eq!(
            err.to_string(),
            "Error returned from server: Comments are turned off"
        );
    }

    #[test]
    fn test_comments_disabled_detection() {
        let err: Error = TraversalError::CommentsDisabled.into();
        assert!(err.is_comments_disabled());
        assert!(!Error::other("boom").is_comments_disabled());
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("max_attempts must be greater than 0");
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(!err.is_recoverable());
        assert!(err.user_message().contains("max_attempts"));
    }

    #[test]
    fn test_category_names() {
        assert_eq!(ErrorCategory::Network.as_str(), "network");
        assert_eq!(ErrorCategory::Server.as_str(), "server");
    }
}
