//! Error types for the comment downloader
//!
//! This module defines the domain-specific error types used throughout the application.

use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server rejected the request with a client or server error status
    #[error("Server rejected request with status {status}")]
    Rejected { status: u16 },

    /// Response body was not the expected JSON document
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors that can occur while reading embedded page data or response records
#[derive(Error, Debug)]
pub enum ParseError {
    /// A marker substring was not present in the page
    #[error("Marker not found in page: {0}")]
    MarkerNotFound(&'static str),

    /// The embedded initial-state blob is not valid JSON
    #[error("Invalid initial data: {0}")]
    InvalidInitialData(#[source] serde_json::Error),

    /// The session token could not be unescaped
    #[error("Invalid session token: {0}")]
    InvalidToken(#[source] serde_json::Error),

    /// A required field was absent
    #[error("Missing field: {0}")]
    MissingField(String),

    /// A comment record did not match the expected shape
    #[error("Malformed comment record: {0}")]
    InvalidRecord(#[source] serde_json::Error),

    /// A field was present with the wrong type
    #[error("Unexpected type for field: {0}")]
    UnexpectedType(String),
}

/// Errors raised by the traversal itself
#[derive(Error, Debug)]
pub enum TraversalError {
    /// The server answered with an explicit error message
    #[error("Error returned from server: {0}")]
    Server(String),

    /// The requested sort index does not exist in the sort menu
    #[error("Failed to set sorting: option {requested} requested, {available} available")]
    SortUnavailable { requested: usize, available: usize },

    /// No initial continuation was found on the video page
    #[error("Comments disabled or video does not exist")]
    CommentsDisabled,
}
