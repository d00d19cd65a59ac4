//! Page and response document parsing
//!
//! This module handles locating the data embedded in the video page and
//! searching the loosely structured JSON documents returned by the
//! pagination endpoint.

pub mod embedded;
pub mod scan;

// Re-export the scanner entry points
pub use embedded::{extract_initial_data, extract_session_token, find_value};
pub use scan::{first_match, search_key, SearchKey};
