//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;
pub mod retry;

use std::path::PathBuf;

/// Sanitize filename by replacing characters that are invalid on common filesystems
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c => c,
        })
        .collect()
}

/// Default output file for a video: `<id>.json` in the working directory
pub fn default_output_path(video_id: &str) -> PathBuf {
    PathBuf::from(format!("{}.json", sanitize_filename(video_id)))
}

/// Truncate text to a maximum number of characters for log output
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
