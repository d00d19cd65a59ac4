//! Comment record extraction
//!
//! The pagination endpoint returns comments as deeply nested `commentRenderer`
//! records. This module maps one record to the flat [`Comment`] document.

use serde::Deserialize;
use serde_json::Value;

use crate::models::Comment;
use crate::parser::scan::first_match;
use crate::utils::error::ParseError;

// ============================================================================
// Raw Record Structures
// ============================================================================

/// The parts of a `commentRenderer` record we read
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComment {
    comment_id: String,
    content_text: Runs,
    published_time_text: Runs,
    #[serde(default)]
    author_text: Option<SimpleText>,
    author_endpoint: AuthorEndpoint,
    #[serde(default)]
    vote_count: Option<SimpleText>,
    author_thumbnail: Thumbnails,
}

#[derive(Debug, Deserialize)]
struct Runs {
    #[serde(default)]
    runs: Vec<Run>,
}

#[derive(Debug, Deserialize)]
struct Run {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimpleText {
    #[serde(default)]
    simple_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorEndpoint {
    browse_endpoint: BrowseEndpoint,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrowseEndpoint {
    #[serde(default)]
    browse_id: String,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

// ============================================================================
// Extraction
// ============================================================================

/// Map a `commentRenderer` record to a [`Comment`]
///
/// A missing author name falls back to `""`, a missing channel ID to `""`
/// and a missing vote count to `"0"`. An `authorText` or `voteCount` object
/// without a `simpleText` counts as missing.
/// The hearted flag is the first `isHearted` found anywhere in the record.
///
/// # Errors
///
/// - `ParseError::InvalidRecord` when a required field is absent or mistyped
/// - `ParseError::MissingField` when the timestamp runs or thumbnails are empty
/// - `ParseError::UnexpectedType` when `isHearted` is not a boolean
pub fn extract_comment(record: &Value) -> Result<Comment, ParseError> {
    let raw = RawComment::deserialize(record).map_err(ParseError::InvalidRecord)?;

    let text: String = raw
        .content_text
        .runs
        .iter()
        .map(|run| run.text.as_str())
        .collect();

    let timestamp_label = raw
        .published_time_text
        .runs
        .into_iter()
        .next()
        .map(|run| run.text)
        .ok_or_else(|| ParseError::MissingField("publishedTimeText.runs".into()))?;

    let author_photo_url = raw
        .author_thumbnail
        .thumbnails
        .into_iter()
        .last()
        .map(|thumb| thumb.url)
        .ok_or_else(|| ParseError::MissingField("authorThumbnail.thumbnails".into()))?;

    let is_hearted = match first_match(record, "isHearted") {
        None => false,
        Some(Value::Bool(hearted)) => *hearted,
        Some(other) => {
            return Err(ParseError::UnexpectedType(format!(
                "isHearted (expected a boolean, found {other})"
            )))
        }
    };

    Ok(Comment {
        id: raw.comment_id,
        text,
        timestamp_label,
        author_display_name: raw
            .author_text
            .and_then(|t| t.simple_text)
            .unwrap_or_default(),
        author_channel_id: raw.author_endpoint.browse_endpoint.browse_id,
        vote_label: raw
            .vote_count
            .and_then(|v| v.simple_text)
            .unwrap_or_else(|| "0".to_string()),
        author_photo_url,
        is_hearted,
    })
}
