//! Core data models for comment downloading
//!
//! This module defines the main data structures used throughout the application.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A normalized comment
///
/// Serializes to a flat document using the short keys of the download format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment ID
    #[serde(rename = "cid")]
    pub id: String,

    /// Comment body, all text runs concatenated
    pub text: String,

    /// Relative, human-readable publication label (e.g. "3 days ago")
    #[serde(rename = "time")]
    pub timestamp_label: String,

    /// Author display name
    #[serde(rename = "author")]
    pub author_display_name: String,

    /// Author channel ID (empty when unknown)
    #[serde(rename = "channel")]
    pub author_channel_id: String,

    /// Vote count label as displayed (e.g. "1.2K")
    #[serde(rename = "votes")]
    pub vote_label: String,

    /// Highest-resolution author thumbnail
    #[serde(rename = "photo")]
    pub author_photo_url: String,

    /// Whether the creator hearted the comment
    #[serde(rename = "heart")]
    pub is_hearted: bool,
}

/// Kind of pagination request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    /// A page of top-level comments
    FetchTopLevel,
    /// A page of a single comment's reply thread
    FetchReplies,
}

impl RequestKind {
    /// Query parameter naming the action on the pagination endpoint
    pub fn action(&self) -> &'static str {
        match self {
            Self::FetchTopLevel => "action_get_comments",
            Self::FetchReplies => "action_get_comment_replies",
        }
    }
}

/// One pending pagination request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuationEntry {
    /// Opaque continuation token, round-tripped unmodified
    pub token: String,

    /// Click-tracking context sent alongside the token
    pub click_tracking_context: String,

    /// Which endpoint action the token belongs to
    pub kind: RequestKind,
}

impl ContinuationEntry {
    /// Create a new entry
    pub fn new(
        token: impl Into<String>,
        click_tracking_context: impl Into<String>,
        kind: RequestKind,
    ) -> Self {
        Self {
            token: token.into(),
            click_tracking_context: click_tracking_context.into(),
            kind,
        }
    }
}

/// Comment sort order
///
/// The value is an index into the sort menu the server offers on the first
/// page. Only the first two positions have well-known meanings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    /// Top comments, the server default
    Popular,
    /// Newest first
    #[default]
    Recent,
    /// Any other menu position
    Index(usize),
}

impl SortMode {
    /// Position of this mode in the sort menu
    pub fn index(&self) -> usize {
        match self {
            Self::Popular => 0,
            Self::Recent => 1,
            Self::Index(i) => *i,
        }
    }

    /// Build from a menu position
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Popular,
            1 => Self::Recent,
            i => Self::Index(i),
        }
    }

    /// Whether a sort handshake is needed before comments can be read
    pub fn needs_selection(&self) -> bool {
        !matches!(self, Self::Popular)
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Popular => write!(f, "popular"),
            Self::Recent => write!(f, "recent"),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "popular" | "top" => Ok(Self::Popular),
            "recent" | "newest" => Ok(Self::Recent),
            other => other
                .parse::<usize>()
                .map(Self::from_index)
                .map_err(|_| format!("Unknown sort mode: {s} (expected 0, 1, popular or recent)")),
        }
    }
}

impl Serialize for SortMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.index() as u64)
    }
}

impl<'de> Deserialize<'de> for SortMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let index = usize::deserialize(deserializer)?;
        Ok(Self::from_index(index))
    }
}

/// Progress counters for one traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraversalStats {
    /// Pagination responses processed
    pub pages_fetched: usize,

    /// Comments handed to the consumer
    pub comments_yielded: usize,

    /// Entries still waiting on the frontier
    pub pending_requests: usize,
}
