//! Continuation frontier
//!
//! The frontier is the work list of pending pagination requests. Each
//! processed response can add more top-level pages and more reply threads;
//! the stack order makes reply threads drain before the next top-level page,
//! which keeps the output order reproducible.
//!
//! Before bulk traversal the frontier may have to select a sort order: the
//! first response then carries a sort menu whose entry replaces the whole
//! work list.

use serde_json::Value;
use tracing::debug;

use crate::crawler::comment::extract_comment;
use crate::error::Result;
use crate::models::{Comment, ContinuationEntry, RequestKind, SortMode};
use crate::parser::scan::{first_match, search_key};
use crate::utils::error::{ParseError, TraversalError};

/// Build a continuation entry from a `nextContinuationData`-shaped value
///
/// # Errors
///
/// Returns `ParseError::MissingField` if the token or its click-tracking
/// context is absent
pub fn entry_from_data(
    data: &Value,
    kind: RequestKind,
) -> std::result::Result<ContinuationEntry, ParseError> {
    let token = string_field(data, "continuation")?;
    let context = string_field(data, "clickTrackingParams")?;
    Ok(ContinuationEntry::new(token, context, kind))
}

fn string_field<'a>(data: &'a Value, key: &str) -> std::result::Result<&'a str, ParseError> {
    match data.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ParseError::UnexpectedType(key.to_string())),
        None => Err(ParseError::MissingField(key.to_string())),
    }
}

/// Where the frontier is in the sort protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortState {
    /// The next response must be checked for a sort menu
    NeedsSort(SortMode),
    /// Bulk traversal
    Normal,
}

/// Result of processing one response
#[derive(Debug, PartialEq)]
pub enum Step {
    /// The sort menu was applied; the frontier now holds only the sorted listing
    SortApplied,
    /// Comments found in the response, in document order
    Page(Vec<Comment>),
}

/// Stack of pending pagination requests plus the sort protocol state
#[derive(Debug, Clone)]
pub struct Frontier {
    stack: Vec<ContinuationEntry>,
    state: SortState,
}

impl Frontier {
    /// Start a frontier from the seed entry found at bootstrap
    pub fn new(seed: ContinuationEntry, sort: SortMode) -> Self {
        let state = if sort.needs_selection() {
            SortState::NeedsSort(sort)
        } else {
            SortState::Normal
        };

        Self {
            stack: vec![seed],
            state,
        }
    }

    /// Take the next request to issue
    pub fn pop(&mut self) -> Option<ContinuationEntry> {
        self.stack.pop()
    }

    /// Add a request to issue later
    pub fn push(&mut self, entry: ContinuationEntry) {
        self.stack.push(entry);
    }

    /// Number of pending requests
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// True when there is nothing left to fetch
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Current sort protocol state
    pub fn state(&self) -> SortState {
        self.state
    }

    /// Pending requests, bottom of the stack first
    pub fn pending(&self) -> &[ContinuationEntry] {
        &self.stack
    }

    /// Process the response to a request of the given kind
    ///
    /// # Errors
    ///
    /// - `TraversalError::Server` when the response carries an error message
    /// - `TraversalError::SortUnavailable` when the sort menu lacks the requested entry
    /// - `ParseError` when a continuation or comment record is malformed
    pub fn process(&mut self, kind: RequestKind, response: &Value) -> Result<Step> {
        if let Some(message) = first_match(response, "externalErrorMessage") {
            let message = message
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| message.to_string());
            return Err(TraversalError::Server(message).into());
        }

        if let SortState::NeedsSort(sort) = self.state {
            if self.apply_sort(sort, response)? {
                return Ok(Step::SortApplied);
            }
        }

        match kind {
            RequestKind::FetchTopLevel => self.enqueue_top_level(response)?,
            RequestKind::FetchReplies => self.enqueue_replies(response)?,
        }

        let comments = search_key(response, "commentRenderer")
            .map(extract_comment)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(
            comments = comments.len(),
            pending = self.stack.len(),
            "Processed page"
        );

        Ok(Step::Page(comments))
    }

    /// Replace the work list with the requested sort menu entry
    ///
    /// Returns `false` when the response has no sort menu; the sort is then
    /// treated as already satisfied.
    fn apply_sort(&mut self, sort: SortMode, response: &Value) -> Result<bool> {
        self.state = SortState::Normal;

        let Some(menu) = first_match(response, "sortFilterSubMenuRenderer") else {
            debug!(sort = %sort, "No sort menu in response, keeping server order");
            return Ok(false);
        };

        let items = menu
            .get("subMenuItems")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let index = sort.index();
        let Some(item) = items.get(index) else {
            return Err(TraversalError::SortUnavailable {
                requested: index,
                available: items.len(),
            }
            .into());
        };

        let data = item
            .get("continuation")
            .and_then(|c| c.get("reloadContinuationData"))
            .ok_or_else(|| {
                ParseError::MissingField("subMenuItems.continuation.reloadContinuationData".into())
            })?;

        let entry = entry_from_data(data, RequestKind::FetchTopLevel)?;
        debug!(sort = %sort, "Sort menu entry selected");
        self.stack = vec![entry];
        Ok(true)
    }

    /// Enqueue further top-level pages, then the reply threads of this page
    fn enqueue_top_level(&mut self, response: &Value) -> Result<()> {
        let Some(section) = first_match(response, "itemSectionContinuation") else {
            return Ok(());
        };

        if let Some(continuations) = section.get("continuations").and_then(Value::as_array) {
            for continuation in continuations {
                let data = continuation.get("nextContinuationData").ok_or_else(|| {
                    ParseError::MissingField("continuations.nextContinuationData".into())
                })?;
                self.stack
                    .push(entry_from_data(data, RequestKind::FetchTopLevel)?);
            }
        }

        if let Some(contents) = section.get("contents").and_then(Value::as_array) {
            for item in contents {
                for data in search_key(item, "nextContinuationData") {
                    self.stack
                        .push(entry_from_data(data, RequestKind::FetchReplies)?);
                }
            }
        }

        Ok(())
    }

    /// Enqueue every further page of a reply thread
    fn enqueue_replies(&mut self, response: &Value) -> Result<()> {
        for data in search_key(response, "nextContinuationData") {
            self.stack
                .push(entry_from_data(data, RequestKind::FetchReplies)?);
        }
        Ok(())
    }
}
