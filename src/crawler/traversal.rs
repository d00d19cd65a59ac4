//! Lazy comment traversal
//!
//! [`CommentTraversal`] drives the frontier one request at a time and hands
//! comments out as they are pulled. Nothing is fetched unless the consumer
//! asks for the next comment, so dropping the traversal stops all network
//! activity.

use std::collections::VecDeque;
use std::time::Duration;

use futures::stream::{self, Stream};
use tracing::{debug, info};

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::{Frontier, Step};
use crate::crawler::session::Session;
use crate::error::{Error, Result};
use crate::models::{Comment, ContinuationEntry, SortMode, TraversalStats};

/// Pull-based walk over a video's comment tree
#[derive(Debug)]
pub struct CommentTraversal {
    session: Session,
    fetcher: PageFetcher,
    frontier: Frontier,

    /// Comments of the last page not yet handed out
    pending: VecDeque<Comment>,

    /// Idle time between a processed response and the next request
    page_delay: Duration,

    /// Stop after this many comments
    limit: Option<usize>,

    stats: TraversalStats,

    /// Set once a response has been processed; the next request waits first
    throttle: bool,

    finished: bool,
}

impl CommentTraversal {
    /// Create a traversal starting from the bootstrap seed
    pub fn new(
        session: Session,
        fetcher: PageFetcher,
        seed: ContinuationEntry,
        sort: SortMode,
        page_delay: Duration,
    ) -> Self {
        Self {
            session,
            fetcher,
            frontier: Frontier::new(seed, sort),
            pending: VecDeque::new(),
            page_delay,
            limit: None,
            stats: TraversalStats::default(),
            throttle: false,
            finished: false,
        }
    }

    /// Stop after `limit` comments
    ///
    /// A limit of zero means no limit.
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.filter(|&n| n > 0);
        self
    }

    /// Progress so far
    pub fn stats(&self) -> TraversalStats {
        TraversalStats {
            pending_requests: self.frontier.len(),
            ..self.stats
        }
    }

    /// Next comment in traversal order, or `None` once the tree is exhausted
    ///
    /// # Errors
    ///
    /// Returns the fatal error that ended the traversal: a rejected request,
    /// a server error message, an unavailable sort option or a malformed
    /// record. Later calls return `Ok(None)`.
    pub async fn next_comment(&mut self) -> Result<Option<Comment>> {
        loop {
            if self.limit_reached() {
                self.finish("limit reached");
                return Ok(None);
            }

            if let Some(comment) = self.pending.pop_front() {
                self.stats.comments_yielded += 1;
                return Ok(Some(comment));
            }

            if self.finished {
                return Ok(None);
            }

            let Some(entry) = self.frontier.pop() else {
                self.finish("frontier exhausted");
                return Ok(None);
            };

            if self.throttle && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }

            let response = match self.fetcher.fetch_continuation(&self.session, &entry).await {
                Ok(Some(response)) => response,
                Ok(None) => {
                    self.finish("no more data");
                    return Ok(None);
                }
                Err(e) => {
                    self.finished = true;
                    return Err(e.into());
                }
            };

            self.throttle = true;
            self.stats.pages_fetched += 1;

            match self.frontier.process(entry.kind, &response) {
                Ok(Step::SortApplied) => {
                    debug!("Sort order applied, restarting from sorted listing");
                }
                Ok(Step::Page(comments)) => self.pending.extend(comments),
                Err(e) => {
                    self.finished = true;
                    self.pending.clear();
                    return Err(e);
                }
            }
        }
    }

    /// Turn the traversal into a stream of comments
    ///
    /// The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Comment>> {
        stream::try_unfold(self, |mut traversal| async move {
            let next = traversal.next_comment().await?;
            Ok::<_, Error>(next.map(|comment| (comment, traversal)))
        })
    }

    fn limit_reached(&self) -> bool {
        self.limit
            .is_some_and(|limit| self.stats.comments_yielded >= limit)
    }

    fn finish(&mut self, reason: &str) {
        if !self.finished {
            self.finished = true;
            info!(
                reason,
                pages = self.stats.pages_fetched,
                comments = self.stats.comments_yielded,
                "Traversal complete"
            );
        }
    }
}
