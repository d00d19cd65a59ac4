//! Comment crawling
//!
//! This module implements the continuation-token traversal of a video's
//! comment tree: session bootstrap from the watch page, the paginated
//! endpoint fetcher, the frontier of pending requests and the lazy driver
//! tying them together.

pub mod comment;
pub mod fetcher;
pub mod frontier;
pub mod headers;
pub mod session;
pub mod traversal;
pub mod url;

use tracing::info;

use crate::config::{Config, DownloaderConfig};
use crate::error::{Error, Result};
use crate::models::SortMode;
use crate::utils::error::TraversalError;

pub use fetcher::PageFetcher;
pub use frontier::{Frontier, Step};
pub use session::{Bootstrap, Session};
pub use traversal::CommentTraversal;

/// Entry point for downloading the comments of one video at a time
#[derive(Debug, Clone)]
pub struct CommentDownloader {
    config: Config,
}

impl CommentDownloader {
    /// Create a downloader from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is invalid
    pub fn new(config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Error::config(format!("{e:#}")))?;
        Ok(Self { config })
    }

    /// Downloader settings in use
    pub fn settings(&self) -> &DownloaderConfig {
        &self.config.downloader
    }

    /// Load the watch page without starting a traversal
    ///
    /// # Errors
    ///
    /// Returns a fetch or parse error if the page cannot be used
    pub async fn bootstrap(&self, video_id: &str) -> Result<Bootstrap> {
        session::bootstrap(&self.config.downloader, video_id).await
    }

    /// Start a traversal over the comments of `video_id`
    ///
    /// # Errors
    ///
    /// Returns `TraversalError::CommentsDisabled` when the video has no
    /// comment section, or the bootstrap error otherwise
    pub async fn open(&self, video_id: &str, sort: SortMode) -> Result<CommentTraversal> {
        let (session, seed) = match self.bootstrap(video_id).await? {
            Bootstrap::Ready { session, seed } => (session, seed),
            Bootstrap::CommentsUnavailable => return Err(TraversalError::CommentsDisabled.into()),
        };

        let fetcher = PageFetcher::new(
            &self.config.downloader.base_url,
            &self.config.downloader.client_version,
            self.config.retry(),
        )?;

        info!(video_id = %video_id, sort = %sort, "Starting comment traversal");

        Ok(CommentTraversal::new(
            session,
            fetcher,
            seed,
            sort,
            self.config.page_delay(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.downloader.max_attempts = 0;

        let err = CommentDownloader::new(config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("max_attempts"));
    }

    #[test]
    fn test_default_config_accepted() {
        let downloader = CommentDownloader::new(Config::default()).unwrap();
        assert_eq!(downloader.settings().max_attempts, 5);
    }
}
