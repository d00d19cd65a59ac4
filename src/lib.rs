//! ytcomments - Video comment tree downloader
//!
//! Downloads every comment of a video, replies included, by walking the
//! continuation tokens of the site's paginated comment endpoint.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Session bootstrap, page fetching and the traversal engine
//! - [`parser`] - Embedded page data extraction and the structure scanner
//! - [`models`] - Core data structures and types
//! - [`storage`] - JSON lines output
//! - [`utils`] - Retry policy, domain errors and helpers
//!
//! # Example
//!
//! ```no_run
//! use ytcomments::config::Config;
//! use ytcomments::crawler::CommentDownloader;
//! use ytcomments::models::SortMode;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let downloader = CommentDownloader::new(Config::from_env()?)?;
//!     let mut traversal = downloader.open("dQw4w9WgXcQ", SortMode::Recent).await?;
//!     while let Some(comment) = traversal.next_comment().await? {
//!         println!("{}: {}", comment.author_display_name, comment.text);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::crawler::{Bootstrap, CommentDownloader, CommentTraversal};
    pub use crate::error::{ClassifiedError, Error, ErrorCategory, Result};
    pub use crate::models::{Comment, ContinuationEntry, RequestKind, SortMode, TraversalStats};
    pub use crate::storage::JsonLinesWriter;
}

// Direct re-exports for convenience
pub use models::{Comment, SortMode};
