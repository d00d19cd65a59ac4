pub mod download;

pub use download::{download, DownloadParams};
