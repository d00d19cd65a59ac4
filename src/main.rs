use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{download, DownloadParams};
use ytcomments::config::{Config, LoggingConfig};
use ytcomments::error::{ClassifiedError, Error};
use ytcomments::models::SortMode;

#[derive(Parser)]
#[command(
    name = "ytcomments",
    version,
    about = "Download the full comment tree of a video as JSON lines",
    long_about = None
)]
struct Cli {
    /// Video ID or URL
    #[arg(short = 'y', long = "youtubeid")]
    youtube_id: String,

    /// Output file (defaults to <id>.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stop after this many comments (0 means no limit)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Sort order (0 or popular, 1 or recent)
    #[arg(short, long, default_value = "1")]
    sort: SortMode,

    /// Delay between pagination requests in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long)]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", error_line(&e));
            ExitCode::FAILURE
        }
    }
}

/// Text of the final error line
///
/// Crate errors are shown through their user-facing message. Anything else,
/// including a crate error wrapped in extra context, prints its full chain.
fn error_line(e: &anyhow::Error) -> String {
    match e.chain().next().and_then(|err| err.downcast_ref::<Error>()) {
        Some(err) => {
            tracing::error!(
                category = err.category().as_str(),
                recoverable = err.is_recoverable(),
                "Download failed"
            );
            err.user_message()
        }
        None => format!("{e:#}"),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    if let Some(delay_ms) = cli.delay_ms {
        config.downloader.page_delay_ms = delay_ms;
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }

    setup_tracing(&config.logging, cli.verbose)?;

    tracing::info!(
        source = %cli.youtube_id,
        sort = %cli.sort,
        limit = ?cli.limit,
        "Starting download"
    );

    download(
        config,
        DownloadParams {
            source: cli.youtube_id,
            output: cli.output,
            limit: cli.limit,
            sort: cli.sort,
        },
    )
    .await
}

fn setup_tracing(logging: &LoggingConfig, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("ytcomments=debug,warn")
    } else {
        tracing_subscriber::EnvFilter::new(format!("ytcomments={},warn", logging.level))
    };

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use ytcomments::utils::error::{FetchError, TraversalError};

    #[test]
    fn test_error_line_uses_user_message() {
        let err = anyhow::Error::from(Error::from(FetchError::Rejected { status: 404 }));
        assert_eq!(error_line(&err), "Server rejected request with status 404");

        let err = anyhow::Error::from(Error::config("delay out of range"));
        assert_eq!(error_line(&err), "invalid configuration: delay out of range");
    }

    #[test]
    fn test_error_line_keeps_context() {
        let err = Err::<(), _>(Error::from(TraversalError::CommentsDisabled))
            .context("Failed to open vid123")
            .unwrap_err();
        assert_eq!(
            error_line(&err),
            "Failed to open vid123: Comments disabled or video does not exist"
        );
    }

    #[test]
    fn test_error_line_plain_anyhow() {
        let err = anyhow::anyhow!("bad flag");
        assert_eq!(error_line(&err), "bad flag");
    }
}
