use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use ytcomments::config::Config;
use ytcomments::crawler::url::extract_video_id;
use ytcomments::crawler::CommentDownloader;
use ytcomments::models::SortMode;
use ytcomments::storage::JsonLinesWriter;
use ytcomments::utils::default_output_path;

/// Arguments of one download run
#[derive(Debug)]
pub struct DownloadParams {
    pub source: String,
    pub output: Option<PathBuf>,
    pub limit: Option<usize>,
    pub sort: SortMode,
}

/// Download every comment of a video into a JSON lines file
pub async fn download(config: Config, params: DownloadParams) -> Result<()> {
    let video_id = extract_video_id(&params.source);
    let output = params
        .output
        .unwrap_or_else(|| default_output_path(&video_id));

    let downloader = CommentDownloader::new(config)?;
    let mut writer = JsonLinesWriter::create(&output)
        .with_context(|| format!("Failed to open {}", output.display()))?;

    println!("Downloading comments for video: {video_id}");
    let start = Instant::now();

    let mut traversal = match downloader.open(&video_id, params.sort).await {
        Ok(traversal) => traversal.with_limit(params.limit),
        Err(e) if e.is_comments_disabled() => {
            writer.finish()?;
            println!("{e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut stdout = std::io::stdout();
    while let Some(comment) = traversal.next_comment().await? {
        writer.write(&comment)?;
        print!("Downloaded {} comment(s)\r", writer.count());
        stdout.flush()?;
    }

    let count = writer.count();
    writer.finish()?;

    let stats = traversal.stats();
    tracing::info!(
        video_id = %video_id,
        comments = count,
        pages = stats.pages_fetched,
        output = %output.display(),
        "Download finished"
    );

    println!(
        "\n[{:.2} seconds] Done!",
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
