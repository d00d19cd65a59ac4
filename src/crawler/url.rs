//! Video reference parsing
//!
//! Users pass either a bare video ID or one of the common URL shapes; this
//! module reduces them to the ID.

use url::Url;

/// Extract the video ID from a URL or bare ID
///
/// Handles `youtu.be/ID`, `…/watch?v=ID&…`, `/shorts/ID`, `/embed/ID` and `/live/ID`.
/// Anything else is returned unchanged.
///
/// # Example
///
/// ```
/// use ytcomments::crawler::url::extract_video_id;
///
/// assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=42"), "dQw4w9WgXcQ");
/// assert_eq!(extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=x"), "dQw4w9WgXcQ");
/// assert_eq!(extract_video_id("dQw4w9WgXcQ"), "dQw4w9WgXcQ");
/// ```
pub fn extract_video_id(source: &str) -> String {
    let source = source.trim();

    parse_video_url(source).unwrap_or_else(|| source.to_string())
}

fn parse_video_url(source: &str) -> Option<String> {
    let url = Url::parse(source)
        .or_else(|_| Url::parse(&format!("https://{source}")))
        .ok()?;
    let host = url.host_str()?.to_lowercase();

    if host == "youtu.be" || host.ends_with(".youtu.be") {
        return url
            .path_segments()?
            .find(|s| !s.is_empty())
            .map(str::to_string);
    }

    if !host.contains("youtube") {
        return None;
    }

    if let Some((_, id)) = url.query_pairs().find(|(k, _)| k == "v") {
        if !id.is_empty() {
            return Some(id.into_owned());
        }
    }

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    match segments.next() {
        Some("shorts") | Some("embed") | Some("live") => segments.next().map(str::to_string),
        _ => None,
    }
}
