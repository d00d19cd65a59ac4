use rand::seq::SliceRandom;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT,
};

use crate::utils::error::FetchError;

/// Pool of realistic desktop User-Agent strings
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/79.0.3945.130 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
];

/// Header naming the web client
const CLIENT_NAME_HEADER: &str = "x-youtube-client-name";

/// Header carrying the web client version
const CLIENT_VERSION_HEADER: &str = "x-youtube-client-version";

/// Pick a browser user agent for a new session
///
/// The agent is chosen once and kept for the whole session.
pub fn pick_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS.choose(&mut rng).copied().unwrap_or(USER_AGENTS[0])
}

/// Build browser-like headers for the watch page request
///
/// # Examples
///
/// ```
/// use ytcomments::crawler::headers::build_page_headers;
///
/// let headers = build_page_headers("Mozilla/5.0").unwrap();
/// assert!(headers.contains_key("user-agent"));
/// ```
pub fn build_page_headers(user_agent: &str) -> Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::new();

    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent)
            .map_err(|_| FetchError::Decode(format!("Invalid user agent: {user_agent}")))?,
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );

    Ok(headers)
}

/// Build headers identifying the web client to the pagination endpoint
///
/// # Examples
///
/// ```
/// use ytcomments::crawler::headers::build_ajax_headers;
///
/// let headers = build_ajax_headers("2.20201202.06.01").unwrap();
/// assert_eq!(headers.get("x-youtube-client-name").unwrap(), "1");
/// ```
pub fn build_ajax_headers(client_version: &str) -> Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::new();

    headers.insert(
        HeaderName::from_static(CLIENT_NAME_HEADER),
        HeaderValue::from_static("1"),
    );
    headers.insert(
        HeaderName::from_static(CLIENT_VERSION_HEADER),
        HeaderValue::from_str(client_version)
            .map_err(|_| FetchError::Decode(format!("Invalid client version: {client_version}")))?,
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
    );

    Ok(headers)
}
