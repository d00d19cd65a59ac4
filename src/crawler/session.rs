//! Session bootstrap from the video watch page
//!
//! Loading the watch page gives us three things the pagination endpoint needs:
//! the cookies set by the site, the anti-forgery session token and the first
//! continuation of the comment section.

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::config::DownloaderConfig;
use crate::crawler::frontier::entry_from_data;
use crate::crawler::headers::{build_page_headers, pick_user_agent};
use crate::error::Result;
use crate::models::{ContinuationEntry, RequestKind};
use crate::parser::embedded::{extract_initial_data, extract_session_token};
use crate::parser::scan::{first_match, search_key};
use crate::utils::error::FetchError;

/// Query fragment present in the URL of the consent interstitial
const CONSENT_MARKER: &str = "uxe=";

/// HTTP session shared read-only by every request of one traversal
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,

    /// Same cookies as `client`, but redirects are returned to the caller
    pagination_client: Client,

    cookie_jar: Arc<Jar>,
    user_agent: String,
    xsrf_token: String,
}

impl Session {
    /// Create a session with a fresh cookie jar and no token yet
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(config: &DownloaderConfig) -> std::result::Result<Self, FetchError> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| pick_user_agent().to_string());
        let cookie_jar = Arc::new(Jar::default());

        let timeout = std::time::Duration::from_secs(config.request_timeout_secs);

        let client = Client::builder()
            .user_agent(&user_agent)
            .cookie_provider(Arc::clone(&cookie_jar))
            .timeout(timeout)
            .gzip(true)
            .build()?;

        let pagination_client = Client::builder()
            .user_agent(&user_agent)
            .cookie_provider(Arc::clone(&cookie_jar))
            .timeout(timeout)
            .gzip(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            pagination_client,
            cookie_jar,
            user_agent,
            xsrf_token: String::new(),
        })
    }

    /// Attach the anti-forgery token read from the watch page
    #[must_use]
    pub fn with_token(mut self, xsrf_token: impl Into<String>) -> Self {
        self.xsrf_token = xsrf_token.into();
        self
    }

    /// HTTP client carrying the session cookies, following redirects
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// HTTP client for pagination requests
    ///
    /// Shares the cookie jar with [`Session::client`] but does not follow
    /// redirects, so a 3xx reaches the fetcher's retry handling.
    pub fn pagination_client(&self) -> &Client {
        &self.pagination_client
    }

    /// Cookie jar backing the client
    pub fn cookie_jar(&self) -> &Arc<Jar> {
        &self.cookie_jar
    }

    /// User agent sent with every request
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Anti-forgery token sent in every pagination body
    pub fn xsrf_token(&self) -> &str {
        &self.xsrf_token
    }
}

/// Outcome of loading the watch page
#[derive(Debug)]
pub enum Bootstrap {
    /// Comments are available; traversal starts from `seed`
    Ready {
        session: Session,
        seed: ContinuationEntry,
    },
    /// Comments are disabled or the video does not exist
    CommentsUnavailable,
}

/// Cookie accepting the consent interstitial
///
/// An empty domain yields a host-only cookie.
pub fn consent_cookie(domain: &str) -> String {
    if domain.is_empty() {
        "CONSENT=YES+cb; Path=/".to_string()
    } else {
        format!("CONSENT=YES+cb; Domain={domain}; Path=/")
    }
}

/// Watch page URL for a video
pub fn watch_url(base_url: &str, video_id: &str) -> std::result::Result<Url, FetchError> {
    let mut url = Url::parse(&format!("{}/watch", base_url.trim_end_matches('/')))
        .map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
    url.query_pairs_mut().append_pair("v", video_id);
    Ok(url)
}

/// Load the watch page and prepare the session for pagination
///
/// # Errors
///
/// Returns a fetch error if the page cannot be loaded and a parse error if
/// the token or the initial data are missing or malformed
pub async fn bootstrap(config: &DownloaderConfig, video_id: &str) -> Result<Bootstrap> {
    let session = Session::new(config)?;
    let url = watch_url(&config.base_url, video_id)?;
    let headers = build_page_headers(session.user_agent())?;

    debug!(url = %url, "Fetching watch page");
    let mut response = get_page(&session, &url, &headers).await?;

    if response.url().as_str().contains(CONSENT_MARKER) {
        info!(redirect = %response.url(), "Consent interstitial detected, accepting");
        session
            .cookie_jar()
            .add_cookie_str(&consent_cookie(&config.consent_domain), &url);
        response = get_page(&session, &url, &headers).await?;
    }

    let html = response.text().await.map_err(FetchError::Http)?;

    let token = extract_session_token(&html)?;
    let initial_data = extract_initial_data(&html)?;

    match find_seed(&initial_data)? {
        Some(seed) => {
            info!(video_id = %video_id, "Session ready");
            Ok(Bootstrap::Ready {
                session: session.with_token(token),
                seed,
            })
        }
        None => {
            info!(video_id = %video_id, "No comment section continuation found");
            Ok(Bootstrap::CommentsUnavailable)
        }
    }
}

async fn get_page(
    session: &Session,
    url: &Url,
    headers: &reqwest::header::HeaderMap,
) -> std::result::Result<reqwest::Response, FetchError> {
    let response = session
        .client()
        .get(url.clone())
        .headers(headers.clone())
        .send()
        .await?;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(FetchError::Rejected {
            status: status.as_u16(),
        });
    }

    Ok(response)
}

/// First continuation of the comment section in the initial data
///
/// Item sections are tried in order; the first one holding a
/// `nextContinuationData` wins.
pub fn find_seed(
    initial_data: &Value,
) -> std::result::Result<Option<ContinuationEntry>, crate::utils::error::ParseError> {
    for renderer in search_key(initial_data, "itemSectionRenderer") {
        if let Some(data) = first_match(renderer, "nextContinuationData") {
            return entry_from_data(data, RequestKind::FetchTopLevel).map(Some);
        }
    }
    Ok(None)
}
