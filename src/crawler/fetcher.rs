//! Pagination endpoint fetcher with bounded retry
//!
//! This module performs the single POST exchange behind every continuation:
//! - Fail fast on a clear rejection (status 400 and above)
//! - Fixed-delay retry on ambiguous statuses (redirects included) and transport errors
//! - Exhausted retries reported as "no data" rather than as an error

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::crawler::headers::build_ajax_headers;
use crate::crawler::session::Session;
use crate::models::ContinuationEntry;
use crate::utils::error::FetchError;
use crate::utils::retry::{with_retry, Attempt, RetryConfig};
use crate::utils::truncate_text;

/// Path of the comment pagination endpoint
pub const COMMENTS_ENDPOINT_PATH: &str = "/comment_service_ajax";

/// Fetcher for the comment pagination endpoint
#[derive(Debug, Clone)]
pub struct PageFetcher {
    /// Full endpoint URL
    endpoint: String,

    /// Retry policy for ambiguous responses
    retry: RetryConfig,

    /// Client identification headers sent with every request
    ajax_headers: HeaderMap,
}

impl PageFetcher {
    /// Create a fetcher for the endpoint under `base_url`
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Decode` if the client version is not a valid header value
    pub fn new(base_url: &str, client_version: &str, retry: RetryConfig) -> Result<Self, FetchError> {
        Ok(Self {
            endpoint: format!("{}{COMMENTS_ENDPOINT_PATH}", base_url.trim_end_matches('/')),
            retry,
            ajax_headers: build_ajax_headers(client_version)?,
        })
    }

    /// Endpoint URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the page behind a continuation entry
    ///
    /// Returns `Ok(None)` when retries are exhausted or the server answers with
    /// an empty document.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Rejected` on a status of 400 or above and
    /// `FetchError::Decode` when a 200 response is not JSON
    pub async fn fetch_continuation(
        &self,
        session: &Session,
        entry: &ContinuationEntry,
    ) -> Result<Option<Value>, FetchError> {
        debug!(
            kind = ?entry.kind,
            token = %truncate_text(&entry.token, 24),
            "Fetching continuation"
        );

        let params = [
            (entry.kind.action(), "1"),
            ("pbj", "1"),
            ("ctoken", entry.token.as_str()),
            ("continuation", entry.token.as_str()),
            ("itct", entry.click_tracking_context.as_str()),
        ];
        let form = [("session_token", session.xsrf_token())];

        self.fetch(session, &self.endpoint, &params, &form, &self.ajax_headers)
            .await
    }

    /// POST to `url` and parse the JSON answer, retrying ambiguous outcomes
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Rejected` on a status of 400 or above and
    /// `FetchError::Decode` when a 200 response is not JSON
    pub async fn fetch(
        &self,
        session: &Session,
        url: &str,
        params: &[(&str, &str)],
        form: &[(&str, &str)],
        headers: &HeaderMap,
    ) -> Result<Option<Value>, FetchError> {
        let document = with_retry(&self.retry, |attempt| async move {
            let response = match session
                .pagination_client()
                .post(url)
                .query(params)
                .form(form)
                .headers(headers.clone())
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => return Attempt::Retry(format!("transport error: {e}")),
            };

            let status = response.status();
            if status == StatusCode::OK {
                let body = match response.text().await {
                    Ok(body) => body,
                    Err(e) => return Attempt::Retry(format!("failed to read body: {e}")),
                };
                return match serde_json::from_str::<Value>(&body) {
                    Ok(doc) => Attempt::Done(doc),
                    Err(e) => Attempt::Fatal(FetchError::Decode(format!(
                        "response is not JSON: {e}"
                    ))),
                };
            }

            if Self::is_rejection(status) {
                tracing::error!(
                    status = status.as_u16(),
                    attempt,
                    "Pagination request rejected"
                );
                return Attempt::Fatal(FetchError::Rejected {
                    status: status.as_u16(),
                });
            }

            Attempt::Retry(format!("status {}", status.as_u16()))
        })
        .await?;

        Ok(document.filter(|doc| !Self::is_empty_document(doc)))
    }

    /// Client and server error statuses are never retried
    fn is_rejection(status: StatusCode) -> bool {
        status.as_u16() > 399
    }

    /// A document that carries nothing to process
    fn is_empty_document(doc: &Value) -> bool {
        match doc {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }
}
