//! Integration tests for the watch page bootstrap

mod common;

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use ytcomments::crawler::session::bootstrap;
use ytcomments::crawler::{Bootstrap, CommentDownloader};
use ytcomments::error::Error;
use ytcomments::models::{RequestKind, SortMode};
use ytcomments::utils::error::ParseError;

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

#[tokio::test]
async fn test_bootstrap_ready() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/watch"))
        .and(query_param("v", "vid123"))
        .respond_with(html_response(common::watch_page(
            &common::initial_data_with_seed("seed-token"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let config = common::test_config(&server.uri());
    let outcome = bootstrap(&config.downloader, "vid123").await.unwrap();

    let Bootstrap::Ready { session, seed } = outcome else {
        panic!("expected a ready session");
    };
    assert_eq!(session.xsrf_token(), common::TOKEN);
    assert_eq!(seed.token, "seed-token");
    assert_eq!(seed.click_tracking_context, "itct-seed-token");
    assert_eq!(seed.kind, RequestKind::FetchTopLevel);
}

#[tokio::test]
async fn test_bootstrap_comments_disabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/watch"))
        .respond_with(html_response(common::watch_page(
            &common::initial_data_without_comments(),
        )))
        .mount(&server)
        .await;

    let config = common::test_config(&server.uri());
    let outcome = bootstrap(&config.downloader, "vid123").await.unwrap();
    assert!(matches!(outcome, Bootstrap::CommentsUnavailable));

    // The downloader reports the same outcome as a typed error
    let downloader = CommentDownloader::new(config).unwrap();
    let err = downloader
        .open("vid123", SortMode::Popular)
        .await
        .unwrap_err();
    assert!(err.is_comments_disabled());
    assert_eq!(err.to_string(), "Comments disabled or video does not exist");
}

#[tokio::test]
async fn test_bootstrap_consent_redirect() {
    let server = MockServer::start().await;

    // Once consent is given the real page is served
    Mock::given(method("GET"))
        .and(path("/watch"))
        .and(header("cookie", "CONSENT=YES+cb"))
        .respond_with(html_response(common::watch_page(
            &common::initial_data_with_seed("after-consent"),
        )))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/watch"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("{}/consent?uxe=23983172", server.uri())),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/consent"))
        .respond_with(html_response("<html>Before you continue</html>".to_string()))
        .expect(1)
        .mount(&server)
        .await;

    let config = common::test_config(&server.uri());
    let outcome = bootstrap(&config.downloader, "vid123").await.unwrap();

    let Bootstrap::Ready { seed, .. } = outcome else {
        panic!("expected a ready session after consent");
    };
    assert_eq!(seed.token, "after-consent");
}

#[tokio::test]
async fn test_bootstrap_missing_token_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/watch"))
        .respond_with(html_response("<html><body>nothing here</body></html>".to_string()))
        .mount(&server)
        .await;

    let config = common::test_config(&server.uri());
    let err = bootstrap(&config.downloader, "vid123").await.unwrap_err();

    assert!(matches!(
        err,
        Error::Parse(ParseError::MarkerNotFound("XSRF_TOKEN"))
    ));
}

#[tokio::test]
async fn test_bootstrap_rejected_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/watch"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = common::test_config(&server.uri());
    let err = bootstrap(&config.downloader, "vid123").await.unwrap_err();

    assert!(matches!(err, Error::Fetch(_)));
}
