//! Common test utilities

#![allow(dead_code)]

use serde_json::{json, Value};
use ytcomments::config::Config;

/// Session token as it appears in the page (escaped)
pub const RAW_TOKEN: &str = r"QUFFLUhqbT\u003d\u003d";

/// Session token after unescaping
pub const TOKEN: &str = "QUFFLUhqbT==";

/// Configuration pointed at a mock server, with no waiting
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.downloader.base_url = base_url.to_string();
    config.downloader.consent_domain = String::new();
    config.downloader.user_agent = Some("ytcomments-test/1.0".to_string());
    config.downloader.request_timeout_secs = 5;
    config.downloader.page_delay_ms = 0;
    config.downloader.max_attempts = 3;
    config.downloader.retry_delay_ms = 0;
    config
}

/// `nextContinuationData` wrapper
pub fn next_continuation(token: &str) -> Value {
    json!({"nextContinuationData": {"continuation": token, "clickTrackingParams": format!("itct-{token}")}})
}

/// Watch page HTML with the given initial data
pub fn watch_page(initial_data: &Value) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><script>ytcfg.set({{"INNERTUBE_API_KEY":"k","XSRF_TOKEN":"{RAW_TOKEN}","XSRF_FIELD_NAME":"session_token"}});</script></head>
<body><script>var ytInitialData = {initial_data};</script></body></html>"#
    )
}

/// Initial data whose comment section starts at `seed`
pub fn initial_data_with_seed(seed: &str) -> Value {
    json!({
        "contents": {"twoColumnWatchNextResults": {"results": {"results": {"contents": [
            {"videoPrimaryInfoRenderer": {"title": {"runs": [{"text": "A video"}]}}},
            {"itemSectionRenderer": {
                "contents": [{"continuationItemRenderer": {}}],
                "continuations": [next_continuation(seed)],
                "sectionIdentifier": "comment-item-section"
            }}
        ]}}}}
    })
}

/// Initial data of a video with comments turned off
pub fn initial_data_without_comments() -> Value {
    json!({
        "contents": {"twoColumnWatchNextResults": {"results": {"results": {"contents": [
            {"itemSectionRenderer": {"contents": [{"messageRenderer": {"text": {"runs": [{"text": "Comments are turned off."}]}}}]}}
        ]}}}}
    })
}

/// A `commentRenderer` record
pub fn comment_record(id: &str, text: &str, votes: Option<&str>) -> Value {
    let mut record = json!({
        "commentId": id,
        "contentText": {"runs": [{"text": text}]},
        "publishedTimeText": {"runs": [{"text": "2 days ago"}]},
        "authorText": {"simpleText": format!("author of {id}")},
        "authorEndpoint": {"browseEndpoint": {"browseId": format!("UC{id}")}},
        "authorThumbnail": {"thumbnails": [{"url": "https://yt3/s48"}, {"url": "https://yt3/s88"}]},
        "actionButtons": {"commentActionButtonsRenderer": {"creatorHeart": {"creatorHeartRenderer": {"isHearted": false}}}}
    });
    if let Some(votes) = votes {
        record["voteCount"] = json!({"simpleText": votes});
    }
    record
}

/// Top-level page response
///
/// `threads` pairs each comment with the reply continuations under it.
pub fn top_level_page(threads: Vec<(Value, Vec<&str>)>, next_pages: &[&str]) -> Value {
    let contents: Vec<Value> = threads
        .into_iter()
        .map(|(comment, replies)| {
            let mut thread = json!({"commentThreadRenderer": {"comment": {"commentRenderer": comment}}});
            if !replies.is_empty() {
                let continuations: Vec<Value> = replies.iter().map(|t| next_continuation(t)).collect();
                thread["commentThreadRenderer"]["replies"] =
                    json!({"commentRepliesRenderer": {"continuations": continuations}});
            }
            thread
        })
        .collect();
    let continuations: Vec<Value> = next_pages.iter().map(|t| next_continuation(t)).collect();

    json!([
        {"page": "comments"},
        {"response": {"continuationContents": {"itemSectionContinuation": {
            "contents": contents,
            "continuations": continuations
        }}}}
    ])
}

/// Reply page response
pub fn reply_page(comments: Vec<Value>, more: Option<&str>) -> Value {
    let contents: Vec<Value> = comments
        .into_iter()
        .map(|c| json!({"commentRenderer": c}))
        .collect();
    let mut section = json!({"contents": contents});
    if let Some(token) = more {
        section["continuations"] = json!([next_continuation(token)]);
    }
    json!([
        {"page": "comments"},
        {"response": {"continuationContents": {"commentRepliesContinuation": section}}}
    ])
}

/// First page carrying the sort menu with the given number of options
pub fn sort_menu_page(options: &[&str]) -> Value {
    let items: Vec<Value> = options
        .iter()
        .map(|t| json!({"title": t, "continuation": {"reloadContinuationData": {"continuation": t, "clickTrackingParams": format!("itct-{t}")}}}))
        .collect();
    json!({"response": {"continuationContents": {"itemSectionContinuation": {
        "header": {"commentsHeaderRenderer": {"sortMenu": {"sortFilterSubMenuRenderer": {"subMenuItems": items}}}},
        "contents": [{"commentThreadRenderer": {"comment": {"commentRenderer": comment_record("unsorted", "x", None)}}}],
        "continuations": [next_continuation("unsorted-next")]
    }}}})
}
