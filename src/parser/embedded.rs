//! Values embedded in the video page HTML
//!
//! The watch page carries its session token inside a script-scope config object
//! and the initial comment state as a JavaScript assignment. Neither is a
//! standalone document, so both are located by marker substrings.

use serde_json::Value;

use crate::utils::error::ParseError;

/// Marker preceding the anti-forgery session token
pub const SESSION_TOKEN_MARKER: &str = "XSRF_TOKEN";

/// Marker preceding the initial-state JSON blob
pub const INITIAL_DATA_MARKER: &str = "var ytInitialData = ";

/// Terminator of the initial-state assignment (the closing brace is consumed)
const INITIAL_DATA_END: &str = "};";

/// Slice of `html` between a marker and the next separator
///
/// `skip` bytes after the end of the marker are ignored before the value
/// starts (for `"KEY":"value"` that is the three bytes `":"`). Returns `None`
/// if the marker is missing.
pub fn find_value<'a>(html: &'a str, marker: &str, skip: usize, separator: &str) -> Option<&'a str> {
    let begin = html.find(marker)? + marker.len() + skip;
    let rest = html.get(begin..)?;
    let end = rest.find(separator).unwrap_or(rest.len());
    rest.get(..end)
}

/// Extract and unescape the session token
///
/// The token is stored as a JavaScript string literal, so `\u003d` and
/// friends are decoded the same way a JSON string would be.
pub fn extract_session_token(html: &str) -> Result<String, ParseError> {
    let raw = find_value(html, SESSION_TOKEN_MARKER, 3, "\"")
        .ok_or(ParseError::MarkerNotFound(SESSION_TOKEN_MARKER))?;
    unescape_js_string(raw)
}

/// Decode the escape sequences of a JavaScript string literal body
pub fn unescape_js_string(raw: &str) -> Result<String, ParseError> {
    serde_json::from_str::<String>(&format!("\"{raw}\"")).map_err(ParseError::InvalidToken)
}

/// Parse the embedded initial-state blob
pub fn extract_initial_data(html: &str) -> Result<Value, ParseError> {
    let body = find_value(html, INITIAL_DATA_MARKER, 0, INITIAL_DATA_END)
        .ok_or(ParseError::MarkerNotFound(INITIAL_DATA_MARKER))?;
    serde_json::from_str(&format!("{body}}}")).map_err(ParseError::InvalidInitialData)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><script>ytcfg.set({"XSRF_TOKEN":"QUFFLUhqbT\u003d\u003d","OTHER":"x"});</script>
<script>var ytInitialData = {"contents":{"itemSectionRenderer":{"continuations":[{"nextContinuationData":{"continuation":"tok","clickTrackingParams":"itct"}}]}}};</script></html>"#;

    #[test]
    fn test_find_value() {
        assert_eq!(find_value(r#"{"KEY":"value","x":1}"#, "KEY", 3, "\""), Some("value"));
        assert_eq!(find_value("abc", "KEY", 3, "\""), None);
    }

    #[test]
    fn test_find_value_without_separator_runs_to_end() {
        assert_eq!(find_value("KEY=tail", "KEY=", 0, ";"), Some("tail"));
    }

    #[test]
    fn test_find_value_skip_past_end() {
        assert_eq!(find_value("KEY", "KEY", 3, "\""), None);
    }

    #[test]
    fn test_extract_session_token_unescapes() {
        let token = extract_session_token(PAGE).unwrap();
        assert_eq!(token, "QUFFLUhqbT==");
    }

    #[test]
    fn test_extract_session_token_missing() {
        let err = extract_session_token("<html></html>").unwrap_err();
        assert!(matches!(err, ParseError::MarkerNotFound(SESSION_TOKEN_MARKER)));
    }

    #[test]
    fn test_extract_initial_data() {
        let data = extract_initial_data(PAGE).unwrap();
        assert_eq!(
            data["contents"]["itemSectionRenderer"]["continuations"][0]["nextContinuationData"]
                ["continuation"],
            "tok"
        );
    }

    #[test]
    fn test_extract_initial_data_missing_marker() {
        assert!(matches!(
            extract_initial_data("<html></html>"),
            Err(ParseError::MarkerNotFound(INITIAL_DATA_MARKER))
        ));
    }

    #[test]
    fn test_extract_initial_data_invalid_json() {
        let html = "var ytInitialData = {\"a\": [1, };";
        assert!(matches!(
            extract_initial_data(html),
            Err(ParseError::InvalidInitialData(_))
        ));
    }

    #[test]
    fn test_unescape_plain_token() {
        assert_eq!(unescape_js_string("abc").unwrap(), "abc");
    }
}
