//! JSON body parsing stage

use hyper::header::CONTENT_TYPE;
use hyper::{HeaderMap, StatusCode};
use serde_json::Value;

use super::types::ApiResponse;
use crate::logger;

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON body";

/// `application/json` or any `application/*+json`, parameters ignored
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Parse the body as JSON when the request declares a JSON content type.
///
/// Returns `Ok(None)` for non-JSON content types and empty bodies, and a 400
/// response for malformed JSON.
pub fn parse_json_body(headers: &HeaderMap, body: &[u8]) -> Result<Option<Value>, ApiResponse> {
    if body.is_empty() || !is_json_content_type(headers) {
        return Ok(None);
    }
    serde_json::from_slice(body).map(Some).map_err(|e| {
        logger::log_warning(&format!("Rejected malformed JSON body: {e}"));
        ApiResponse::error(StatusCode::BAD_REQUEST, INVALID_JSON_MESSAGE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    fn headers(content_type: &'static str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        h
    }

    #[test]
    fn test_json_content_types() {
        assert!(is_json_content_type(&headers("application/json")));
        assert!(is_json_content_type(&headers("Application/JSON; charset=utf-8")));
        assert!(is_json_content_type(&headers("application/merge-patch+json")));
        assert!(!is_json_content_type(&headers("text/plain")));
        assert!(!is_json_content_type(&HeaderMap::new()));
    }

    #[test]
    fn test_parses_json() {
        let value = parse_json_body(&headers("application/json"), br#"{"name":"ada"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(value["name"], "ada");
    }

    #[test]
    fn test_empty_body_is_none() {
        assert_eq!(parse_json_body(&headers("application/json"), b""), Ok(None));
    }

    #[test]
    fn test_non_json_content_type_ignored() {
        assert_eq!(parse_json_body(&headers("text/plain"), b"{not json"), Ok(None));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let resp = parse_json_body(&headers("application/json"), b"{not json").unwrap_err();
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            resp,
            ApiResponse::error(StatusCode::BAD_REQUEST, INVALID_JSON_MESSAGE)
        );
    }
}
