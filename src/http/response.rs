//! HTTP response building module
//!
//! Encodes status, content type and body into hyper responses, decoupled from
//! the handlers that decide what to send.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Body sent when a fault escapes a handler
pub const FAULT_BODY: &str = "Something went wrong!";

/// Build a response with explicit length.
///
/// For `HEAD` requests the body is dropped but `Content-Length` still reports
/// the size the `GET` would have sent.
pub fn build_response(
    status: StatusCode,
    content_type: &str,
    body: Bytes,
    is_head: bool,
    server_name: &str,
) -> Response<Full<Bytes>> {
    let content_length = body.len();
    let body = if is_head { Bytes::new() } else { body };

    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Server", server_name)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            build_fault_response()
        })
}

/// Build JSON response, compact encoding
pub fn build_json_response(
    status: StatusCode,
    value: &serde_json::Value,
    is_head: bool,
    server_name: &str,
) -> Response<Full<Bytes>> {
    match serde_json::to_vec(value) {
        Ok(json) => build_response(status, JSON_CONTENT_TYPE, Bytes::from(json), is_head, server_name),
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            build_fault_response()
        }
    }
}

/// Bare 500 response used when a response cannot be built at all
pub fn build_fault_response() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(FAULT_BODY.as_bytes())));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_build_response_headers() {
        let resp = build_response(
            StatusCode::OK,
            "text/plain",
            Bytes::from("hello"),
            false,
            "test/1.0",
        );
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/plain");
        assert_eq!(resp.headers()["content-length"], "5");
        assert_eq!(resp.headers()["server"], "test/1.0");
        assert_eq!(body_bytes(resp).await, Bytes::from("hello"));
    }

    #[tokio::test]
    async fn test_head_keeps_length_drops_body() {
        let resp = build_response(
            StatusCode::OK,
            "text/plain",
            Bytes::from("hello"),
            true,
            "test/1.0",
        );
        assert_eq!(resp.headers()["content-length"], "5");
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_json_is_compact() {
        let value = serde_json::json!({ "users": [] });
        let resp = build_json_response(StatusCode::OK, &value, false, "test/1.0");
        assert_eq!(resp.headers()["content-type"], JSON_CONTENT_TYPE);
        assert_eq!(body_bytes(resp).await, Bytes::from(r#"{"users":[]}"#));
    }

    #[tokio::test]
    async fn test_invalid_header_value_falls_back_to_fault() {
        let resp = build_response(
            StatusCode::OK,
            "text/plain\n",
            Bytes::from("hello"),
            false,
            "test/1.0",
        );
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_bytes(resp).await, Bytes::from(FAULT_BODY));
    }
}
