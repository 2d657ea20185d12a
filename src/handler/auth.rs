//! Authorization gate
//!
//! Development stub: the gate only checks that an `Authorization` header is
//! present and non-empty. The value is never validated, so any token passes.

use hyper::header::AUTHORIZATION;
use hyper::StatusCode;

use super::types::{ApiRequest, ApiResponse};

pub const MISSING_TOKEN_MESSAGE: &str = "No token provided";

/// Short-circuit with 401 unless the request carries a non-empty
/// `Authorization` header. Raw bytes are checked, so opaque (non-ASCII)
/// values count as present.
pub fn require_token(req: &ApiRequest) -> Option<ApiResponse> {
    let present = req
        .headers
        .get(AUTHORIZATION)
        .is_some_and(|v| !v.as_bytes().is_empty());
    if present {
        None
    } else {
        Some(ApiResponse::error(
            StatusCode::UNAUTHORIZED,
            MISSING_TOKEN_MESSAGE,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;
    use hyper::Method;

    fn request_with(value: Option<&'static str>) -> ApiRequest {
        let mut req = ApiRequest::new(Method::GET, "/api/users");
        if let Some(v) = value {
            req.headers
                .insert("authorization", HeaderValue::from_static(v));
        }
        req
    }

    #[test]
    fn test_missing_header_rejected() {
        let resp = require_token(&request_with(None)).unwrap();
        assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            resp,
            ApiResponse::json(
                StatusCode::UNAUTHORIZED,
                serde_json::json!({ "error": "No token provided" })
            )
        );
    }

    #[test]
    fn test_empty_header_rejected() {
        assert!(require_token(&request_with(Some(""))).is_some());
    }

    #[test]
    fn test_any_value_accepted() {
        assert!(require_token(&request_with(Some("Bearer abc"))).is_none());
        assert!(require_token(&request_with(Some("garbage"))).is_none());
    }

    #[test]
    fn test_non_ascii_value_accepted() {
        let mut req = ApiRequest::new(Method::GET, "/api/users");
        req.headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer caf\xe9").unwrap(),
        );
        assert!(req.header("authorization").is_none());
        assert!(require_token(&req).is_none());
    }
}
