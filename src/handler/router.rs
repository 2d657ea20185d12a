//! Request entry point
//!
//! Turns a hyper request into an [`ApiRequest`], runs it through the
//! application pipeline and encodes the result:
//!
//! 1. Reject oversized bodies (declared `Content-Length`, then actual bytes)
//! 2. Parse JSON bodies
//! 3. Dispatch through gates and routes (fault stage included)
//! 4. Encode the response and write the access log

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{CONTENT_LENGTH, USER_AGENT};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, StatusCode, Version};

use super::body::parse_json_body;
use super::types::{ApiRequest, ApiResponse, ResponseBody};
use crate::config::{AppState, HttpConfig};
use crate::http;
use crate::logger::{self, AccessLogEntry};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Payload too large";

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    let is_head = parts.method == Method::HEAD;

    let access_entry = state
        .config
        .logging
        .access_log
        .then(|| new_access_entry(&parts, peer_addr));

    let api_response = match read_request(parts, body, state.config.http.max_body_size).await {
        Ok(api_req) => state.app.dispatch(&api_req),
        Err(short_circuit) => short_circuit,
    };

    let response = encode_response(api_response, is_head, &state.config.http);

    if let Some(mut entry) = access_entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Collect and parse the body. `Err` carries a client-error response that
/// short-circuits dispatch.
async fn read_request<B>(parts: Parts, body: B, max_body_size: u64) -> Result<ApiRequest, ApiResponse>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    if let Some(resp) = check_body_size(&parts, max_body_size) {
        return Err(resp);
    }

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    let bytes = match Limited::new(body, limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => {
            logger::log_warning(&format!("Request body exceeded {max_body_size} bytes"));
            return Err(payload_too_large());
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            return Err(ApiResponse::error(
                StatusCode::BAD_REQUEST,
                "Failed to read request body",
            ));
        }
    };

    let json = parse_json_body(&parts.headers, &bytes)?;

    Ok(ApiRequest {
        path: parts.uri.path().to_string(),
        method: parts.method,
        headers: parts.headers,
        body: json,
    })
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(parts: &Parts, max_body_size: u64) -> Option<ApiResponse> {
    let content_length = parts.headers.get(CONTENT_LENGTH)?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(payload_too_large())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', relying on body limit"
                ));
                None
            }
            _ => None,
        },
    )
}

fn payload_too_large() -> ApiResponse {
    ApiResponse::error(StatusCode::PAYLOAD_TOO_LARGE, PAYLOAD_TOO_LARGE_MESSAGE)
}

fn encode_response(resp: ApiResponse, is_head: bool, http_config: &HttpConfig) -> Response<Full<Bytes>> {
    match resp.body {
        ResponseBody::Text(text) => http::build_response(
            resp.status,
            &http_config.default_content_type,
            Bytes::from(text),
            is_head,
            &http_config.server_name,
        ),
        ResponseBody::Json(value) => {
            http::build_json_response(resp.status, &value, is_head, &http_config.server_name)
        }
    }
}

fn new_access_entry(parts: &Parts, peer_addr: SocketAddr) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = match parts.version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.user_agent = parts
        .headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry
}
