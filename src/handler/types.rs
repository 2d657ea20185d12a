//! Request and response types seen by gates and route handlers

use hyper::{HeaderMap, Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// A request after body parsing, as seen by gates and handlers
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    /// Parsed JSON body, if the request carried one
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Case-insensitive header lookup as text. Values that are not visible
    /// ASCII yield `None`; use `headers` directly to test raw presence.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// Plain text, sent with the configured default content type
    Text(String),
    Json(Value),
}

/// A response produced by a gate, a handler or the pipeline itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseBody::Text(body.into()),
        }
    }

    pub const fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: ResponseBody::Json(body),
        }
    }

    /// Shorthand for a JSON `{"error": message}` body
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }
}

/// Failure escaping a route handler. Never shown to the client.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("handler failed: {0}")]
    Internal(String),
    #[error("handler panicked: {0}")]
    Panicked(String),
}

pub type HandlerResult = Result<ApiResponse, HandlerError>;
