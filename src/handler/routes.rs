//! Route handlers

use hyper::StatusCode;
use serde_json::json;

use super::types::{ApiRequest, ApiResponse, HandlerResult};

pub fn index(_req: &ApiRequest) -> HandlerResult {
    Ok(ApiResponse::text(StatusCode::OK, "Hello World!"))
}

pub fn list_users(_req: &ApiRequest) -> HandlerResult {
    Ok(ApiResponse::json(StatusCode::OK, json!({ "users": [] })))
}

/// Accepts any (or no) JSON body; nothing is stored
pub fn create_user(_req: &ApiRequest) -> HandlerResult {
    Ok(ApiResponse::json(
        StatusCode::OK,
        json!({ "message": "User created" }),
    ))
}
