//! Request handler module
//!
//! Builds the application pipeline and dispatches requests through it.

pub mod auth;
pub mod body;
pub mod pipeline;
pub mod router;
pub mod routes;
mod types;

use hyper::Method;

pub use pipeline::{App, GateFn, HandlerFn};
pub use router::handle_request;
pub use types::{ApiRequest, ApiResponse, HandlerError, HandlerResult, ResponseBody};

/// Build a fresh application pipeline:
///
/// | Route | Method | Gate |
/// |---|---|---|
/// | `/` | GET | none |
/// | `/api/users` | GET | [`auth::require_token`] |
/// | `/api/users` | POST | [`auth::require_token`] |
pub fn build_app() -> App {
    App::new()
        .gate("/api", auth::require_token)
        .route(Method::GET, "/", routes::index)
        .route(Method::GET, "/api/users", routes::list_users)
        .route(Method::POST, "/api/users", routes::create_user)
}
