//! Request pipeline
//!
//! An [`App`] holds prefix gates and method/path routes. Dispatch runs every
//! gate whose prefix matches the request path, in registration order, then
//! the first matching route. The first gate that returns a response
//! short-circuits everything after it. Gates and handlers run inside the
//! fault stage: an `Err` or a panic becomes a logged, opaque 500.
//!
//! With [`logger::install_panic_hook`] in place a caught panic produces two
//! error lines: the hook's `[PANIC]` line with its source location, then the
//! `[FAULT]` line naming the request.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use hyper::{Method, StatusCode};

use super::types::{ApiRequest, ApiResponse, HandlerError, HandlerResult};
use crate::http::FAULT_BODY;
use crate::logger;

pub type HandlerFn = fn(&ApiRequest) -> HandlerResult;

/// Returns `Some(response)` to short-circuit, `None` to let the request through
pub type GateFn = fn(&ApiRequest) -> Option<ApiResponse>;

struct Route {
    method: Method,
    path: &'static str,
    handler: HandlerFn,
}

struct Gate {
    prefix: &'static str,
    check: GateFn,
}

/// Route table plus gates. Built fresh per server or test, never global.
#[derive(Default)]
pub struct App {
    gates: Vec<Gate>,
    routes: Vec<Route>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn route(mut self, method: Method, path: &'static str, handler: HandlerFn) -> Self {
        self.routes.push(Route {
            method,
            path,
            handler,
        });
        self
    }

    #[must_use]
    pub fn gate(mut self, prefix: &'static str, check: GateFn) -> Self {
        self.gates.push(Gate { prefix, check });
        self
    }

    /// Run gates and the matched handler, converting faults into a 500
    pub fn dispatch(&self, req: &ApiRequest) -> ApiResponse {
        let (resp, fault) = self.dispatch_with_fault(req);
        if let Some(line) = fault {
            logger::log_fault(&line);
        }
        resp
    }

    /// Like [`App::dispatch`], but hands back the fault log line instead of
    /// writing it
    pub fn dispatch_with_fault(&self, req: &ApiRequest) -> (ApiResponse, Option<String>) {
        match self.run_guarded(req) {
            Ok(resp) => (resp, None),
            Err(fault) => (
                ApiResponse::text(StatusCode::INTERNAL_SERVER_ERROR, FAULT_BODY),
                Some(logger::format_fault(req.method.as_str(), &req.path, &fault)),
            ),
        }
    }

    fn run_guarded(&self, req: &ApiRequest) -> HandlerResult {
        panic::catch_unwind(AssertUnwindSafe(|| self.run(req)))
            .unwrap_or_else(|payload| Err(HandlerError::Panicked(panic_message(payload.as_ref()))))
    }

    fn run(&self, req: &ApiRequest) -> HandlerResult {
        for gate in self
            .gates
            .iter()
            .filter(|g| prefix_matches(g.prefix, &req.path))
        {
            if let Some(resp) = (gate.check)(req) {
                return Ok(resp);
            }
        }

        match self.find_route(req) {
            Some(route) => (route.handler)(req),
            None => Ok(ApiResponse::text(
                StatusCode::NOT_FOUND,
                format!("Cannot {} {}", req.method, req.path),
            )),
        }
    }

    fn find_route(&self, req: &ApiRequest) -> Option<&Route> {
        self.routes
            .iter()
            .find(|r| method_matches(&r.method, &req.method) && path_matches(r.path, &req.path))
    }
}

/// `HEAD` is served by the `GET` route
fn method_matches(route: &Method, request: &Method) -> bool {
    route == request || (*request == Method::HEAD && *route == Method::GET)
}

fn trim_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// Exact match, ignoring ASCII case and one trailing slash
pub fn path_matches(route: &str, path: &str) -> bool {
    trim_trailing_slash(route).eq_ignore_ascii_case(trim_trailing_slash(path))
}

/// Segment-aware prefix match: `/api` covers `/api` and `/api/users`, not `/apix`
pub fn prefix_matches(prefix: &str, path: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    let path = trim_trailing_slash(path);
    match path.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => {
            path.len() == prefix.len() || path.as_bytes()[prefix.len()] == b'/'
        }
        _ => false,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
