//! HTTP protocol layer module
//!
//! Response encoding shared by every route, independent of routing logic.

pub mod response;

pub use response::{
    build_fault_response, build_json_response, build_response, FAULT_BODY, JSON_CONTENT_TYPE,
};
