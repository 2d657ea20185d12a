//! `hello_api`: a small HTTP service with a gated `/api` prefix, plus a
//! standalone arithmetic utility.
//!
//! The two halves are independent: [`handler`] and [`server`] implement the
//! HTTP pipeline, [`calculator`] the arithmetic.

pub mod calculator;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use calculator::{CalcError, Calculator};
