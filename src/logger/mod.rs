//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error, warning and fault logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::LogLevel;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    let level = config
        .logging
        .level
        .parse::<LogLevel>()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
        level,
    )
}

fn write_info(level: LogLevel, message: &str) {
    match writer::get() {
        Some(w) => w.write_info(level, message),
        None if level <= LogLevel::Info => println!("{message}"),
        None => {}
    }
}

fn write_error(level: LogLevel, message: &str) {
    match writer::get() {
        Some(w) => w.write_error(level, message),
        None => eprintln!("{message}"),
    }
}

/// Written at every level: lines operators rely on regardless of filtering
fn write_notice(message: &str) {
    match writer::get() {
        Some(w) => w.write_notice(message),
        None => println!("{message}"),
    }
}

fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn startup_line(port: u16) -> String {
    format!("Server running on port {port}")
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_notice(&startup_line(addr.port()));
    write_info(LogLevel::Info, &format!("Listening on: http://{addr}"));
    write_info(
        LogLevel::Info,
        &format!("Log level: {}", config.logging.level),
    );
    if let Some(workers) = config.server.workers {
        write_info(LogLevel::Info, &format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(LogLevel::Info, &format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(LogLevel::Info, &format!("Error log: {path}"));
    }
}

pub fn log_config(config: &Config) {
    match config.to_toml() {
        Ok(rendered) => write_info(
            LogLevel::Debug,
            &format!("[CONFIG] Effective configuration:\n{rendered}"),
        ),
        Err(e) => log_warning(&format!("Failed to render configuration: {e}")),
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(
        LogLevel::Debug,
        &format!("[Connection] Accepted from: {peer_addr}"),
    );
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(
        LogLevel::Error,
        &format!("[ERROR] Failed to serve connection: {err:?}"),
    );
}

pub fn log_error(message: &str) {
    write_error(LogLevel::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(LogLevel::Warn, &format!("[WARN] {message}"));
}

/// Error log line for an unhandled fault raised while handling a request
pub fn format_fault(method: &str, path: &str, fault: &impl std::fmt::Display) -> String {
    format!("[FAULT] {method} {path}: {fault}")
}

pub fn log_fault(line: &str) {
    write_error(LogLevel::Error, line);
}

pub fn format_panic(message: &str) -> String {
    format!("[PANIC] {}", message.replace('\n', " "))
}

/// Route panic reports through the error log instead of the default
/// `thread '...' panicked at` output. Panics caught by the fault stage are
/// reported twice: once here with their location, once as a `[FAULT]` line
/// with the request they interrupted.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        write_error(LogLevel::Error, &format_panic(&info.to_string()));
    }));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_shutdown(active_connections: usize) {
    write_info(
        LogLevel::Info,
        &format!("[SHUTDOWN] Stopped accepting connections ({active_connections} still active)"),
    );
}

pub fn log_signal(name: &str) {
    write_info(
        LogLevel::Info,
        &format!("[SIGNAL] {name} received, shutting down"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_line() {
        assert_eq!(startup_line(3000), "Server running on port 3000");
    }

    #[test]
    fn test_format_fault() {
        let line = format_fault("GET", "/broken", &"handler failed: timeout");
        assert_eq!(line, "[FAULT] GET /broken: handler failed: timeout");
    }

    #[test]
    fn test_format_panic_is_single_line() {
        let line = format_panic("panicked at src/lib.rs:1:1:\nboom");
        assert_eq!(line, "[PANIC] panicked at src/lib.rs:1:1: boom");
    }
}
