// Server module entry point
// Binds the listener, installs signal handlers and runs the accept loop

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is exposed as `server_loop`
#[path = "loop.rs"]
pub mod server_loop;

use std::sync::Arc;
use tokio::sync::Notify;

use crate::config::{AppState, Config};
use crate::handler;
use crate::logger;

pub use listener::create_listener;
pub use server_loop::{drain_connections, start_server_loop};

/// Bind the configured address and serve a fresh pipeline until SIGINT or
/// SIGTERM, then give in-flight connections up to one connection timeout to
/// finish.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.socket_addr()?;
    let listener = create_listener(addr)?;
    let bound = listener.local_addr()?;

    logger::log_server_start(&bound, &config);
    logger::log_config(&config);

    let state = Arc::new(AppState::new(config, handler::build_app()));
    let shutdown = Arc::new(Notify::new());
    signal::start_signal_handler(Arc::clone(&shutdown))?;

    start_server_loop(listener, Arc::clone(&state), shutdown).await;

    let remaining = drain_connections(&state, state.config.performance.connection_timeout()).await;
    if remaining > 0 {
        logger::log_warning(&format!(
            "Shutting down with {remaining} connection(s) still active"
        ));
    }
    Ok(())
}
