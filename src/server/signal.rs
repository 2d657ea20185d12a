// Signal handling module
//
// SIGTERM and SIGINT (Ctrl+C) request a graceful shutdown of the accept loop.

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Register shutdown signals and notify `shutdown` on the first one received.
///
/// Registration happens before returning so failures surface to the caller.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::spawn(async move {
        let name = tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv() => "SIGINT",
        };
        logger::log_signal(name);
        // notify_one stores a permit if the loop is not waiting yet
        shutdown.notify_one();
    });
    Ok(())
}

/// Non-unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) -> std::io::Result<()> {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger::log_signal("Ctrl+C");
            shutdown.notify_one();
        }
    });
    Ok(())
}
