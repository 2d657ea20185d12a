// Server loop module
// Accepts connections until shutdown is requested

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Accept connections until `shutdown` is notified.
///
/// Only the listener is closed on return. Connections already being served
/// stay on their own tasks until they finish or the runtime is dropped; see
/// [`drain_connections`].
pub async fn start_server_loop(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown(state.connection_count());
                break;
            }
        }
    }
}

/// Wait for in-flight connections to finish, up to `deadline`.
///
/// Returns the number of connections still active when it gave up.
pub async fn drain_connections(state: &AppState, deadline: Duration) -> usize {
    let started = tokio::time::Instant::now();
    loop {
        let active = state.connection_count();
        if active == 0 || started.elapsed() >= deadline {
            return active;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::handler::App;
    use std::sync::atomic::Ordering;

    fn idle_state() -> Arc<AppState> {
        let cfg = Config::load_from("does-not-exist/hello_api_test_config", None).unwrap();
        Arc::new(AppState::new(cfg, App::new()))
    }

    #[tokio::test]
    async fn test_drain_returns_immediately_when_idle() {
        let state = idle_state();
        assert_eq!(drain_connections(&state, Duration::from_secs(5)).await, 0);
    }

    #[tokio::test]
    async fn test_drain_waits_for_finishing_connection() {
        let state = idle_state();
        state.active_connections.fetch_add(1, Ordering::SeqCst);

        let finishing = Arc::clone(&state);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(120)).await;
            finishing.active_connections.fetch_sub(1, Ordering::SeqCst);
        });

        assert_eq!(drain_connections(&state, Duration::from_secs(5)).await, 0);
    }

    #[tokio::test]
    async fn test_drain_gives_up_at_deadline() {
        let state = idle_state();
        state.active_connections.fetch_add(1, Ordering::SeqCst);
        assert_eq!(drain_connections(&state, Duration::from_millis(100)).await, 1);
    }
}
