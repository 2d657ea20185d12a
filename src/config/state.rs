// Application state module
// Holds the loaded configuration and the request pipeline for one server

use std::sync::atomic::{AtomicUsize, Ordering};

use super::types::Config;
use crate::handler::App;

/// Application state shared by every connection of a server
pub struct AppState {
    pub config: Config,
    pub app: App,
    /// Connections currently being served
    pub active_connections: AtomicUsize,
}

impl AppState {
    pub const fn new(config: Config, app: App) -> Self {
        Self {
            config,
            app,
            active_connections: AtomicUsize::new(0),
        }
    }

    pub fn connection_count(&self) -> usize {
        self.active_connections.load(Ordering::SeqCst)
    }
}
