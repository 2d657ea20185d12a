// Configuration module entry point
// Loads layered configuration and holds the per-process application state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

/// Port used when neither the config file nor the environment sets one
pub const DEFAULT_PORT: u16 = 3000;

/// Default request body limit (100 KiB)
pub const DEFAULT_MAX_BODY_SIZE: u64 = 102_400;

impl Config {
    /// Load configuration from `config.toml` (optional), `APP__*` environment
    /// variables and the `PORT` variable, in increasing priority.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config", std::env::var("PORT").ok())
    }

    /// Load configuration from specified file path (without extension).
    ///
    /// `port` overrides every other source when set. Empty or blank values
    /// count as unset.
    pub fn load_from(config_path: &str, port: Option<String>) -> Result<Self, config::ConfigError> {
        let port = port
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.default_content_type", "text/html; charset=utf-8")?
            .set_default("http.server_name", "hello_api/0.1")?
            .set_default("http.max_body_size", 102_400)?
            .set_override_option("server.port", port)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Render the effective configuration as TOML for diagnostics
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
