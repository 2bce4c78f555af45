// Client configuration
//
// Where the monitoring server lives and how patiently we talk to it.

use std::path::PathBuf;
use std::time::Duration;

/// Connection settings for the monitoring server's REST API
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub server_address: String,
    pub port: u16,
    pub timeout_ms: u64,
    pub user_agent: String,
    /// Where the session token is kept between runs; `None` keeps it in memory
    pub token_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_address: "127.0.0.1".to_string(),
            port: 8000,
            timeout_ms: 10_000,
            user_agent: concat!("beltwatch/", env!("CARGO_PKG_VERSION")).to_string(),
            token_path: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            server_address: std::env::var("BELTWATCH_SERVER_ADDRESS")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(default.server_address),
            port: std::env::var("BELTWATCH_CONNECTION_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(default.port),
            timeout_ms: std::env::var("BELTWATCH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.timeout_ms),
            user_agent: default.user_agent,
            token_path: std::env::var("BELTWATCH_TOKEN_PATH")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Root of the versioned REST API, e.g. `http://127.0.0.1:8000/api/v1`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}/api/v1", self.server_address, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
