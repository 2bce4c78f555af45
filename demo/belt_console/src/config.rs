use std::fs;
use std::path::{Path, PathBuf};

use beltwatch_core::{ClientConfig, ZoomLevel};

/// High-level configuration for the belt console demo
#[derive(Clone, Debug)]
pub struct BeltConsoleConfig {
    pub client: ClientConfig,
    pub credentials: Option<Credentials>,
    pub zoom: ZoomLevel,
    /// Seconds between server/database probes; 0 disables them
    pub health_interval_secs: u64,
    /// Keep running and print live notifications after the first render
    pub follow: bool,
}

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Default for BeltConsoleConfig {
    fn default() -> Self {
        let credentials = match (
            std::env::var("BELTWATCH_USERNAME").ok().filter(|s| !s.is_empty()),
            std::env::var("BELTWATCH_PASSWORD").ok(),
        ) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            _ => None,
        };

        Self {
            client: ClientConfig::from_env(),
            credentials,
            zoom: std::env::var("BELTWATCH_ZOOM")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .map(ZoomLevel::snap)
                .unwrap_or_default(),
            health_interval_secs: std::env::var("BELTWATCH_HEALTH_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            follow: std::env::var("BELTWATCH_FOLLOW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

impl BeltConsoleConfig {
    /// Load configuration from a TOML file (path via BELT_CONSOLE_CONFIG or ./belt_console.toml),
    /// overlaying values onto defaults and env-driven defaults.
    pub fn load() -> Self {
        let default = Self::default();
        let path =
            std::env::var("BELT_CONSOLE_CONFIG").unwrap_or_else(|_| "belt_console.toml".into());
        let p = Path::new(&path);
        if !p.exists() {
            tracing::info!(target: "belt_console", path = %path, "No TOML config found; using defaults/env");
            return default;
        }
        match fs::read_to_string(p) {
            Ok(s) => Self::from_toml_str(&s, default.clone()).unwrap_or_else(|e| {
                tracing::warn!(target: "belt_console", error = %e, "Failed to parse TOML; using defaults");
                default
            }),
            Err(e) => {
                tracing::warn!(target: "belt_console", error = %e, "Failed to read TOML; using defaults");
                default
            }
        }
    }

    pub fn from_toml_str(s: &str, base: Self) -> Result<Self, toml::de::Error> {
        toml::from_str::<BeltConsoleToml>(s).map(|t| t.overlay(base))
    }
}

// =========================
// TOML overlay definitions
// =========================

#[derive(Debug, Clone, Default, serde::Deserialize)]
struct BeltConsoleToml {
    pub zoom: Option<u32>,
    pub health_interval_secs: Option<u64>,
    pub follow: Option<bool>,
    pub server: Option<ServerToml>,
    pub auth: Option<AuthToml>,
}

impl BeltConsoleToml {
    fn overlay(self, mut base: BeltConsoleConfig) -> BeltConsoleConfig {
        if let Some(z) = self.zoom {
            base.zoom = ZoomLevel::snap(z);
        }
        if let Some(h) = self.health_interval_secs {
            base.health_interval_secs = h;
        }
        if let Some(f) = self.follow {
            base.follow = f;
        }
        if let Some(s) = self.server {
            s.apply(&mut base.client);
        }
        if let Some(a) = self.auth {
            a.apply(&mut base.credentials);
        }
        base
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
struct ServerToml {
    pub address: Option<String>,
    pub port: Option<u16>,
    pub timeout_ms: Option<u64>,
    pub token_path: Option<PathBuf>,
}
impl ServerToml {
    fn apply(self, c: &mut ClientConfig) {
        if let Some(x) = self.address {
            c.server_address = x;
        }
        if let Some(x) = self.port {
            c.port = x;
        }
        if let Some(x) = self.timeout_ms {
            c.timeout_ms = x;
        }
        if let Some(x) = self.token_path {
            c.token_path = Some(x);
        }
    }
}

#[derive(Clone, Default, serde::Deserialize)]
struct AuthToml {
    pub username: Option<String>,
    pub password: Option<String>,
}
impl AuthToml {
    fn apply(self, c: &mut Option<Credentials>) {
        match (self.username, self.password) {
            (Some(username), Some(password)) => *c = Some(Credentials { username, password }),
            (Some(username), None) => {
                if let Some(existing) = c {
                    existing.username = username;
                }
            }
            (None, Some(password)) => {
                if let Some(existing) = c {
                    existing.password = password;
                }
            }
            (None, None) => {}
        }
    }
}

impl std::fmt::Debug for AuthToml {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToml")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
