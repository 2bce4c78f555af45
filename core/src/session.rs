//! Session State
//!
//! Process-wide holder of the operator's bearer token. Every collaborator
//! that needs to know whether the operator is signed in asks the same
//! [`Session`] instead of inspecting the token itself.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    /// File mirroring the token across restarts
    store: Option<PathBuf>,
}

#[derive(Deserialize)]
struct Claims {
    exp: f64,
}

/// Shared authentication state; clones observe the same token
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionState>>,
}

impl Session {
    /// In-memory session, signed out
    pub fn new() -> Self {
        Self::default()
    }

    /// Session backed by a token file. A token already stored there is
    /// picked up immediately.
    pub fn persistent(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = match std::fs::read_to_string(&path) {
            Ok(raw) => Some(raw.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(target: "session", path = %path.display(), error = %e, "Failed to read stored token");
                None
            }
        };
        debug!(target: "session", path = %path.display(), restored = token.is_some(), "Session store opened");
        Self {
            inner: Arc::new(RwLock::new(SessionState {
                token,
                store: Some(path),
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Store a freshly issued token
    pub fn login(&self, token: impl Into<String>) {
        let token = token.into();
        let mut state = self.write();
        if let Some(path) = &state.store {
            if let Err(e) = write_token(path, &token) {
                warn!(target: "session", path = %path.display(), error = %e, "Failed to persist token");
            }
        }
        state.token = Some(token);
        info!(target: "session", "Signed in");
    }

    /// Forget the token (and its stored copy)
    pub fn logout(&self) {
        let mut state = self.write();
        if let Some(path) = &state.store {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(target: "session", path = %path.display(), error = %e, "Failed to remove stored token")
                }
            }
        }
        if state.token.take().is_some() {
            info!(target: "session", "Signed out");
        }
    }

    /// A token is held and has not expired
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(now_secs())
    }

    pub fn is_valid_at(&self, now_secs: f64) -> bool {
        self.read()
            .token
            .as_deref()
            .is_some_and(|t| !is_token_expired_at(t, now_secs))
    }

    /// The bearer token, only while it is valid
    pub fn token(&self) -> Option<String> {
        let now = now_secs();
        self.read()
            .token
            .clone()
            .filter(|t| !is_token_expired_at(t, now))
    }
}

fn now_secs() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

fn write_token(path: &Path, token: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, token)
}

/// `exp` claim of a JWT, in seconds since the epoch. Only the second
/// dot-separated segment is read; the signature is not checked and the
/// server remains the authority on validity.
pub fn token_expiry(token: &str) -> Option<f64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    Some(claims.exp)
}

/// Undecodable tokens count as expired
pub fn is_token_expired_at(token: &str, now_secs: f64) -> bool {
    token_expiry(token).map_or(true, |exp| now_secs > exp)
}
