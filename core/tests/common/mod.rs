//! Shared helpers: an in-process HTTP server standing in for the monitoring API

#![allow(dead_code)]

use axum::Router;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use beltwatch_core::ClientConfig;
use serde_json::{json, Value};

/// Bind `app` on an ephemeral port and point a config at it
pub async fn serve(app: Router) -> ClientConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    ClientConfig {
        server_address: addr.ip().to_string(),
        port: addr.port(),
        timeout_ms: 5_000,
        ..ClientConfig::default()
    }
}

/// Unsigned JWT with the given expiry (seconds since epoch)
pub fn jwt(exp: i64) -> String {
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(json!({"sub": "admin", "role": "Admin", "exp": exp}).to_string())
    )
}

/// Token valid until 2100
pub fn long_lived_jwt() -> String {
    jwt(4_102_444_800)
}

pub fn defect_json(id: i64, longitudinal: i64, transverse: i64, criticality: &str) -> Value {
    json!({
        "id": id,
        "timestamp": "2024-05-20T14:00:00",
        "type": "puncture",
        "is_on_belt": true,
        "box_width_in_mm": 35,
        "box_length_in_mm": 80,
        "longitudinal_position": longitudinal,
        "transverse_position": transverse,
        "probability": 88,
        "criticality": criticality,
        "base64_photo": ""
    })
}
