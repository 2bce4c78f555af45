// Beltwatch Core Library
// Client side of the conveyor belt monitoring dashboard

pub mod client;
pub mod config;
pub mod events;
pub mod infographics;
pub mod model;
pub mod session;

// Export core types
pub use client::{
    fetch_infographics_inputs, ApiClient, DefectFilter, HealthReport, InfographicsInputs,
    InfographicsSource,
};
pub use config::ClientConfig;
pub use events::{FeedEvent, NotificationFeed, SseFrame, SseParser};
pub use infographics::{
    compute_grid, AxisLabels, BeltDimensions, BeltGrid, Cell, CellSummary, InfographicsView,
    ZoomLevel,
};
pub use model::{ConveyorParameters, Criticality, Defect, Notification};
pub use session::Session;

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BeltwatchError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error ({status}): {detail}")]
    ApiError { status: u16, detail: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid zoom level: {0}")]
    InvalidZoom(u32),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Event stream error: {0}")]
    StreamError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BeltwatchError>;
