//! Wire Types
//!
//! Mirrors of the monitoring server's JSON responses. Field names follow the
//! server so that serde needs no renaming beyond the reserved `type` key.

mod conveyor;
mod defect;
mod logs;

pub use conveyor::{ConveyorParameters, ConveyorStatus, NewConveyorParameters};
pub use defect::{format_timestamp, Criticality, Defect, DefectCount, DefectTypes};
pub use logs::{LogRecord, LogsRemoved};

use serde::{Deserialize, Serialize};

/// Generic `{"info": ...}` payload returned by every service root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub info: String,
}

/// Result of a maintenance probe (`check_server`, `check_database`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceInfo {
    pub maintenance_info: String,
}

impl MaintenanceInfo {
    pub fn is_ok(&self) -> bool {
        self.maintenance_info == "OK"
    }
}

/// OAuth2 password-flow token response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Payload of one server-sent notification frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub text: String,
}

/// Echo of an outbound Telegram or Gmail notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationReceipt {
    pub notification_method: String,
    #[serde(default, alias = "to_user")]
    pub to: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, alias = "sent_text")]
    pub sent_message: Option<String>,
    #[serde(default)]
    pub attached_file: Option<String>,
}

/// Report document flavour, used as the last path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Pdf,
    Csv,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Csv => "csv",
        }
    }
}

/// Server timestamps are naive; accept an offset too and normalise to UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveDateTime, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.naive_utc());
        }
        NaiveDateTime::parse_from_str(raw, FORMAT)
            .map_err(|e| format!("invalid timestamp {raw:?}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_accepts_naive_and_offset_forms() {
        let naive = timestamp::parse("2024-03-05T10:15:30.250").unwrap();
        let offset = timestamp::parse("2024-03-05T12:15:30.250+02:00").unwrap();
        assert_eq!(naive, offset);
        assert!(timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn report_format_path_segment() {
        assert_eq!(ReportFormat::default().as_str(), "pdf");
        assert_eq!(ReportFormat::Csv.as_str(), "csv");
    }
}
