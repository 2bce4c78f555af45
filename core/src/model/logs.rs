use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One entry of the server's action log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: i64,
    #[serde(with = "super::timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "type")]
    pub log_type: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsRemoved {
    pub status: String,
    pub count_of_removed: u64,
}
