use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    Connected,
    #[default]
    Disconnected,
    Syncing,
    Error,
}

impl IntegrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationStatus::Connected => "connected",
            IntegrationStatus::Disconnected => "disconnected",
            IntegrationStatus::Syncing => "syncing",
            IntegrationStatus::Error => "error",
        }
    }

    pub fn from_db(raw: &str) -> Self {
        match raw {
            "connected" => IntegrationStatus::Connected,
            "syncing" => IntegrationStatus::Syncing,
            "error" => IntegrationStatus::Error,
            _ => IntegrationStatus::Disconnected,
        }
    }
}

/// One row per external data vendor. Disconnecting clears the credential and
/// last-sync timestamp but never deletes the row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub id: i64,
    pub name: String,
    pub status: IntegrationStatus,
    pub api_key: Option<String>,
    pub last_sync: Option<DateTime<Utc>>,
    pub sync_frequency: i64,
    pub settings: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub status: IntegrationStatus,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_sync_frequency")]
    pub sync_frequency: i64,
    #[serde(default = "default_settings")]
    pub settings: serde_json::Value,
}

fn default_sync_frequency() -> i64 {
    60
}

fn default_settings() -> serde_json::Value {
    serde_json::json!({})
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationUpdate {
    pub status: Option<IntegrationStatus>,
    pub api_key: Option<String>,
    pub sync_frequency: Option<i64>,
    pub settings: Option<serde_json::Value>,
}
