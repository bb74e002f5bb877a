use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SequenceStatus {
    #[default]
    Draft,
    Active,
    Paused,
    Completed,
}

impl SequenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SequenceStatus::Draft => "draft",
            SequenceStatus::Active => "active",
            SequenceStatus::Paused => "paused",
            SequenceStatus::Completed => "completed",
        }
    }

    pub fn from_db(raw: &str) -> Self {
        match raw {
            "active" => SequenceStatus::Active,
            "paused" => SequenceStatus::Paused,
            "completed" => SequenceStatus::Completed,
            _ => SequenceStatus::Draft,
        }
    }
}

/// One step of an outreach campaign: which channel, after how long, with
/// which copy template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceStep {
    pub channel: String,
    #[serde(default)]
    pub delay_days: i64,
    pub template: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sequence {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: SequenceStatus,
    pub template_type: String,
    pub steps: Vec<SequenceStep>,
    pub target_criteria: serde_json::Value,
    pub response_rate: f64,
    pub total_sent: i64,
    pub total_responses: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SequenceInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: SequenceStatus,
    #[validate(length(min = 1))]
    pub template_type: String,
    #[serde(default)]
    pub steps: Vec<SequenceStep>,
    #[serde(default = "default_json_object")]
    pub target_criteria: serde_json::Value,
}

fn default_json_object() -> serde_json::Value {
    serde_json::json!({})
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<SequenceStatus>,
    pub template_type: Option<String>,
    pub steps: Option<Vec<SequenceStep>>,
    pub target_criteria: Option<serde_json::Value>,
    pub response_rate: Option<f64>,
    pub total_sent: Option<i64>,
    pub total_responses: Option<i64>,
}
