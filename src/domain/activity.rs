use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Append-only audit-log row. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i64,
    pub prospect_id: Option<i64>,
    pub sequence_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActivityInput {
    #[serde(default)]
    pub prospect_id: Option<i64>,
    #[serde(default)]
    pub sequence_id: Option<i64>,
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub kind: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default = "default_metadata")]
    pub metadata: serde_json::Value,
}

fn default_metadata() -> serde_json::Value {
    serde_json::json!({})
}

impl ActivityInput {
    pub fn new(kind: &str, description: String, metadata: serde_json::Value) -> Self {
        Self {
            prospect_id: None,
            sequence_id: None,
            kind: kind.to_string(),
            description,
            metadata,
        }
    }

    pub fn for_prospect(mut self, prospect_id: i64) -> Self {
        self.prospect_id = Some(prospect_id);
        self
    }
}
