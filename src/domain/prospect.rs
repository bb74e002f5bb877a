use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Pipeline state of a prospect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProspectStatus {
    #[default]
    New,
    Contacted,
    Responded,
    Qualified,
    Disqualified,
}

impl ProspectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProspectStatus::New => "new",
            ProspectStatus::Contacted => "contacted",
            ProspectStatus::Responded => "responded",
            ProspectStatus::Qualified => "qualified",
            ProspectStatus::Disqualified => "disqualified",
        }
    }

    /// Parse a status column as stored in the database.
    pub fn from_db(raw: &str) -> Self {
        match raw {
            "contacted" => ProspectStatus::Contacted,
            "responded" => ProspectStatus::Responded,
            "qualified" => ProspectStatus::Qualified,
            "disqualified" => ProspectStatus::Disqualified,
            _ => ProspectStatus::New,
        }
    }

    /// Map a vendor's free-text status word onto our enum.
    /// Vendors export things like "Reached Out" or "Converted"; we bucket by
    /// substring so the closest pipeline state wins.
    pub fn from_vendor_label(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if lower.contains("contact") || lower.contains("reached") {
            ProspectStatus::Contacted
        } else if lower.contains("respond") || lower.contains("reply") {
            ProspectStatus::Responded
        } else if lower.contains("convert") || lower.contains("qualif") || lower.contains("progress")
        {
            ProspectStatus::Qualified
        } else if lower.contains("disqualif") || lower.contains("reject") {
            ProspectStatus::Disqualified
        } else {
            ProspectStatus::New
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EngagementLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl EngagementLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementLevel::Low => "low",
            EngagementLevel::Medium => "medium",
            EngagementLevel::High => "high",
        }
    }

    pub fn from_db(raw: &str) -> Self {
        match raw {
            "medium" => EngagementLevel::Medium,
            "high" => EngagementLevel::High,
            _ => EngagementLevel::Low,
        }
    }

    /// Coarse engagement bucket derived from a 0-100 lead score.
    pub fn from_score(score: i64) -> Self {
        if score >= 70 {
            EngagementLevel::High
        } else if score >= 40 {
            EngagementLevel::Medium
        } else {
            EngagementLevel::Low
        }
    }
}

/// Behavioral cues justifying a lead score, stored as a JSON bag.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IntentSignals {
    #[serde(default)]
    pub signals: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prospect {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub title: String,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub revenue: Option<String>,
    pub location: Option<String>,
    pub lead_score: i64,
    pub status: ProspectStatus,
    pub source: String,
    pub engagement_level: EngagementLevel,
    pub intent_signals: IntentSignals,
    pub personalized_notes: Option<String>,
    pub last_activity: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a prospect, either from the API or a CSV mapper.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProspectInput {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub company: String,
    pub title: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub company_size: Option<String>,
    #[serde(default)]
    pub revenue: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub lead_score: i64,
    #[serde(default)]
    pub status: ProspectStatus,
    pub source: String,
    #[serde(default)]
    pub engagement_level: EngagementLevel,
    #[serde(default)]
    pub intent_signals: IntentSignals,
    #[serde(default)]
    pub personalized_notes: Option<String>,
}

/// Partial update for PATCH; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProspectUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub revenue: Option<String>,
    pub location: Option<String>,
    pub lead_score: Option<i64>,
    pub status: Option<ProspectStatus>,
    pub engagement_level: Option<EngagementLevel>,
    pub intent_signals: Option<IntentSignals>,
    pub personalized_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engagement_buckets_from_score() {
        assert_eq!(EngagementLevel::from_score(92), EngagementLevel::High);
        assert_eq!(EngagementLevel::from_score(70), EngagementLevel::High);
        assert_eq!(EngagementLevel::from_score(55), EngagementLevel::Medium);
        assert_eq!(EngagementLevel::from_score(40), EngagementLevel::Medium);
        assert_eq!(EngagementLevel::from_score(12), EngagementLevel::Low);
    }

    #[test]
    fn vendor_status_words_map_to_pipeline_states() {
        assert_eq!(
            ProspectStatus::from_vendor_label("Reached Out"),
            ProspectStatus::Contacted
        );
        assert_eq!(
            ProspectStatus::from_vendor_label("replied"),
            ProspectStatus::Responded
        );
        assert_eq!(
            ProspectStatus::from_vendor_label("Converted"),
            ProspectStatus::Qualified
        );
        assert_eq!(
            ProspectStatus::from_vendor_label("In Progress"),
            ProspectStatus::Qualified
        );
        assert_eq!(
            ProspectStatus::from_vendor_label("Rejected"),
            ProspectStatus::Disqualified
        );
        assert_eq!(
            ProspectStatus::from_vendor_label("brand new"),
            ProspectStatus::New
        );
    }
}
