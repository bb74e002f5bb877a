use chrono::{DateTime, Utc};

use crate::domain::activity::Activity;
use crate::domain::integration::{Integration, IntegrationStatus};
use crate::domain::prospect::{EngagementLevel, IntentSignals, Prospect, ProspectStatus};
use crate::domain::scoring_rule::LeadScoringRule;
use crate::domain::sequence::{Sequence, SequenceStatus, SequenceStep};

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn parse_optional_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    })
}

fn parse_json(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::json!({}))
}

#[derive(sqlx::FromRow)]
pub(super) struct ProspectEntity {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    company: String,
    title: String,
    phone: Option<String>,
    linkedin_url: Option<String>,
    website: Option<String>,
    industry: Option<String>,
    company_size: Option<String>,
    revenue: Option<String>,
    location: Option<String>,
    lead_score: i64,
    status: String,
    source: String,
    engagement_level: String,
    intent_signals: String,
    personalized_notes: Option<String>,
    last_activity: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<ProspectEntity> for Prospect {
    fn from(entity: ProspectEntity) -> Self {
        Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            company: entity.company,
            title: entity.title,
            phone: entity.phone,
            linkedin_url: entity.linkedin_url,
            website: entity.website,
            industry: entity.industry,
            company_size: entity.company_size,
            revenue: entity.revenue,
            location: entity.location,
            lead_score: entity.lead_score,
            status: ProspectStatus::from_db(&entity.status),
            source: entity.source,
            engagement_level: EngagementLevel::from_db(&entity.engagement_level),
            intent_signals: serde_json::from_str::<IntentSignals>(&entity.intent_signals)
                .unwrap_or_default(),
            personalized_notes: entity.personalized_notes,
            last_activity: parse_optional_timestamp(entity.last_activity.as_deref()),
            created_at: parse_timestamp(&entity.created_at),
            updated_at: parse_timestamp(&entity.updated_at),
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct SequenceEntity {
    id: i64,
    name: String,
    description: Option<String>,
    status: String,
    template_type: String,
    steps: String,
    target_criteria: String,
    response_rate: f64,
    total_sent: i64,
    total_responses: i64,
    created_at: String,
    updated_at: String,
}

impl From<SequenceEntity> for Sequence {
    fn from(entity: SequenceEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            status: SequenceStatus::from_db(&entity.status),
            template_type: entity.template_type,
            steps: serde_json::from_str::<Vec<SequenceStep>>(&entity.steps).unwrap_or_default(),
            target_criteria: parse_json(&entity.target_criteria),
            response_rate: entity.response_rate,
            total_sent: entity.total_sent,
            total_responses: entity.total_responses,
            created_at: parse_timestamp(&entity.created_at),
            updated_at: parse_timestamp(&entity.updated_at),
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct ActivityEntity {
    id: i64,
    prospect_id: Option<i64>,
    sequence_id: Option<i64>,
    #[sqlx(rename = "type")]
    kind: String,
    description: String,
    metadata: String,
    created_at: String,
}

impl From<ActivityEntity> for Activity {
    fn from(entity: ActivityEntity) -> Self {
        Self {
            id: entity.id,
            prospect_id: entity.prospect_id,
            sequence_id: entity.sequence_id,
            kind: entity.kind,
            description: entity.description,
            metadata: parse_json(&entity.metadata),
            created_at: parse_timestamp(&entity.created_at),
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct IntegrationEntity {
    id: i64,
    name: String,
    status: String,
    api_key: Option<String>,
    last_sync: Option<String>,
    sync_frequency: i64,
    settings: String,
    created_at: String,
    updated_at: String,
}

impl From<IntegrationEntity> for Integration {
    fn from(entity: IntegrationEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            status: IntegrationStatus::from_db(&entity.status),
            api_key: entity.api_key,
            last_sync: parse_optional_timestamp(entity.last_sync.as_deref()),
            sync_frequency: entity.sync_frequency,
            settings: parse_json(&entity.settings),
            created_at: parse_timestamp(&entity.created_at),
            updated_at: parse_timestamp(&entity.updated_at),
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct LeadScoringRuleEntity {
    id: i64,
    name: String,
    description: Option<String>,
    criteria: String,
    is_active: i64,
    priority: i64,
    created_at: String,
    updated_at: String,
}

impl From<LeadScoringRuleEntity> for LeadScoringRule {
    fn from(entity: LeadScoringRuleEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            criteria: parse_json(&entity.criteria),
            is_active: entity.is_active != 0,
            priority: entity.priority,
            created_at: parse_timestamp(&entity.created_at),
            updated_at: parse_timestamp(&entity.updated_at),
        }
    }
}
