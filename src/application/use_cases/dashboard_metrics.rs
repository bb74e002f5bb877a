use serde::Serialize;

use crate::domain::error::Result;
use crate::infrastructure::db::Repository;

/// Lead score at or above which a prospect counts as qualified.
const QUALIFIED_SCORE: i64 = 70;

/// Estimated deal value per qualified lead, in dollars.
const DEAL_VALUE: i64 = 50_000;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub active_leads: usize,
    pub active_leads_change: String,
    pub response_rate: String,
    pub response_rate_change: String,
    pub qualified_leads: usize,
    pub qualified_leads_change: String,
    pub pipeline_value: String,
    pub pipeline_value_change: String,
}

/// Headline numbers for the dashboard. The change percentages are static
/// placeholders until period-over-period tracking lands.
pub async fn dashboard_metrics(repo: &Repository) -> Result<DashboardMetrics> {
    let prospects = repo.list_prospects().await?;
    let sequences = repo.active_sequences().await?;

    let active_leads = prospects.len();
    let qualified_leads = prospects
        .iter()
        .filter(|p| p.lead_score >= QUALIFIED_SCORE)
        .count();
    let total_sent: i64 = sequences.iter().map(|s| s.total_sent).sum();
    let total_responses: i64 = sequences.iter().map(|s| s.total_responses).sum();
    let response_rate = if total_sent > 0 {
        total_responses as f64 / total_sent as f64 * 100.0
    } else {
        0.0
    };
    let pipeline_value = qualified_leads as i64 * DEAL_VALUE;

    Ok(DashboardMetrics {
        active_leads,
        active_leads_change: "+12.5%".to_string(),
        response_rate: format!("{:.1}", response_rate),
        response_rate_change: "+8.3%".to_string(),
        qualified_leads,
        qualified_leads_change: "+24.1%".to_string(),
        pipeline_value: format!("${:.1}M", pipeline_value as f64 / 1_000_000.0),
        pipeline_value_change: "+18.7%".to_string(),
    })
}
