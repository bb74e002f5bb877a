use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::application::use_cases::lead_intel::{ActivityDigest, ProspectProfile};
use crate::domain::error::AppError;

use super::AppState;

#[post("/ai/score-prospect")]
pub async fn score_prospect(
    state: web::Data<AppState>,
    profile: web::Json<ProspectProfile>,
) -> Result<HttpResponse, AppError> {
    let score = state.intel.score_lead(&profile).await;
    Ok(HttpResponse::Ok().json(score))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachRequest {
    prospect_data: ProspectProfile,
    #[serde(default)]
    sequence_type: String,
}

#[post("/ai/generate-outreach")]
pub async fn generate_outreach(
    state: web::Data<AppState>,
    req: web::Json<OutreachRequest>,
) -> Result<HttpResponse, AppError> {
    let draft = state
        .intel
        .generate_outreach(&req.prospect_data, &req.sequence_type)
        .await;
    Ok(HttpResponse::Ok().json(draft))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    prospect_data: ProspectProfile,
    #[serde(default)]
    recent_activity: Vec<ActivityDigest>,
}

#[post("/ai/analyze-intent")]
pub async fn analyze_intent(
    state: web::Data<AppState>,
    req: web::Json<IntentRequest>,
) -> Result<HttpResponse, AppError> {
    let signals = state
        .intel
        .analyze_intent(&req.prospect_data, &req.recent_activity)
        .await;
    Ok(HttpResponse::Ok().json(json!({ "intentSignals": signals })))
}
