use actix_web::{get, patch, post, web, HttpResponse};

use crate::domain::error::AppError;
use crate::domain::scoring_rule::{LeadScoringRuleInput, LeadScoringRuleUpdate};

use super::{validated, AppState};

#[get("/lead-scoring/rules")]
pub async fn list(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let rules = state.repo.list_scoring_rules().await?;
    Ok(HttpResponse::Ok().json(rules))
}

#[post("/lead-scoring/rules")]
pub async fn create(
    state: web::Data<AppState>,
    input: web::Json<LeadScoringRuleInput>,
) -> Result<HttpResponse, AppError> {
    validated(&*input)?;
    let rule = state.repo.create_scoring_rule(&input).await?;
    Ok(HttpResponse::Ok().json(rule))
}

/// Toggling `isActive` goes through here; rules are never deleted.
#[patch("/lead-scoring/rules/{id}")]
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    updates: web::Json<LeadScoringRuleUpdate>,
) -> Result<HttpResponse, AppError> {
    let rule = state
        .repo
        .update_scoring_rule(id.into_inner(), &updates)
        .await?;
    Ok(HttpResponse::Ok().json(rule))
}
