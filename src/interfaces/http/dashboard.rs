use actix_web::{get, web, HttpResponse};

use crate::application::use_cases::dashboard_metrics::dashboard_metrics;
use crate::domain::error::AppError;

use super::AppState;

#[get("/dashboard/metrics")]
pub async fn metrics(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let metrics = dashboard_metrics(&state.repo).await?;
    Ok(HttpResponse::Ok().json(metrics))
}
