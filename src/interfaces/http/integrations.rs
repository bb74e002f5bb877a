use actix_web::{delete, get, patch, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::domain::error::AppError;
use crate::domain::integration::{IntegrationInput, IntegrationUpdate};

use super::{validated, AppState};

#[get("/integrations")]
pub async fn list(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let integrations = state.repo.list_integrations().await?;
    Ok(HttpResponse::Ok().json(integrations))
}

#[post("/integrations")]
pub async fn create(
    state: web::Data<AppState>,
    input: web::Json<IntegrationInput>,
) -> Result<HttpResponse, AppError> {
    validated(&*input)?;
    let integration = state.repo.create_integration(&input).await?;
    Ok(HttpResponse::Ok().json(integration))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    api_key: String,
}

#[post("/integrations/test")]
pub async fn test(
    state: web::Data<AppState>,
    req: web::Json<TestRequest>,
) -> Result<HttpResponse, AppError> {
    let result = state.sync.test_connection(&req.name, &req.api_key).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[get("/integrations/{id}")]
pub async fn get(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let integration = state.repo.get_integration(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(integration))
}

#[patch("/integrations/{id}")]
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    updates: web::Json<IntegrationUpdate>,
) -> Result<HttpResponse, AppError> {
    let integration = state
        .repo
        .update_integration(id.into_inner(), &updates)
        .await?;
    Ok(HttpResponse::Ok().json(integration))
}

#[post("/integrations/{id}/sync")]
pub async fn sync(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    state.sync.start_sync(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Sync started successfully" })))
}

#[delete("/integrations/{id}")]
pub async fn disconnect(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    state.sync.disconnect(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Integration disconnected successfully" })))
}
