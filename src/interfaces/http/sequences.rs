use actix_web::{get, patch, post, web, HttpResponse};

use crate::domain::error::AppError;
use crate::domain::sequence::{SequenceInput, SequenceUpdate};

use super::{validated, AppState};

#[get("/sequences")]
pub async fn list(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let sequences = state.repo.list_sequences().await?;
    Ok(HttpResponse::Ok().json(sequences))
}

#[get("/sequences/active")]
pub async fn active(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let sequences = state.repo.active_sequences().await?;
    Ok(HttpResponse::Ok().json(sequences))
}

#[get("/sequences/{id}")]
pub async fn get(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let sequence = state.repo.get_sequence(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(sequence))
}

#[post("/sequences")]
pub async fn create(
    state: web::Data<AppState>,
    input: web::Json<SequenceInput>,
) -> Result<HttpResponse, AppError> {
    validated(&*input)?;
    let sequence = state.repo.create_sequence(&input).await?;
    Ok(HttpResponse::Ok().json(sequence))
}

#[patch("/sequences/{id}")]
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    updates: web::Json<SequenceUpdate>,
) -> Result<HttpResponse, AppError> {
    let sequence = state
        .repo
        .update_sequence(id.into_inner(), &updates)
        .await?;
    Ok(HttpResponse::Ok().json(sequence))
}
