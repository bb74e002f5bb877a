use actix_multipart::Multipart;
use actix_web::{get, patch, post, web, HttpResponse};
use futures_util::StreamExt;

use crate::application::use_cases::lead_intel::ProspectProfile;
use crate::domain::activity::ActivityInput;
use crate::domain::error::AppError;
use crate::domain::prospect::{IntentSignals, ProspectInput, ProspectUpdate};

use super::{validated, AppState};

#[get("/prospects")]
pub async fn list(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let prospects = state.repo.list_prospects().await?;
    Ok(HttpResponse::Ok().json(prospects))
}

#[get("/prospects/high-intent")]
pub async fn high_intent(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let prospects = state.repo.high_intent_prospects().await?;
    Ok(HttpResponse::Ok().json(prospects))
}

#[get("/prospects/{id}")]
pub async fn get(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let prospect = state.repo.get_prospect(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(prospect))
}

/// Manual prospect creation scores the lead before it is stored.
#[post("/prospects")]
pub async fn create(
    state: web::Data<AppState>,
    input: web::Json<ProspectInput>,
) -> Result<HttpResponse, AppError> {
    let mut input = input.into_inner();
    validated(&input)?;

    let profile = ProspectProfile {
        first_name: input.first_name.clone(),
        last_name: input.last_name.clone(),
        company: input.company.clone(),
        title: input.title.clone(),
        industry: input.industry.clone(),
        company_size: input.company_size.clone(),
        revenue: input.revenue.clone(),
        location: input.location.clone(),
    };
    let scoring = state.intel.score_lead(&profile).await;
    input.lead_score = scoring.score;
    input.intent_signals = IntentSignals {
        signals: scoring.intent_signals,
        reasoning: scoring.reasoning,
    };

    let prospect = state.repo.create_prospect(&input).await?;
    state
        .repo
        .create_activity(
            &ActivityInput::new(
                "prospect_created",
                format!(
                    "New prospect {} {} added with score {}",
                    prospect.first_name, prospect.last_name, prospect.lead_score
                ),
                serde_json::json!({
                    "source": prospect.source,
                    "score": prospect.lead_score,
                }),
            )
            .for_prospect(prospect.id),
        )
        .await?;

    Ok(HttpResponse::Ok().json(prospect))
}

#[patch("/prospects/{id}")]
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    updates: web::Json<ProspectUpdate>,
) -> Result<HttpResponse, AppError> {
    let prospect = state
        .repo
        .update_prospect(id.into_inner(), &updates)
        .await?;
    Ok(HttpResponse::Ok().json(prospect))
}

#[post("/prospects/csv-upload")]
pub async fn csv_upload(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let mut csv_bytes: Option<Vec<u8>> = None;

    while let Some(field) = payload.next().await {
        let mut field = field
            .map_err(|e| AppError::ValidationError(format!("Invalid multipart payload: {}", e)))?;
        if field.name() != "csv" {
            continue;
        }

        let filename = field
            .content_disposition()
            .get_filename()
            .map(str::to_string);
        let content_type = field.content_type().map(|m| m.essence_str().to_string());
        if !is_csv_upload(filename.as_deref(), content_type.as_deref()) {
            return Err(AppError::ValidationError(
                "Only CSV files are allowed".to_string(),
            ));
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| {
                AppError::ValidationError(format!("Failed to read uploaded file: {}", e))
            })?;
            if data.len() + chunk.len() > state.upload_max_bytes {
                return Err(AppError::ValidationError(
                    "CSV file exceeds the upload size limit".to_string(),
                ));
            }
            data.extend_from_slice(&chunk);
        }
        csv_bytes = Some(data);
        break;
    }

    let bytes = csv_bytes
        .ok_or_else(|| AppError::ValidationError("No CSV file uploaded".to_string()))?;
    let summary = state.importer.import(&bytes).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// Accept a declared `text/csv` MIME type or a `.csv` filename; reject
/// everything else before buffering the body.
fn is_csv_upload(filename: Option<&str>, content_type: Option<&str>) -> bool {
    if content_type == Some("text/csv") {
        return true;
    }
    filename
        .map(|name| name.to_ascii_lowercase().ends_with(".csv"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_gate_requires_csv_mime_or_extension() {
        assert!(is_csv_upload(Some("leads.csv"), None));
        assert!(is_csv_upload(Some("LEADS.CSV"), Some("application/octet-stream")));
        assert!(is_csv_upload(Some("export.dat"), Some("text/csv")));

        assert!(!is_csv_upload(Some("report.pdf"), Some("application/pdf")));
        assert!(!is_csv_upload(Some("notes.txt"), None));
        assert!(!is_csv_upload(None, Some("application/json")));
        assert!(!is_csv_upload(None, None));
    }
}
