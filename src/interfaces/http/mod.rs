pub mod activities;
pub mod ai;
pub mod dashboard;
pub mod integrations;
pub mod prospects;
pub mod scoring_rules;
pub mod sequences;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, ResponseError};
use serde_json::json;

use crate::application::use_cases::csv_import::CsvImportUseCase;
use crate::application::use_cases::integration_sync::IntegrationSyncService;
use crate::application::use_cases::lead_intel::LeadIntel;
use crate::domain::error::AppError;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::Repository;

pub struct AppState {
    pub repo: Arc<Repository>,
    pub intel: LeadIntel,
    pub importer: CsvImportUseCase,
    pub sync: IntegrationSyncService,
    pub upload_max_bytes: usize,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::ParseError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Internals go to the log, not the wire.
            tracing::error!(error = %self, "request failed");
            HttpResponse::build(status).json(json!({ "message": "Internal server error" }))
        } else {
            HttpResponse::build(status).json(json!({ "message": self.to_string() }))
        }
    }
}

pub fn start_server(config: &AppConfig, state: AppState) -> std::io::Result<Server> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Dashboard UI runs on its own origin

        App::new().wrap(cors).app_data(state.clone()).service(
            web::scope("/api")
                .service(dashboard::metrics)
                .service(prospects::list)
                .service(prospects::high_intent)
                .service(prospects::create)
                .service(prospects::csv_upload)
                .service(prospects::get)
                .service(prospects::update)
                .service(sequences::list)
                .service(sequences::active)
                .service(sequences::create)
                .service(sequences::get)
                .service(sequences::update)
                .service(activities::recent)
                .service(activities::create)
                .service(integrations::list)
                .service(integrations::create)
                .service(integrations::test)
                .service(integrations::get)
                .service(integrations::update)
                .service(integrations::sync)
                .service(integrations::disconnect)
                .service(scoring_rules::list)
                .service(scoring_rules::create)
                .service(scoring_rules::update)
                .service(ai::score_prospect)
                .service(ai::generate_outreach)
                .service(ai::analyze_intent),
        )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run();

    Ok(server)
}

/// Run `validator` checks and surface failures as a 400.
pub(crate) fn validated<T: validator::Validate>(input: &T) -> Result<(), AppError> {
    input
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))
}
