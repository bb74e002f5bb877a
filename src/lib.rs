pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

use std::path::Path;
use std::sync::Arc;

use crate::application::use_cases::csv_import::CsvImportUseCase;
use crate::application::use_cases::integration_sync::IntegrationSyncService;
use crate::application::use_cases::lead_intel::LeadIntel;
use crate::domain::error::Result;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::{init_db, Repository};
use crate::infrastructure::llm_clients::{LLMClient, OpenAIClient};
use crate::interfaces::http::{start_server, AppState};

/// Wire configuration, database, and services, then serve until shutdown.
pub async fn run() -> Result<()> {
    let config = AppConfig::load()?;

    let pool = init_db(Path::new(&config.database.path)).await?;
    let repo = Arc::new(Repository::new(pool));

    let llm: Arc<dyn LLMClient> = Arc::new(OpenAIClient::new(config.llm.clone()));
    let state = AppState {
        repo: Arc::clone(&repo),
        intel: LeadIntel::new(llm),
        importer: CsvImportUseCase::new(Arc::clone(&repo)),
        sync: IntegrationSyncService::new(Arc::clone(&repo)),
        upload_max_bytes: config.upload.max_bytes,
    };

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        db = %config.database.path,
        "starting server"
    );
    let server = start_server(&config, state)?;
    server.await?;
    Ok(())
}
