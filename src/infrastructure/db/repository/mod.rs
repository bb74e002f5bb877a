mod activities;
mod entities;
mod integrations;
mod prospects;
mod scoring_rules;
mod sequences;

use sqlx::SqlitePool;

use crate::domain::error::{AppError, Result};

/// All persistence goes through this repository; one impl block per entity
/// lives in its own file.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| AppError::Internal(format!("Failed to serialize JSON column: {}", e)))
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
