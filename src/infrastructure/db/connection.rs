use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::error::{AppError, Result};

const SCHEMA: &str = include_str!("../../../resources/schema.sql");

const SCHEMA_VERSION: i32 = 1;

/// Known vendors that get a default integration row on first boot.
const DEFAULT_INTEGRATIONS: [&str; 5] = ["Apollo", "Clay", "SmartLead", "Rb2b", "OpenAI GPT-4"];

/// Open (creating if missing) the application database and bring its schema
/// up to date.
pub async fn init_db(db_path: &Path) -> Result<SqlitePool> {
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| AppError::DatabaseError("Database path is not valid UTF-8".to_string()))?;
    let db_url = format!("sqlite://{}", db_path_str.replace('\\', "/"));

    let options = SqliteConnectOptions::from_str(&db_url)
        .map_err(|e| AppError::DatabaseError(format!("Failed to parse database URL: {}", e)))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(8)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to connect to database: {}", e)))?;

    // If the DB is newer than this build expects, fail fast.
    let version = read_user_version(&pool).await?;
    if version > SCHEMA_VERSION {
        return Err(AppError::DatabaseError(format!(
            "Database schema too new: db user_version={} > app supported_version={}",
            version, SCHEMA_VERSION
        )));
    }

    apply_schema(&pool).await?;
    seed_default_integrations(&pool).await?;
    set_user_version(&pool, SCHEMA_VERSION).await?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Database health check failed: {}", e)))?;

    Ok(pool)
}

/// Apply schema statements additively (everything is CREATE IF NOT EXISTS).
pub(crate) async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    for stmt in SCHEMA.split(';') {
        let sql = stmt.trim();
        if sql.is_empty() {
            continue;
        }
        sqlx::query(sql).execute(pool).await.map_err(|e| {
            AppError::DatabaseError(format!("Failed to apply schema statement: {}", e))
        })?;
    }
    Ok(())
}

/// Ensure one integration row exists per known vendor. No-op once seeded.
pub(crate) async fn seed_default_integrations(pool: &SqlitePool) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM integrations")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to count integrations: {}", e)))?;

    if count > 0 {
        tracing::debug!(count, "integrations already seeded");
        return Ok(());
    }

    let now = chrono::Utc::now().to_rfc3339();
    for name in DEFAULT_INTEGRATIONS {
        sqlx::query(
            "INSERT INTO integrations (name, status, api_key, last_sync, sync_frequency, settings, created_at, updated_at)
             VALUES (?, 'disconnected', NULL, NULL, 60, '{}', ?, ?)",
        )
        .bind(name)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to seed integration {}: {}", name, e)))?;
    }

    tracing::info!("seeded default integration rows");
    Ok(())
}

async fn read_user_version(pool: &SqlitePool) -> Result<i32> {
    sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to read PRAGMA user_version: {}", e)))
}

async fn set_user_version(pool: &SqlitePool, version: i32) -> Result<()> {
    let sql = format!("PRAGMA user_version = {}", version);
    sqlx::query(&sql)
        .execute(pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to set PRAGMA user_version: {}", e)))?;
    Ok(())
}

#[cfg(test)]
pub(crate) async fn init_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    apply_schema(&pool).await.unwrap();
    pool
}
