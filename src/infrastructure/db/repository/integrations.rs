use crate::domain::error::{AppError, Result};
use crate::domain::integration::{Integration, IntegrationInput, IntegrationUpdate};

use super::entities::IntegrationEntity;
use super::{now_rfc3339, to_json, Repository};

impl Repository {
    pub async fn create_integration(&self, input: &IntegrationInput) -> Result<Integration> {
        let now = now_rfc3339();
        let integration = sqlx::query_as::<_, IntegrationEntity>(
            "INSERT INTO integrations (
                name, status, api_key, last_sync, sync_frequency, settings,
                created_at, updated_at
             ) VALUES (?, ?, ?, NULL, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&input.name)
        .bind(input.status.as_str())
        .bind(&input.api_key)
        .bind(input.sync_frequency)
        .bind(to_json(&input.settings)?)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create integration: {}", e)))?;

        Ok(integration.into())
    }

    pub async fn list_integrations(&self) -> Result<Vec<Integration>> {
        let integrations = sqlx::query_as::<_, IntegrationEntity>(
            "SELECT * FROM integrations ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list integrations: {}", e)))?;

        Ok(integrations.into_iter().map(Into::into).collect())
    }

    pub async fn get_integration(&self, id: i64) -> Result<Integration> {
        let integration =
            sqlx::query_as::<_, IntegrationEntity>("SELECT * FROM integrations WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(format!("Failed to fetch integration: {}", e))
                })?;

        match integration {
            Some(integration) => Ok(integration.into()),
            None => Err(AppError::NotFound(format!("Integration not found: {}", id))),
        }
    }

    pub async fn update_integration(
        &self,
        id: i64,
        updates: &IntegrationUpdate,
    ) -> Result<Integration> {
        let settings = match &updates.settings {
            Some(settings) => Some(to_json(settings)?),
            None => None,
        };

        let integration = sqlx::query_as::<_, IntegrationEntity>(
            "UPDATE integrations SET
                status = COALESCE(?, status),
                api_key = COALESCE(?, api_key),
                sync_frequency = COALESCE(?, sync_frequency),
                settings = COALESCE(?, settings),
                updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(updates.status.map(|s| s.as_str()))
        .bind(&updates.api_key)
        .bind(updates.sync_frequency)
        .bind(settings)
        .bind(now_rfc3339())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update integration: {}", e)))?;

        match integration {
            Some(integration) => Ok(integration.into()),
            None => Err(AppError::NotFound(format!("Integration not found: {}", id))),
        }
    }

    /// Drop the stored credential and sync history; the row itself stays.
    pub async fn disconnect_integration(&self, id: i64) -> Result<Integration> {
        let integration = sqlx::query_as::<_, IntegrationEntity>(
            "UPDATE integrations SET
                status = 'disconnected',
                api_key = NULL,
                last_sync = NULL,
                updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(now_rfc3339())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to disconnect integration: {}", e)))?;

        match integration {
            Some(integration) => Ok(integration.into()),
            None => Err(AppError::NotFound(format!("Integration not found: {}", id))),
        }
    }

    /// Sync start stamps `last_sync` immediately; completion refreshes it
    /// again on both outcomes.
    pub async fn mark_syncing(&self, id: i64) -> Result<Integration> {
        let now = now_rfc3339();
        let integration = sqlx::query_as::<_, IntegrationEntity>(
            "UPDATE integrations SET status = 'syncing', last_sync = ?, updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&now)
        .bind(&now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to mark integration syncing: {}", e)))?;

        match integration {
            Some(integration) => Ok(integration.into()),
            None => Err(AppError::NotFound(format!("Integration not found: {}", id))),
        }
    }

    /// Record the outcome of a sync pass: back to connected, or flagged as
    /// errored. `last_sync` is refreshed either way; it records the last
    /// attempt, not the last success.
    pub async fn mark_sync_result(&self, id: i64, success: bool) -> Result<Integration> {
        let now = now_rfc3339();
        let status = if success { "connected" } else { "error" };
        let integration = sqlx::query_as::<_, IntegrationEntity>(
            "UPDATE integrations SET status = ?, last_sync = ?, updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(status)
        .bind(&now)
        .bind(&now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to record sync result: {}", e)))?;

        match integration {
            Some(integration) => Ok(integration.into()),
            None => Err(AppError::NotFound(format!("Integration not found: {}", id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::integration::IntegrationStatus;
    use crate::infrastructure::db::connection::init_test_pool;

    async fn connected_integration(repo: &Repository) -> Integration {
        repo.create_integration(&IntegrationInput {
            name: "Apollo".to_string(),
            status: IntegrationStatus::Connected,
            api_key: Some("sk-test".to_string()),
            sync_frequency: 30,
            settings: serde_json::json!({ "region": "us" }),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn disconnect_clears_credential_and_sync_history() {
        let repo = Repository::new(init_test_pool().await);
        let created = connected_integration(&repo).await;
        repo.mark_sync_result(created.id, true).await.unwrap();

        let disconnected = repo.disconnect_integration(created.id).await.unwrap();
        assert_eq!(disconnected.status, IntegrationStatus::Disconnected);
        assert_eq!(disconnected.api_key, None);
        assert_eq!(disconnected.last_sync, None);
        // Settings are kept for reconnection.
        assert_eq!(disconnected.settings["region"], "us");
    }

    #[tokio::test]
    async fn sync_lifecycle_transitions_status() {
        let repo = Repository::new(init_test_pool().await);
        let created = connected_integration(&repo).await;

        let syncing = repo.mark_syncing(created.id).await.unwrap();
        assert_eq!(syncing.status, IntegrationStatus::Syncing);
        // Sync start already counts as an attempt.
        assert!(syncing.last_sync.is_some());

        let done = repo.mark_sync_result(created.id, true).await.unwrap();
        assert_eq!(done.status, IntegrationStatus::Connected);
        assert!(done.last_sync.is_some());

        let failed = repo.mark_sync_result(created.id, false).await.unwrap();
        assert_eq!(failed.status, IntegrationStatus::Error);
        // Failed attempts still stamp the timestamp.
        assert!(failed.last_sync.is_some());
        assert!(failed.last_sync.unwrap() >= done.last_sync.unwrap());
    }
}
