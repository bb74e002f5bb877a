use crate::domain::activity::{Activity, ActivityInput};
use crate::domain::error::{AppError, Result};

use super::entities::ActivityEntity;
use super::{now_rfc3339, to_json, Repository};

impl Repository {
    pub async fn create_activity(&self, input: &ActivityInput) -> Result<Activity> {
        let activity = sqlx::query_as::<_, ActivityEntity>(
            "INSERT INTO activities (prospect_id, sequence_id, type, description, metadata, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(input.prospect_id)
        .bind(input.sequence_id)
        .bind(&input.kind)
        .bind(&input.description)
        .bind(to_json(&input.metadata)?)
        .bind(now_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create activity: {}", e)))?;

        Ok(activity.into())
    }

    /// Newest first, capped at `limit`.
    pub async fn recent_activities(&self, limit: i64) -> Result<Vec<Activity>> {
        let activities = sqlx::query_as::<_, ActivityEntity>(
            "SELECT * FROM activities ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list activities: {}", e)))?;

        Ok(activities.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::connection::init_test_pool;

    #[tokio::test]
    async fn recent_activities_honors_limit_and_order() {
        let repo = Repository::new(init_test_pool().await);

        for i in 0..5 {
            repo.create_activity(&ActivityInput::new(
                "note",
                format!("entry {}", i),
                serde_json::json!({}),
            ))
            .await
            .unwrap();
        }

        let recent = repo.recent_activities(3).await.unwrap();
        assert_eq!(recent.len(), 3);
        // Same-timestamp rows fall back to id ordering, newest insert first.
        assert_eq!(recent[0].description, "entry 4");
        assert_eq!(recent[2].description, "entry 2");
    }

    #[tokio::test]
    async fn activity_keeps_prospect_link_and_metadata() {
        let repo = Repository::new(init_test_pool().await);
        let activity = repo
            .create_activity(
                &ActivityInput::new(
                    "ai_scoring",
                    "Lead rescored".to_string(),
                    serde_json::json!({ "score": 91 }),
                )
                .for_prospect(7),
            )
            .await
            .unwrap();

        assert_eq!(activity.prospect_id, Some(7));
        assert_eq!(activity.kind, "ai_scoring");
        assert_eq!(activity.metadata["score"], 91);
    }
}
