use crate::domain::error::{AppError, Result};
use crate::domain::sequence::{Sequence, SequenceInput, SequenceUpdate};

use super::entities::SequenceEntity;
use super::{now_rfc3339, to_json, Repository};

impl Repository {
    pub async fn create_sequence(&self, input: &SequenceInput) -> Result<Sequence> {
        let now = now_rfc3339();
        let sequence = sqlx::query_as::<_, SequenceEntity>(
            "INSERT INTO sequences (
                name, description, status, template_type, steps, target_criteria,
                created_at, updated_at
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.status.as_str())
        .bind(&input.template_type)
        .bind(to_json(&input.steps)?)
        .bind(to_json(&input.target_criteria)?)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create sequence: {}", e)))?;

        Ok(sequence.into())
    }

    pub async fn list_sequences(&self) -> Result<Vec<Sequence>> {
        let sequences = sqlx::query_as::<_, SequenceEntity>(
            "SELECT * FROM sequences ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list sequences: {}", e)))?;

        Ok(sequences.into_iter().map(Into::into).collect())
    }

    pub async fn get_sequence(&self, id: i64) -> Result<Sequence> {
        let sequence =
            sqlx::query_as::<_, SequenceEntity>("SELECT * FROM sequences WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Failed to fetch sequence: {}", e)))?;

        match sequence {
            Some(sequence) => Ok(sequence.into()),
            None => Err(AppError::NotFound(format!("Sequence not found: {}", id))),
        }
    }

    pub async fn update_sequence(&self, id: i64, updates: &SequenceUpdate) -> Result<Sequence> {
        let steps = match &updates.steps {
            Some(steps) => Some(to_json(steps)?),
            None => None,
        };
        let target_criteria = match &updates.target_criteria {
            Some(criteria) => Some(to_json(criteria)?),
            None => None,
        };

        let sequence = sqlx::query_as::<_, SequenceEntity>(
            "UPDATE sequences SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                status = COALESCE(?, status),
                template_type = COALESCE(?, template_type),
                steps = COALESCE(?, steps),
                target_criteria = COALESCE(?, target_criteria),
                response_rate = COALESCE(?, response_rate),
                total_sent = COALESCE(?, total_sent),
                total_responses = COALESCE(?, total_responses),
                updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&updates.name)
        .bind(&updates.description)
        .bind(updates.status.map(|s| s.as_str()))
        .bind(&updates.template_type)
        .bind(steps)
        .bind(target_criteria)
        .bind(updates.response_rate)
        .bind(updates.total_sent)
        .bind(updates.total_responses)
        .bind(now_rfc3339())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update sequence: {}", e)))?;

        match sequence {
            Some(sequence) => Ok(sequence.into()),
            None => Err(AppError::NotFound(format!("Sequence not found: {}", id))),
        }
    }

    pub async fn active_sequences(&self) -> Result<Vec<Sequence>> {
        let sequences = sqlx::query_as::<_, SequenceEntity>(
            "SELECT * FROM sequences WHERE status = 'active' ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list active sequences: {}", e)))?;

        Ok(sequences.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sequence::{SequenceStatus, SequenceStep};
    use crate::infrastructure::db::connection::init_test_pool;

    fn sample_input(name: &str, status: SequenceStatus) -> SequenceInput {
        SequenceInput {
            name: name.to_string(),
            description: Some("Cold outreach".to_string()),
            status,
            template_type: "email".to_string(),
            steps: vec![SequenceStep {
                channel: "email".to_string(),
                delay_days: 0,
                template: "intro".to_string(),
            }],
            target_criteria: serde_json::json!({ "industry": "SaaS" }),
        }
    }

    #[tokio::test]
    async fn create_round_trips_steps_and_criteria() {
        let repo = Repository::new(init_test_pool().await);
        let created = repo
            .create_sequence(&sample_input("Launch", SequenceStatus::Draft))
            .await
            .unwrap();

        assert_eq!(created.status, SequenceStatus::Draft);
        assert_eq!(created.steps.len(), 1);
        assert_eq!(created.steps[0].channel, "email");
        assert_eq!(created.target_criteria["industry"], "SaaS");
        assert_eq!(created.total_sent, 0);

        let fetched = repo.get_sequence(created.id).await.unwrap();
        assert_eq!(fetched.name, "Launch");
        assert_eq!(fetched.steps.len(), 1);
    }

    #[tokio::test]
    async fn active_sequences_filters_by_status() {
        let repo = Repository::new(init_test_pool().await);
        repo.create_sequence(&sample_input("Live", SequenceStatus::Active))
            .await
            .unwrap();
        repo.create_sequence(&sample_input("Idea", SequenceStatus::Draft))
            .await
            .unwrap();

        let active = repo.active_sequences().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Live");
    }

    #[tokio::test]
    async fn update_missing_sequence_is_not_found() {
        let repo = Repository::new(init_test_pool().await);
        let err = repo
            .update_sequence(42, &SequenceUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
