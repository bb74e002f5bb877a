use crate::domain::error::{AppError, Result};
use crate::domain::scoring_rule::{LeadScoringRule, LeadScoringRuleInput, LeadScoringRuleUpdate};

use super::entities::LeadScoringRuleEntity;
use super::{now_rfc3339, to_json, Repository};

impl Repository {
    pub async fn create_scoring_rule(
        &self,
        input: &LeadScoringRuleInput,
    ) -> Result<LeadScoringRule> {
        let now = now_rfc3339();
        let rule = sqlx::query_as::<_, LeadScoringRuleEntity>(
            "INSERT INTO lead_scoring_rules (
                name, description, criteria, is_active, priority, created_at, updated_at
             ) VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(to_json(&input.criteria)?)
        .bind(input.is_active as i64)
        .bind(input.priority)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create scoring rule: {}", e)))?;

        Ok(rule.into())
    }

    /// Highest priority first so callers can apply rules in order.
    pub async fn list_scoring_rules(&self) -> Result<Vec<LeadScoringRule>> {
        let rules = sqlx::query_as::<_, LeadScoringRuleEntity>(
            "SELECT * FROM lead_scoring_rules ORDER BY priority DESC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list scoring rules: {}", e)))?;

        Ok(rules.into_iter().map(Into::into).collect())
    }

    pub async fn update_scoring_rule(
        &self,
        id: i64,
        updates: &LeadScoringRuleUpdate,
    ) -> Result<LeadScoringRule> {
        let criteria = match &updates.criteria {
            Some(criteria) => Some(to_json(criteria)?),
            None => None,
        };

        let rule = sqlx::query_as::<_, LeadScoringRuleEntity>(
            "UPDATE lead_scoring_rules SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                criteria = COALESCE(?, criteria),
                is_active = COALESCE(?, is_active),
                priority = COALESCE(?, priority),
                updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&updates.name)
        .bind(&updates.description)
        .bind(criteria)
        .bind(updates.is_active.map(|a| a as i64))
        .bind(updates.priority)
        .bind(now_rfc3339())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update scoring rule: {}", e)))?;

        match rule {
            Some(rule) => Ok(rule.into()),
            None => Err(AppError::NotFound(format!("Scoring rule not found: {}", id))),
        }
    }
}
