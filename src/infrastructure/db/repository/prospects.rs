use crate::domain::error::{AppError, Result};
use crate::domain::prospect::{Prospect, ProspectInput, ProspectUpdate};

use super::entities::ProspectEntity;
use super::{now_rfc3339, to_json, Repository};

impl Repository {
    pub async fn create_prospect(&self, input: &ProspectInput) -> Result<Prospect> {
        let now = now_rfc3339();
        let prospect = sqlx::query_as::<_, ProspectEntity>(
            "INSERT INTO prospects (
                first_name, last_name, email, company, title,
                phone, linkedin_url, website, industry, company_size, revenue, location,
                lead_score, status, source, engagement_level, intent_signals,
                personalized_notes, last_activity, created_at, updated_at
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.company)
        .bind(&input.title)
        .bind(&input.phone)
        .bind(&input.linkedin_url)
        .bind(&input.website)
        .bind(&input.industry)
        .bind(&input.company_size)
        .bind(&input.revenue)
        .bind(&input.location)
        .bind(input.lead_score)
        .bind(input.status.as_str())
        .bind(&input.source)
        .bind(input.engagement_level.as_str())
        .bind(to_json(&input.intent_signals)?)
        .bind(&input.personalized_notes)
        .bind(Option::<String>::None)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create prospect: {}", e)))?;

        Ok(prospect.into())
    }

    pub async fn list_prospects(&self) -> Result<Vec<Prospect>> {
        let prospects = sqlx::query_as::<_, ProspectEntity>(
            "SELECT * FROM prospects ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list prospects: {}", e)))?;

        Ok(prospects.into_iter().map(Into::into).collect())
    }

    pub async fn get_prospect(&self, id: i64) -> Result<Prospect> {
        let prospect =
            sqlx::query_as::<_, ProspectEntity>("SELECT * FROM prospects WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Failed to fetch prospect: {}", e)))?;

        match prospect {
            Some(prospect) => Ok(prospect.into()),
            None => Err(AppError::NotFound(format!("Prospect not found: {}", id))),
        }
    }

    pub async fn update_prospect(&self, id: i64, updates: &ProspectUpdate) -> Result<Prospect> {
        let intent_signals = match &updates.intent_signals {
            Some(signals) => Some(to_json(signals)?),
            None => None,
        };

        let prospect = sqlx::query_as::<_, ProspectEntity>(
            "UPDATE prospects SET
                first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                email = COALESCE(?, email),
                company = COALESCE(?, company),
                title = COALESCE(?, title),
                phone = COALESCE(?, phone),
                linkedin_url = COALESCE(?, linkedin_url),
                website = COALESCE(?, website),
                industry = COALESCE(?, industry),
                company_size = COALESCE(?, company_size),
                revenue = COALESCE(?, revenue),
                location = COALESCE(?, location),
                lead_score = COALESCE(?, lead_score),
                status = COALESCE(?, status),
                engagement_level = COALESCE(?, engagement_level),
                intent_signals = COALESCE(?, intent_signals),
                personalized_notes = COALESCE(?, personalized_notes),
                updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&updates.first_name)
        .bind(&updates.last_name)
        .bind(&updates.email)
        .bind(&updates.company)
        .bind(&updates.title)
        .bind(&updates.phone)
        .bind(&updates.linkedin_url)
        .bind(&updates.website)
        .bind(&updates.industry)
        .bind(&updates.company_size)
        .bind(&updates.revenue)
        .bind(&updates.location)
        .bind(updates.lead_score)
        .bind(updates.status.map(|s| s.as_str()))
        .bind(updates.engagement_level.map(|l| l.as_str()))
        .bind(intent_signals)
        .bind(&updates.personalized_notes)
        .bind(now_rfc3339())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update prospect: {}", e)))?;

        match prospect {
            Some(prospect) => Ok(prospect.into()),
            None => Err(AppError::NotFound(format!("Prospect not found: {}", id))),
        }
    }

    /// Prospects with a lead score of 80 or above, best first.
    pub async fn high_intent_prospects(&self) -> Result<Vec<Prospect>> {
        let prospects = sqlx::query_as::<_, ProspectEntity>(
            "SELECT * FROM prospects WHERE lead_score >= 80 ORDER BY lead_score DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!("Failed to list high-intent prospects: {}", e))
        })?;

        Ok(prospects.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prospect::{EngagementLevel, IntentSignals, ProspectStatus};
    use crate::infrastructure::db::connection::init_test_pool;

    pub(crate) fn sample_input(email: &str, company: &str, score: i64) -> ProspectInput {
        ProspectInput {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            company: company.to_string(),
            title: "CTO".to_string(),
            phone: None,
            linkedin_url: None,
            website: None,
            industry: Some("Technology".to_string()),
            company_size: None,
            revenue: None,
            location: None,
            lead_score: score,
            status: ProspectStatus::New,
            source: "manual".to_string(),
            engagement_level: EngagementLevel::from_score(score),
            intent_signals: IntentSignals::default(),
            personalized_notes: None,
        }
    }

    #[tokio::test]
    async fn high_intent_returns_only_80_plus_descending() {
        let repo = Repository::new(init_test_pool().await);

        repo.create_prospect(&sample_input("a@x.com", "X", 95))
            .await
            .unwrap();
        repo.create_prospect(&sample_input("b@y.com", "Y", 80))
            .await
            .unwrap();
        repo.create_prospect(&sample_input("c@z.com", "Z", 79))
            .await
            .unwrap();

        let high = repo.high_intent_prospects().await.unwrap();
        let scores: Vec<i64> = high.iter().map(|p| p.lead_score).collect();
        assert_eq!(scores, vec![95, 80]);
    }

    #[tokio::test]
    async fn update_is_partial() {
        let repo = Repository::new(init_test_pool().await);
        let created = repo
            .create_prospect(&sample_input("ada@acme.com", "Acme", 40))
            .await
            .unwrap();

        let updated = repo
            .update_prospect(
                created.id,
                &ProspectUpdate {
                    status: Some(ProspectStatus::Qualified),
                    lead_score: Some(88),
                    ..ProspectUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, ProspectStatus::Qualified);
        assert_eq!(updated.lead_score, 88);
        // Untouched fields survive.
        assert_eq!(updated.email, "ada@acme.com");
        assert_eq!(updated.company, "Acme");
    }

    #[tokio::test]
    async fn get_missing_prospect_is_not_found() {
        let repo = Repository::new(init_test_pool().await);
        let err = repo.get_prospect(999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
