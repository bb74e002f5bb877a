use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::activity::ActivityInput;
use crate::domain::error::{AppError, Result};
use crate::domain::prospect::ProspectInput;
use crate::infrastructure::csv::{decode_bytes, detect_data_source, map_row, CsvParser};
use crate::infrastructure::db::Repository;

const SUMMARY_ERROR_CAP: usize = 10;
const RESPONSE_ERROR_CAP: usize = 20;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub message: String,
    pub imported: usize,
    pub skipped: usize,
    pub total: usize,
    pub data_source: String,
    pub errors: Vec<String>,
}

/// Vendor-aware CSV ingestion: detect the source format from the header row,
/// map each data row to a prospect, skip duplicates, and log activities.
pub struct CsvImportUseCase {
    repo: Arc<Repository>,
}

impl CsvImportUseCase {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    pub async fn import(&self, bytes: &[u8]) -> Result<ImportSummary> {
        let content = decode_bytes(bytes);
        let parsed = CsvParser::parse_content_auto(&content)?;
        if parsed.rows.is_empty() {
            return Err(AppError::ValidationError(
                "CSV file is empty or could not be parsed".to_string(),
            ));
        }

        let source = detect_data_source(&parsed.headers);
        let label = source.label();
        tracing::info!(source = label, rows = parsed.rows.len(), "starting CSV import");

        // Duplicate check is against everything already stored plus rows
        // inserted earlier in this same file.
        let existing = self.repo.list_prospects().await?;
        let mut seen_emails: HashSet<String> = existing
            .iter()
            .map(|p| p.email.to_lowercase())
            .collect();
        let mut seen_identities: HashSet<(String, String, String)> = existing
            .iter()
            .map(|p| identity_key(&p.company, &p.first_name, &p.last_name))
            .collect();

        let mut imported = 0;
        let mut skipped = 0;
        let mut errors = Vec::new();

        for (index, row) in parsed.rows.iter().enumerate() {
            let row_number = index + 1;

            let input = match map_row(row, source) {
                Some(input) => input,
                None => {
                    errors.push(format!(
                        "Row {}: Could not map data to prospect format",
                        row_number
                    ));
                    skipped += 1;
                    continue;
                }
            };

            if input.first_name.is_empty()
                || input.last_name.is_empty()
                || input.email.is_empty()
                || input.company.is_empty()
            {
                errors.push(format!(
                    "Row {}: Missing required fields after mapping",
                    row_number
                ));
                skipped += 1;
                continue;
            }

            let email_key = input.email.to_lowercase();
            let identity =
                identity_key(&input.company, &input.first_name, &input.last_name);
            if seen_emails.contains(&email_key) || seen_identities.contains(&identity) {
                errors.push(format!(
                    "Row {}: Duplicate prospect ({})",
                    row_number, input.email
                ));
                skipped += 1;
                continue;
            }

            match self.repo.create_prospect(&input).await {
                Ok(prospect) => {
                    imported += 1;
                    seen_emails.insert(email_key);
                    seen_identities.insert(identity);
                    self.log_row_import(&input, prospect.id, label).await;
                }
                Err(e) => {
                    errors.push(format!("Row {}: {}", row_number, e));
                    skipped += 1;
                }
            }
        }

        let total = parsed.rows.len();
        self.repo
            .create_activity(&ActivityInput::new(
                "csv_import",
                format!(
                    "{} CSV import completed: {} prospects imported, {} skipped",
                    label, imported, skipped
                ),
                serde_json::json!({
                    "imported": imported,
                    "skipped": skipped,
                    "total": total,
                    "dataSource": label,
                    "errors": errors.iter().take(SUMMARY_ERROR_CAP).collect::<Vec<_>>(),
                }),
            ))
            .await?;

        errors.truncate(RESPONSE_ERROR_CAP);
        Ok(ImportSummary {
            message: format!("{} CSV upload completed", label),
            imported,
            skipped,
            total,
            data_source: label.to_string(),
            errors,
        })
    }

    /// Row-level activities are best effort; a logging failure never fails
    /// the import.
    async fn log_row_import(&self, input: &ProspectInput, prospect_id: i64, label: &str) {
        let activity = ActivityInput::new(
            "prospect_created",
            format!(
                "{} import: {} {} from {}",
                label, input.first_name, input.last_name, input.company
            ),
            serde_json::json!({
                "source": label.to_lowercase(),
                "email": input.email,
                "score": input.lead_score,
                "dataSource": label,
            }),
        )
        .for_prospect(prospect_id);

        if let Err(e) = self.repo.create_activity(&activity).await {
            tracing::warn!(error = %e, "failed to log import activity");
        }
    }
}

fn identity_key(company: &str, first: &str, last: &str) -> (String, String, String) {
    (
        company.to_lowercase(),
        first.to_lowercase(),
        last.to_lowercase(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::connection::init_test_pool;

    const APOLLO_CSV: &str = "\
first_name,last_name,email,company,title,linkedin_url
Jennifer,Wilson,j.wilson@techstartup.com,TechStartup Inc,VP of Marketing,https://linkedin.com/in/jenniferwilson
Robert,Martinez,r.martinez@growthcorp.io,GrowthCorp,Head of Growth,https://linkedin.com/in/robertmartinez
";

    async fn use_case() -> CsvImportUseCase {
        CsvImportUseCase::new(Arc::new(Repository::new(init_test_pool().await)))
    }

    #[tokio::test]
    async fn imports_apollo_rows_and_logs_activities() {
        let import = use_case().await;

        let summary = import.import(APOLLO_CSV.as_bytes()).await.unwrap();
        assert_eq!(summary.data_source, "Apollo");
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.message, "Apollo CSV upload completed");

        // Two row activities plus the import summary.
        let activities = import.repo.recent_activities(10).await.unwrap();
        assert_eq!(activities.len(), 3);
        assert_eq!(activities[0].kind, "csv_import");
    }

    #[tokio::test]
    async fn re_uploading_the_same_file_imports_nothing() {
        let import = use_case().await;

        import.import(APOLLO_CSV.as_bytes()).await.unwrap();
        let second = import.import(APOLLO_CSV.as_bytes()).await.unwrap();

        assert_eq!(second.imported, 0);
        assert_eq!(second.skipped, 2);
        assert!(second.errors[0].contains("Duplicate prospect"));
    }

    #[tokio::test]
    async fn duplicates_within_one_file_are_skipped() {
        let import = use_case().await;
        let csv = format!(
            "{}Jennifer,Wilson,j.wilson@techstartup.com,TechStartup Inc,VP of Marketing,\n",
            APOLLO_CSV
        );

        let summary = import.import(csv.as_bytes()).await.unwrap();
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 1);
    }

    #[tokio::test]
    async fn header_only_file_is_a_validation_error() {
        let import = use_case().await;
        let err = import
            .import(b"first_name,last_name,email,company,title,linkedin_url\n")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn unmappable_rows_are_reported_per_row() {
        let import = use_case().await;
        // Generic format, one row missing the company.
        let csv = "\
name,email,company
Jane Doe,jane@acme.com,Acme
John Roe,john@nowhere.com,
";
        let summary = import.import(csv.as_bytes()).await.unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 1);
        assert!(summary.errors[0].starts_with("Row 2:"));
    }
}
