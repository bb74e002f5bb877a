// ============================================================
// PROSPECT MAPPER
// ============================================================
// Map a parsed CSV row into the common prospect shape, per vendor

use chrono::Utc;

use crate::domain::csv::{CsvRow, DataSource};
use crate::domain::prospect::{EngagementLevel, IntentSignals, ProspectInput, ProspectStatus};

/// Map one CSV row to a prospect payload. Returns `None` when the row lacks
/// the identifying detail the vendor format requires; the import pipeline
/// counts those as skipped.
pub fn map_row(row: &CsvRow, source: DataSource) -> Option<ProspectInput> {
    match source {
        DataSource::ClayAi => map_clay_ai(row),
        DataSource::Rb2b => map_rb2b(row),
        DataSource::Apollo => Some(map_apollo(row)),
        DataSource::SmartLead => Some(map_smartlead(row)),
        DataSource::Generic => map_generic(row),
    }
}

fn map_clay_ai(row: &CsvRow) -> Option<ProspectInput> {
    let email = row.first_or_empty(&["email"]);
    let first_name = row.first_or_empty(&["first_name"]);
    let last_name = row.first_or_empty(&["last_name"]);
    let company = row.first_or_empty(&["company_name"]);
    let title = row.first_or_empty(&["job_title"]);

    if email.is_empty() && company.is_empty() {
        return None;
    }

    // Company-only records get a generic contact.
    let first_name = non_empty_or(first_name, "Contact");
    let last_name = non_empty_or(last_name, "Lead");
    let email = if email.is_empty() {
        placeholder_email(&company)
    } else {
        email
    };

    let lead_score = parse_score(row.first_value(&["ai_interaction_score"]));
    let raw_status = row.first_or_empty(&["lead_status"]);

    Some(ProspectInput {
        first_name,
        last_name,
        email,
        company,
        title,
        phone: None,
        linkedin_url: row
            .first_value(&["social_media_profile_url"])
            .map(str::to_string),
        website: None,
        industry: row.first_value(&["industry"]).map(str::to_string),
        company_size: row.first_value(&["company_size"]).map(parse_company_size),
        revenue: None,
        location: None,
        lead_score,
        status: ProspectStatus::from_vendor_label(&raw_status),
        source: DataSource::ClayAi.source_tag().to_string(),
        engagement_level: EngagementLevel::from_score(lead_score),
        intent_signals: IntentSignals {
            signals: vec![
                format!("Clay AI Score: {}", lead_score),
                format!("Status: {}", raw_status),
            ],
            reasoning: format!(
                "Imported from Clay AI with interaction score of {}",
                lead_score
            ),
        },
        personalized_notes: Some(format!(
            "Clay AI import - {} source on {}",
            row.first_or_empty(&["lead_source"]),
            today()
        )),
    })
}

fn map_rb2b(row: &CsvRow) -> Option<ProspectInput> {
    let company = row.first_or_empty(&["company_name"]);
    if company.is_empty() {
        return None;
    }

    // RB2B is company-focused; synthesize a generic decision-maker contact.
    let revenue = row.first_value(&["annual_revenue"]).map(parse_revenue);
    let company_size = row.first_value(&["company_size"]).map(parse_company_size);
    let social_score = parse_score(row.first_value(&["social_signal_score"]));
    let raw_status = row.first_or_empty(&["lead_status"]);

    Some(ProspectInput {
        first_name: "Business".to_string(),
        last_name: "Development".to_string(),
        email: placeholder_email(&company),
        company,
        title: "Decision Maker".to_string(),
        phone: None,
        linkedin_url: None,
        website: None,
        industry: row.first_value(&["industry"]).map(str::to_string),
        company_size: company_size.clone(),
        revenue: revenue.clone(),
        location: None,
        lead_score: social_score,
        status: ProspectStatus::from_vendor_label(&raw_status),
        source: DataSource::Rb2b.source_tag().to_string(),
        engagement_level: EngagementLevel::from_score(social_score),
        intent_signals: IntentSignals {
            signals: vec![
                format!("RB2B Social Score: {}", social_score),
                format!("Revenue: {}", revenue.as_deref().unwrap_or("Unknown")),
                format!("Size: {}", company_size.as_deref().unwrap_or("Unknown")),
            ],
            reasoning: format!(
                "RB2B company data with social signal score of {}",
                social_score
            ),
        },
        personalized_notes: Some(format!(
            "RB2B import - {} on {}",
            row.first_or_empty(&["lead_source"]),
            today()
        )),
    })
}

fn map_apollo(row: &CsvRow) -> ProspectInput {
    ProspectInput {
        first_name: row.first_or_empty(&["first_name"]),
        last_name: row.first_or_empty(&["last_name"]),
        email: row.first_or_empty(&["email"]),
        company: row.first_or_empty(&["company", "organization_name"]),
        title: row.first_or_empty(&["title", "job_title"]),
        phone: row.first_value(&["phone"]).map(str::to_string),
        linkedin_url: row.first_value(&["linkedin_url"]).map(str::to_string),
        website: row.first_value(&["website"]).map(str::to_string),
        industry: row.first_value(&["industry"]).map(str::to_string),
        company_size: row.first_value(&["company_size"]).map(parse_company_size),
        revenue: row.first_value(&["revenue"]).map(parse_revenue),
        location: row.first_value(&["location", "city"]).map(str::to_string),
        lead_score: 50,
        status: ProspectStatus::New,
        source: DataSource::Apollo.source_tag().to_string(),
        engagement_level: EngagementLevel::Medium,
        intent_signals: IntentSignals {
            signals: vec!["Apollo export".to_string()],
            reasoning: "Imported from Apollo database".to_string(),
        },
        personalized_notes: Some(format!("Apollo import on {}", today())),
    }
}

fn map_smartlead(row: &CsvRow) -> ProspectInput {
    let status = match row.first_value(&["status"]) {
        Some(raw) => ProspectStatus::from_vendor_label(raw),
        None => ProspectStatus::New,
    };

    ProspectInput {
        first_name: row.first_or_empty(&["first_name"]),
        last_name: row.first_or_empty(&["last_name"]),
        email: row.first_or_empty(&["email"]),
        company: row.first_or_empty(&["company"]),
        title: row.first_or_empty(&["title"]),
        phone: row.first_value(&["phone"]).map(str::to_string),
        linkedin_url: row.first_value(&["linkedin_url"]).map(str::to_string),
        website: None,
        industry: row.first_value(&["industry"]).map(str::to_string),
        company_size: row.first_value(&["company_size"]).map(parse_company_size),
        revenue: None,
        location: row.first_value(&["location"]).map(str::to_string),
        lead_score: 50,
        status,
        source: DataSource::SmartLead.source_tag().to_string(),
        engagement_level: EngagementLevel::Medium,
        intent_signals: IntentSignals {
            signals: vec!["SmartLead export".to_string()],
            reasoning: "Imported from SmartLead campaign".to_string(),
        },
        personalized_notes: Some(format!("SmartLead import on {}", today())),
    }
}

fn map_generic(row: &CsvRow) -> Option<ProspectInput> {
    let first_name = row.first_or_empty(&["firstname", "first_name"]);
    let last_name = row.first_or_empty(&["lastname", "last_name"]);
    let email = row.first_or_empty(&["email", "email_address"]);
    let company = row.first_or_empty(&["company", "company_name"]);
    let title = row.first_or_empty(&["title", "position", "job_title"]);

    // Require a company plus at least one identifying contact detail.
    if company.is_empty() || (first_name.is_empty() && last_name.is_empty() && email.is_empty()) {
        return None;
    }

    let email = if email.is_empty() {
        placeholder_email(&company)
    } else {
        email
    };

    Some(ProspectInput {
        first_name: non_empty_or(first_name, "Contact"),
        last_name: non_empty_or(last_name, "Lead"),
        email,
        company,
        title: non_empty_or(title, "Contact"),
        phone: row.first_value(&["phone"]).map(str::to_string),
        linkedin_url: row
            .first_value(&["linkedinurl", "linkedin_url"])
            .map(str::to_string),
        website: row.first_value(&["website"]).map(str::to_string),
        industry: row.first_value(&["industry"]).map(str::to_string),
        company_size: row
            .first_value(&["companysize", "company_size"])
            .map(parse_company_size),
        revenue: row.first_value(&["revenue"]).map(parse_revenue),
        location: row.first_value(&["location"]).map(str::to_string),
        lead_score: 50,
        status: ProspectStatus::New,
        source: DataSource::Generic.source_tag().to_string(),
        engagement_level: EngagementLevel::Low,
        intent_signals: IntentSignals {
            signals: vec!["CSV import".to_string()],
            reasoning: "Manually imported from CSV file".to_string(),
        },
        personalized_notes: Some(format!("CSV import on {}", today())),
    })
}

// --- helpers ---

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// `contact@<slug>.com` where the slug is the lower-cased company with
/// everything outside a-z0-9 removed.
pub fn placeholder_email(company: &str) -> String {
    let slug: String = company
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    format!("contact@{}.com", slug)
}

/// Vendor score column, defaulting to a neutral 50. Clamped into 0-100.
fn parse_score(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(50)
        .clamp(0, 100)
}

fn leading_int(s: &str) -> Option<i64> {
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Bucket a free-form company-size column into the coarse ranges the rest of
/// the product uses. Unrecognized values pass through unchanged.
pub fn parse_company_size(size: &str) -> String {
    let s = size.to_lowercase();
    let n = leading_int(&s);

    if s.contains("1-10") || s.contains("1-50") || n.map_or(false, |n| n <= 50) {
        "1-50".to_string()
    } else if s.contains("51-200") || s.contains("50-100") || n.map_or(false, |n| n > 50 && n <= 200)
    {
        "51-200".to_string()
    } else if s.contains("201-500")
        || s.contains("250-500")
        || n.map_or(false, |n| n > 200 && n <= 500)
    {
        "201-500".to_string()
    } else if s.contains("501-1000")
        || s.contains("500-1000")
        || n.map_or(false, |n| n > 500 && n <= 1000)
    {
        "501-1000".to_string()
    } else if s.contains("1000+") || s.contains("1001-5000") || n.map_or(false, |n| n > 1000) {
        "1000+".to_string()
    } else {
        size.to_string()
    }
}

/// Bucket a revenue column into display ranges. Checked in the original's
/// order, so the "1m" family is matched first.
pub fn parse_revenue(revenue: &str) -> String {
    let r = revenue.to_lowercase();

    if r.contains("1000000") || r.contains("1m") {
        "$1M-$10M".to_string()
    } else if r.contains("10000000") || r.contains("10m") {
        "$10M-$50M".to_string()
    } else if r.contains("50000000") || r.contains("50m") {
        "$50M-$100M".to_string()
    } else if r.contains("100000000") || r.contains("100m") {
        "$100M+".to_string()
    } else {
        revenue.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::csv::CsvField;

    fn row(pairs: &[(&str, &str)]) -> CsvRow {
        let fields = pairs
            .iter()
            .map(|(name, value)| CsvField::new(name.to_string(), value.to_string()))
            .collect();
        CsvRow::new(0, fields)
    }

    #[test]
    fn clay_row_maps_score_and_status() {
        let r = row(&[
            ("Lead ID", "cl_001"),
            ("First Name", "Dana"),
            ("Last Name", "Reyes"),
            ("Email", "dana@acme.io"),
            ("Company Name", "Acme"),
            ("Job Title", "CMO"),
            ("AI Interaction Score", "85"),
            ("Lead Status", "Reached Out"),
        ]);

        let p = map_row(&r, DataSource::ClayAi).unwrap();
        assert_eq!(p.lead_score, 85);
        assert_eq!(p.status, ProspectStatus::Contacted);
        assert_eq!(p.engagement_level, EngagementLevel::High);
        assert_eq!(p.source, "clay");
        assert!(p
            .intent_signals
            .signals
            .contains(&"Clay AI Score: 85".to_string()));
    }

    #[test]
    fn clay_company_only_row_gets_placeholder_contact() {
        let r = row(&[
            ("Company Name", "Blue Widget Co."),
            ("Job Title", ""),
            ("AI Interaction Score", ""),
        ]);

        let p = map_row(&r, DataSource::ClayAi).unwrap();
        assert_eq!(p.first_name, "Contact");
        assert_eq!(p.last_name, "Lead");
        assert_eq!(p.email, "contact@bluewidgetco.com");
        assert_eq!(p.lead_score, 50);
    }

    #[test]
    fn clay_row_with_no_email_and_no_company_is_dropped() {
        let r = row(&[("First Name", "Dana"), ("Job Title", "CMO")]);
        assert!(map_row(&r, DataSource::ClayAi).is_none());
    }

    #[test]
    fn rb2b_synthesizes_decision_maker() {
        let r = row(&[
            ("Company Name", "Enterprise Solutions Co"),
            ("Annual Revenue", "50m"),
            ("Social Signal Score", "74"),
            ("Company Size", "5000"),
        ]);

        let p = map_row(&r, DataSource::Rb2b).unwrap();
        assert_eq!(p.first_name, "Business");
        assert_eq!(p.last_name, "Development");
        assert_eq!(p.title, "Decision Maker");
        assert_eq!(p.email, "contact@enterprisesolutionsco.com");
        assert_eq!(p.revenue.as_deref(), Some("$50M-$100M"));
        assert_eq!(p.company_size.as_deref(), Some("1000+"));
        assert_eq!(p.lead_score, 74);
    }

    #[test]
    fn rb2b_without_company_is_dropped() {
        let r = row(&[("Social Signal Score", "90")]);
        assert!(map_row(&r, DataSource::Rb2b).is_none());
    }

    #[test]
    fn apollo_maps_contact_columns() {
        let r = row(&[
            ("first_name", "Robert"),
            ("last_name", "Martinez"),
            ("email", "r.martinez@growthcorp.io"),
            ("organization_name", "GrowthCorp"),
            ("title", "Head of Growth"),
            ("linkedin_url", "https://linkedin.com/in/robertmartinez"),
            ("city", "Austin"),
        ]);

        let p = map_row(&r, DataSource::Apollo).unwrap();
        assert_eq!(p.company, "GrowthCorp");
        assert_eq!(p.location.as_deref(), Some("Austin"));
        assert_eq!(p.lead_score, 50);
        assert_eq!(p.source, "apollo");
    }

    #[test]
    fn generic_row_without_company_is_dropped() {
        let r = row(&[("First Name", "Solo"), ("Email", "solo@nowhere.com")]);
        assert!(map_row(&r, DataSource::Generic).is_none());
    }

    #[test]
    fn generic_company_with_contact_gets_synthesized_email() {
        let r = row(&[("Company", "Röd & Blå AB"), ("First Name", "Åsa")]);

        let p = map_row(&r, DataSource::Generic).unwrap();
        assert_eq!(p.last_name, "Lead");
        // Non-ASCII characters are stripped from the slug.
        assert_eq!(p.email, "contact@rdblab.com");
    }

    #[test]
    fn company_size_buckets() {
        assert_eq!(parse_company_size("25"), "1-50");
        assert_eq!(parse_company_size("51-200 employees"), "51-200");
        assert_eq!(parse_company_size("250-500"), "201-500");
        assert_eq!(parse_company_size("750"), "501-1000");
        assert_eq!(parse_company_size("5000"), "1000+");
        assert_eq!(parse_company_size("boutique"), "boutique");
    }

    #[test]
    fn revenue_buckets() {
        assert_eq!(parse_revenue("1m"), "$1M-$10M");
        assert_eq!(parse_revenue("10M ARR"), "$10M-$50M");
        assert_eq!(parse_revenue("100m"), "$100M+");
        assert_eq!(parse_revenue("pre-revenue"), "pre-revenue");
    }

    #[test]
    fn score_is_clamped_and_defaulted() {
        assert_eq!(parse_score(Some("130")), 100);
        assert_eq!(parse_score(Some("-5")), 0);
        assert_eq!(parse_score(Some("not a number")), 50);
        assert_eq!(parse_score(None), 50);
    }
}
