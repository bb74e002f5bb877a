// ============================================================
// SOURCE DETECTOR
// ============================================================
// Guess which vendor export format produced a CSV from its header row

use crate::domain::csv::DataSource;

/// Classify a CSV's vendor from its headers.
///
/// Fixed priority chain of substring tests against the lower-cased,
/// comma-joined header list. First match wins; no match falls back to a
/// generic CSV.
pub fn detect_data_source(headers: &[String]) -> DataSource {
    let header_str = headers.join(",").to_lowercase();

    // Clay AI: scored leads with individual contact detail
    if header_str.contains("lead id")
        && header_str.contains("job title")
        && header_str.contains("ai interaction score")
    {
        return DataSource::ClayAi;
    }

    // RB2B: company-focused visitor data without individual contacts
    if header_str.contains("company name")
        && header_str.contains("social signal score")
        && header_str.contains("annual revenue")
        && !header_str.contains("first name")
    {
        return DataSource::Rb2b;
    }

    // Apollo: typical contact-export column names
    if header_str.contains("linkedin_url") || header_str.contains("apollo") {
        return DataSource::Apollo;
    }

    // SmartLead: campaign exports
    if header_str.contains("smartlead") || header_str.contains("campaign_id") {
        return DataSource::SmartLead;
    }

    DataSource::Generic
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn detects_clay_ai() {
        let h = headers(&[
            "Lead ID",
            "First Name",
            "Last Name",
            "Email",
            "Company Name",
            "Job Title",
            "AI Interaction Score",
            "Lead Status",
        ]);
        assert_eq!(detect_data_source(&h), DataSource::ClayAi);
    }

    #[test]
    fn detects_rb2b() {
        let h = headers(&[
            "Company Name",
            "Industry",
            "Company Size",
            "Annual Revenue",
            "Social Signal Score",
            "Lead Status",
        ]);
        assert_eq!(detect_data_source(&h), DataSource::Rb2b);
    }

    #[test]
    fn rb2b_signature_with_first_name_is_not_rb2b() {
        // Individual contact detail disqualifies the company-only format.
        let h = headers(&[
            "Company Name",
            "First Name",
            "Annual Revenue",
            "Social Signal Score",
        ]);
        assert_ne!(detect_data_source(&h), DataSource::Rb2b);
    }

    #[test]
    fn detects_apollo() {
        let h = headers(&["first_name", "last_name", "email", "company", "linkedin_url"]);
        assert_eq!(detect_data_source(&h), DataSource::Apollo);
    }

    #[test]
    fn detects_smartlead() {
        let h = headers(&["first_name", "email", "company", "campaign_id", "status"]);
        assert_eq!(detect_data_source(&h), DataSource::SmartLead);
    }

    #[test]
    fn falls_back_to_generic_csv() {
        let h = headers(&["First Name", "Last Name", "Email", "Company"]);
        assert_eq!(detect_data_source(&h), DataSource::Generic);
    }

    #[test]
    fn clay_wins_over_apollo_when_both_match() {
        // Priority chain: Clay's signature is checked before Apollo's.
        let h = headers(&[
            "Lead ID",
            "Job Title",
            "AI Interaction Score",
            "linkedin_url",
        ]);
        assert_eq!(detect_data_source(&h), DataSource::ClayAi);
    }
}
