// ============================================================
// CSV ROW TYPES
// ============================================================
// Data structures representing parsed CSV content

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single field in a CSV row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvField {
    /// Original field name (header)
    pub name: String,

    /// Cleaned field name (lower-cased, underscored)
    pub clean_name: String,

    /// Field value
    pub value: String,

    /// Whether the value is empty
    pub is_empty: bool,
}

impl CsvField {
    pub fn new(name: String, value: String) -> Self {
        let is_empty = value.trim().is_empty();
        let clean_name = Self::clean_field_name(&name);

        Self {
            name,
            clean_name,
            value,
            is_empty,
        }
    }

    /// Clean field name for lookups: lower-case, special characters and
    /// whitespace collapsed to single underscores.
    fn clean_field_name(name: &str) -> String {
        name.chars()
            .map(|c| {
                if c.is_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect::<String>()
            .split('_')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// A single row in a CSV file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvRow {
    /// Row index (0-based)
    pub index: usize,

    /// All fields in this row
    pub fields: Vec<CsvField>,

    /// Clean-name -> value map for non-empty fields
    pub field_map: HashMap<String, String>,
}

impl CsvRow {
    pub fn new(index: usize, fields: Vec<CsvField>) -> Self {
        let field_map = fields
            .iter()
            .filter(|f| !f.is_empty)
            .map(|f| (f.clean_name.clone(), f.value.clone()))
            .collect();

        Self {
            index,
            fields,
            field_map,
        }
    }

    /// Non-empty value under the given clean header name.
    pub fn value(&self, clean_name: &str) -> Option<&str> {
        self.field_map.get(clean_name).map(String::as_str)
    }

    /// First non-empty value found among several candidate header spellings.
    /// Vendor exports disagree on casing and word separators, so mappers try
    /// each known variant in order.
    pub fn first_value(&self, clean_names: &[&str]) -> Option<&str> {
        clean_names.iter().find_map(|name| self.value(name))
    }

    /// Like `first_value`, but owned and defaulting to an empty string.
    pub fn first_or_empty(&self, clean_names: &[&str]) -> String {
        self.first_value(clean_names).unwrap_or("").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_cleaning() {
        let field = CsvField::new("First Name".to_string(), "John".to_string());
        assert_eq!(field.clean_name, "first_name");

        let field = CsvField::new("AI  Interaction Score".to_string(), "72".to_string());
        assert_eq!(field.clean_name, "ai_interaction_score");
    }

    #[test]
    fn first_value_tries_spellings_in_order() {
        let row = CsvRow::new(
            0,
            vec![
                CsvField::new("Email Address".to_string(), "a@b.com".to_string()),
                CsvField::new("Company".to_string(), "Acme".to_string()),
                CsvField::new("Phone".to_string(), "".to_string()),
            ],
        );

        assert_eq!(row.first_value(&["email", "email_address"]), Some("a@b.com"));
        assert_eq!(row.first_or_empty(&["company_name", "company"]), "Acme");
        // Empty fields are not in the map at all.
        assert_eq!(row.value("phone"), None);
        assert_eq!(row.first_or_empty(&["missing"]), "");
    }
}
