use serde::{Deserialize, Serialize};
use std::fmt;

/// Known vendor export formats a CSV upload can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    ClayAi,
    Rb2b,
    Apollo,
    SmartLead,
    /// Fallback when no vendor signature matches.
    Generic,
}

impl DataSource {
    /// Human-facing label, as shown in import summaries.
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::ClayAi => "Clay AI",
            DataSource::Rb2b => "RB2B",
            DataSource::Apollo => "Apollo",
            DataSource::SmartLead => "SmartLead",
            DataSource::Generic => "CSV",
        }
    }

    /// Short tag stored on the prospect's `source` column.
    pub fn source_tag(&self) -> &'static str {
        match self {
            DataSource::ClayAi => "clay",
            DataSource::Rb2b => "rb2b",
            DataSource::Apollo => "apollo",
            DataSource::SmartLead => "smartlead",
            DataSource::Generic => "csv",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
