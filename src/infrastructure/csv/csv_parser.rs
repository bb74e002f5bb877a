// ============================================================
// CSV PARSER
// ============================================================
// Parse uploaded CSV bytes with encoding and delimiter detection

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::csv::{CsvField, CsvRow};
use crate::domain::error::AppError;

/// Parsed CSV: original header row plus typed rows.
#[derive(Debug)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

/// CSV parser tuned for vendor exports
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse CSV content from a string
    pub fn parse_content(&self, content: &str) -> Result<ParsedCsv, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        let mut rows = Vec::new();
        let mut index = 0;

        for result in reader.records() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            rows.push(self.parse_row(index, &headers, &record));
            index += 1;
        }

        Ok(ParsedCsv {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        })
    }

    /// Parse with automatic delimiter detection over a leading sample.
    pub fn parse_content_auto(content: &str) -> Result<ParsedCsv, AppError> {
        let sample: String = content.chars().take(4096).collect();
        let delimiter = Self::detect_delimiter(&sample);
        Self::default().with_delimiter(delimiter).parse_content(content)
    }

    fn parse_row(&self, index: usize, headers: &StringRecord, record: &StringRecord) -> CsvRow {
        let fields = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = record.get(idx).unwrap_or("").to_string();
                CsvField::new(header.to_string(), value)
            })
            .collect();

        CsvRow::new(index, fields)
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            let sample_lines: Vec<_> = content.lines().take(10).collect();

            if sample_lines.is_empty() {
                continue;
            }

            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.chars().filter(|&c| c as u8 == delimiter).count())
                .collect();

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

/// Decode uploaded bytes to text: UTF-8 first, Windows-1252 fallback.
/// Vendor exports from Windows tooling are routinely not UTF-8.
pub fn decode_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(content) => content.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_csv() {
        let content = "name,age,city\nAlice,30,NYC\nBob,25,LA";
        let parser = CsvParser::new();
        let parsed = parser.parse_content(content).unwrap();

        assert_eq!(parsed.headers, vec!["name", "age", "city"]);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].fields.len(), 3);
        assert_eq!(parsed.rows[0].fields[0].clean_name, "name");
        assert_eq!(parsed.rows[0].fields[0].value, "Alice");
    }

    #[test]
    fn detect_delimiter_variants() {
        assert_eq!(CsvParser::detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(CsvParser::detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(CsvParser::detect_delimiter("a\tb\tc\nd\te\tf"), b'\t');
    }

    #[test]
    fn auto_detect_parses_semicolon_file() {
        let content = "name;company\nAlice;Acme\nBob;Globex";
        let parsed = CsvParser::parse_content_auto(content).unwrap();
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[1].value("company"), Some("Globex"));
    }

    #[test]
    fn decode_handles_latin1_bytes() {
        // "Müller" in Windows-1252
        let bytes = b"name\nM\xfcller";
        let content = decode_bytes(bytes);
        assert!(content.contains("Müller"));

        let utf8 = "name\nMüller".as_bytes();
        assert!(decode_bytes(utf8).contains("Müller"));
    }
}
