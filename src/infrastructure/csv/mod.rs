// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Parsing, vendor detection, and row-to-prospect mapping

mod csv_parser;
mod prospect_mapper;
mod source_detector;

pub use csv_parser::{decode_bytes, CsvParser, ParsedCsv};
pub use prospect_mapper::{map_row, placeholder_email};
pub use source_detector::detect_data_source;
