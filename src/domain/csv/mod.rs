// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Value objects for CSV ingestion. No I/O, no async.

mod csv_row;
mod data_source;

pub use csv_row::{CsvField, CsvRow};
pub use data_source::DataSource;
