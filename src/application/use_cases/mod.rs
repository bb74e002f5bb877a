pub mod csv_import;
pub mod dashboard_metrics;
pub mod integration_sync;
pub mod lead_intel;
