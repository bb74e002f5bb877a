pub mod activity;
pub mod csv;
pub mod error;
pub mod integration;
pub mod prospect;
pub mod scoring_rule;
pub mod sequence;
