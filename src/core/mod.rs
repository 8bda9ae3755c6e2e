//! Core data types: Hi-C pair records, event classification, and the
//! filtering report.

pub mod pair;
pub mod report;
