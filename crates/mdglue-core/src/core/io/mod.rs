//! Provides input/output functionality for analysis bundles and MM-PBSA reports.
//!
//! Bundles are read from JSON record stores, reports are scanned from plaintext, and
//! parsed energy records are written to and read back from CSV.

pub mod bundle;
pub mod energy_csv;
pub mod report;
