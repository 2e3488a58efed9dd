//! Data models for analysis series and free-energy decomposition results.
//!
//! - [`table`] - An ordered, equal-length set of numeric columns with row-index joins
//! - [`bundle`] - One simulation's analysis results keyed by [`bundle::AnalysisKey`]
//! - [`energy`] - Parsed MM-PBSA rows and the table they are persisted as
//! - [`manifest`] - The ordered list of simulation directories to process

pub mod bundle;
pub mod energy;
pub mod manifest;
pub mod table;
