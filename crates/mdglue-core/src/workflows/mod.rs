//! # Workflows Module
//!
//! User-facing entry points that compose the `core` building blocks.
//!
//! - **Series Aggregation** ([`aggregate`]) - Loads analysis bundles for a set of
//!   simulations and joins one named series from each into a single wide table, with
//!   presets for RMSD, radius of gyration, SASA and hydrogen-bond counts.
//! - **Report Conversion** ([`convert`]) - Turns MM-PBSA results reports into CSV energy
//!   tables and loads those tables back.
//!
//! Aggregation fails fast and propagates errors to the caller. Conversion instead reports
//! missing inputs and write failures as a [`convert::ConversionOutcome`] value.

pub mod aggregate;
pub mod convert;
