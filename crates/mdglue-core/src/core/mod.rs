//! # Core Module
//!
//! Stateless building blocks shared by the workflows.
//!
//! - **Data Models** ([`models`]) - Numeric tables, analysis bundles, energy records and
//!   simulation manifests
//! - **File I/O** ([`io`]) - Bundle loading, MM-PBSA report parsing and CSV persistence

pub mod io;
pub mod models;
