//! # mdglue
//!
//! Glue utilities for molecular-dynamics post-processing.
//!
//! The library covers two independent pipelines that share no state:
//!
//! - **Series aggregation.** Per-simulation analysis bundles (RMSD, radius of gyration,
//!   SASA, hydrogen-bond counts, ...) are loaded from a set of simulation directories and
//!   a named series is column-selected from each one and concatenated side by side into a
//!   single wide [`Table`](core::models::table::Table).
//!
//! - **Report conversion.** The plaintext free-energy decomposition report written by an
//!   MM-PBSA run is scanned into per-system sections (Complex, Receptor, Ligand, Delta),
//!   each data row is tokenized into an
//!   [`EnergyRecord`](core::models::energy::EnergyRecord), and the records are persisted
//!   as CSV next to the source report.
//!
//! ## Layout
//!
//! - **[`core`]: The Foundation.** Stateless data models and the readers, writers and
//!   parsers that move them between disk and memory.
//! - **[`config`]: Layout configuration.** File names, extensions and column names that
//!   locate inputs and outputs on disk, loadable from TOML.
//! - **[`workflows`]: The Public API.** Entry points that compose the `core` pieces into
//!   complete operations.

pub mod config;
pub mod core;
pub mod workflows;
