use crate::config::ReportConfig;
use crate::core::io::energy_csv::{EnergyTableError, write_energy_records};
use crate::core::io::report::parse_report;
use crate::core::models::energy::EnergyTable;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

pub use crate::core::io::energy_csv::read_energy_table;

/// Result of converting one report.
///
/// Conversion is a terminal, user-facing step, so failures to find, read, or write a file
/// are reported here as values rather than as errors. The `Display` form is the message
/// meant for the user.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum ConversionOutcome {
    Written { output_path: PathBuf, records: usize },
    InputNotFound { input_path: PathBuf },
    ReadFailed { input_path: PathBuf, reason: String },
    WriteFailed { output_path: PathBuf, reason: String },
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionOutcome::Written { .. })
    }

    pub fn output_path(&self) -> Option<&Path> {
        match self {
            ConversionOutcome::Written { output_path, .. } => Some(output_path.as_path()),
            _ => None,
        }
    }
}

impl fmt::Display for ConversionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionOutcome::Written { output_path, .. } => write!(
                f,
                "Successfully parsed data and saved to CSV file: {}",
                output_path.display()
            ),
            ConversionOutcome::InputNotFound { input_path } => write!(
                f,
                "Error: Input file not found at path: {}",
                input_path.display()
            ),
            ConversionOutcome::ReadFailed { input_path, reason } => write!(
                f,
                "Error reading input file {}: {}",
                input_path.display(),
                reason
            ),
            ConversionOutcome::WriteFailed {
                output_path,
                reason,
            } => write!(
                f,
                "Error writing CSV file to {}: {}",
                output_path.display(),
                reason
            ),
        }
    }
}

/// Parses the report at `input_path` and writes its records as CSV next to it, with the
/// extension replaced by `csv`.
pub fn convert(input_path: &Path) -> ConversionOutcome {
    convert_with(input_path, &ReportConfig::default())
}

#[instrument(skip_all, fields(input = %input_path.display()))]
pub fn convert_with(input_path: &Path, config: &ReportConfig) -> ConversionOutcome {
    let text = match std::fs::read_to_string(input_path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("Report not found.");
            return ConversionOutcome::InputNotFound {
                input_path: input_path.to_path_buf(),
            };
        }
        Err(e) => {
            warn!(error = %e, "Failed to read report.");
            return ConversionOutcome::ReadFailed {
                input_path: input_path.to_path_buf(),
                reason: e.to_string(),
            };
        }
    };

    let records = parse_report(&text);
    let output_path = config.table_path_for(input_path);

    match write_energy_records(&output_path, &records) {
        Ok(()) => {
            info!(
                records = records.len(),
                output = %output_path.display(),
                "Converted MM-PBSA report."
            );
            ConversionOutcome::Written {
                output_path,
                records: records.len(),
            }
        }
        Err(e) => {
            warn!(error = %e, "Failed to write energy table.");
            let reason = match e {
                EnergyTableError::Io { source, .. }
                | EnergyTableError::NotFound { source, .. } => source.to_string(),
                EnergyTableError::Csv { source, .. } => source.to_string(),
            };
            ConversionOutcome::WriteFailed {
                output_path,
                reason,
            }
        }
    }
}

/// Converts `<base_path>/<name>/<file_stem>.dat`.
pub fn convert_named(name: &str, base_path: &Path, file_stem: &str) -> ConversionOutcome {
    let config = ReportConfig::default().with_file_stem(file_stem);
    convert_named_with(&config, base_path, name)
}

pub fn convert_named_with(
    config: &ReportConfig,
    base_path: &Path,
    name: &str,
) -> ConversionOutcome {
    convert_with(&config.report_path(base_path, name), config)
}

pub fn load_named(
    name: &str,
    base_path: &Path,
    file_stem: &str,
) -> Result<EnergyTable, EnergyTableError> {
    let config = ReportConfig::default().with_file_stem(file_stem);
    load_named_with(&config, base_path, name)
}

pub fn load_named_with(
    config: &ReportConfig,
    base_path: &Path,
    name: &str,
) -> Result<EnergyTable, EnergyTableError> {
    read_energy_table(&config.table_path(base_path, name))
}
