use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_BUNDLE_FILE_NAME: &str = "ana.json";
pub const DEFAULT_PATH_COLUMN: &str = "PATH";
pub const DEFAULT_REPORT_FILE_STEM: &str = "FINAL_RESULTS_MMPBSA";
pub const DEFAULT_REPORT_EXTENSION: &str = "dat";
pub const DEFAULT_TABLE_EXTENSION: &str = "csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

/// Where per-simulation bundles live and how the manifest names their directories.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct BundleConfig {
    pub file_name: String,
    pub path_column: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_BUNDLE_FILE_NAME.to_string(),
            path_column: DEFAULT_PATH_COLUMN.to_string(),
        }
    }
}

/// Naming of MM-PBSA reports and their converted tables.
///
/// Both files share one stem inside a per-run directory:
/// `<base>/<name>/<file_stem>.<report_extension>` is converted into
/// `<base>/<name>/<file_stem>.<table_extension>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ReportConfig {
    pub file_stem: String,
    pub report_extension: String,
    pub table_extension: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            file_stem: DEFAULT_REPORT_FILE_STEM.to_string(),
            report_extension: DEFAULT_REPORT_EXTENSION.to_string(),
            table_extension: DEFAULT_TABLE_EXTENSION.to_string(),
        }
    }
}

impl ReportConfig {
    pub fn with_file_stem(mut self, stem: impl Into<String>) -> Self {
        self.file_stem = stem.into();
        self
    }

    fn stem_path(&self, base_path: &Path, name: &str) -> PathBuf {
        base_path.join(name).join(&self.file_stem)
    }

    pub fn report_path(&self, base_path: &Path, name: &str) -> PathBuf {
        append_extension(self.stem_path(base_path, name), &self.report_extension)
    }

    pub fn table_path(&self, base_path: &Path, name: &str) -> PathBuf {
        append_extension(self.stem_path(base_path, name), &self.table_extension)
    }

    /// Derives the converted table path for a report by swapping its extension.
    pub fn table_path_for(&self, report_path: &Path) -> PathBuf {
        report_path.with_extension(&self.table_extension)
    }
}

// `Path::with_extension` would clobber a dotted stem such as `results.v2`.
fn append_extension(path: PathBuf, extension: &str) -> PathBuf {
    let mut raw = path.into_os_string();
    raw.push(".");
    raw.push(extension);
    PathBuf::from(raw)
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub bundle: BundleConfig,
    pub report: ReportConfig,
}

impl AnalysisConfig {
    /// Loads a configuration from a TOML file. Missing tables and keys fall back to the
    /// defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config: AnalysisConfig = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(&'static str, &str); 5] = [
            ("bundle.file-name", &self.bundle.file_name),
            ("bundle.path-column", &self.bundle.path_column),
            ("report.file-stem", &self.report.file_stem),
            ("report.report-extension", &self.report.report_extension),
            ("report.table-extension", &self.report.table_extension),
        ];
        for (parameter, value) in checks {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidParameter {
                    parameter,
                    reason: "must not be empty".to_string(),
                });
            }
        }
        for (parameter, value) in [
            ("report.report-extension", &self.report.report_extension),
            ("report.table-extension", &self.report.table_extension),
        ] {
            if value.starts_with('.') {
                return Err(ConfigError::InvalidParameter {
                    parameter,
                    reason: format!("extension '{}' must not start with a dot", value),
                });
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    bundle_file_name: Option<String>,
    path_column: Option<String>,
    report_file_stem: Option<String>,
    report_extension: Option<String>,
    table_extension: Option<String>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bundle_file_name(mut self, name: impl Into<String>) -> Self {
        self.bundle_file_name = Some(name.into());
        self
    }
    pub fn path_column(mut self, column: impl Into<String>) -> Self {
        self.path_column = Some(column.into());
        self
    }
    pub fn report_file_stem(mut self, stem: impl Into<String>) -> Self {
        self.report_file_stem = Some(stem.into());
        self
    }
    pub fn report_extension(mut self, ext: impl Into<String>) -> Self {
        self.report_extension = Some(ext.into());
        self
    }
    pub fn table_extension(mut self, ext: impl Into<String>) -> Self {
        self.table_extension = Some(ext.into());
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let bundle_defaults = BundleConfig::default();
        let report_defaults = ReportConfig::default();
        let config = AnalysisConfig {
            bundle: BundleConfig {
                file_name: self.bundle_file_name.unwrap_or(bundle_defaults.file_name),
                path_column: self.path_column.unwrap_or(bundle_defaults.path_column),
            },
            report: ReportConfig {
                file_stem: self.report_file_stem.unwrap_or(report_defaults.file_stem),
                report_extension: self
                    .report_extension
                    .unwrap_or(report_defaults.report_extension),
                table_extension: self
                    .table_extension
                    .unwrap_or(report_defaults.table_extension),
            },
        };
        config.validate()?;
        Ok(config)
    }
}
