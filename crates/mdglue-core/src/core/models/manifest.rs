use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationManifest {
    paths: Vec<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Manifest '{path}' has no '{column}' column")]
    MissingColumn { path: String, column: String },
}

impl SimulationManifest {
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_csv_path(path: &Path, column: &str) -> Result<Self, ManifestError> {
        let csv_err = |e: csv::Error| ManifestError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(csv_err)?;

        let index = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| ManifestError::MissingColumn {
                path: path.to_string_lossy().to_string(),
                column: column.to_string(),
            })?;

        let mut paths = Vec::new();
        for result in reader.records() {
            let record = result.map_err(csv_err)?;
            if let Some(value) = record.get(index) {
                paths.push(PathBuf::from(value));
            }
        }
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
