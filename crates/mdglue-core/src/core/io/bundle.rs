use crate::core::models::bundle::Bundle;
use crate::core::models::manifest::SimulationManifest;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum BundleLoadError {
    #[error("Bundle not found or unreadable at '{path}': {source}")]
    NotFound {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to deserialize bundle '{path}': {source}")]
    Deserialization {
        path: String,
        source: serde_json::Error,
    },
}

pub fn load_one(dir: &Path, file_name: &str) -> Result<Bundle, BundleLoadError> {
    let path = dir.join(file_name);
    let file = File::open(&path).map_err(|e| BundleLoadError::NotFound {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;

    let bundle: Bundle = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        if e.is_io() {
            BundleLoadError::NotFound {
                path: path.to_string_lossy().to_string(),
                source: e.into(),
            }
        } else {
            BundleLoadError::Deserialization {
                path: path.to_string_lossy().to_string(),
                source: e,
            }
        }
    })?;

    debug!(path = %path.display(), keys = ?bundle.keys(), "Loaded bundle.");
    Ok(bundle)
}

#[instrument(skip_all, fields(simulations = manifest.len()))]
pub fn load_many(
    manifest: &SimulationManifest,
    file_name: &str,
) -> Result<Vec<Bundle>, BundleLoadError> {
    manifest
        .paths()
        .iter()
        .map(|dir| load_one(dir, file_name))
        .collect()
}
