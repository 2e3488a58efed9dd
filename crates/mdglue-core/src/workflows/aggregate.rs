use crate::config::BundleConfig;
use crate::core::io::bundle::{BundleLoadError, load_many};
use crate::core::models::bundle::{AnalysisKey, Bundle};
use crate::core::models::manifest::{ManifestError, SimulationManifest};
use crate::core::models::table::{Table, TableError};
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("Analysis key '{key}' not found in bundle {bundle_index}")]
    KeyNotFound { key: String, bundle_index: usize },

    #[error("Column '{column}' not found in series '{key}' of bundle {bundle_index}")]
    ColumnNotFound {
        key: String,
        column: String,
        bundle_index: usize,
    },

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    BundleLoad(#[from] BundleLoadError),
}

/// Looks up the series stored under `key` in every bundle, in bundle order.
pub fn extract<'a>(
    key: &str,
    bundles: &'a [Bundle],
) -> Result<Vec<&'a Table>, AggregationError> {
    bundles
        .iter()
        .enumerate()
        .map(|(bundle_index, bundle)| {
            bundle.get(key).ok_or_else(|| AggregationError::KeyNotFound {
                key: key.to_string(),
                bundle_index,
            })
        })
        .collect()
}

/// Selects `columns` from the `key` series of every bundle and joins the selections side
/// by side.
///
/// The result has `bundles.len() * columns.len()` columns, grouped per bundle in bundle
/// order, and as many rows as the longest selection; shorter selections are padded with
/// [`Table::FILL_VALUE`].
#[instrument(skip_all, fields(key = key, bundles = bundles.len()))]
pub fn select_and_concat<S: AsRef<str>>(
    key: &str,
    bundles: &[Bundle],
    columns: &[S],
) -> Result<Table, AggregationError> {
    let series = extract(key, bundles)?;

    let selections = series
        .into_iter()
        .enumerate()
        .map(|(bundle_index, table)| {
            table.select(columns).map_err(|e| match e {
                TableError::ColumnNotFound { label } => AggregationError::ColumnNotFound {
                    key: key.to_string(),
                    column: label,
                    bundle_index,
                },
                other => AggregationError::Table(other),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let joined = Table::hconcat(selections);
    info!(
        rows = joined.n_rows(),
        columns = joined.n_cols(),
        "Aggregated series."
    );
    Ok(joined)
}

fn load_preset(key: AnalysisKey, bundles: &[Bundle]) -> Result<Table, AggregationError> {
    select_and_concat(key.as_str(), bundles, &key.default_columns())
}

pub fn load_rmsd(bundles: &[Bundle]) -> Result<Table, AggregationError> {
    load_preset(AnalysisKey::Rmsd, bundles)
}

pub fn load_rg(bundles: &[Bundle]) -> Result<Table, AggregationError> {
    load_preset(AnalysisKey::Rg, bundles)
}

pub fn load_sasa(bundles: &[Bundle]) -> Result<Table, AggregationError> {
    load_preset(AnalysisKey::Sasa, bundles)
}

pub fn load_hbond(bundles: &[Bundle]) -> Result<Table, AggregationError> {
    load_preset(AnalysisKey::Hbond, bundles)
}

/// Reads the manifest CSV at `manifest_path` and loads one bundle per listed simulation
/// directory.
pub fn load_bundles(
    manifest_path: &Path,
    config: &BundleConfig,
) -> Result<Vec<Bundle>, AggregationError> {
    let manifest = SimulationManifest::from_csv_path(manifest_path, &config.path_column)?;
    info!(
        simulations = manifest.len(),
        manifest = %manifest_path.display(),
        "Loading analysis bundles."
    );
    Ok(load_many(&manifest, &config.file_name)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::table::Column;
    use std::fs;
    use tempfile::tempdir;

    fn series(key: &str, time: Vec<f64>, values: Vec<f64>) -> Table {
        Table::new(vec![Column::new("time", time), Column::new(key, values)]).unwrap()
    }

    fn rmsd_bundle(values: Vec<f64>) -> Bundle {
        let time = (0..values.len()).map(|i| i as f64 * 10.0).collect();
        Bundle::new().with_series(AnalysisKey::Rmsd, series("rmsd", time, values))
    }

    mod extraction {
        use super::*;

        #[test]
        fn extract_returns_one_table_per_bundle() {
            let bundles = vec![rmsd_bundle(vec![1.0]), rmsd_bundle(vec![2.0, 3.0])];
            let tables = extract("rmsd", &bundles).unwrap();
            assert_eq!(tables.len(), 2);
            assert_eq!(tables[1].n_rows(), 2);
        }

        #[test]
        fn extract_names_the_bundle_missing_the_key() {
            let bundles = vec![
                rmsd_bundle(vec![1.0]),
                Bundle::new().with_series(AnalysisKey::Rg, series("rg", vec![0.0], vec![1.0])),
            ];
            let result = extract("rmsd", &bundles);
            assert!(matches!(
                result,
                Err(AggregationError::KeyNotFound { bundle_index: 1, .. })
            ));
        }

        #[test]
        fn extract_reaches_extension_keys() {
            let extra = Table::new(vec![Column::new("n", vec![4.0])]).unwrap();
            let bundles = vec![Bundle::new().with_extension("contacts", extra)];
            assert_eq!(extract("contacts", &bundles).unwrap()[0].n_cols(), 1);
        }
    }

    mod concatenation {
        use super::*;

        #[test]
        fn column_count_is_bundles_times_columns() {
            let bundles = vec![
                rmsd_bundle(vec![0.1, 0.2, 0.3]),
                rmsd_bundle(vec![0.4, 0.5, 0.6]),
                rmsd_bundle(vec![0.7, 0.8, 0.9]),
            ];
            let table = select_and_concat("rmsd", &bundles, &["time", "rmsd"]).unwrap();
            assert_eq!(table.n_cols(), 6);
            assert_eq!(table.n_rows(), 3);
            assert_eq!(table.row(0), Some(vec![0.0, 0.1, 0.0, 0.4, 0.0, 0.7]));
        }

        #[test]
        fn rows_follow_first_bundle_and_pad_shorter_bundles() {
            let bundles = vec![rmsd_bundle(vec![0.1, 0.2, 0.3]), rmsd_bundle(vec![0.9])];
            let table = load_rmsd(&bundles).unwrap();

            assert_eq!(table.n_rows(), 3);
            assert_eq!(table.value(2, 1), Some(0.3));
            assert_eq!(table.value(0, 3), Some(0.9));
            assert!(table.value(1, 3).unwrap().is_nan());
            assert!(table.value(2, 2).unwrap().is_nan());
        }

        #[test]
        fn missing_column_names_key_column_and_bundle() {
            let bundles = vec![rmsd_bundle(vec![0.1])];
            let result = select_and_concat("rmsd", &bundles, &["time", "rmsf"]);
            match result {
                Err(AggregationError::ColumnNotFound {
                    key,
                    column,
                    bundle_index,
                }) => {
                    assert_eq!(key, "rmsd");
                    assert_eq!(column, "rmsf");
                    assert_eq!(bundle_index, 0);
                }
                other => panic!("expected ColumnNotFound, got {:?}", other),
            }
        }

        #[test]
        fn presets_select_time_and_series_columns() {
            let bundle = Bundle::new()
                .with_series(AnalysisKey::Rg, series("rg", vec![0.0, 1.0], vec![1.5, 1.6]))
                .with_series(AnalysisKey::Sasa, series("sasa", vec![0.0], vec![120.0]))
                .with_series(AnalysisKey::Hbond, series("hbond", vec![0.0], vec![7.0]));
            let bundles = vec![bundle];

            let rg = load_rg(&bundles).unwrap();
            assert_eq!(rg.labels().collect::<Vec<_>>(), vec!["time", "rg"]);
            assert_eq!(load_sasa(&bundles).unwrap().value(0, 1), Some(120.0));
            assert_eq!(load_hbond(&bundles).unwrap().value(0, 1), Some(7.0));
            assert!(matches!(
                load_rmsd(&bundles),
                Err(AggregationError::KeyNotFound { .. })
            ));
        }

        #[test]
        fn no_bundles_yield_an_empty_table() {
            let table = load_rmsd(&[]).unwrap();
            assert_eq!(table.n_cols(), 0);
            assert_eq!(table.n_rows(), 0);
        }
    }

    #[test]
    fn load_bundles_reads_manifest_then_bundles() {
        let root = tempdir().unwrap();
        let sim = root.path().join("sim1");
        fs::create_dir(&sim).unwrap();
        fs::write(
            sim.join("ana.json"),
            r#"{"hbond": {"columns": [
                {"label": "time", "values": [0.0, 1.0]},
                {"label": "hbond", "values": [3.0, 4.0]}
            ]}}"#,
        )
        .unwrap();
        let manifest_path = root.path().join("sims.csv");
        fs::write(&manifest_path, format!("PATH\n{}\n", sim.display())).unwrap();

        let bundles = load_bundles(&manifest_path, &BundleConfig::default()).unwrap();
        let table = load_hbond(&bundles).unwrap();
        assert_eq!(table.column("hbond").unwrap().values, vec![3.0, 4.0]);
    }

    #[test]
    fn load_bundles_propagates_missing_bundle() {
        let root = tempdir().unwrap();
        let manifest_path = root.path().join("sims.csv");
        fs::write(
            &manifest_path,
            format!("PATH\n{}\n", root.path().join("ghost").display()),
        )
        .unwrap();

        let result = load_bundles(&manifest_path, &BundleConfig::default());
        assert!(matches!(
            result,
            Err(AggregationError::BundleLoad(BundleLoadError::NotFound { .. }))
        ));
    }
}
