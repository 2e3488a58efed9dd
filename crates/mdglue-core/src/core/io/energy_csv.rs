use crate::core::models::energy::{ENERGY_TABLE_HEADER, EnergyRecord, EnergyTable};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnergyTableError {
    #[error("Energy table not found at '{path}': {source}")]
    NotFound { path: String, source: io::Error },
    #[error("File I/O error for '{path}': {source}")]
    Io { path: String, source: io::Error },
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

/// Writes records as CSV to `writer`, header first.
///
/// The header is always written, so an empty record slice still produces a valid
/// one-line table.
pub fn write_records_to<W: Write>(writer: W, records: &[EnergyRecord]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(ENERGY_TABLE_HEADER)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn read_records_from<R: Read>(reader: R) -> Result<Vec<EnergyRecord>, csv::Error> {
    csv::Reader::from_reader(reader)
        .deserialize::<EnergyRecord>()
        .collect()
}

pub fn write_energy_records(
    path: &Path,
    records: &[EnergyRecord],
) -> Result<(), EnergyTableError> {
    let file = File::create(path).map_err(|e| EnergyTableError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    write_records_to(file, records).map_err(|e| EnergyTableError::Csv {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

/// Loads a persisted energy table, coercing the five value columns to `f64`.
///
/// `System` cells are matched case-insensitively, so `DELTA` or `complex` rows load;
/// any other system name fails the whole read with [`EnergyTableError::Csv`].
pub fn read_energy_table(path: &Path) -> Result<EnergyTable, EnergyTableError> {
    let file = File::open(path).map_err(|e| {
        let path = path.to_string_lossy().to_string();
        if e.kind() == io::ErrorKind::NotFound {
            EnergyTableError::NotFound { path, source: e }
        } else {
            EnergyTableError::Io { path, source: e }
        }
    })?;
    let records = read_records_from(file).map_err(|e| EnergyTableError::Csv {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    Ok(EnergyTable::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::energy::EnergySystem;
    use std::fs;
    use tempfile::tempdir;

    fn records() -> Vec<EnergyRecord> {
        vec![
            EnergyRecord {
                system: EnergySystem::Complex,
                component: "BOND".into(),
                average: 1636.5468,
                sd_prop: 26.4187,
                sd: 26.4187,
                sem_prop: 2.6419,
                sem: 2.6419,
            },
            EnergyRecord {
                system: EnergySystem::Delta,
                component: "1-4 EEL, corrected".into(),
                average: -32.5731,
                sd_prop: 4.229,
                sd: 4.229,
                sem_prop: 0.4229,
                sem: 0.4229,
            },
        ]
    }

    #[test]
    fn writes_fixed_header_then_rows() {
        let mut buffer = Vec::new();
        write_records_to(&mut buffer, &records()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("System,Energy_Component,Average,SD(Prop.),SD,SEM(Prop.),SEM")
        );
        assert_eq!(
            lines.next(),
            Some("Complex,BOND,1636.5468,26.4187,26.4187,2.6419,2.6419")
        );
        assert_eq!(
            lines.next(),
            Some("Delta,\"1-4 EEL, corrected\",-32.5731,4.229,4.229,0.4229,0.4229")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_record_list_writes_header_only() {
        let mut buffer = Vec::new();
        write_records_to(&mut buffer, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "System,Energy_Component,Average,SD(Prop.),SD,SEM(Prop.),SEM\n"
        );
    }

    #[test]
    fn file_round_trip_preserves_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("FINAL_RESULTS_MMPBSA.csv");
        write_energy_records(&path, &records()).unwrap();

        let table = read_energy_table(&path).unwrap();
        assert_eq!(table.records(), records().as_slice());
    }

    #[test]
    fn read_fails_with_not_found_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = read_energy_table(&dir.path().join("missing.csv"));
        assert!(matches!(result, Err(EnergyTableError::NotFound { .. })));
    }

    #[test]
    fn read_fails_for_non_numeric_value_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(
            &path,
            "System,Energy_Component,Average,SD(Prop.),SD,SEM(Prop.),SEM\nComplex,BOND,abc,1,1,1,1\n",
        )
        .unwrap();
        let result = read_energy_table(&path);
        assert!(matches!(result, Err(EnergyTableError::Csv { .. })));
    }

    #[test]
    fn system_column_is_read_case_insensitively() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mixed_case.csv");
        fs::write(
            &path,
            "System,Energy_Component,Average,SD(Prop.),SD,SEM(Prop.),SEM\n\
             complex,BOND,1,1,1,1,1\n\
             DELTA,TOTAL,-2,1,1,1,1\n",
        )
        .unwrap();

        let table = read_energy_table(&path).unwrap();
        assert_eq!(table.records()[0].system, EnergySystem::Complex);
        assert_eq!(table.records()[1].system, EnergySystem::Delta);
    }

    #[test]
    fn unknown_system_fails_the_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("solvent.csv");
        fs::write(
            &path,
            "System,Energy_Component,Average,SD(Prop.),SD,SEM(Prop.),SEM\nSolvent,BOND,1,1,1,1,1\n",
        )
        .unwrap();
        assert!(matches!(
            read_energy_table(&path),
            Err(EnergyTableError::Csv { .. })
        ));
    }

    #[test]
    fn write_fails_when_parent_directory_is_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.csv");
        let result = write_energy_records(&path, &records());
        assert!(matches!(result, Err(EnergyTableError::Io { .. })));
    }
}
