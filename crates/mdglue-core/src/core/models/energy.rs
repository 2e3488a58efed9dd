use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;

pub const ENERGY_TABLE_HEADER: [&str; 7] = [
    "System",
    "Energy_Component",
    "Average",
    "SD(Prop.)",
    "SD",
    "SEM(Prop.)",
    "SEM",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EnergySystem {
    Complex,
    Receptor,
    Ligand,
    Delta,
}

impl EnergySystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergySystem::Complex => "Complex",
            EnergySystem::Receptor => "Receptor",
            EnergySystem::Ligand => "Ligand",
            EnergySystem::Delta => "Delta",
        }
    }

    /// Normalizes a system name, either a section label found in a report or the
    /// `System` cell of a persisted table.
    ///
    /// Any label mentioning `delta` (e.g. `ProteinA-ProteinB Delta`) is a [`Delta`]
    /// section. Otherwise the text before the first colon names the system. Matching is
    /// case-insensitive.
    ///
    /// [`Delta`]: EnergySystem::Delta
    pub fn from_label(label: &str) -> Option<Self> {
        if label.to_ascii_lowercase().contains("delta") {
            return Some(EnergySystem::Delta);
        }
        let head = label.split(':').next().unwrap_or(label).trim();
        [
            EnergySystem::Complex,
            EnergySystem::Receptor,
            EnergySystem::Ligand,
        ]
        .into_iter()
        .find(|system| system.as_str().eq_ignore_ascii_case(head))
    }
}

impl<'de> Deserialize<'de> for EnergySystem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        EnergySystem::from_label(&label).ok_or_else(|| {
            de::Error::unknown_variant(&label, &["Complex", "Receptor", "Ligand", "Delta"])
        })
    }
}

impl fmt::Display for EnergySystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a free-energy decomposition table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyRecord {
    #[serde(rename = "System")]
    pub system: EnergySystem,
    #[serde(rename = "Energy_Component")]
    pub component: String,
    #[serde(rename = "Average")]
    pub average: f64,
    #[serde(rename = "SD(Prop.)")]
    pub sd_prop: f64,
    #[serde(rename = "SD")]
    pub sd: f64,
    #[serde(rename = "SEM(Prop.)")]
    pub sem_prop: f64,
    #[serde(rename = "SEM")]
    pub sem: f64,
}

impl EnergyRecord {
    pub fn field(&self, field: EnergyField) -> f64 {
        match field {
            EnergyField::Average => self.average,
            EnergyField::SdProp => self.sd_prop,
            EnergyField::Sd => self.sd,
            EnergyField::SemProp => self.sem_prop,
            EnergyField::Sem => self.sem,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnergyField {
    Average,
    SdProp,
    Sd,
    SemProp,
    Sem,
}

impl EnergyField {
    pub const ALL: [EnergyField; 5] = [
        EnergyField::Average,
        EnergyField::SdProp,
        EnergyField::Sd,
        EnergyField::SemProp,
        EnergyField::Sem,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            EnergyField::Average => "Average",
            EnergyField::SdProp => "SD(Prop.)",
            EnergyField::Sd => "SD",
            EnergyField::SemProp => "SEM(Prop.)",
            EnergyField::Sem => "SEM",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergyTable {
    records: Vec<EnergyRecord>,
}

impl EnergyTable {
    pub fn new(records: Vec<EnergyRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[EnergyRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<EnergyRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnergyRecord> {
        self.records.iter()
    }

    pub fn for_system(&self, system: EnergySystem) -> impl Iterator<Item = &EnergyRecord> {
        self.records.iter().filter(move |r| r.system == system)
    }

    pub fn get(&self, system: EnergySystem, component: &str) -> Option<&EnergyRecord> {
        self.for_system(system).find(|r| r.component == component)
    }

    pub fn column(&self, field: EnergyField) -> Vec<f64> {
        self.records.iter().map(|r| r.field(field)).collect()
    }
}

impl<'a> IntoIterator for &'a EnergyTable {
    type Item = &'a EnergyRecord;
    type IntoIter = std::slice::Iter<'a, EnergyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(system: EnergySystem, component: &str, average: f64) -> EnergyRecord {
        EnergyRecord {
            system,
            component: component.to_string(),
            average,
            sd_prop: 1.0,
            sd: 2.0,
            sem_prop: 3.0,
            sem: 4.0,
        }
    }

    #[test]
    fn from_label_normalizes_plain_systems() {
        assert_eq!(EnergySystem::from_label("Complex"), Some(EnergySystem::Complex));
        assert_eq!(
            EnergySystem::from_label("Receptor: "),
            Some(EnergySystem::Receptor)
        );
        assert_eq!(EnergySystem::from_label("LIGAND"), Some(EnergySystem::Ligand));
    }

    #[test]
    fn from_label_maps_any_delta_label_to_delta() {
        assert_eq!(
            EnergySystem::from_label("ProteinA-ProteinB Delta"),
            Some(EnergySystem::Delta)
        );
        assert_eq!(EnergySystem::from_label("delta"), Some(EnergySystem::Delta));
    }

    #[test]
    fn from_label_rejects_unknown_systems() {
        assert_eq!(EnergySystem::from_label("Solvent"), None);
    }

    #[test]
    fn table_lookups_filter_by_system_and_component() {
        let table = EnergyTable::new(vec![
            record(EnergySystem::Complex, "BOND", 10.0),
            record(EnergySystem::Delta, "BOND", 0.5),
            record(EnergySystem::Delta, "TOTAL", -42.0),
        ]);

        assert_eq!(table.for_system(EnergySystem::Delta).count(), 2);
        assert_eq!(
            table.get(EnergySystem::Delta, "TOTAL").map(|r| r.average),
            Some(-42.0)
        );
        assert!(table.get(EnergySystem::Ligand, "BOND").is_none());
        assert_eq!(table.column(EnergyField::Average), vec![10.0, 0.5, -42.0]);
        assert_eq!(table.column(EnergyField::Sem), vec![4.0, 4.0, 4.0]);
    }

    #[test]
    fn field_headers_match_table_header() {
        let headers: Vec<&str> = EnergyField::ALL.iter().map(|f| f.header()).collect();
        assert_eq!(headers, ENERGY_TABLE_HEADER[2..].to_vec());
    }
}
