use super::table::Table;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The analysis series every bundle is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnalysisKey {
    Rmsd,
    Rg,
    Sasa,
    Hbond,
}

impl AnalysisKey {
    pub const ALL: [AnalysisKey; 4] = [
        AnalysisKey::Rmsd,
        AnalysisKey::Rg,
        AnalysisKey::Sasa,
        AnalysisKey::Hbond,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKey::Rmsd => "rmsd",
            AnalysisKey::Rg => "rg",
            AnalysisKey::Sasa => "sasa",
            AnalysisKey::Hbond => "hbond",
        }
    }

    /// The conventional two-column selection for this series: the time axis followed by
    /// the series value.
    pub fn default_columns(&self) -> [&'static str; 2] {
        ["time", self.as_str()]
    }
}

impl fmt::Display for AnalysisKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown analysis key '{0}'")]
pub struct UnknownAnalysisKey(pub String);

impl FromStr for AnalysisKey {
    type Err = UnknownAnalysisKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnalysisKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownAnalysisKey(s.to_string()))
    }
}

/// One simulation's analysis results.
///
/// The well-known series are stored under [`AnalysisKey`]; any other key found in the
/// record store is kept verbatim as an extension series so that newer analyses remain
/// reachable through [`Bundle::get`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bundle {
    series: HashMap<AnalysisKey, Table>,
    extensions: BTreeMap<String, Table>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, key: AnalysisKey, table: Table) -> Self {
        self.series.insert(key, table);
        self
    }

    pub fn with_extension(mut self, key: impl Into<String>, table: Table) -> Self {
        self.extensions.insert(key.into(), table);
        self
    }

    pub fn series(&self, key: AnalysisKey) -> Option<&Table> {
        self.series.get(&key)
    }

    pub fn extension(&self, key: &str) -> Option<&Table> {
        self.extensions.get(key)
    }

    /// Looks up a series by its string key, whether well-known or extension.
    pub fn get(&self, key: &str) -> Option<&Table> {
        match key.parse::<AnalysisKey>() {
            Ok(known) => self.series(known),
            Err(_) => self.extension(key),
        }
    }

    pub fn keys(&self) -> Vec<&str> {
        let mut known: Vec<AnalysisKey> = self.series.keys().copied().collect();
        known.sort();
        known
            .into_iter()
            .map(|k| k.as_str())
            .chain(self.extensions.keys().map(String::as_str))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.series.len() + self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'de> Deserialize<'de> for Bundle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: BTreeMap<String, Table> = BTreeMap::deserialize(deserializer)?;
        let mut bundle = Bundle::new();
        for (key, table) in raw {
            match key.parse::<AnalysisKey>() {
                Ok(known) => {
                    bundle.series.insert(known, table);
                }
                Err(_) => {
                    bundle.extensions.insert(key, table);
                }
            }
        }
        Ok(bundle)
    }
}

impl Serialize for Bundle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut known: Vec<(&AnalysisKey, &Table)> = self.series.iter().collect();
        known.sort_by_key(|(k, _)| **k);
        serializer.collect_map(
            known
                .into_iter()
                .map(|(k, t)| (k.as_str(), t))
                .chain(self.extensions.iter().map(|(k, t)| (k.as_str(), t))),
        )
    }
}
