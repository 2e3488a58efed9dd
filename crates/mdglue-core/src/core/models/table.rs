use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Column '{label}' not found in table")]
    ColumnNotFound { label: String },
    #[error("Column '{label}' has {found} rows, expected {expected}")]
    RaggedColumns {
        label: String,
        expected: usize,
        found: usize,
    },
}

/// A single labelled series of samples.
///
/// Missing samples are stored as NaN; on the wire they are written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub label: String,
    #[serde(deserialize_with = "deserialize_nullable_values")]
    pub values: Vec<f64>,
}

impl Column {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn deserialize_nullable_values<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

#[derive(Deserialize)]
struct RawTable {
    columns: Vec<Column>,
}

impl TryFrom<RawTable> for Table {
    type Error = TableError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        Table::new(raw.columns)
    }
}

/// An ordered collection of equal-length numeric columns.
///
/// Rows are identified purely by position, so joining two tables means aligning them
/// row index by row index. Column labels need not be unique: a table built by
/// concatenating several simulations repeats each simulation's labels, and label lookups
/// resolve to the first matching column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Value used for cells that have no counterpart when joining tables of different
    /// lengths.
    pub const FILL_VALUE: f64 = f64::NAN;

    /// Builds a table, rejecting columns whose lengths differ from the first column.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(TableError::RaggedColumns {
                    label: bad.label.clone(),
                    expected,
                    found: bad.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.label.as_str())
    }

    pub fn column(&self, label: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.label == label)
    }

    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.columns.get(col).and_then(|c| c.values.get(row)).copied()
    }

    pub fn row(&self, row: usize) -> Option<Vec<f64>> {
        if row >= self.n_rows() {
            return None;
        }
        Some(self.columns.iter().map(|c| c.values[row]).collect())
    }

    /// Returns a new table holding copies of the requested columns, in request order.
    pub fn select<S: AsRef<str>>(&self, labels: &[S]) -> Result<Table, TableError> {
        let columns = labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                self.column(label)
                    .cloned()
                    .ok_or_else(|| TableError::ColumnNotFound {
                        label: label.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { columns })
    }

    /// Concatenates tables along the column axis.
    ///
    /// The result is an outer join on row index: it has as many rows as the longest
    /// input, and every shorter column is padded at the end with [`Table::FILL_VALUE`].
    /// Column order follows input order.
    pub fn hconcat<I>(tables: I) -> Table
    where
        I: IntoIterator<Item = Table>,
    {
        let tables: Vec<Table> = tables.into_iter().collect();
        let n_rows = tables.iter().map(Table::n_rows).max().unwrap_or(0);

        let columns = tables
            .into_iter()
            .flat_map(|t| t.columns)
            .map(|mut column| {
                column.values.resize(n_rows, Self::FILL_VALUE);
                column
            })
            .collect();
        Self { columns }
    }
}
