//! Aggregate tables handed to the presentation layer.
//!
//! These are plain data: the aggregator builds them from a filtered frame and
//! a renderer consumes them. They hold no reference to the source data.

use serde::{Deserialize, Serialize};

/// Ordering policy for frequency tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountOrder {
    /// Count descending, ties by label ascending.
    #[default]
    Descending,
    /// Key ascending; numeric keys compare numerically (time series).
    KeyAscending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
}

impl CategoryCount {
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Single-column group-by-count result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    pub column: String,
    pub order: CountOrder,
    pub entries: Vec<CategoryCount>,
}

impl FrequencyTable {
    pub fn empty(column: impl Into<String>, order: CountOrder) -> Self {
        Self {
            column: column.into(),
            order,
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    pub fn count_of(&self, label: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.count)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.label.as_str())
    }
}

/// Two-column cross-tabulation. Cells are dense: `cells[row][col]` is zero
/// for combinations that never occur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContingencyTable {
    pub row_column: String,
    pub column_column: String,
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub cells: Vec<Vec<u64>>,
}

impl ContingencyTable {
    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty() || self.column_labels.is_empty()
    }

    /// Count for a label pair; zero when either label is absent.
    pub fn get(&self, row: &str, column: &str) -> u64 {
        let Some(row_idx) = self.row_labels.iter().position(|label| label == row) else {
            return 0;
        };
        let Some(col_idx) = self.column_labels.iter().position(|label| label == column) else {
            return 0;
        };
        self.cells[row_idx][col_idx]
    }

    pub fn row_total(&self, row_idx: usize) -> u64 {
        self.cells
            .get(row_idx)
            .map(|row| row.iter().sum())
            .unwrap_or(0)
    }

    pub fn column_total(&self, col_idx: usize) -> u64 {
        self.cells
            .iter()
            .map(|row| row.get(col_idx).copied().unwrap_or(0))
            .sum()
    }

    /// Grand total of all cells.
    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }
}

/// Pairwise Pearson coefficients; `None` where the coefficient is not
/// computable (fewer than two complete pairs, or zero variance).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, left: &str, right: &str) -> Option<f64> {
        let row = self.columns.iter().position(|name| name == left)?;
        let col = self.columns.iter().position(|name| name == right)?;
        self.values[row][col]
    }

    /// True when no coefficient could be computed.
    pub fn is_undefined(&self) -> bool {
        self.values.iter().flatten().all(Option::is_none)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopValue {
    pub label: String,
    /// Label truncated for axis display.
    pub short_label: String,
    pub count: u64,
}

/// The most common values of a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopValues {
    pub column: String,
    pub limit: usize,
    pub entries: Vec<TopValue>,
}
