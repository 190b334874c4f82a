//! Dashboard views and the reports they produce.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::aggregate::{ContingencyTable, CorrelationMatrix, FrequencyTable, TopValues};
use crate::columns;
use crate::error::ModelError;
use crate::selection::FilterSelection;

/// One thematic panel group of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Overview,
    Justices,
    Issues,
    Outcomes,
    States,
}

impl ViewKind {
    pub const ALL: [ViewKind; 5] = [
        ViewKind::Overview,
        ViewKind::Justices,
        ViewKind::Issues,
        ViewKind::Outcomes,
        ViewKind::States,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Overview => "overview",
            ViewKind::Justices => "justices",
            ViewKind::Issues => "issues",
            ViewKind::Outcomes => "outcomes",
            ViewKind::States => "states",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ViewKind::Overview => "Overview",
            ViewKind::Justices => "Chief Justices & Jurisdictions",
            ViewKind::Issues => "Issue & Law Analysis",
            ViewKind::Outcomes => "Court Outcomes",
            ViewKind::States => "States & Case Profiles",
        }
    }

    /// Columns whose selections this view honors. Court outcomes and state
    /// profiles share the issue and law type filters of the issue view.
    pub fn filter_columns(&self) -> &'static [&'static str] {
        match self {
            ViewKind::Overview => &[columns::DECISION_YEAR],
            ViewKind::Justices => &[columns::JURISDICTION],
            ViewKind::Issues | ViewKind::Outcomes | ViewKind::States => {
                &[columns::ISSUE_AREA, columns::LAW_TYPE]
            }
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ViewKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownView {
                name: s.to_string(),
                expected: ViewKind::ALL
                    .iter()
                    .map(ViewKind::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// A headline scalar such as "Total Cases".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: u64,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: u64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelContent {
    Frequency(FrequencyTable),
    Contingency(ContingencyTable),
    Correlation(CorrelationMatrix),
    TopValues(TopValues),
}

impl PanelContent {
    /// True when the panel has nothing to draw.
    pub fn is_empty(&self) -> bool {
        match self {
            PanelContent::Frequency(table) => table.is_empty(),
            PanelContent::Contingency(table) => table.is_empty(),
            PanelContent::Correlation(matrix) => matrix.is_undefined(),
            PanelContent::TopValues(top) => top.entries.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub title: String,
    pub content: PanelContent,
}

impl Panel {
    pub fn new(title: impl Into<String>, content: PanelContent) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }
}

/// Everything one view renders for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewReport {
    pub view: ViewKind,
    pub title: String,
    /// Selection actually applied (restricted to the view's filter columns).
    pub selection: FilterSelection,
    /// Rows left after filtering.
    pub row_count: usize,
    pub metrics: Vec<Metric>,
    pub panels: Vec<Panel>,
}

impl ViewReport {
    pub fn panel(&self, title: &str) -> Option<&Panel> {
        self.panels.iter().find(|panel| panel.title == title)
    }

    pub fn metric(&self, label: &str) -> Option<u64> {
        self.metrics
            .iter()
            .find(|metric| metric.label == label)
            .map(|metric| metric.value)
    }
}
