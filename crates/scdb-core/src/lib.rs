//! Analytics core for the case dashboard.
//!
//! Data flows one way: [`CaseDataset`] loads and recodes once, then every
//! view filters the shared snapshot and aggregates the result.

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod filter;
pub mod frame;
pub mod recode;
pub mod views;

pub use aggregate::{
    compare_keys, contingency, correlation_matrix, distinct_count, distinct_values, frequency,
    pearson, row_count, top_values,
};
pub use config::DashboardConfig;
pub use dataset::CaseDataset;
pub use filter::{apply_filters, selection_mask};
pub use recode::{RecodeReport, recode_column, recode_columns};
pub use views::{render_dashboard, render_view};
