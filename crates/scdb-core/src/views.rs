//! Dashboard views: filter the snapshot, then aggregate into panels.

use std::time::Instant;

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::{debug, info};

use scdb_model::{
    CountOrder, FilterSelection, Metric, Panel, PanelContent, ViewKind, ViewReport, columns,
};

use crate::aggregate::{
    contingency, correlation_matrix, distinct_count, frequency, row_count, top_values,
};
use crate::config::DashboardConfig;
use crate::dataset::CaseDataset;
use crate::frame::has_column;

/// Renders one view for a selection.
///
/// Constraints on columns the view does not honor are dropped before
/// filtering. Panels whose source columns are absent are left out.
pub fn render_view(
    dataset: &CaseDataset,
    view: ViewKind,
    selection: &FilterSelection,
    config: &DashboardConfig,
) -> Result<ViewReport> {
    let start = Instant::now();
    let applied = selection.restrict_to(view.filter_columns());
    let df = dataset.filter(&applied)?;

    let mut builder = ReportBuilder::new(&df);
    match view {
        ViewKind::Overview => overview(&mut builder)?,
        ViewKind::Justices => justices(&mut builder)?,
        ViewKind::Issues => issues(&mut builder)?,
        ViewKind::Outcomes => outcomes(&mut builder)?,
        ViewKind::States => states(&mut builder, config)?,
    }

    info!(
        view = %view,
        rows = df.height(),
        panels = builder.panels.len(),
        duration_ms = start.elapsed().as_millis(),
        "view rendered"
    );
    Ok(ViewReport {
        view,
        title: view.title().to_string(),
        selection: applied,
        row_count: df.height(),
        metrics: builder.metrics,
        panels: builder.panels,
    })
}

/// Renders every view, in dashboard order, for the same selection.
pub fn render_dashboard(
    dataset: &CaseDataset,
    selection: &FilterSelection,
    config: &DashboardConfig,
) -> Result<Vec<ViewReport>> {
    ViewKind::ALL
        .into_iter()
        .map(|view| render_view(dataset, view, selection, config))
        .collect()
}

struct ReportBuilder<'a> {
    df: &'a DataFrame,
    metrics: Vec<Metric>,
    panels: Vec<Panel>,
}

impl<'a> ReportBuilder<'a> {
    fn new(df: &'a DataFrame) -> Self {
        Self {
            df,
            metrics: Vec::new(),
            panels: Vec::new(),
        }
    }

    /// True when all `names` exist; logs the panel as skipped otherwise.
    fn requires(&self, title: &str, names: &[&str]) -> bool {
        match names.iter().find(|name| !has_column(self.df, name)) {
            Some(missing) => {
                debug!(panel = title, column = *missing, "column not present; panel skipped");
                false
            }
            None => true,
        }
    }

    fn distinct_metric(&mut self, label: &str, column: &str) -> Result<()> {
        if self.requires(label, &[column]) {
            let count = distinct_count(self.df, column)?;
            self.metrics.push(Metric::new(label, count as u64));
        }
        Ok(())
    }

    fn frequency(&mut self, title: &str, column: &str, order: CountOrder) -> Result<()> {
        if self.requires(title, &[column]) {
            let table = frequency(self.df, column, order)?;
            self.panels
                .push(Panel::new(title, PanelContent::Frequency(table)));
        }
        Ok(())
    }

    fn contingency(&mut self, title: &str, rows: &str, cols: &str) -> Result<()> {
        if self.requires(title, &[rows, cols]) {
            let table = contingency(self.df, rows, cols)?;
            self.panels
                .push(Panel::new(title, PanelContent::Contingency(table)));
        }
        Ok(())
    }
}

fn overview(builder: &mut ReportBuilder<'_>) -> Result<()> {
    let total = row_count(builder.df);
    builder.metrics.push(Metric::new("Total Cases", total));
    builder.distinct_metric("Jurisdictions", columns::JURISDICTION)?;
    builder.distinct_metric("Issue Areas", columns::ISSUE_AREA)?;
    builder.frequency(
        "Number of Cases per Year",
        columns::DECISION_YEAR,
        CountOrder::KeyAscending,
    )
}

fn justices(builder: &mut ReportBuilder<'_>) -> Result<()> {
    builder.frequency(
        "Cases per Chief Justice",
        columns::CHIEF_JUSTICE,
        CountOrder::Descending,
    )?;
    builder.frequency(
        "Cases by Jurisdiction",
        columns::JURISDICTION,
        CountOrder::Descending,
    )
}

fn issues(builder: &mut ReportBuilder<'_>) -> Result<()> {
    builder.frequency("Cases by Issue Area", columns::ISSUE_AREA, CountOrder::Descending)?;
    builder.frequency("Cases by Law Type", columns::LAW_TYPE, CountOrder::Descending)?;

    let title = "Correlation: Precedent Alteration vs Decision Direction";
    if builder.requires(title, &columns::NUMERIC_COLUMNS) {
        let matrix = correlation_matrix(builder.df, &columns::NUMERIC_COLUMNS)?;
        builder
            .panels
            .push(Panel::new(title, PanelContent::Correlation(matrix)));
    }
    Ok(())
}

fn outcomes(builder: &mut ReportBuilder<'_>) -> Result<()> {
    builder.frequency(
        "Party Winning Rates",
        columns::PARTY_WINNING,
        CountOrder::Descending,
    )?;
    builder.frequency(
        "Unconstitutional Rulings",
        columns::DECLARATION_UNCONSTITUTIONALITY,
        CountOrder::Descending,
    )?;
    builder.contingency(
        "Lower Court vs Supreme Court Disposition",
        columns::LOWER_COURT_DISPOSITION,
        columns::CASE_DISPOSITION,
    )
}

fn states(builder: &mut ReportBuilder<'_>, config: &DashboardConfig) -> Result<()> {
    for (title, column) in [
        ("Petitioner States", columns::PETITIONER_STATE),
        ("Respondent States", columns::RESPONDENT_STATE),
    ] {
        if !builder.requires(title, &[column]) {
            continue;
        }
        let mut table = frequency(builder.df, column, CountOrder::Descending)?;
        table
            .entries
            .retain(|entry| !config.is_excluded_state(&entry.label));
        builder
            .panels
            .push(Panel::new(title, PanelContent::Frequency(table)));
    }

    let title = format!("Top {} Most Common Case Names", config.top_case_names);
    if builder.requires(&title, &[columns::CASE_NAME]) {
        let top = top_values(
            builder.df,
            columns::CASE_NAME,
            config.top_case_names,
            config.short_label_chars,
        )?;
        builder
            .panels
            .push(Panel::new(title, PanelContent::TopValues(top)));
    }
    Ok(())
}
