use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info_span, warn};

use scdb_cli::filters::build_selection;
use scdb_cli::render::{render_options, render_reports, to_json};
use scdb_core::{CaseDataset, DashboardConfig, render_dashboard, render_view};
use scdb_model::{FilterSelection, ViewReport};

use crate::cli::{
    DashboardArgs, DataArgs, FilterArgs, OptionsArgs, OutputArgs, OutputFormatArg, ViewArgs,
};

#[derive(Serialize)]
struct OptionsOutput<'a> {
    rows: usize,
    columns: &'a BTreeMap<String, Vec<String>>,
}

pub fn run_view(args: &ViewArgs) -> Result<()> {
    let span = info_span!("view", view = %args.view, file = %args.data.file.display());
    let _guard = span.enter();
    let dataset = load(&args.data)?;
    let selection = selection(&dataset, &args.filters)?;
    let report = render_view(&dataset, args.view, &selection, &config(&args.output))?;
    print_reports(std::slice::from_ref(&report), args.output.format)
}

pub fn run_dashboard(args: &DashboardArgs) -> Result<()> {
    let span = info_span!("dashboard", file = %args.data.file.display());
    let _guard = span.enter();
    let dataset = load(&args.data)?;
    let selection = selection(&dataset, &args.filters)?;
    let reports = render_dashboard(&dataset, &selection, &config(&args.output))?;
    print_reports(&reports, args.output.format)
}

pub fn run_options(args: &OptionsArgs) -> Result<()> {
    let dataset = load(&args.data)?;
    let options = dataset.filter_options()?;
    match args.format {
        OutputFormatArg::Table => print!("{}", render_options(dataset.height(), &options)),
        OutputFormatArg::Json => println!(
            "{}",
            to_json(&OptionsOutput {
                rows: dataset.height(),
                columns: &options,
            })?
        ),
    }
    Ok(())
}

fn load(args: &DataArgs) -> Result<CaseDataset> {
    CaseDataset::load(&args.file, &args.ingest_options())
        .with_context(|| format!("load {}", args.file.display()))
}

fn config(args: &OutputArgs) -> DashboardConfig {
    DashboardConfig::default()
        .with_top_case_names(args.top)
        .with_short_label_chars(args.short_label_chars)
}

/// Builds the selection and warns about values absent from the data, which
/// would silently match nothing.
fn selection(dataset: &CaseDataset, args: &FilterArgs) -> Result<FilterSelection> {
    let flags = args.flags();
    if flags.is_empty() {
        return Ok(FilterSelection::new());
    }
    let selection = build_selection(&flags)?;
    let options = dataset.filter_options()?;
    for (column, values) in selection.iter() {
        let Some(known) = options.get(column) else {
            warn!(column, "filter column not in data; ignored");
            continue;
        };
        for value in values {
            if !known.contains(value) {
                warn!(column, value = %value, "filter value not in data; it matches no rows");
            }
        }
    }
    Ok(selection)
}

fn print_reports(reports: &[ViewReport], format: OutputFormatArg) -> Result<()> {
    match format {
        OutputFormatArg::Table => print!("{}", render_reports(reports)),
        OutputFormatArg::Json => println!("{}", to_json(reports)?),
    }
    Ok(())
}
