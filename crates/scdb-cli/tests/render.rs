//! Integration tests for report rendering.

use scdb_cli::filters::{FilterFlags, build_selection};
use scdb_cli::render::{NO_DATA, render_options, render_panel, render_report, to_json};
use scdb_model::{
    CategoryCount, ContingencyTable, CorrelationMatrix, CountOrder, FilterSelection,
    FrequencyTable, Metric, Panel, PanelContent, TopValue, TopValues, ViewKind, ViewReport,
};
use std::collections::BTreeMap;

fn jurisdiction_panel() -> Panel {
    Panel::new(
        "Cases by Jurisdiction",
        PanelContent::Frequency(FrequencyTable {
            column: "jurisdiction".to_string(),
            order: CountOrder::Descending,
            entries: vec![
                CategoryCount::new("Federal", 60),
                CategoryCount::new("State", 30),
                CategoryCount::new("Local", 10),
            ],
        }),
    )
}

fn justices_report() -> ViewReport {
    ViewReport {
        view: ViewKind::Justices,
        title: ViewKind::Justices.title().to_string(),
        selection: FilterSelection::new().with("jurisdiction", ["Federal", "State", "Local"]),
        row_count: 100,
        metrics: vec![],
        panels: vec![
            Panel::new(
                "Cases per Chief Justice",
                PanelContent::Frequency(FrequencyTable::empty(
                    "chief_justice",
                    CountOrder::Descending,
                )),
            ),
            jurisdiction_panel(),
        ],
    }
}

#[test]
fn report_lists_filters_rows_and_panels() {
    let text = render_report(&justices_report());

    assert!(text.starts_with("== Chief Justices & Jurisdictions =="));
    assert!(text.contains("Filters: jurisdiction in [Federal, Local, State]"));
    assert!(text.contains("Rows: 100"));
    assert!(text.contains(&format!("Cases per Chief Justice\n  ({NO_DATA})")));
    assert!(text.contains("60.0%"));
    assert!(text.contains("Local"));
}

#[test]
fn contingency_panel_includes_totals() {
    let panel = Panel::new(
        "Lower Court vs Supreme Court Disposition",
        PanelContent::Contingency(ContingencyTable {
            row_column: "lower_court_disposition".to_string(),
            column_column: "case_disposition".to_string(),
            row_labels: vec!["Affirmed".to_string(), "Reversed".to_string()],
            column_labels: vec!["Affirmed".to_string(), "Vacated".to_string()],
            cells: vec![vec![7, 0], vec![2, 11]],
        }),
    );

    let text = render_panel(&panel);

    assert!(text.contains("lower_court_disposition \\ case_disposition"));
    assert!(text.contains("Total"));
    assert!(text.contains("20"));
    assert!(text.contains("13"));
}

#[test]
fn undefined_correlations_print_placeholder() {
    let panel = Panel::new(
        "Correlation: Precedent Alteration vs Decision Direction",
        PanelContent::Correlation(CorrelationMatrix {
            columns: vec![
                "precedent_alteration".to_string(),
                "decision_direction".to_string(),
            ],
            values: vec![vec![Some(1.0), None], vec![None, Some(1.0)]],
        }),
    );

    let text = render_panel(&panel);

    assert!(text.contains("1.000"));
    assert!(text.contains("n/a"));
}

#[test]
fn top_values_use_short_labels() {
    let panel = Panel::new(
        "Top 5 Most Common Case Names",
        PanelContent::TopValues(TopValues {
            column: "case_name".to_string(),
            limit: 5,
            entries: vec![TopValue {
                label: "HALLIBURTON OIL WELL CEMENTING CO. v. WALKER".to_string(),
                short_label: "HALLIBURTON OIL WELL CEME...".to_string(),
                count: 2,
            }],
        }),
    );

    let text = render_panel(&panel);

    assert!(text.contains("HALLIBURTON OIL WELL CEME..."));
    assert!(!text.contains("CEMENTING CO."));
}

#[test]
fn options_table_lists_each_column() {
    let mut options = BTreeMap::new();
    options.insert(
        "jurisdiction".to_string(),
        vec!["Federal".to_string(), "State".to_string()],
    );
    options.insert("law_type".to_string(), Vec::new());

    let text = render_options(2, &options);

    assert!(text.starts_with("Rows: 2\n"));
    assert!(text.contains("Federal, State"));
    assert!(text.contains(NO_DATA));
}

#[test]
fn panel_json_is_tagged_by_kind() {
    let json: serde_json::Value =
        serde_json::from_str(&to_json(&jurisdiction_panel()).unwrap()).unwrap();
    insta::assert_json_snapshot!(json, @r#"
    {
      "content": {
        "column": "jurisdiction",
        "entries": [
          {
            "count": 60,
            "label": "Federal"
          },
          {
            "count": 30,
            "label": "State"
          },
          {
            "count": 10,
            "label": "Local"
          }
        ],
        "kind": "frequency",
        "order": "descending"
      },
      "title": "Cases by Jurisdiction"
    }
    "#);
}

#[test]
fn flags_build_a_selection() {
    let flags = FilterFlags {
        years: vec!["1946".to_string(), " 1947 ".to_string()],
        law_types: vec!["Civil".to_string()],
        extra: vec!["chief_justice=Vinson".to_string()],
        ..FilterFlags::default()
    };

    let selection = build_selection(&flags).unwrap();

    assert_eq!(selection.len(), 3);
    let years: Vec<&str> = selection
        .allowed("decision_year")
        .unwrap()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(years, vec!["1946", "1947"]);
    assert!(selection.is_constrained("chief_justice"));
}
