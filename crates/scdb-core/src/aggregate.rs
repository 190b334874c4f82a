//! Group-by-count, cross-tabulation, and correlation over a filtered frame.
//!
//! Every function reads the frame and returns an owned table from
//! `scdb_model`. Nulls and blank cells are never counted as a category.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;

use scdb_common::{column_labels, column_numbers, parse_f64};
use scdb_model::{
    CategoryCount, ContingencyTable, CorrelationMatrix, CountOrder, FrequencyTable, TopValue,
    TopValues,
};

/// Orders category keys: numeric keys numerically and ahead of text, text
/// lexically.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    match (parse_f64(a), parse_f64(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn labels_of(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>> {
    column_labels(df, column).with_context(|| format!("read column {column}"))
}

fn count_labels(values: Vec<Option<String>>) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for label in values.into_iter().flatten() {
        *counts.entry(label).or_insert(0u64) += 1;
    }
    counts
}

fn sort_counts(entries: &mut [CategoryCount], order: CountOrder) {
    match order {
        CountOrder::Descending => entries.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.label.cmp(&b.label))
        }),
        CountOrder::KeyAscending => entries.sort_by(|a, b| compare_keys(&a.label, &b.label)),
    }
}

/// Counts rows per distinct value of `column`.
///
/// Errors when the column is absent.
pub fn frequency(df: &DataFrame, column: &str, order: CountOrder) -> Result<FrequencyTable> {
    let counts = count_labels(labels_of(df, column)?);
    let mut entries: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(label, count)| CategoryCount { label, count })
        .collect();
    sort_counts(&mut entries, order);
    Ok(FrequencyTable {
        column: column.to_string(),
        order,
        entries,
    })
}

/// Cross-tabulates two columns. Rows where either value is null are left
/// out; labels on both axes are sorted with [`compare_keys`].
pub fn contingency(df: &DataFrame, row_column: &str, column_column: &str) -> Result<ContingencyTable> {
    let rows = labels_of(df, row_column)?;
    let cols = labels_of(df, column_column)?;

    let mut pairs: BTreeMap<(String, String), u64> = BTreeMap::new();
    let mut row_set = BTreeSet::new();
    let mut col_set = BTreeSet::new();
    for (row, col) in rows.into_iter().zip(cols) {
        let (Some(row), Some(col)) = (row, col) else {
            continue;
        };
        row_set.insert(row.clone());
        col_set.insert(col.clone());
        *pairs.entry((row, col)).or_insert(0) += 1;
    }

    let mut row_labels: Vec<String> = row_set.into_iter().collect();
    let mut column_labels: Vec<String> = col_set.into_iter().collect();
    row_labels.sort_by(|a, b| compare_keys(a, b));
    column_labels.sort_by(|a, b| compare_keys(a, b));

    let cells = row_labels
        .iter()
        .map(|row| {
            column_labels
                .iter()
                .map(|col| {
                    pairs
                        .get(&(row.clone(), col.clone()))
                        .copied()
                        .unwrap_or(0)
                })
                .collect()
        })
        .collect();

    Ok(ContingencyTable {
        row_column: row_column.to_string(),
        column_column: column_column.to_string(),
        row_labels,
        column_labels,
        cells,
    })
}

/// Pearson correlation over the positions where both inputs are present.
///
/// `None` when fewer than two complete pairs remain or either side has zero
/// variance.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    // The variance product can leave the f64 range for very large or very
    // small inputs; take the roots separately then.
    let scale = (var_x * var_y).sqrt();
    let scale = if scale.is_normal() {
        scale
    } else {
        var_x.sqrt() * var_y.sqrt()
    };
    let r = covariance / scale;
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Pairwise Pearson coefficients for numeric columns.
///
/// Non-numeric cells count as missing. Errors when a column is absent.
pub fn correlation_matrix(df: &DataFrame, columns: &[&str]) -> Result<CorrelationMatrix> {
    let series = columns
        .iter()
        .map(|name| column_numbers(df, name).with_context(|| format!("read column {name}")))
        .collect::<Result<Vec<_>>>()?;
    let values = series
        .iter()
        .map(|left| series.iter().map(|right| pearson(left, right)).collect())
        .collect();
    Ok(CorrelationMatrix {
        columns: columns.iter().map(ToString::to_string).collect(),
        values,
    })
}

/// Truncates `label` to `max_chars` characters, marking the cut with "...".
fn shorten(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut short: String = label.chars().take(max_chars).collect();
    short.push_str("...");
    short
}

/// The `limit` most frequent values of `column`, ties broken by label.
pub fn top_values(
    df: &DataFrame,
    column: &str,
    limit: usize,
    short_label_chars: usize,
) -> Result<TopValues> {
    let table = frequency(df, column, CountOrder::Descending)?;
    let entries = table
        .entries
        .into_iter()
        .take(limit)
        .map(|entry| TopValue {
            short_label: shorten(&entry.label, short_label_chars),
            label: entry.label,
            count: entry.count,
        })
        .collect();
    Ok(TopValues {
        column: column.to_string(),
        limit,
        entries,
    })
}

/// Number of cases in the frame.
pub fn row_count(df: &DataFrame) -> u64 {
    df.height() as u64
}

/// Number of distinct non-null values in `column`.
pub fn distinct_count(df: &DataFrame, column: &str) -> Result<usize> {
    let distinct: BTreeSet<String> = labels_of(df, column)?.into_iter().flatten().collect();
    Ok(distinct.len())
}

/// Distinct non-null values of `column`, ordered with [`compare_keys`].
pub fn distinct_values(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let distinct: BTreeSet<String> = labels_of(df, column)?.into_iter().flatten().collect();
    let mut values: Vec<String> = distinct.into_iter().collect();
    values.sort_by(|a, b| compare_keys(a, b));
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;
    use proptest::prelude::*;

    #[test]
    fn frequency_orders_by_count_then_label() {
        let df = df! {
            "jurisdiction" => &[Some("State"), Some("Federal"), None, Some("Local"), Some("Federal"), Some("Local")],
        }
        .unwrap();

        let table = frequency(&df, "jurisdiction", CountOrder::Descending).unwrap();

        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["Federal", "Local", "State"]);
        assert_eq!(table.total(), 5);
    }

    #[test]
    fn frequency_key_ascending_is_numeric() {
        let df = df! { "decision_year" => &[1950i32, 1946, 1950, 2001, 1999] }.unwrap();

        let table = frequency(&df, "decision_year", CountOrder::KeyAscending).unwrap();

        assert_eq!(
            table.labels().collect::<Vec<_>>(),
            vec!["1946", "1950", "1999", "2001"]
        );
        assert_eq!(table.count_of("1950"), Some(2));
    }

    #[test]
    fn frequency_of_missing_column_is_an_error() {
        let df = df! { "jurisdiction" => &["Federal"] }.unwrap();
        assert!(frequency(&df, "law_type", CountOrder::Descending).is_err());
    }

    #[test]
    fn frequency_snapshot() {
        let df = df! { "party_winning" => &["Petitioner", "Respondent", "Petitioner"] }.unwrap();
        let table = frequency(&df, "party_winning", CountOrder::Descending).unwrap();
        insta::assert_json_snapshot!(table, @r#"
        {
          "column": "party_winning",
          "order": "descending",
          "entries": [
            {
              "label": "Petitioner",
              "count": 2
            },
            {
              "label": "Respondent",
              "count": 1
            }
          ]
        }
        "#);
    }

    #[test]
    fn contingency_is_dense_and_skips_nulls() {
        let df = df! {
            "lower_court_disposition" => &[Some("Affirmed"), Some("Reversed"), Some("Affirmed"), None],
            "case_disposition" => &[Some("Affirmed"), Some("Vacated"), Some("Affirmed"), Some("Vacated")],
        }
        .unwrap();

        let table = contingency(&df, "lower_court_disposition", "case_disposition").unwrap();

        assert_eq!(table.row_labels, vec!["Affirmed", "Reversed"]);
        assert_eq!(table.column_labels, vec!["Affirmed", "Vacated"]);
        assert_eq!(table.cells, vec![vec![2, 0], vec![0, 1]]);
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn pearson_perfect_and_undefined() {
        let xs = [Some(1.0), Some(2.0), Some(3.0), None];
        let ys = [Some(2.0), Some(4.0), Some(6.0), Some(100.0)];
        let inverse = [Some(3.0), Some(2.0), Some(1.0), None];
        assert!((pearson(&xs, &ys).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&xs, &inverse).unwrap() + 1.0).abs() < 1e-12);

        let constant = [Some(5.0), Some(5.0), Some(5.0), Some(5.0)];
        assert_eq!(pearson(&xs, &constant), None);
        assert_eq!(pearson(&[Some(1.0)], &[Some(2.0)]), None);
        assert_eq!(pearson(&[], &[]), None);
    }

    #[test]
    fn pearson_survives_extreme_magnitudes() {
        let large = [Some(1e100), Some(-1e100), Some(0.0)];
        let doubled = [Some(2e100), Some(-2e100), Some(0.0)];
        assert!((pearson(&large, &large).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&large, &doubled).unwrap() - 1.0).abs() < 1e-12);

        let tiny = [Some(1e-150), Some(-1e-150), Some(0.0)];
        assert!((pearson(&tiny, &tiny).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn tied_counts_fall_back_to_lexical_label_order() {
        let df = df! { "issue_area" => &["9", "10", "10", "9", "Civil"] }.unwrap();

        let table = frequency(&df, "issue_area", CountOrder::Descending).unwrap();

        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["10", "9", "Civil"]);
    }

    #[test]
    fn correlation_matrix_diagonal_is_one() {
        let df = df! {
            "precedent_alteration" => &[Some(0.0f64), Some(1.0), Some(0.0), Some(1.0)],
            "decision_direction" => &[Some(1.0f64), Some(2.0), Some(2.0), None],
        }
        .unwrap();

        let matrix =
            correlation_matrix(&df, &["precedent_alteration", "decision_direction"]).unwrap();

        assert_eq!(matrix.get("precedent_alteration", "precedent_alteration"), Some(1.0));
        assert_eq!(matrix.get("decision_direction", "decision_direction"), Some(1.0));
        let r = matrix
            .get("precedent_alteration", "decision_direction")
            .unwrap();
        assert_eq!(
            Some(r),
            matrix.get("decision_direction", "precedent_alteration")
        );
        assert!((-1.0..=1.0).contains(&r));
    }

    #[test]
    fn correlation_matrix_of_constant_column_is_undefined() {
        let df = df! { "precedent_alteration" => &[0.0f64, 0.0, 0.0] }.unwrap();
        let matrix = correlation_matrix(&df, &["precedent_alteration"]).unwrap();
        assert!(matrix.is_undefined());
    }

    #[test]
    fn top_values_shortens_long_names() {
        let df = df! {
            "case_name" => &[
                "HALLIBURTON OIL WELL CEMENTING CO. v. WALKER",
                "HALLIBURTON OIL WELL CEMENTING CO. v. WALKER",
                "CLEVELAND v. UNITED STATES",
                "UNITED STATES v. ALCEA BAND OF TILLAMOOKS",
            ],
        }
        .unwrap();

        let top = top_values(&df, "case_name", 2, 25).unwrap();

        assert_eq!(top.entries.len(), 2);
        assert_eq!(top.entries[0].count, 2);
        assert_eq!(top.entries[0].short_label, "HALLIBURTON OIL WELL CEME...");
        assert_eq!(top.entries[1].label, "CLEVELAND v. UNITED STATES");
        assert_eq!(top.entries[1].short_label, "CLEVELAND v. UNITED STATE...");
    }

    #[test]
    fn short_labels_at_the_limit_are_kept() {
        assert_eq!(shorten("A v. B", 25), "A v. B");
        assert_eq!(shorten("abcde", 5), "abcde");
        assert_eq!(shorten("abcdef", 5), "abcde...");
    }

    #[test]
    fn distinct_values_sort_numerically() {
        let df = df! { "decision_year" => &[Some(2001i32), Some(1999), None, Some(2001)] }.unwrap();
        assert_eq!(distinct_count(&df, "decision_year").unwrap(), 2);
        assert_eq!(distinct_values(&df, "decision_year").unwrap(), vec!["1999", "2001"]);
    }

    #[test]
    fn empty_frame_yields_empty_tables() {
        let df = df! {
            "jurisdiction" => Vec::<String>::new(),
            "law_type" => Vec::<String>::new(),
        }
        .unwrap();
        assert!(frequency(&df, "jurisdiction", CountOrder::Descending).unwrap().is_empty());
        assert!(contingency(&df, "jurisdiction", "law_type").unwrap().is_empty());
        assert_eq!(distinct_count(&df, "jurisdiction").unwrap(), 0);
    }

    #[test]
    fn compare_keys_puts_numbers_first() {
        let mut keys = vec!["b", "10", "a", "9", "2.5"];
        keys.sort_by(|a, b| compare_keys(a, b));
        assert_eq!(keys, vec!["2.5", "9", "10", "a", "b"]);
    }

    proptest! {
        #[test]
        fn contingency_total_matches_complete_rows(
            rows in proptest::collection::vec((proptest::option::of(0u8..4), proptest::option::of(0u8..3)), 0..60),
        ) {
            let left: Vec<Option<String>> = rows.iter().map(|(a, _)| a.map(|v| format!("L{v}"))).collect();
            let right: Vec<Option<String>> = rows.iter().map(|(_, b)| b.map(|v| format!("R{v}"))).collect();
            let df = df! { "left" => left, "right" => right }.unwrap();

            let table = contingency(&df, "left", "right").unwrap();
            let complete = rows.iter().filter(|(a, b)| a.is_some() && b.is_some()).count() as u64;

            prop_assert_eq!(table.total(), complete);
            let left_freq = frequency(&df, "left", CountOrder::Descending).unwrap();
            for (idx, label) in table.row_labels.iter().enumerate() {
                prop_assert!(table.row_total(idx) <= left_freq.count_of(label).unwrap_or(0));
            }
        }

        #[test]
        fn pearson_is_symmetric_and_bounded(
            pairs in proptest::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 0..30),
        ) {
            let xs: Vec<Option<f64>> = pairs.iter().map(|(x, _)| Some(*x)).collect();
            let ys: Vec<Option<f64>> = pairs.iter().map(|(_, y)| Some(*y)).collect();
            let forward = pearson(&xs, &ys);
            prop_assert_eq!(forward, pearson(&ys, &xs));
            if let Some(r) = forward {
                prop_assert!((-1.0..=1.0).contains(&r));
            }
        }
    }
}
