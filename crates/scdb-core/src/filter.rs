//! Row filtering by user selection.

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::debug;

use scdb_common::column_labels;
use scdb_model::FilterSelection;

use crate::frame::{filter_rows, has_column};

/// Computes the keep-mask for a selection.
///
/// A row is kept when, for every constrained column present in the frame,
/// its value is in the allowed set. Null cells never match. Constraints on
/// absent columns are skipped.
pub fn selection_mask(df: &DataFrame, selection: &FilterSelection) -> Result<Vec<bool>> {
    let mut keep = vec![true; df.height()];
    for (column, allowed) in selection.iter() {
        if !has_column(df, column) {
            debug!(column, "filter column not present; skipping");
            continue;
        }
        if allowed.is_empty() {
            keep.fill(false);
            continue;
        }
        let values = column_labels(df, column)?;
        for (flag, value) in keep.iter_mut().zip(values) {
            if *flag {
                *flag = value.is_some_and(|value| allowed.contains(&value));
            }
        }
    }
    Ok(keep)
}

/// Returns a new frame with the rows matching `selection`.
pub fn apply_filters(df: &DataFrame, selection: &FilterSelection) -> Result<DataFrame> {
    if selection.is_empty() {
        return Ok(df.clone());
    }
    let keep = selection_mask(df, selection)?;
    let filtered = filter_rows(df, &keep)?;
    debug!(
        rows_in = df.height(),
        rows_out = filtered.height(),
        constrained = selection.len(),
        "applied filters"
    );
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;
    use proptest::prelude::*;

    fn cases() -> DataFrame {
        df! {
            "jurisdiction" => &["Federal", "State", "Federal", "Local"],
            "law_type" => &["Civil", "Civil", "Criminal", "Civil"],
            "decision_year" => &[Some(1946i32), Some(1947), None, Some(1946)],
        }
        .unwrap()
    }

    #[test]
    fn unconstrained_selection_keeps_everything() {
        let df = cases();
        let filtered = apply_filters(&df, &FilterSelection::new()).unwrap();
        assert_eq!(filtered.height(), 4);
    }

    #[test]
    fn filters_compose_with_and() {
        let df = cases();
        let selection = FilterSelection::new()
            .with("jurisdiction", ["Federal", "Local"])
            .with("law_type", ["Civil"]);
        let keep = selection_mask(&df, &selection).unwrap();
        assert_eq!(keep, vec![true, false, false, true]);
    }

    #[test]
    fn empty_allowed_set_matches_nothing() {
        let df = cases();
        let selection = FilterSelection::new().with("jurisdiction", Vec::<String>::new());
        let filtered = apply_filters(&df, &selection).unwrap();
        assert_eq!(filtered.height(), 0);
        assert_eq!(filtered.width(), df.width());
    }

    #[test]
    fn absent_column_is_a_no_op() {
        let df = cases();
        let selection = FilterSelection::new().with("chief_justice", ["Vinson"]);
        let filtered = apply_filters(&df, &selection).unwrap();
        assert_eq!(filtered.height(), 4);
    }

    #[test]
    fn numeric_columns_match_by_label_and_nulls_never_match() {
        let df = cases();
        let selection = FilterSelection::new().with("decision_year", ["1946", "1947"]);
        let keep = selection_mask(&df, &selection).unwrap();
        assert_eq!(keep, vec![true, true, false, true]);
    }

    #[test]
    fn source_frame_is_not_mutated() {
        let df = cases();
        let selection = FilterSelection::new().with("law_type", ["Criminal"]);
        let filtered = apply_filters(&df, &selection).unwrap();
        assert_eq!(filtered.height(), 1);
        assert_eq!(df.height(), 4);
    }

    proptest! {
        #[test]
        fn filtering_never_grows_and_is_idempotent(
            codes in proptest::collection::vec(0u8..5, 0..40),
            allowed in proptest::collection::btree_set(0u8..5, 0..5),
        ) {
            let labels: Vec<String> = codes.iter().map(|code| format!("J{code}")).collect();
            let df = df! { "jurisdiction" => labels }.unwrap();
            let selection = FilterSelection::new()
                .with("jurisdiction", allowed.iter().map(|code| format!("J{code}")));

            let once = apply_filters(&df, &selection).unwrap();
            let twice = apply_filters(&once, &selection).unwrap();

            let expected = codes.iter().filter(|code| allowed.contains(code)).count();
            prop_assert_eq!(once.height(), expected);
            prop_assert!(once.height() <= df.height());
            prop_assert!(once.equals_missing(&twice));
        }
    }
}
