//! Shared utilities for the case analytics crates.
//!
//! This crate provides cell-level helpers for reading Polars values the way
//! the loader, recoder, and aggregator all need to read them.

pub mod polars;

pub use polars::{
    any_to_code, any_to_f64, any_to_label, column_labels, column_numbers, format_numeric,
    parse_code, parse_f64,
};
