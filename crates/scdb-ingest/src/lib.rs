//! Loading of the case dataset into a Polars `DataFrame`.
//!
//! The loader is the only place that touches the filesystem. It trims column
//! names, coerces the date columns, and derives the decision year; it does
//! not recode anything.

pub mod dates;
pub mod error;
pub mod reader;

pub use dates::{DateCoercion, coerce_date_columns, parse_case_date};
pub use error::{IngestError, Result};
pub use reader::{
    IngestOptions, MAX_CSV_FILE_SIZE, check_file_size_with_limit, load_cases, read_case_headers,
    validate_encoding,
};
