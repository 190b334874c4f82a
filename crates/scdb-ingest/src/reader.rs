//! CSV file reading for the case dataset.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use csv::ReaderBuilder;
use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::{info, warn};

use crate::dates::coerce_date_columns;
use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Loader configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Rows scanned for schema inference; `None` scans the whole file so a
    /// late fractional or textual value cannot fail the parse.
    pub infer_schema_rows: Option<usize>,
    pub max_file_size: u64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            infer_schema_rows: None,
            max_file_size: MAX_CSV_FILE_SIZE,
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_infer_schema_rows(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_rows = rows;
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }
}

fn open_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Rejects UTF-16 input; UTF-8 with or without BOM is accepted.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

/// Reads the header row and returns trimmed, unique column names.
pub fn read_case_headers(path: &Path) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let record = reader
        .headers()
        .map_err(|e| IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .clone();
    if record.is_empty() || record.iter().all(|cell| cell.trim().is_empty()) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut seen = BTreeSet::new();
    let mut headers = Vec::with_capacity(record.len());
    for (index, raw) in record.iter().enumerate() {
        let name = normalize_header(raw);
        if name.is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
                index,
            });
        }
        if !seen.insert(name.clone()) {
            return Err(IngestError::DuplicateColumn {
                path: path.to_path_buf(),
                column: name,
            });
        }
        headers.push(name);
    }
    Ok(headers)
}

fn read_frame(path: &Path, options: &IngestOptions) -> Result<DataFrame> {
    let parse_error = |e: polars::prelude::PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(options.infer_schema_rows)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)
}

/// Loads the case dataset.
///
/// Column names are trimmed, date columns are coerced (bad values become
/// null) and `decision_year` is derived. Codes are left untouched.
pub fn load_cases(path: &Path, options: &IngestOptions) -> Result<DataFrame> {
    let start = Instant::now();
    check_file_size_with_limit(path, options.max_file_size)?;
    validate_encoding(path)?;
    let headers = read_case_headers(path)?;

    let mut df = read_frame(path, options)?;
    if df.width() != headers.len() {
        return Err(IngestError::CsvParse {
            path: path.to_path_buf(),
            message: format!(
                "header has {} columns but {} were parsed",
                headers.len(),
                df.width()
            ),
        });
    }
    let raw_names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    for (raw, name) in raw_names.iter().zip(&headers) {
        if raw != name {
            df.rename(raw, name.as_str().into())?;
        }
    }

    let coercions = coerce_date_columns(&mut df)?;
    for coercion in &coercions {
        if coercion.coerced_to_null > 0 {
            warn!(
                column = %coercion.column,
                count = coercion.coerced_to_null,
                "unparsable dates set to null"
            );
        }
    }

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "case dataset loaded"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_case_headers_trims() {
        let file = create_temp_csv(b"\xEF\xBB\xBF jurisdiction , law_type\n1,2\n");
        let headers = read_case_headers(file.path()).unwrap();
        assert_eq!(headers, vec!["jurisdiction", "law_type"]);
    }

    #[test]
    fn test_read_case_headers_duplicate_after_trim() {
        let file = create_temp_csv(b"law_type, law_type\n1,2\n");
        let result = read_case_headers(file.path());
        assert!(matches!(result, Err(IngestError::DuplicateColumn { .. })));
    }

    #[test]
    fn test_read_case_headers_empty_file() {
        let file = create_temp_csv(b"");
        let result = read_case_headers(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_validate_encoding_rejects_utf16() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'a', 0x00]);
        let result = validate_encoding(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_check_file_size_limit() {
        let file = create_temp_csv(b"a,b\n1,2\n");
        assert!(check_file_size_with_limit(file.path(), 1024).is_ok());
        let result = check_file_size_with_limit(file.path(), 4);
        assert!(matches!(result, Err(IngestError::FileTooLarge { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = load_cases(Path::new("/nonexistent/database.csv"), &IngestOptions::default());
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
