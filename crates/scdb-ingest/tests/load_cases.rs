use std::io::Write;

use polars::prelude::{AnyValue, DataType};
use tempfile::NamedTempFile;

use scdb_ingest::{IngestError, IngestOptions, load_cases};

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

#[test]
fn loads_and_normalizes_case_table() {
    let file = write_csv(
        " date_decision ,date_argument, jurisdiction,case_name,precedent_alteration\n\
         1946-11-18,1946-10-01,1,Smith v. Jones,0\n\
         not-a-date,,2,Doe v. Roe,1\n\
         11/25/1947,1947-10-14,,Roe v. Wade,\n",
    );

    let df = load_cases(file.path(), &IngestOptions::default()).expect("load cases");

    assert_eq!(df.height(), 3);
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    assert!(names.contains(&"date_decision".to_string()));
    assert!(names.contains(&"jurisdiction".to_string()));
    assert!(names.contains(&"decision_year".to_string()));

    let decision = df.column("date_decision").unwrap();
    assert_eq!(decision.dtype(), &DataType::Date);
    assert_eq!(decision.null_count(), 1);

    let years = df.column("decision_year").unwrap();
    assert_eq!(years.get(0).unwrap(), AnyValue::Int32(1946));
    assert_eq!(years.get(1).unwrap(), AnyValue::Null);
    assert_eq!(years.get(2).unwrap(), AnyValue::Int32(1947));

    let jurisdiction = df.column("jurisdiction").unwrap();
    assert_eq!(jurisdiction.null_count(), 1);
}

#[test]
fn header_only_file_loads_empty_table() {
    let file = write_csv("date_decision,jurisdiction\n");
    let df = load_cases(file.path(), &IngestOptions::default()).expect("load cases");
    assert_eq!(df.height(), 0);
}

#[test]
fn size_limit_is_enforced() {
    let file = write_csv("jurisdiction\n1\n2\n");
    let options = IngestOptions::default().with_max_file_size(4);
    let result = load_cases(file.path(), &options);
    assert!(matches!(result, Err(IngestError::FileTooLarge { .. })));
}
