//! Column names of the case dataset after header normalization.

pub const DATE_DECISION: &str = "date_decision";
pub const DATE_ARGUMENT: &str = "date_argument";
pub const CHIEF_JUSTICE: &str = "chief_justice";
pub const JURISDICTION: &str = "jurisdiction";
pub const ISSUE_AREA: &str = "issue_area";
pub const LAW_TYPE: &str = "law_type";
pub const PARTY_WINNING: &str = "party_winning";
pub const DECLARATION_UNCONSTITUTIONALITY: &str = "declaration_unconstitutionality";
pub const LOWER_COURT_DISPOSITION: &str = "lower_court_disposition";
pub const CASE_DISPOSITION: &str = "case_disposition";
pub const PETITIONER_STATE: &str = "petitioner_state";
pub const RESPONDENT_STATE: &str = "respondent_state";
pub const CASE_NAME: &str = "case_name";
pub const PRECEDENT_ALTERATION: &str = "precedent_alteration";
pub const DECISION_DIRECTION: &str = "decision_direction";

/// Derived at load time from the year of `date_decision`.
pub const DECISION_YEAR: &str = "decision_year";

/// Columns coerced to dates on load; unparsable values become null.
pub const DATE_COLUMNS: [&str; 2] = [DATE_DECISION, DATE_ARGUMENT];

/// Numeric columns used for correlation.
pub const NUMERIC_COLUMNS: [&str; 2] = [PRECEDENT_ALTERATION, DECISION_DIRECTION];

/// Columns a filter selection may constrain.
pub const FILTER_COLUMNS: [&str; 4] = [DECISION_YEAR, JURISDICTION, ISSUE_AREA, LAW_TYPE];
