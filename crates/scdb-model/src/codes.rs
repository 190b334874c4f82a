//! Fixed code-to-label tables for the coded case attributes.
//!
//! Each table is total: codes outside the listed domain, and missing values,
//! map to the table's fallback label.

use std::collections::BTreeSet;

use crate::columns;

/// A lookup table from small integer codes to display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeMapping {
    /// Column the table applies to.
    pub column: &'static str,
    /// `(code, label)` pairs sorted by code.
    pub entries: &'static [(i64, &'static str)],
    /// Label for unmapped and missing codes.
    pub fallback: &'static str,
}

impl CodeMapping {
    /// Returns the label for a code, or the fallback.
    pub fn label(&self, code: Option<i64>) -> &'static str {
        code.and_then(|code| {
            self.entries
                .binary_search_by_key(&code, |(key, _)| *key)
                .ok()
                .map(|idx| self.entries[idx].1)
        })
        .unwrap_or(self.fallback)
    }

    /// Returns true if `code` is in the table's explicit domain.
    pub fn is_mapped(&self, code: i64) -> bool {
        self.entries
            .binary_search_by_key(&code, |(key, _)| *key)
            .is_ok()
    }

    /// Every label the recoder can produce for this column.
    pub fn range(&self) -> BTreeSet<&'static str> {
        self.entries
            .iter()
            .map(|(_, label)| *label)
            .chain(std::iter::once(self.fallback))
            .collect()
    }
}

pub static JURISDICTION: CodeMapping = CodeMapping {
    column: columns::JURISDICTION,
    entries: &[(1, "Federal"), (2, "State"), (9, "Local")],
    fallback: "Other",
};

pub static ISSUE_AREA: CodeMapping = CodeMapping {
    column: columns::ISSUE_AREA,
    entries: &[
        (1, "Workers' rights"),
        (2, "Tax disputes"),
        (3, "Patents"),
        (6, "Military"),
        (8, "Attorney's fees"),
        (9, "Bankruptcy"),
    ],
    fallback: "Other",
};

pub static LAW_TYPE: CodeMapping = CodeMapping {
    column: columns::LAW_TYPE,
    entries: &[
        (1, "Criminal"),
        (2, "Civil"),
        (3, "Administrative"),
        (4, "Economic"),
        (5, "Commercial"),
        (6, "Child"),
        (8, "Family"),
    ],
    fallback: "Other",
};

pub static PARTY_WINNING: CodeMapping = CodeMapping {
    column: columns::PARTY_WINNING,
    entries: &[(0, "Respondent"), (1, "Petitioner"), (2, "Have not finished")],
    fallback: "Unknown",
};

pub static DECLARATION_UNCONSTITUTIONALITY: CodeMapping = CodeMapping {
    column: columns::DECLARATION_UNCONSTITUTIONALITY,
    entries: &[
        (1, "Yes"),
        (2, "No"),
        (3, "Have not finished"),
        (4, "Unknown"),
    ],
    fallback: "Unknown",
};

pub static LOWER_COURT_DISPOSITION: CodeMapping = CodeMapping {
    column: columns::LOWER_COURT_DISPOSITION,
    entries: &[
        (0, "Affirmed"),
        (1, "Reversed"),
        (2, "Modified"),
        (3, "Vacated"),
        (4, "Other"),
    ],
    fallback: "Unknown",
};

pub static CASE_DISPOSITION: CodeMapping = CodeMapping {
    column: columns::CASE_DISPOSITION,
    entries: &[
        (1, "Affirmed"),
        (2, "Reversed"),
        (3, "Vacated"),
        (4, "Remanded"),
        (5, "Other"),
    ],
    fallback: "Unknown",
};

const STATE_ENTRIES: &[(i64, &str)] = &[
    (0, "Alaska"),
    (1, "California"),
    (2, "New Jersey"),
    (6, "New York"),
    (27, "Washington"),
    (39, "Georgia"),
    (51, "Arizona"),
    (60, "Texas"),
];

pub static PETITIONER_STATE: CodeMapping = CodeMapping {
    column: columns::PETITIONER_STATE,
    entries: STATE_ENTRIES,
    fallback: "Other",
};

pub static RESPONDENT_STATE: CodeMapping = CodeMapping {
    column: columns::RESPONDENT_STATE,
    entries: STATE_ENTRIES,
    fallback: "Other",
};

/// All tables applied at load time, one per coded column.
pub static STANDARD_MAPPINGS: [&CodeMapping; 9] = [
    &JURISDICTION,
    &ISSUE_AREA,
    &LAW_TYPE,
    &PARTY_WINNING,
    &DECLARATION_UNCONSTITUTIONALITY,
    &LOWER_COURT_DISPOSITION,
    &CASE_DISPOSITION,
    &PETITIONER_STATE,
    &RESPONDENT_STATE,
];

/// Looks up the table for a coded column.
pub fn mapping_for(column: &str) -> Option<&'static CodeMapping> {
    STANDARD_MAPPINGS
        .iter()
        .copied()
        .find(|mapping| mapping.column == column)
}
