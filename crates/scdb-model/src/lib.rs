pub mod aggregate;
pub mod codes;
pub mod columns;
pub mod error;
pub mod selection;
pub mod view;

pub use aggregate::{
    CategoryCount, ContingencyTable, CorrelationMatrix, CountOrder, FrequencyTable, TopValue,
    TopValues,
};
pub use codes::{
    CASE_DISPOSITION, CodeMapping, DECLARATION_UNCONSTITUTIONALITY, ISSUE_AREA, JURISDICTION,
    LAW_TYPE, LOWER_COURT_DISPOSITION, PARTY_WINNING, PETITIONER_STATE, RESPONDENT_STATE,
    STANDARD_MAPPINGS, mapping_for,
};
pub use error::{ModelError, Result};
pub use selection::FilterSelection;
pub use view::{Metric, Panel, PanelContent, ViewKind, ViewReport};
