/// Presentation knobs for the views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Number of case names in the "most common" panel.
    pub top_case_names: usize,
    /// Characters kept in a shortened case name before the ellipsis.
    pub short_label_chars: usize,
    /// State labels left out of the state panels (case-insensitive).
    pub excluded_state_labels: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_case_names: 5,
            short_label_chars: 25,
            excluded_state_labels: vec!["Other".to_string()],
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn with_top_case_names(mut self, limit: usize) -> Self {
        self.top_case_names = limit;
        self
    }

    #[must_use]
    pub fn with_short_label_chars(mut self, chars: usize) -> Self {
        self.short_label_chars = chars;
        self
    }

    pub fn is_excluded_state(&self, label: &str) -> bool {
        let label = label.trim();
        self.excluded_state_labels
            .iter()
            .any(|excluded| excluded.trim().eq_ignore_ascii_case(label))
    }
}
