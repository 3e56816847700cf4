use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Format produced by the deadline picker, e.g. `2024-01-02 09:00`.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub description: String,
    pub deadline: String, // opaque, usually DEADLINE_FORMAT
    pub category: Option<String>,
}

impl Task {
    pub fn new(
        description: impl Into<String>,
        deadline: impl Into<String>,
        category: Option<String>,
    ) -> Self {
        Self {
            description: description.into(),
            deadline: deadline.into(),
            category,
        }
    }

    pub fn category_str(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    /// Best-effort parse of the deadline. Accepts the picker format or a bare
    /// date (taken as midnight); anything else is `None`.
    pub fn deadline_at(&self) -> Option<NaiveDateTime> {
        let raw = self.deadline.trim();
        NaiveDateTime::parse_from_str(raw, DEADLINE_FORMAT)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(raw, DATE_FORMAT)
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }

    /// Case-insensitive substring match over every text field.
    pub fn matches(&self, needle_lower: &str) -> bool {
        [
            self.description.as_str(),
            self.deadline.as_str(),
            self.category_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle_lower))
    }
}
