use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub code: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Course {
    /// Label used by the calendar legend, e.g. `CS101 - Intro to Programming`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.title)
    }

    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.code.to_lowercase().contains(&term)
            || self.title.to_lowercase().contains(&term)
    }
}
