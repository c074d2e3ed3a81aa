use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Assignment record as served by `/assignments`.
///
/// `due_at` stays the raw string the provider stored. It is only parsed by the
/// agenda, which drops values it cannot read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub course_id: String,
    pub title: String,
    #[serde(default, alias = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_at: Option<String>,
    #[serde(default, alias = "points", skip_serializing_if = "Option::is_none")]
    pub total_points: Option<f64>,
}
