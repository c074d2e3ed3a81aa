use chrono::NaiveDate;
use serde::Serialize;

use crate::agenda::dated::DatedAssignment;
use crate::agenda::urgency::{DUE_SOON_DAYS, UrgencyBucket, day_label, diff_days};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingItem {
    #[serde(flatten)]
    pub dated: DatedAssignment,
    pub days_until: i64,
    pub label: String,
    pub bucket: UrgencyBucket,
}

/// Due-ordered work list plus the dashboard's "due soon" statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingFeed {
    pub assignments: Vec<UpcomingItem>,
    /// Items with `days_until <= 3`, overdue ones included.
    pub due_soon_count: usize,
}

impl UpcomingFeed {
    /// `sorted` must already be ordered by due instant.
    pub fn build(sorted: &[DatedAssignment], today: NaiveDate) -> Self {
        let assignments: Vec<UpcomingItem> = sorted
            .iter()
            .map(|dated| {
                let days_until = diff_days(dated.date, today);
                UpcomingItem {
                    dated: dated.clone(),
                    days_until,
                    label: day_label(days_until),
                    bucket: UrgencyBucket::from_diff_days(days_until),
                }
            })
            .collect();
        let due_soon_count = assignments
            .iter()
            .filter(|item| item.days_until <= DUE_SOON_DAYS)
            .count();

        Self {
            assignments,
            due_soon_count,
        }
    }
}
