use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Upper bound (inclusive) in days for the `dueSoon` bucket.
pub const DUE_SOON_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UrgencyBucket {
    Overdue,
    DueToday,
    DueSoon,
    Later,
}

impl UrgencyBucket {
    pub const ALL: [UrgencyBucket; 4] = [
        UrgencyBucket::Overdue,
        UrgencyBucket::DueToday,
        UrgencyBucket::DueSoon,
        UrgencyBucket::Later,
    ];

    pub fn from_diff_days(diff_days: i64) -> Self {
        match diff_days {
            d if d < 0 => UrgencyBucket::Overdue,
            0 => UrgencyBucket::DueToday,
            d if d <= DUE_SOON_DAYS => UrgencyBucket::DueSoon,
            _ => UrgencyBucket::Later,
        }
    }

    pub fn classify(date: NaiveDate, today: NaiveDate) -> Self {
        Self::from_diff_days(diff_days(date, today))
    }
}

/// Whole calendar days from `today` to `date`. Negative when `date` is in the past.
pub fn diff_days(date: NaiveDate, today: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

/// Human readable countdown shown next to an assignment.
pub fn day_label(diff_days: i64) -> String {
    match diff_days {
        d if d < 0 => "Overdue".to_string(),
        0 => "Due Today".to_string(),
        1 => "Due Tomorrow".to_string(),
        d => format!("{} days", d),
    }
}
