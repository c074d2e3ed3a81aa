use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;
use tracing::debug;

use crate::agenda::urgency::diff_days;
use crate::models::Assignment;

/// Offset-less layouts accepted besides RFC 3339. Read as wall-clock time in
/// the reference zone.
const LOCAL_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// An assignment that has a readable due timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatedAssignment {
    #[serde(flatten)]
    pub assignment: Assignment,
    /// Due instant, expressed in the offset of the reference zone.
    pub due: DateTime<FixedOffset>,
    /// `due` truncated to local midnight.
    pub date: NaiveDate,
}

impl DatedAssignment {
    pub fn new(assignment: Assignment, due: DateTime<FixedOffset>) -> Self {
        let date = due.date_naive();
        Self {
            assignment,
            due,
            date,
        }
    }

    pub fn id(&self) -> &str {
        &self.assignment.id
    }

    pub fn course_id(&self) -> &str {
        &self.assignment.course_id
    }
}

/// Parse a due field in the zone `tz`.
///
/// Returns `None` for empty or unreadable input; callers treat that the same
/// as a missing due date.
pub fn parse_due<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz).fixed_offset());
    }

    let naive = LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
}

/// Drop assignments without a usable due date and pair the rest with their
/// calendar date in the zone of `now`.
pub fn filter_and_date<Tz, I>(assignments: I, now: &DateTime<Tz>) -> Vec<DatedAssignment>
where
    Tz: TimeZone,
    I: IntoIterator<Item = Assignment>,
{
    let tz = now.timezone();
    assignments
        .into_iter()
        .filter_map(|assignment| {
            let raw = assignment.due_at.as_deref()?;
            match parse_due(raw, &tz) {
                Some(due) => Some(DatedAssignment::new(assignment, due)),
                None => {
                    debug!("ignoring unreadable due date {:?} on assignment {}", raw, assignment.id);
                    None
                }
            }
        })
        .collect()
}

/// Ascending by due instant. Equal instants keep their input order.
pub fn sort_by_due(mut dated: Vec<DatedAssignment>) -> Vec<DatedAssignment> {
    dated.sort_by_key(|d| d.due);
    dated
}

/// Calendar days between the local date of `now` and the assignment's date.
pub fn days_until<Tz: TimeZone>(dated: &DatedAssignment, now: &DateTime<Tz>) -> i64 {
    diff_days(dated.date, now.date_naive())
}
