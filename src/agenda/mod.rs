//! Due-date aggregation.
//!
//! Turns a flat list of assignments into due-ordered, calendar-dated views
//! classified by urgency. Everything here is synchronous and free of I/O;
//! the reference instant is always passed in by the caller.

pub mod dated;
pub mod feed;
pub mod markers;
pub mod selection;
pub mod urgency;

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, TimeZone};

pub use dated::{DatedAssignment, days_until, filter_and_date, parse_due, sort_by_due};
pub use feed::{UpcomingFeed, UpcomingItem};
pub use markers::{CalendarMarkers, YearRange};
pub use selection::select_day;
pub use urgency::{DUE_SOON_DAYS, UrgencyBucket, day_label, diff_days};

use crate::models::Assignment;

/// One aggregation pass. `today` is fixed when the pass is built so every
/// derived view classifies against the same day.
#[derive(Debug, Clone)]
pub struct Agenda {
    today: NaiveDate,
    dated: Vec<DatedAssignment>,
}

impl Agenda {
    pub fn build<Tz, I>(assignments: I, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        I: IntoIterator<Item = Assignment>,
    {
        Self {
            today: now.date_naive(),
            dated: sort_by_due(filter_and_date(assignments, now)),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Dated assignments ordered by due instant.
    pub fn assignments(&self) -> &[DatedAssignment] {
        &self.dated
    }

    pub fn len(&self) -> usize {
        self.dated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dated.is_empty()
    }

    pub fn days_until(&self, dated: &DatedAssignment) -> i64 {
        diff_days(dated.date, self.today)
    }

    pub fn markers(&self) -> CalendarMarkers {
        CalendarMarkers::relative_to(&self.dated, self.today)
    }

    pub fn feed(&self) -> UpcomingFeed {
        UpcomingFeed::build(&self.dated, self.today)
    }

    pub fn select(&self, selected: Option<NaiveDate>) -> Vec<&DatedAssignment> {
        select_day(&self.dated, selected)
    }

    pub fn years(&self) -> YearRange {
        YearRange::of(&self.dated, self.today)
    }

    /// Keep only assignments of the given courses.
    pub fn restrict_to_courses(mut self, visible: &HashSet<String>) -> Self {
        self.dated.retain(|d| visible.contains(d.course_id()));
        self
    }
}
