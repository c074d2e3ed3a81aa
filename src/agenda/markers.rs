use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use serde::Serialize;

use crate::agenda::dated::DatedAssignment;
use crate::agenda::urgency::UrgencyBucket;

/// Distinct due dates per urgency bucket, used to highlight calendar days.
///
/// Every date lands in exactly one set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMarkers {
    pub overdue: BTreeSet<NaiveDate>,
    pub due_today: BTreeSet<NaiveDate>,
    pub due_soon: BTreeSet<NaiveDate>,
    pub later: BTreeSet<NaiveDate>,
}

impl CalendarMarkers {
    pub fn build<Tz: TimeZone>(dated: &[DatedAssignment], now: &DateTime<Tz>) -> Self {
        Self::relative_to(dated, now.date_naive())
    }

    pub fn relative_to(dated: &[DatedAssignment], today: NaiveDate) -> Self {
        let mut markers = Self::default();
        for date in dated.iter().map(|d| d.date) {
            markers
                .bucket_mut(UrgencyBucket::classify(date, today))
                .insert(date);
        }
        markers
    }

    pub fn bucket(&self, bucket: UrgencyBucket) -> &BTreeSet<NaiveDate> {
        match bucket {
            UrgencyBucket::Overdue => &self.overdue,
            UrgencyBucket::DueToday => &self.due_today,
            UrgencyBucket::DueSoon => &self.due_soon,
            UrgencyBucket::Later => &self.later,
        }
    }

    fn bucket_mut(&mut self, bucket: UrgencyBucket) -> &mut BTreeSet<NaiveDate> {
        match bucket {
            UrgencyBucket::Overdue => &mut self.overdue,
            UrgencyBucket::DueToday => &mut self.due_today,
            UrgencyBucket::DueSoon => &mut self.due_soon,
            UrgencyBucket::Later => &mut self.later,
        }
    }

    /// Bucket a calendar day is marked with, if any assignment is due that day.
    pub fn bucket_of(&self, date: NaiveDate) -> Option<UrgencyBucket> {
        UrgencyBucket::ALL
            .into_iter()
            .find(|b| self.bucket(*b).contains(&date))
    }

    pub fn all_dates(&self) -> BTreeSet<NaiveDate> {
        UrgencyBucket::ALL
            .into_iter()
            .flat_map(|b| self.bucket(b).iter().copied())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        UrgencyBucket::ALL.into_iter().all(|b| self.bucket(b).is_empty())
    }
}

/// Years the calendar year picker offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    /// Span of due years, or just the current year when nothing is dated.
    pub fn of(dated: &[DatedAssignment], today: NaiveDate) -> Self {
        let mut years = dated.iter().map(|d| d.date.year());
        match years.next() {
            Some(first) => years.fold(Self { min: first, max: first }, |acc, y| Self {
                min: acc.min.min(y),
                max: acc.max.max(y),
            }),
            None => Self {
                min: today.year(),
                max: today.year(),
            },
        }
    }
}
