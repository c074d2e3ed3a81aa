use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::Serialize;
use tracing::info;

use crate::agenda::{Agenda, CalendarMarkers, DatedAssignment, UpcomingItem, YearRange};
use crate::client::{CatalogClient, ClientError};
use crate::models::{Assignment, Course};

/// Placeholder shown where a value is missing.
pub const MISSING: &str = "--";

pub struct DashboardService {
    client: Arc<dyn CatalogClient>,
}

/// Courses and assignments fetched for one view load.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub courses: Vec<Course>,
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRow {
    #[serde(flatten)]
    pub item: UpcomingItem,
    pub course_code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub courses: Vec<Course>,
    pub upcoming: Vec<DashboardRow>,
    pub due_soon_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseLegend {
    pub id: String,
    pub label: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
    pub legend: Vec<CourseLegend>,
    pub markers: CalendarMarkers,
    pub selected: Vec<DatedAssignment>,
    pub years: YearRange,
}

impl DashboardService {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self { client }
    }

    /// Fetch courses and assignments. The two requests are independent and
    /// run concurrently.
    pub async fn load(&self) -> Result<Snapshot, ClientError> {
        let (courses, assignments) = tokio::try_join!(
            self.client.fetch_courses(),
            self.client.fetch_assignments()
        )?;
        info!(
            "loaded {} courses, {} assignments",
            courses.len(),
            assignments.len()
        );
        Ok(Snapshot {
            courses,
            assignments,
        })
    }
}

impl Snapshot {
    pub fn dashboard<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Dashboard {
        let codes: HashMap<&str, &str> = self
            .courses
            .iter()
            .map(|c| (c.id.as_str(), c.code.as_str()))
            .collect();

        let feed = Agenda::build(self.assignments.iter().cloned(), now).feed();
        let upcoming = feed
            .assignments
            .into_iter()
            .map(|item| {
                let course_code = codes
                    .get(item.dated.course_id())
                    .map(|code| code.to_string())
                    .unwrap_or_else(|| MISSING.to_string());
                DashboardRow { item, course_code }
            })
            .collect();

        Dashboard {
            courses: self.courses.clone(),
            upcoming,
            due_soon_count: feed.due_soon_count,
        }
    }

    /// Calendar page view. `visible` of `None` shows every course.
    pub fn calendar<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        selected: Option<NaiveDate>,
        visible: Option<&HashSet<String>>,
    ) -> CalendarView {
        let legend: Vec<CourseLegend> = self
            .courses
            .iter()
            .map(|c| CourseLegend {
                id: c.id.clone(),
                label: c.label(),
                visible: visible.is_none_or(|v| v.contains(&c.id)),
            })
            .collect();

        let mut agenda = Agenda::build(self.assignments.iter().cloned(), now);
        if let Some(visible) = visible {
            agenda = agenda.restrict_to_courses(visible);
        }

        CalendarView {
            legend,
            markers: agenda.markers(),
            selected: agenda.select(selected).into_iter().cloned().collect(),
            years: agenda.years(),
        }
    }

    /// Courses whose code or title contains `term`, ignoring case.
    pub fn search_courses(&self, term: &str) -> Vec<&Course> {
        self.courses.iter().filter(|c| c.matches(term)).collect()
    }
}
