pub mod dashboard;

pub use dashboard::{CalendarView, CourseLegend, Dashboard, DashboardRow, DashboardService, Snapshot};
