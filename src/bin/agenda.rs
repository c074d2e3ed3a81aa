use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coursetrack::agenda::UrgencyBucket;
use coursetrack::client::{ClientConfig, HttpCatalogClient};
use coursetrack::services::dashboard::MISSING;
use coursetrack::services::{CalendarView, Dashboard, DashboardService};

/// Terminal view of courses and upcoming assignments.
#[derive(Parser)]
#[command(name = "agenda", version)]
struct Cli {
    /// Backend base URL.
    #[arg(long, env = "API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Courses and the upcoming assignment feed.
    Dashboard,
    /// List courses, optionally filtered by code or title.
    Courses {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Calendar markers and the assignments due on a day.
    Calendar {
        /// Day to show, YYYY-MM-DD.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Only show these course ids. Repeatable.
        #[arg(long = "course")]
        courses: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "coursetrack=warn".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match cli.api_url {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_env(),
    };
    let client = Arc::new(HttpCatalogClient::new(config)?);
    let service = DashboardService::new(client);

    let snapshot = service.load().await?;
    let now = Local::now();

    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => print_dashboard(&snapshot.dashboard(&now)),
        Command::Courses { search } => {
            let courses = snapshot.search_courses(&search);
            if courses.is_empty() {
                println!("No courses found.");
            }
            for course in courses {
                println!("{:<10} {}", course.code, course.title);
                println!(
                    "           {}",
                    course.description.as_deref().unwrap_or(MISSING)
                );
            }
        }
        Command::Calendar { date, courses } => {
            let visible: HashSet<String> = courses.into_iter().collect();
            let visible = (!visible.is_empty()).then_some(&visible);
            let selected = date.or_else(|| Some(now.date_naive()));
            print_calendar(&snapshot.calendar(&now, selected, visible), selected);
        }
    }

    Ok(())
}

fn print_dashboard(dashboard: &Dashboard) {
    println!("Your Courses");
    if dashboard.courses.is_empty() {
        println!("  (none)");
    }
    for course in &dashboard.courses {
        println!("  {:<10} {}", course.code, course.title);
    }

    println!();
    println!("Upcoming Assignments ({} due soon)", dashboard.due_soon_count);
    if dashboard.upcoming.is_empty() {
        println!("  (none)");
    }
    for row in &dashboard.upcoming {
        let assignment = &row.item.dated.assignment;
        let points = assignment
            .total_points
            .map(|p| format!("{} pts", p))
            .unwrap_or_else(|| MISSING.to_string());
        println!(
            "  {:<14} {:<10} {:<30} {}  {}",
            row.item.label,
            row.course_code,
            assignment.title,
            row.item.dated.date,
            points
        );
    }
}

fn print_calendar(view: &CalendarView, selected: Option<NaiveDate>) {
    println!("Years {}-{}", view.years.min, view.years.max);
    for legend in &view.legend {
        let mark = if legend.visible { "x" } else { " " };
        println!("  [{}] {}", mark, legend.label);
    }

    println!();
    for bucket in UrgencyBucket::ALL {
        let dates: Vec<String> = view
            .markers
            .bucket(bucket)
            .iter()
            .map(|d| d.to_string())
            .collect();
        println!("{:<9} {}", bucket_name(bucket), dates.join(", "));
    }

    if let Some(day) = selected {
        println!();
        println!("Due {}", day);
        if view.selected.is_empty() {
            println!("  nothing due");
        }
        for dated in &view.selected {
            println!("  {}  {}", dated.due.format("%H:%M"), dated.assignment.title);
        }
    }
}

fn bucket_name(bucket: UrgencyBucket) -> &'static str {
    match bucket {
        UrgencyBucket::Overdue => "overdue",
        UrgencyBucket::DueToday => "today",
        UrgencyBucket::DueSoon => "soon",
        UrgencyBucket::Later => "later",
    }
}
