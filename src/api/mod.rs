use std::collections::HashSet;
use std::time::Duration;

use axum::Json;
use axum::extract::{Path, Query};
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, warn};

use crate::agenda::{Agenda, CalendarMarkers, DatedAssignment, UpcomingFeed, YearRange};
use crate::db::repository;
use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

#[derive(Deserialize)]
struct CalendarQueryParams {
    date: Option<String>,
    courses: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub markers: CalendarMarkers,
    pub selected: Vec<DatedAssignment>,
    pub years: YearRange,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses))
        .route("/courses/{id}", get(get_course))
        .route("/courses/{id}/assignments", get(list_course_assignments))
        .route("/assignments", get(list_assignments))
        .route("/agenda/upcoming", get(upcoming))
        .route("/agenda/calendar", get(calendar))
        .with_state(state)
}

/// CORS policy for the web frontend. With no configured origins the request
/// origin is echoed back.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::mirror_request()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("ignoring invalid CORS origin {:?}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
        .max_age(Duration::from_secs(60 * 60))
}

async fn health(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("select 1").execute(&state.db).await {
        Ok(_) => StatusCode::OK,
        Err(err) => {
            error!("health check failed: {}", err);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = repository::fetch_courses(&state.db).await.map_err(|e| {
        error!("failed to fetch courses: {}", e);
        AppError::Unavailable("Courses are temporarily unavailable".to_string())
    })?;
    Ok(Json(courses))
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Course>, AppError> {
    let course = repository::find_course_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(course))
}

async fn list_course_assignments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Assignment>>, AppError> {
    if repository::find_course_by_id(&state.db, &id).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let assignments = repository::fetch_assignments_for_course(&state.db, &id).await?;
    Ok(Json(assignments))
}

async fn list_assignments(State(state): State<AppState>) -> Result<Json<Vec<Assignment>>, AppError> {
    Ok(Json(load_assignments(&state).await?))
}

async fn upcoming(State(state): State<AppState>) -> Result<Json<UpcomingFeed>, AppError> {
    let assignments = load_assignments(&state).await?;
    let now = state.clock.now();
    let agenda = Agenda::build(assignments, &now);
    Ok(Json(agenda.feed()))
}

async fn calendar(
    State(state): State<AppState>,
    Query(params): Query<CalendarQueryParams>,
) -> Result<Json<CalendarResponse>, AppError> {
    let selected = match params.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| AppError::BadRequest(format!("invalid date: {}", raw)))?,
        ),
        _ => None,
    };

    let assignments = load_assignments(&state).await?;
    let now = state.clock.now();
    let mut agenda = Agenda::build(assignments, &now);
    if let Some(raw) = params.courses.as_deref() {
        let visible: HashSet<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        agenda = agenda.restrict_to_courses(&visible);
    }

    Ok(Json(CalendarResponse {
        markers: agenda.markers(),
        selected: agenda.select(selected).into_iter().cloned().collect(),
        years: agenda.years(),
    }))
}

async fn load_assignments(state: &AppState) -> Result<Vec<Assignment>, AppError> {
    repository::fetch_assignments(&state.db).await.map_err(|e| {
        error!("failed to fetch assignments: {}", e);
        AppError::Unavailable("Assignments are temporarily unavailable".to_string())
    })
}
