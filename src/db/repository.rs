use sqlx::SqlitePool;

use crate::models::{Assignment, Course};

pub async fn fetch_courses(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, code, title, description FROM courses ORDER BY code, id"
    )
    .fetch_all(db)
    .await
}

pub async fn find_course_by_id(db: &SqlitePool, id: &str) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, code, title, description FROM courses WHERE id = ?"
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn fetch_assignments(db: &SqlitePool) -> Result<Vec<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(
        "SELECT id, course_id, title, due_at, total_points FROM assignments ORDER BY rowid"
    )
    .fetch_all(db)
    .await
}

pub async fn fetch_assignments_for_course(
    db: &SqlitePool,
    course_id: &str,
) -> Result<Vec<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(
        "SELECT id, course_id, title, due_at, total_points FROM assignments WHERE course_id = ? ORDER BY rowid"
    )
    .bind(course_id)
    .fetch_all(db)
    .await
}
