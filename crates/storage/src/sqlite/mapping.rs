use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use portal_core::ProgressPercent;
use portal_core::model::{
    Course, CourseProgress, Lesson, Live, LiveDraft, Material, MaterialDraft, Module,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Maps driver errors, turning constraint failures into domain-level outcomes.
pub(crate) fn db_err(e: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return StorageError::Conflict;
        }
        if db.is_foreign_key_violation() {
            return StorageError::NotFound;
        }
    }
    StorageError::Connection(e.to_string())
}

pub(crate) fn parse_id<T>(row: &SqliteRow, column: &'static str) -> Result<T, StorageError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    let raw: String = row.try_get(column).map_err(ser)?;
    raw.parse::<T>()
        .map_err(|e| StorageError::Serialization(format!("{column}: {e}")))
}

fn link_text(link: Option<&portal_core::model::Link>) -> String {
    link.map(|l| l.as_str().to_owned()).unwrap_or_default()
}

pub(crate) fn course_image(course: &Course) -> String {
    link_text(course.image())
}

pub(crate) fn live_image(live: &Live) -> String {
    link_text(live.image())
}

pub(crate) fn live_link(live: &Live) -> String {
    link_text(live.link())
}

pub(crate) fn map_course_row(row: &SqliteRow) -> Result<Course, StorageError> {
    let image: String = row.try_get("image").map_err(ser)?;
    Course::new(
        parse_id(row, "id")?,
        row.try_get::<String, _>("title").map_err(ser)?,
        row.try_get::<String, _>("description").map_err(ser)?,
        row.try_get::<String, _>("category").map_err(ser)?,
        &image,
        row.try_get::<DateTime<Utc>, _>("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_module_row(row: &SqliteRow) -> Result<Module, StorageError> {
    Module::new(
        parse_id(row, "id")?,
        parse_id(row, "course_id")?,
        row.try_get::<String, _>("title").map_err(ser)?,
        row.try_get::<DateTime<Utc>, _>("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_lesson_row(row: &SqliteRow) -> Result<Lesson, StorageError> {
    let video_url: String = row.try_get("video_url").map_err(ser)?;
    Lesson::new(
        parse_id(row, "id")?,
        parse_id(row, "module_id")?,
        row.try_get::<String, _>("title").map_err(ser)?,
        row.try_get::<String, _>("duration").map_err(ser)?,
        &video_url,
        row.try_get::<DateTime<Utc>, _>("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_progress_row(row: &SqliteRow) -> Result<CourseProgress, StorageError> {
    Ok(CourseProgress::new(
        parse_id(row, "user_id")?,
        parse_id(row, "course_id")?,
        ProgressPercent::from_stored(row.try_get::<Option<i64>, _>("progress").map_err(ser)?),
        row.try_get::<DateTime<Utc>, _>("updated_at").map_err(ser)?,
    ))
}

pub(crate) fn map_live_row(row: &SqliteRow) -> Result<Live, StorageError> {
    let is_past: i64 = row.try_get("is_past").map_err(ser)?;
    LiveDraft {
        title: row.try_get("title").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
        date: row.try_get::<NaiveDate, _>("date").map_err(ser)?,
        time: row.try_get("time").map_err(ser)?,
        image: row.try_get("image").map_err(ser)?,
        link: row.try_get("link").map_err(ser)?,
        is_past: is_past != 0,
    }
    .validate(
        parse_id(row, "id")?,
        row.try_get::<DateTime<Utc>, _>("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_material_row(row: &SqliteRow) -> Result<Material, StorageError> {
    MaterialDraft {
        title: row.try_get("title").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
        category: row.try_get("category").map_err(ser)?,
        download_url: row.try_get("download_url").map_err(ser)?,
        kind: row.try_get("type").map_err(ser)?,
    }
    .validate(
        parse_id(row, "id")?,
        row.try_get::<DateTime<Utc>, _>("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

/// Collects mapped rows, failing on the first bad row.
pub(crate) fn map_rows<T>(
    rows: &[SqliteRow],
    map: fn(&SqliteRow) -> Result<T, StorageError>,
) -> Result<Vec<T>, StorageError> {
    rows.iter().map(map).collect()
}
