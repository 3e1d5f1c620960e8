//! Shared error types for the services crate.

use thiserror::Error;

use portal_core::model::{
    CourseError, CourseId, LessonError, LiveError, MaterialError, ModuleError,
};
use portal_core::outline::OutlineError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `CourseService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CourseServiceError {
    #[error("course {0} not found")]
    CourseNotFound(CourseId),
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Module(#[from] ModuleError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Outline(#[from] OutlineError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `LiveService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LiveServiceError {
    #[error(transparent)]
    Live(#[from] LiveError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `MaterialService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MaterialServiceError {
    #[error(transparent)]
    Material(#[from] MaterialError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
