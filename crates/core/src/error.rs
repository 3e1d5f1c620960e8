use thiserror::Error;

use crate::model::{CourseError, LessonError, LiveError, MaterialError, ModuleError};
use crate::outline::OutlineError;
use crate::progress::ProgressError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Module(#[from] ModuleError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Live(#[from] LiveError),
    #[error(transparent)]
    Material(#[from] MaterialError),
    #[error(transparent)]
    Outline(#[from] OutlineError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}
