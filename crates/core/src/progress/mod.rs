mod annotate;
mod percent;

pub use annotate::{AnnotatedCourse, AnnotatedLesson, AnnotatedModule, LessonState, annotate};
pub use percent::{ProgressError, ProgressPercent};
