mod course;
mod course_progress;
pub mod fields;
mod ids;
mod lesson;
mod live;
mod material;
mod module;

pub use fields::{Link, LinkError, TextError};
pub use ids::{CourseId, LessonId, LiveId, MaterialId, ModuleId, ParseIdError, UserId};

pub use course::{Course, CourseDraft, CourseError};
pub use course_progress::CourseProgress;
pub use lesson::{Lesson, LessonDraft, LessonError};
pub use live::{Live, LiveDraft, LiveError};
pub use material::{Material, MaterialDraft, MaterialError};
pub use module::{Module, ModuleDraft, ModuleError};
