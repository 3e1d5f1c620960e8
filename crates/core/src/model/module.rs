use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::fields::{TextError, required_text};
use crate::model::ids::{CourseId, LessonId, ModuleId};
use crate::model::lesson::Lesson;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModuleError {
    #[error(transparent)]
    Text(#[from] TextError),

    #[error("lesson {lesson_id} belongs to module {owner}, not {module_id}")]
    ForeignLesson {
        lesson_id: LessonId,
        owner: ModuleId,
        module_id: ModuleId,
    },
}

/// Unvalidated module fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDraft {
    pub course_id: CourseId,
    pub title: String,
}

impl ModuleDraft {
    /// Validate the draft into an empty module.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::Text` if the title is blank.
    pub fn validate(self, id: ModuleId, now: DateTime<Utc>) -> Result<Module, ModuleError> {
        Module::new(id, self.course_id, self.title, now)
    }
}

/// An ordered grouping of lessons within a course.
///
/// Lesson order is insertion order and is preserved as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    id: ModuleId,
    course_id: CourseId,
    title: String,
    created_at: DateTime<Utc>,
    lessons: Vec<Lesson>,
}

impl Module {
    /// Creates a module with no lessons.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::Text` if the title is blank.
    pub fn new(
        id: ModuleId,
        course_id: CourseId,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ModuleError> {
        Ok(Self {
            id,
            course_id,
            title: required_text("module title", title)?,
            created_at,
            lessons: Vec::new(),
        })
    }

    /// Replace the lesson list, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::ForeignLesson` if any lesson names another module.
    pub fn with_lessons(mut self, lessons: Vec<Lesson>) -> Result<Self, ModuleError> {
        if let Some(stray) = lessons.iter().find(|l| l.module_id() != self.id) {
            return Err(ModuleError::ForeignLesson {
                lesson_id: stray.id(),
                owner: stray.module_id(),
                module_id: self.id,
            });
        }
        self.lessons = lessons;
        Ok(self)
    }

    pub(crate) fn push_lesson(&mut self, lesson: Lesson) {
        debug_assert_eq!(lesson.module_id(), self.id);
        self.lessons.push(lesson);
    }

    #[must_use]
    pub fn id(&self) -> ModuleId {
        self.id
    }

    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Split into the lesson-free header and the lessons.
    #[must_use]
    pub fn into_parts(mut self) -> (Self, Vec<Lesson>) {
        let lessons = std::mem::take(&mut self.lessons);
        (self, lessons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn lesson(module_id: ModuleId) -> Lesson {
        Lesson::new(
            LessonId::random(),
            module_id,
            "Intro",
            "10:00",
            "https://video.example.com/intro",
            fixed_now(),
        )
        .unwrap()
    }

    #[test]
    fn with_lessons_rejects_foreign_lesson() {
        let module = Module::new(ModuleId::random(), CourseId::random(), "Basics", fixed_now())
            .unwrap();
        let stray = lesson(ModuleId::random());
        let err = module.with_lessons(vec![stray.clone()]).unwrap_err();
        assert!(matches!(
            err,
            ModuleError::ForeignLesson { lesson_id, .. } if lesson_id == stray.id()
        ));
    }

    #[test]
    fn with_lessons_keeps_order() {
        let module = Module::new(ModuleId::random(), CourseId::random(), "Basics", fixed_now())
            .unwrap();
        let first = lesson(module.id());
        let second = lesson(module.id());
        let module = module
            .with_lessons(vec![first.clone(), second.clone()])
            .unwrap();
        let ids: Vec<_> = module.lessons().iter().map(Lesson::id).collect();
        assert_eq!(ids, vec![first.id(), second.id()]);
    }

    #[test]
    fn into_parts_strips_lessons() {
        let module = Module::new(ModuleId::random(), CourseId::random(), "Basics", fixed_now())
            .unwrap();
        let l = lesson(module.id());
        let (header, lessons) = module.with_lessons(vec![l]).unwrap().into_parts();
        assert!(header.lessons().is_empty());
        assert_eq!(lessons.len(), 1);
    }
}
