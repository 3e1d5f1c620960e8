//! Derives per-lesson completion and lock flags from a course's stored
//! progress percentage.
//!
//! There is no per-lesson completion record. The stored percentage is turned
//! into a lesson count (the threshold) over the flattened lesson order:
//!
//! - positions before the threshold are completed,
//! - the position at the threshold is the current lesson (unlocked, incomplete),
//! - everything after it is locked.

use serde::Serialize;

use crate::model::{Lesson, LessonId, Module, ModuleId};
use crate::progress::ProgressPercent;

/// Render state of a single lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonState {
    Completed,
    Current,
    Locked,
}

/// A lesson with its derived flags. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedLesson {
    #[serde(flatten)]
    lesson: Lesson,
    position: usize,
    completed: bool,
    locked: bool,
}

impl AnnotatedLesson {
    #[must_use]
    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    #[must_use]
    pub fn id(&self) -> LessonId {
        self.lesson.id()
    }

    /// Zero-based index in the flattened course order.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn state(&self) -> LessonState {
        match (self.completed, self.locked) {
            (true, _) => LessonState::Completed,
            (false, true) => LessonState::Locked,
            (false, false) => LessonState::Current,
        }
    }
}

/// A module whose lessons carry derived flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedModule {
    id: ModuleId,
    title: String,
    lessons: Vec<AnnotatedLesson>,
}

impl AnnotatedModule {
    #[must_use]
    pub fn id(&self) -> ModuleId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn lessons(&self) -> &[AnnotatedLesson] {
        &self.lessons
    }

    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.lessons.iter().filter(|l| l.completed).count()
    }
}

/// Result of [`annotate`]: the annotated tree plus aggregate counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedCourse {
    modules: Vec<AnnotatedModule>,
    progress: ProgressPercent,
    total_lessons: usize,
    completed_lessons: usize,
}

impl AnnotatedCourse {
    #[must_use]
    pub fn modules(&self) -> &[AnnotatedModule] {
        &self.modules
    }

    /// Stored percentage the annotation was derived from.
    #[must_use]
    pub fn progress(&self) -> ProgressPercent {
        self.progress
    }

    #[must_use]
    pub fn total_lessons(&self) -> usize {
        self.total_lessons
    }

    #[must_use]
    pub fn completed_lessons(&self) -> usize {
        self.completed_lessons
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_lessons == 0
    }

    /// Lessons in flattened course order.
    pub fn lessons(&self) -> impl Iterator<Item = &AnnotatedLesson> {
        self.modules.iter().flat_map(|m| m.lessons.iter())
    }

    #[must_use]
    pub fn lesson(&self, id: LessonId) -> Option<&AnnotatedLesson> {
        self.lessons().find(|l| l.id() == id)
    }

    /// First unlocked lesson in course order; `None` for an empty course.
    #[must_use]
    pub fn initial_lesson(&self) -> Option<&AnnotatedLesson> {
        self.lessons().find(|l| !l.locked)
    }

    /// The single unlocked-but-incomplete lesson, if the course is not finished.
    #[must_use]
    pub fn current_lesson(&self) -> Option<&AnnotatedLesson> {
        self.lessons().find(|l| l.state() == LessonState::Current)
    }

    /// Resolve which lesson to play.
    ///
    /// An explicit selection wins when it names an unlocked lesson of this
    /// course; locked or unknown selections fall back to [`Self::initial_lesson`].
    #[must_use]
    pub fn select_lesson(&self, explicit: Option<LessonId>) -> Option<&AnnotatedLesson> {
        explicit
            .and_then(|id| self.lesson(id))
            .filter(|l| !l.locked)
            .or_else(|| self.initial_lesson())
    }

    /// `completed / total * 100`, rounded half up. An empty course reports 0.
    #[must_use]
    pub fn completion_percent(&self) -> u8 {
        if self.total_lessons == 0 {
            return 0;
        }
        let rounded =
            (self.completed_lessons * 200 + self.total_lessons) / (2 * self.total_lessons);
        u8::try_from(rounded).unwrap_or(100)
    }
}

/// Annotate `modules` for a course stored at `progress`.
///
/// Pure: the output depends only on the flattened lesson order and the
/// percentage. Modules without lessons contribute nothing to the order.
#[must_use]
pub fn annotate(modules: &[Module], progress: ProgressPercent) -> AnnotatedCourse {
    let total_lessons: usize = modules.iter().map(|m| m.lessons().len()).sum();
    let threshold = progress.lesson_threshold(total_lessons).min(total_lessons);

    let mut position = 0;
    let annotated = modules
        .iter()
        .map(|module| {
            let lessons = module
                .lessons()
                .iter()
                .map(|lesson| {
                    let annotated = AnnotatedLesson {
                        lesson: lesson.clone(),
                        position,
                        completed: position < threshold,
                        locked: position > threshold,
                    };
                    position += 1;
                    annotated
                })
                .collect();
            AnnotatedModule {
                id: module.id(),
                title: module.title().to_owned(),
                lessons,
            }
        })
        .collect();

    AnnotatedCourse {
        modules: annotated,
        progress,
        total_lessons,
        completed_lessons: threshold,
    }
}
