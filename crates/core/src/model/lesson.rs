use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::fields::{Link, LinkError, TextError, optional_text, required_text};
use crate::model::ids::{LessonId, ModuleId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error(transparent)]
    Text(#[from] TextError),

    #[error(transparent)]
    Link(#[from] LinkError),
}

/// Unvalidated lesson fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDraft {
    pub module_id: ModuleId,
    pub title: String,
    pub duration: String,
    pub video_url: String,
}

impl LessonDraft {
    /// Validate the draft and stamp it with an id and creation time.
    ///
    /// # Errors
    ///
    /// Returns `LessonError` if the title is blank or the video URL is invalid.
    pub fn validate(self, id: LessonId, now: DateTime<Utc>) -> Result<Lesson, LessonError> {
        Lesson::new(
            id,
            self.module_id,
            self.title,
            self.duration,
            &self.video_url,
            now,
        )
    }
}

/// A single playable unit of content inside a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    id: LessonId,
    module_id: ModuleId,
    title: String,
    duration: String,
    video_url: Link,
    created_at: DateTime<Utc>,
}

impl Lesson {
    /// Creates a new Lesson.
    ///
    /// `duration` is a free-form label such as `"15:30"`.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Text` for a blank title and `LessonError::Link`
    /// if the video reference is missing or not an absolute URL.
    pub fn new(
        id: LessonId,
        module_id: ModuleId,
        title: impl Into<String>,
        duration: impl Into<String>,
        video_url: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, LessonError> {
        Ok(Self {
            id,
            module_id,
            title: required_text("lesson title", title)?,
            duration: optional_text(duration),
            video_url: Link::parse("video_url", video_url)?,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn module_id(&self) -> ModuleId {
        self.module_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn duration(&self) -> &str {
        &self.duration
    }

    #[must_use]
    pub fn video_url(&self) -> &Link {
        &self.video_url
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn lesson_requires_video_url() {
        let err = Lesson::new(
            LessonId::random(),
            ModuleId::random(),
            "What are chatbots",
            "15:30",
            " ",
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            LessonError::Link(LinkError::Empty { field: "video_url" })
        );
    }

    #[test]
    fn draft_validate_happy_path() {
        let module_id = ModuleId::random();
        let lesson = LessonDraft {
            module_id,
            title: " Planning ".into(),
            duration: "22:15".into(),
            video_url: "https://www.youtube.com/embed/xyz".into(),
        }
        .validate(LessonId::random(), fixed_now())
        .unwrap();

        assert_eq!(lesson.module_id(), module_id);
        assert_eq!(lesson.title(), "Planning");
        assert_eq!(lesson.duration(), "22:15");
    }
}
