use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::fields::{Link, LinkError, TextError, optional_text, required_text};
use crate::model::ids::CourseId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error(transparent)]
    Text(#[from] TextError),

    #[error(transparent)]
    Link(#[from] LinkError),
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated course fields as entered by an admin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
}

impl CourseDraft {
    /// Validate the draft and stamp it with an id and creation time.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` if the title is blank or the image is not a URL.
    pub fn validate(self, id: CourseId, now: DateTime<Utc>) -> Result<Course, CourseError> {
        Course::new(
            id,
            self.title,
            self.description,
            self.category,
            &self.image,
            now,
        )
    }
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// A top-level learning unit composed of modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    id: CourseId,
    title: String,
    description: String,
    category: String,
    image: Option<Link>,
    created_at: DateTime<Utc>,
}

impl Course {
    /// Creates a new Course.
    ///
    /// A blank `image` means the course has no cover.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::Text` if the title is blank, or
    /// `CourseError::Link` if a non-blank image is not an absolute URL.
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        image: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CourseError> {
        Ok(Self {
            id,
            title: required_text("course title", title)?,
            description: optional_text(description),
            category: optional_text(category),
            image: Link::parse_optional("course image", image)?,
            created_at,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> CourseId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn image(&self) -> Option<&Link> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
