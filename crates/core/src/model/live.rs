use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::fields::{Link, LinkError, TextError, optional_text, required_text};
use crate::model::ids::LiveId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LiveError {
    #[error(transparent)]
    Text(#[from] TextError),

    #[error(transparent)]
    Link(#[from] LinkError),
}

/// Unvalidated live-session fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveDraft {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub image: String,
    pub link: String,
    pub is_past: bool,
}

impl LiveDraft {
    /// # Errors
    ///
    /// Returns `LiveError` if the title is blank or a link is malformed.
    pub fn validate(self, id: LiveId, now: DateTime<Utc>) -> Result<Live, LiveError> {
        Ok(Live {
            id,
            title: required_text("live title", self.title)?,
            description: optional_text(self.description),
            date: self.date,
            time: optional_text(self.time),
            image: Link::parse_optional("live image", &self.image)?,
            link: Link::parse_optional("live link", &self.link)?,
            is_past: self.is_past,
            created_at: now,
        })
    }
}

/// A scheduled or already-held live session.
///
/// `is_past` is stored, not derived from the date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Live {
    id: LiveId,
    title: String,
    description: String,
    date: NaiveDate,
    time: String,
    image: Option<Link>,
    link: Option<Link>,
    is_past: bool,
    created_at: DateTime<Utc>,
}

impl Live {
    #[must_use]
    pub fn id(&self) -> LiveId {
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
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Time-of-day label, e.g. `"19:00"`.
    #[must_use]
    pub fn time(&self) -> &str {
        &self.time
    }

    #[must_use]
    pub fn image(&self) -> Option<&Link> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    #[must_use]
    pub fn is_past(&self) -> bool {
        self.is_past
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
