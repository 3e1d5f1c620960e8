use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::fields::{Link, LinkError, TextError, optional_text, required_text};
use crate::model::ids::MaterialId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MaterialError {
    #[error(transparent)]
    Text(#[from] TextError),

    #[error(transparent)]
    Link(#[from] LinkError),
}

/// Unvalidated material fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub download_url: String,
    pub kind: String,
}

impl MaterialDraft {
    /// # Errors
    ///
    /// Returns `MaterialError` if the title is blank or the download URL is invalid.
    pub fn validate(self, id: MaterialId, now: DateTime<Utc>) -> Result<Material, MaterialError> {
        Ok(Material {
            id,
            title: required_text("material title", self.title)?,
            description: optional_text(self.description),
            category: optional_text(self.category),
            download_url: Link::parse("download_url", &self.download_url)?,
            kind: optional_text(self.kind),
            created_at: now,
        })
    }
}

/// A downloadable support document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Material {
    id: MaterialId,
    title: String,
    description: String,
    category: String,
    download_url: Link,
    kind: String,
    created_at: DateTime<Utc>,
}

impl Material {
    #[must_use]
    pub fn id(&self) -> MaterialId {
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
    pub fn download_url(&self) -> &Link {
        &self.download_url
    }

    /// File kind label such as `"PDF"` or `"ZIP"`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
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
    fn validate_requires_download_url() {
        let err = MaterialDraft {
            title: "Best practices guide".into(),
            description: String::new(),
            category: "Guides".into(),
            download_url: String::new(),
            kind: "PDF".into(),
        }
        .validate(MaterialId::random(), fixed_now())
        .unwrap_err();
        assert_eq!(
            err,
            MaterialError::Link(LinkError::Empty {
                field: "download_url"
            })
        );
    }
}
