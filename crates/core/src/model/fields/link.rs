use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} is not a valid URL: {raw}")]
    Invalid { field: &'static str, raw: String },
}

/// An absolute URL pointing at external content (video, download, cover image).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Link(Url);

impl Link {
    /// Parses a required link.
    ///
    /// # Errors
    ///
    /// Returns `LinkError::Empty` for blank input and `LinkError::Invalid`
    /// when the text is not an absolute URL.
    pub fn parse(field: &'static str, raw: impl AsRef<str>) -> Result<Self, LinkError> {
        let s = raw.as_ref().trim();
        if s.is_empty() {
            return Err(LinkError::Empty { field });
        }
        Url::parse(s).map(Self).map_err(|_| LinkError::Invalid {
            field,
            raw: s.to_owned(),
        })
    }

    /// Parses a link that may be left blank.
    ///
    /// # Errors
    ///
    /// Returns `LinkError::Invalid` when non-blank text is not an absolute URL.
    pub fn parse_optional(
        field: &'static str,
        raw: impl AsRef<str>,
    ) -> Result<Option<Self>, LinkError> {
        if raw.as_ref().trim().is_empty() {
            return Ok(None);
        }
        Self::parse(field, raw).map(Some)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_absolute_url() {
        let link = Link::parse("video_url", " https://www.youtube.com/embed/abc ").unwrap();
        assert_eq!(link.as_str(), "https://www.youtube.com/embed/abc");
    }

    #[test]
    fn parse_rejects_relative_path() {
        let err = Link::parse("download_url", "files/guide.pdf").unwrap_err();
        assert!(matches!(err, LinkError::Invalid { field: "download_url", .. }));
    }

    #[test]
    fn parse_optional_allows_blank() {
        assert_eq!(Link::parse_optional("image", "   ").unwrap(), None);
    }

    #[test]
    fn parse_rejects_blank() {
        assert_eq!(
            Link::parse("link", "").unwrap_err(),
            LinkError::Empty { field: "link" }
        );
    }
}
