use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Trims `raw` and rejects it when nothing is left.
///
/// # Errors
///
/// Returns `TextError::Empty` naming `field` for blank input.
pub fn required_text(field: &'static str, raw: impl Into<String>) -> Result<String, TextError> {
    let raw = raw.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TextError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

/// Trims `raw`, keeping an empty string for blank input.
#[must_use]
pub fn optional_text(raw: impl Into<String>) -> String {
    raw.into().trim().to_owned()
}
