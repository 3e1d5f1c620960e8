use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("invalid progress percentage: {raw}")]
    InvalidInput { raw: String },
}

/// How much of a course a user has completed, always within `0..=100`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
)]
#[serde(transparent)]
pub struct ProgressPercent(u8);

impl ProgressPercent {
    pub const ZERO: Self = Self(0);
    pub const COMPLETE: Self = Self(100);

    /// Strict constructor for values that must already be in range.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidInput` for values below 0 or above 100.
    pub fn new(value: i64) -> Result<Self, ProgressError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::COMPLETE.0)
            .map(Self)
            .ok_or_else(|| ProgressError::InvalidInput {
                raw: value.to_string(),
            })
    }

    /// Clamps any integer into `0..=100`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(0, i64::from(Self::COMPLETE.0));
        // bounded fits in u8 after the clamp
        Self(u8::try_from(bounded).unwrap_or(Self::COMPLETE.0))
    }

    /// Reads a stored percentage; a missing row or null column counts as 0.
    #[must_use]
    pub fn from_stored(value: Option<i64>) -> Self {
        value.map_or(Self::ZERO, Self::clamped)
    }

    /// Accepts a numeric percentage from a loosely typed source.
    ///
    /// Fractions are truncated and out-of-range values clamped.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidInput` for NaN or infinite values.
    pub fn try_from_f64(value: f64) -> Result<Self, ProgressError> {
        if !value.is_finite() {
            return Err(ProgressError::InvalidInput {
                raw: value.to_string(),
            });
        }
        let bounded = value.trunc().clamp(0.0, f64::from(Self::COMPLETE.0));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(bounded as u8))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_started(self) -> bool {
        self.0 > 0
    }

    /// Number of lessons treated as completed out of `total`:
    /// `floor(percent / 100 * total)`.
    #[must_use]
    pub fn lesson_threshold(self, total: usize) -> usize {
        let p = usize::from(self.0);
        // Split so the multiplication cannot overflow for large totals.
        (total / 100) * p + (total % 100) * p / 100
    }
}

impl fmt::Display for ProgressPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_bounds_values() {
        assert_eq!(ProgressPercent::clamped(150), ProgressPercent::COMPLETE);
        assert_eq!(ProgressPercent::clamped(-20), ProgressPercent::ZERO);
        assert_eq!(ProgressPercent::clamped(42).value(), 42);
    }

    #[test]
    fn from_stored_treats_null_as_zero() {
        assert_eq!(ProgressPercent::from_stored(None), ProgressPercent::ZERO);
        assert_eq!(ProgressPercent::from_stored(Some(80)).value(), 80);
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(ProgressPercent::new(-1).is_err());
        assert!(ProgressPercent::new(101).is_err());
        assert_eq!(ProgressPercent::new(100).unwrap(), ProgressPercent::COMPLETE);
    }

    #[test]
    fn try_from_f64_rejects_non_numbers() {
        assert!(matches!(
            ProgressPercent::try_from_f64(f64::NAN),
            Err(ProgressError::InvalidInput { .. })
        ));
        assert!(ProgressPercent::try_from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn try_from_f64_truncates_and_clamps() {
        assert_eq!(ProgressPercent::try_from_f64(99.9).unwrap().value(), 99);
        assert_eq!(ProgressPercent::try_from_f64(-3.5).unwrap(), ProgressPercent::ZERO);
        assert_eq!(
            ProgressPercent::try_from_f64(250.0).unwrap(),
            ProgressPercent::COMPLETE
        );
    }

    #[test]
    fn threshold_floors() {
        assert_eq!(ProgressPercent::clamped(99).lesson_threshold(10), 9);
        assert_eq!(ProgressPercent::clamped(50).lesson_threshold(11), 5);
        assert_eq!(ProgressPercent::clamped(40).lesson_threshold(5), 2);
        assert_eq!(ProgressPercent::COMPLETE.lesson_threshold(7), 7);
        assert_eq!(ProgressPercent::ZERO.lesson_threshold(7), 0);
    }

    #[test]
    fn threshold_matches_naive_formula() {
        for total in [0_usize, 1, 3, 99, 100, 101, 257, 1_234] {
            for p in 0..=100_u8 {
                let naive = usize::from(p) * total / 100;
                assert_eq!(ProgressPercent(p).lesson_threshold(total), naive);
            }
        }
    }

    #[test]
    fn display_appends_percent_sign() {
        assert_eq!(ProgressPercent::clamped(30).to_string(), "30%");
    }
}
