use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::ids::{CourseId, UserId};
use crate::progress::ProgressPercent;

/// Stored completion percentage for one (user, course) pair.
///
/// This is the only completion record; lesson flags are derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CourseProgress {
    pub user_id: UserId,
    pub course_id: CourseId,
    pub percent: ProgressPercent,
    pub updated_at: DateTime<Utc>,
}

impl CourseProgress {
    #[must_use]
    pub fn new(
        user_id: UserId,
        course_id: CourseId,
        percent: ProgressPercent,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            course_id,
            percent,
            updated_at,
        }
    }
}
