//! Domain model for the membership portal: courses, modules, lessons, lives,
//! materials, and the progress annotation that drives the course outline.

#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod outline;
pub mod progress;
pub mod time;

pub use error::Error;
pub use progress::{AnnotatedCourse, ProgressPercent, annotate};
pub use time::Clock;
