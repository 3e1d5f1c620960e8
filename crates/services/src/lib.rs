#![forbid(unsafe_code)]

pub mod app_services;
pub mod course_service;
pub mod error;
pub mod live_service;
pub mod material_service;
pub mod notify;

pub use portal_core::Clock;

pub use app_services::AppServices;
pub use course_service::{CourseCard, CourseDetail, CourseService};
pub use error::{AppServicesError, CourseServiceError, LiveServiceError, MaterialServiceError};
pub use live_service::{LiveSchedule, LiveService};
pub use material_service::MaterialService;
pub use notify::{MemoryNotifier, Notice, NoticeLevel, Notifier, TracingNotifier};
