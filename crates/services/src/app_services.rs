use std::sync::Arc;

use storage::repository::Storage;

use crate::course_service::CourseService;
use crate::error::AppServicesError;
use crate::live_service::LiveService;
use crate::material_service::MaterialService;
use crate::notify::Notifier;
use crate::Clock;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    courses: Arc<CourseService>,
    lives: Arc<LiveService>,
    materials: Arc<MaterialService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, notifier))
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, notifier: Arc<dyn Notifier>) -> Self {
        let courses = Arc::new(CourseService::new(
            clock,
            Arc::clone(&storage.courses),
            Arc::clone(&storage.modules),
            Arc::clone(&storage.progress),
            Arc::clone(&notifier),
        ));
        let lives = Arc::new(LiveService::new(
            clock,
            Arc::clone(&storage.lives),
            Arc::clone(&notifier),
        ));
        let materials = Arc::new(MaterialService::new(
            clock,
            Arc::clone(&storage.materials),
            notifier,
        ));

        Self {
            courses,
            lives,
            materials,
        }
    }

    #[must_use]
    pub fn courses(&self) -> Arc<CourseService> {
        Arc::clone(&self.courses)
    }

    #[must_use]
    pub fn lives(&self) -> Arc<LiveService> {
        Arc::clone(&self.lives)
    }

    #[must_use]
    pub fn materials(&self) -> Arc<MaterialService> {
        Arc::clone(&self.materials)
    }
}
