use async_trait::async_trait;
use portal_core::model::{
    Course, CourseId, CourseProgress, Lesson, Live, Material, Module, ModuleId, UserId,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Courses, newest first.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Persist a new course.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id is taken, or other storage errors.
    async fn insert_course(&self, course: &Course) -> Result<(), StorageError>;

    /// Fetch a course by ID. Returns `Ok(None)` when missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, StorageError>;

    /// List all courses ordered by `created_at` descending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError>;
}

/// Modules and their lessons. Listing order is `created_at` ascending.
#[async_trait]
pub trait ModuleRepository: Send + Sync {
    /// Persist a module header. Attached lessons are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the parent course is missing.
    async fn insert_module(&self, module: &Module) -> Result<(), StorageError>;

    /// Persist a lesson.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the parent module is missing.
    async fn insert_lesson(&self, lesson: &Lesson) -> Result<(), StorageError>;

    /// Module headers (no lessons attached) for a course.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_modules(&self, course_id: CourseId) -> Result<Vec<Module>, StorageError>;

    /// Lessons of a single module.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_lessons(&self, module_id: ModuleId) -> Result<Vec<Lesson>, StorageError>;

    /// Lessons of every module in a course, in no guaranteed module grouping.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_course_lessons(&self, course_id: CourseId)
    -> Result<Vec<Lesson>, StorageError>;
}

/// Stored completion percentage per (user, course).
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_progress(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<Option<CourseProgress>, StorageError>;

    /// Insert or replace the stored percentage.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the course is missing.
    async fn upsert_progress(&self, progress: &CourseProgress) -> Result<(), StorageError>;

    /// All stored percentages for a user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_progress(&self, user_id: UserId) -> Result<Vec<CourseProgress>, StorageError>;
}

#[async_trait]
pub trait LiveRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id is taken, or other storage errors.
    async fn insert_live(&self, live: &Live) -> Result<(), StorageError>;

    /// Lives ordered by date, then time label.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_lives(&self) -> Result<Vec<Live>, StorageError>;
}

#[async_trait]
pub trait MaterialRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id is taken, or other storage errors.
    async fn insert_material(&self, material: &Material) -> Result<(), StorageError>;

    /// Materials ordered by `created_at` descending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_materials(&self) -> Result<Vec<Material>, StorageError>;
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    courses: Arc<Mutex<Vec<Course>>>,
    modules: Arc<Mutex<Vec<Module>>>,
    lessons: Arc<Mutex<Vec<Lesson>>>,
    progress: Arc<Mutex<HashMap<(UserId, CourseId), CourseProgress>>>,
    lives: Arc<Mutex<Vec<Live>>>,
    materials: Arc<Mutex<Vec<Material>>>,
}

fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, StorageError> {
    m.lock().map_err(|e| StorageError::Connection(e.to_string()))
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn course_exists(&self, id: CourseId) -> Result<bool, StorageError> {
        Ok(lock(&self.courses)?.iter().any(|c| c.id() == id))
    }
}

#[async_trait]
impl CourseRepository for InMemoryRepository {
    async fn insert_course(&self, course: &Course) -> Result<(), StorageError> {
        let mut guard = lock(&self.courses)?;
        if guard.iter().any(|c| c.id() == course.id()) {
            return Err(StorageError::Conflict);
        }
        guard.push(course.clone());
        Ok(())
    }

    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, StorageError> {
        let guard = lock(&self.courses)?;
        Ok(guard.iter().find(|c| c.id() == id).cloned())
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        let mut courses = lock(&self.courses)?.clone();
        courses.sort_by(|a, b| (b.created_at(), b.id()).cmp(&(a.created_at(), a.id())));
        Ok(courses)
    }
}

#[async_trait]
impl ModuleRepository for InMemoryRepository {
    async fn insert_module(&self, module: &Module) -> Result<(), StorageError> {
        if !self.course_exists(module.course_id())? {
            return Err(StorageError::NotFound);
        }
        let mut guard = lock(&self.modules)?;
        if guard.iter().any(|m| m.id() == module.id()) {
            return Err(StorageError::Conflict);
        }
        let (header, _) = module.clone().into_parts();
        guard.push(header);
        Ok(())
    }

    async fn insert_lesson(&self, lesson: &Lesson) -> Result<(), StorageError> {
        if !lock(&self.modules)?.iter().any(|m| m.id() == lesson.module_id()) {
            return Err(StorageError::NotFound);
        }
        let mut guard = lock(&self.lessons)?;
        if guard.iter().any(|l| l.id() == lesson.id()) {
            return Err(StorageError::Conflict);
        }
        guard.push(lesson.clone());
        Ok(())
    }

    async fn list_modules(&self, course_id: CourseId) -> Result<Vec<Module>, StorageError> {
        let mut modules: Vec<Module> = lock(&self.modules)?
            .iter()
            .filter(|m| m.course_id() == course_id)
            .cloned()
            .collect();
        modules.sort_by_key(|m| (m.created_at(), m.id()));
        Ok(modules)
    }

    async fn list_lessons(&self, module_id: ModuleId) -> Result<Vec<Lesson>, StorageError> {
        let mut lessons: Vec<Lesson> = lock(&self.lessons)?
            .iter()
            .filter(|l| l.module_id() == module_id)
            .cloned()
            .collect();
        lessons.sort_by_key(|l| (l.created_at(), l.id()));
        Ok(lessons)
    }

    async fn list_course_lessons(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<Lesson>, StorageError> {
        let module_ids: Vec<ModuleId> = lock(&self.modules)?
            .iter()
            .filter(|m| m.course_id() == course_id)
            .map(Module::id)
            .collect();
        let guard = lock(&self.lessons)?;
        Ok(guard
            .iter()
            .filter(|l| module_ids.contains(&l.module_id()))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get_progress(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<Option<CourseProgress>, StorageError> {
        Ok(lock(&self.progress)?.get(&(user_id, course_id)).copied())
    }

    async fn upsert_progress(&self, progress: &CourseProgress) -> Result<(), StorageError> {
        if !self.course_exists(progress.course_id)? {
            return Err(StorageError::NotFound);
        }
        lock(&self.progress)?.insert((progress.user_id, progress.course_id), *progress);
        Ok(())
    }

    async fn list_progress(&self, user_id: UserId) -> Result<Vec<CourseProgress>, StorageError> {
        let mut rows: Vec<CourseProgress> = lock(&self.progress)?
            .values()
            .filter(|p| p.user_id == user_id)
            .copied()
            .collect();
        rows.sort_by_key(|p| p.course_id);
        Ok(rows)
    }
}

#[async_trait]
impl LiveRepository for InMemoryRepository {
    async fn insert_live(&self, live: &Live) -> Result<(), StorageError> {
        let mut guard = lock(&self.lives)?;
        if guard.iter().any(|l| l.id() == live.id()) {
            return Err(StorageError::Conflict);
        }
        guard.push(live.clone());
        Ok(())
    }

    async fn list_lives(&self) -> Result<Vec<Live>, StorageError> {
        let mut lives = lock(&self.lives)?.clone();
        lives.sort_by(|a, b| {
            (a.date(), a.time(), a.id()).cmp(&(b.date(), b.time(), b.id()))
        });
        Ok(lives)
    }
}

#[async_trait]
impl MaterialRepository for InMemoryRepository {
    async fn insert_material(&self, material: &Material) -> Result<(), StorageError> {
        let mut guard = lock(&self.materials)?;
        if guard.iter().any(|m| m.id() == material.id()) {
            return Err(StorageError::Conflict);
        }
        guard.push(material.clone());
        Ok(())
    }

    async fn list_materials(&self) -> Result<Vec<Material>, StorageError> {
        let mut materials = lock(&self.materials)?.clone();
        materials.sort_by(|a, b| (b.created_at(), b.id()).cmp(&(a.created_at(), a.id())));
        Ok(materials)
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub courses: Arc<dyn CourseRepository>,
    pub modules: Arc<dyn ModuleRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub lives: Arc<dyn LiveRepository>,
    pub materials: Arc<dyn MaterialRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            courses: Arc::new(repo.clone()),
            modules: Arc::new(repo.clone()),
            progress: Arc::new(repo.clone()),
            lives: Arc::new(repo.clone()),
            materials: Arc::new(repo),
        }
    }
}
