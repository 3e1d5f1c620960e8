use std::sync::Arc;

use serde::Serialize;

use portal_core::model::{
    Course, CourseDraft, CourseId, CourseProgress, Lesson, LessonDraft, LessonId, Module,
    ModuleDraft, ModuleId, UserId,
};
use portal_core::outline::assemble_modules;
use portal_core::{AnnotatedCourse, ProgressPercent, annotate};
use storage::repository::{CourseRepository, ModuleRepository, ProgressRepository};

use crate::error::CourseServiceError;
use crate::notify::{Notice, Notifier};
use crate::Clock;

/// One entry of the course catalog, with the raw stored percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseCard {
    pub course: Course,
    pub progress: ProgressPercent,
    pub lesson_count: usize,
}

impl CourseCard {
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.progress.is_started()
    }
}

/// A course together with its annotated outline for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseDetail {
    pub course: Course,
    pub outline: AnnotatedCourse,
}

/// Reads the course catalog and outlines, and writes course content.
#[derive(Clone)]
pub struct CourseService {
    clock: Clock,
    courses: Arc<dyn CourseRepository>,
    modules: Arc<dyn ModuleRepository>,
    progress: Arc<dyn ProgressRepository>,
    notifier: Arc<dyn Notifier>,
}

impl CourseService {
    #[must_use]
    pub fn new(
        clock: Clock,
        courses: Arc<dyn CourseRepository>,
        modules: Arc<dyn ModuleRepository>,
        progress: Arc<dyn ProgressRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            clock,
            courses,
            modules,
            progress,
            notifier,
        }
    }

    /// List all courses, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` if repository access fails.
    pub async fn list_courses(&self) -> Result<Vec<Course>, CourseServiceError> {
        let result = self.courses.list_courses().await.map_err(CourseServiceError::from);
        let courses = result.inspect_err(|err| self.report("Could not load courses", err))?;
        tracing::debug!(count = courses.len(), "loaded courses");
        Ok(courses)
    }

    /// List a course's modules in creation order, each carrying its lessons.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` if repository access fails.
    /// Returns `CourseServiceError::Outline` if stored rows do not join up.
    pub async fn list_modules(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<Module>, CourseServiceError> {
        let result = self.load_modules(course_id).await;
        let modules = result.inspect_err(|err| self.report("Could not load modules", err))?;
        tracing::debug!(%course_id, count = modules.len(), "loaded modules");
        Ok(modules)
    }

    /// Stored progress for the user, or `None` when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` if repository access fails.
    pub async fn get_progress(
        &self,
        course_id: CourseId,
        user_id: UserId,
    ) -> Result<Option<ProgressPercent>, CourseServiceError> {
        let result = self
            .progress
            .get_progress(user_id, course_id)
            .await
            .map_err(CourseServiceError::from);
        let stored = result.inspect_err(|err| self.report("Could not load progress", err))?;
        Ok(stored.map(|p| p.percent))
    }

    /// Catalog entries for the user, newest course first.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` if repository access fails.
    pub async fn course_cards(&self, user_id: UserId) -> Result<Vec<CourseCard>, CourseServiceError> {
        let result = self.load_cards(user_id).await;
        let cards = result.inspect_err(|err| self.report("Could not load courses", err))?;
        tracing::debug!(%user_id, count = cards.len(), "loaded course cards");
        Ok(cards)
    }

    /// Fetch a course and annotate its outline with the user's progress.
    ///
    /// A course without lessons yields an empty outline, not an error.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::CourseNotFound` for unknown ids.
    /// Returns `CourseServiceError::Storage` if repository access fails.
    pub async fn course_detail(
        &self,
        course_id: CourseId,
        user_id: UserId,
    ) -> Result<CourseDetail, CourseServiceError> {
        let result = self.load_detail(course_id, user_id).await;
        let detail = result.inspect_err(|err| self.report("Could not load course", err))?;
        tracing::debug!(
            %course_id,
            lessons = detail.outline.total_lessons(),
            completed = detail.outline.completed_lessons(),
            "annotated course"
        );
        Ok(detail)
    }

    /// Store the user's percentage for a course, replacing any earlier value.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` if persistence fails.
    pub async fn record_progress(
        &self,
        course_id: CourseId,
        user_id: UserId,
        percent: ProgressPercent,
    ) -> Result<CourseProgress, CourseServiceError> {
        let progress = CourseProgress::new(user_id, course_id, percent, self.clock.now());
        let result = self
            .progress
            .upsert_progress(&progress)
            .await
            .map_err(CourseServiceError::from);
        result.inspect_err(|err| self.report("Could not save progress", err))?;
        Ok(progress)
    }

    /// # Errors
    ///
    /// Returns `CourseServiceError::Course` for validation failures.
    /// Returns `CourseServiceError::Storage` if persistence fails.
    pub async fn create_course(&self, draft: CourseDraft) -> Result<Course, CourseServiceError> {
        let result: Result<Course, CourseServiceError> = async {
            let course = draft.validate(CourseId::random(), self.clock.now())?;
            self.courses.insert_course(&course).await?;
            Ok(course)
        }
        .await;
        let course = result.inspect_err(|err| self.report("Could not create course", err))?;
        self.notifier.notify(Notice::success("Course created"));
        Ok(course)
    }

    /// # Errors
    ///
    /// Returns `CourseServiceError::Module` for validation failures.
    /// Returns `CourseServiceError::Storage` if the course is missing or persistence fails.
    pub async fn create_module(&self, draft: ModuleDraft) -> Result<Module, CourseServiceError> {
        let result: Result<Module, CourseServiceError> = async {
            let module = draft.validate(ModuleId::random(), self.clock.now())?;
            self.modules.insert_module(&module).await?;
            Ok(module)
        }
        .await;
        let module = result.inspect_err(|err| self.report("Could not create module", err))?;
        self.notifier.notify(Notice::success("Module created"));
        Ok(module)
    }

    /// # Errors
    ///
    /// Returns `CourseServiceError::Lesson` for validation failures.
    /// Returns `CourseServiceError::Storage` if the module is missing or persistence fails.
    pub async fn create_lesson(&self, draft: LessonDraft) -> Result<Lesson, CourseServiceError> {
        let result: Result<Lesson, CourseServiceError> = async {
            let lesson = draft.validate(LessonId::random(), self.clock.now())?;
            self.modules.insert_lesson(&lesson).await?;
            Ok(lesson)
        }
        .await;
        let lesson = result.inspect_err(|err| self.report("Could not create lesson", err))?;
        self.notifier.notify(Notice::success("Lesson created"));
        Ok(lesson)
    }

    async fn load_modules(&self, course_id: CourseId) -> Result<Vec<Module>, CourseServiceError> {
        let modules = self.modules.list_modules(course_id).await?;
        let lessons = self.modules.list_course_lessons(course_id).await?;
        Ok(assemble_modules(course_id, modules, lessons)?)
    }

    async fn load_cards(&self, user_id: UserId) -> Result<Vec<CourseCard>, CourseServiceError> {
        let courses = self.courses.list_courses().await?;
        let stored = self.progress.list_progress(user_id).await?;

        let mut cards = Vec::with_capacity(courses.len());
        for course in courses {
            let progress = stored
                .iter()
                .find(|p| p.course_id == course.id())
                .map(|p| p.percent)
                .unwrap_or_default();
            let lesson_count = self.modules.list_course_lessons(course.id()).await?.len();
            cards.push(CourseCard {
                course,
                progress,
                lesson_count,
            });
        }
        Ok(cards)
    }

    async fn load_detail(
        &self,
        course_id: CourseId,
        user_id: UserId,
    ) -> Result<CourseDetail, CourseServiceError> {
        let course = self
            .courses
            .get_course(course_id)
            .await?
            .ok_or(CourseServiceError::CourseNotFound(course_id))?;
        let modules = self.load_modules(course_id).await?;
        let progress = self
            .progress
            .get_progress(user_id, course_id)
            .await?
            .map(|p| p.percent)
            .unwrap_or_default();

        Ok(CourseDetail {
            course,
            outline: annotate(&modules, progress),
        })
    }

    fn report(&self, title: &str, err: &CourseServiceError) {
        tracing::warn!(error = %err, "{title}");
        self.notifier.notify(Notice::error(title, err));
    }
}
