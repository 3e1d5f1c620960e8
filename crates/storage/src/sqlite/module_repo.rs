use portal_core::model::{CourseId, Lesson, Module, ModuleId};

use super::SqliteRepository;
use super::mapping::{db_err, map_lesson_row, map_module_row, map_rows};
use crate::repository::{ModuleRepository, StorageError};

#[async_trait::async_trait]
impl ModuleRepository for SqliteRepository {
    async fn insert_module(&self, module: &Module) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO modules (id, course_id, title, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(module.id().to_string())
        .bind(module.course_id().to_string())
        .bind(module.title())
        .bind(module.created_at())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn insert_lesson(&self, lesson: &Lesson) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO lessons (id, module_id, title, duration, video_url, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(lesson.id().to_string())
        .bind(lesson.module_id().to_string())
        .bind(lesson.title())
        .bind(lesson.duration())
        .bind(lesson.video_url().as_str())
        .bind(lesson.created_at())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn list_modules(&self, course_id: CourseId) -> Result<Vec<Module>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, course_id, title, created_at
            FROM modules
            WHERE course_id = ?1
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(course_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        map_rows(&rows, map_module_row)
    }

    async fn list_lessons(&self, module_id: ModuleId) -> Result<Vec<Lesson>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, module_id, title, duration, video_url, created_at
            FROM lessons
            WHERE module_id = ?1
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(module_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        map_rows(&rows, map_lesson_row)
    }

    async fn list_course_lessons(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<Lesson>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT l.id, l.module_id, l.title, l.duration, l.video_url, l.created_at
            FROM lessons l
            JOIN modules m ON m.id = l.module_id
            WHERE m.course_id = ?1
            ORDER BY l.created_at ASC, l.id ASC
            ",
        )
        .bind(course_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        map_rows(&rows, map_lesson_row)
    }
}
