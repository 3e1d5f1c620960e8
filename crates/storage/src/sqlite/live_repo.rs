use portal_core::model::Live;

use super::SqliteRepository;
use super::mapping::{db_err, live_image, live_link, map_live_row, map_rows};
use crate::repository::{LiveRepository, StorageError};

#[async_trait::async_trait]
impl LiveRepository for SqliteRepository {
    async fn insert_live(&self, live: &Live) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO lives (id, title, description, date, time, image, link, is_past, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
        )
        .bind(live.id().to_string())
        .bind(live.title())
        .bind(live.description())
        .bind(live.date())
        .bind(live.time())
        .bind(live_image(live))
        .bind(live_link(live))
        .bind(i64::from(live.is_past()))
        .bind(live.created_at())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn list_lives(&self) -> Result<Vec<Live>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, date, time, image, link, is_past, created_at
            FROM lives
            ORDER BY date ASC, time ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        map_rows(&rows, map_live_row)
    }
}
