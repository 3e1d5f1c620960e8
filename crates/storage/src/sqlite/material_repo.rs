use portal_core::model::Material;

use super::SqliteRepository;
use super::mapping::{db_err, map_material_row, map_rows};
use crate::repository::{MaterialRepository, StorageError};

#[async_trait::async_trait]
impl MaterialRepository for SqliteRepository {
    async fn insert_material(&self, material: &Material) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO materials (id, title, description, category, download_url, type, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(material.id().to_string())
        .bind(material.title())
        .bind(material.description())
        .bind(material.category())
        .bind(material.download_url().as_str())
        .bind(material.kind())
        .bind(material.created_at())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn list_materials(&self) -> Result<Vec<Material>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, category, download_url, type, created_at
            FROM materials
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        map_rows(&rows, map_material_row)
    }
}
