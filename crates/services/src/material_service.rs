use std::sync::Arc;

use portal_core::model::{Material, MaterialDraft, MaterialId};
use storage::repository::MaterialRepository;

use crate::error::MaterialServiceError;
use crate::notify::{Notice, Notifier};
use crate::Clock;

/// Support documents offered for download.
#[derive(Clone)]
pub struct MaterialService {
    clock: Clock,
    materials: Arc<dyn MaterialRepository>,
    notifier: Arc<dyn Notifier>,
}

impl MaterialService {
    #[must_use]
    pub fn new(
        clock: Clock,
        materials: Arc<dyn MaterialRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            clock,
            materials,
            notifier,
        }
    }

    /// Materials, newest first.
    ///
    /// # Errors
    ///
    /// Returns `MaterialServiceError::Storage` if repository access fails.
    pub async fn list_materials(&self) -> Result<Vec<Material>, MaterialServiceError> {
        let materials = self
            .materials
            .list_materials()
            .await
            .map_err(MaterialServiceError::from)
            .inspect_err(|err| self.report("Could not load materials", err))?;
        tracing::debug!(count = materials.len(), "loaded materials");
        Ok(materials)
    }

    /// # Errors
    ///
    /// Returns `MaterialServiceError::Material` for validation failures.
    /// Returns `MaterialServiceError::Storage` if persistence fails.
    pub async fn create_material(
        &self,
        draft: MaterialDraft,
    ) -> Result<Material, MaterialServiceError> {
        let result: Result<Material, MaterialServiceError> = async {
            let material = draft.validate(MaterialId::random(), self.clock.now())?;
            self.materials.insert_material(&material).await?;
            Ok(material)
        }
        .await;
        let material = result.inspect_err(|err| self.report("Could not create material", err))?;
        self.notifier.notify(Notice::success("Material created"));
        Ok(material)
    }

    fn report(&self, title: &str, err: &MaterialServiceError) {
        tracing::warn!(error = %err, "{title}");
        self.notifier.notify(Notice::error(title, err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;
    use portal_core::time::fixed_now;
    use storage::repository::InMemoryRepository;

    use crate::notify::MemoryNotifier;

    #[tokio::test]
    async fn lists_newest_first() {
        let repo = Arc::new(InMemoryRepository::new());
        let notifier = Arc::new(MemoryNotifier::new());

        for (title, minutes) in [("Guide", 0), ("Templates", 10)] {
            let service = MaterialService::new(
                Clock::fixed(fixed_now() + Duration::minutes(minutes)),
                repo.clone(),
                notifier.clone(),
            );
            service
                .create_material(MaterialDraft {
                    title: title.into(),
                    description: String::new(),
                    category: "Guides".into(),
                    download_url: "https://files.example.com/doc.pdf".into(),
                    kind: "PDF".into(),
                })
                .await
                .unwrap();
        }

        let service = MaterialService::new(Clock::fixed(fixed_now()), repo, notifier);
        let titles: Vec<_> = service
            .list_materials()
            .await
            .unwrap()
            .iter()
            .map(|m| m.title().to_owned())
            .collect();
        assert_eq!(titles, vec!["Templates", "Guide"]);
    }

    #[tokio::test]
    async fn missing_download_url_is_a_validation_error() {
        let service = MaterialService::new(
            Clock::fixed(fixed_now()),
            Arc::new(InMemoryRepository::new()),
            Arc::new(MemoryNotifier::new()),
        );
        let err = service
            .create_material(MaterialDraft {
                title: "Empty".into(),
                description: String::new(),
                category: String::new(),
                download_url: "  ".into(),
                kind: "PDF".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MaterialServiceError::Material(_)));
    }
}
