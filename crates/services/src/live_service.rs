use std::sync::Arc;

use serde::Serialize;

use portal_core::model::{Live, LiveDraft, LiveId};
use storage::repository::LiveRepository;

use crate::error::LiveServiceError;
use crate::notify::{Notice, Notifier};
use crate::Clock;

/// Live sessions split by their stored `is_past` flag, each half in date order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LiveSchedule {
    pub upcoming: Vec<Live>,
    pub past: Vec<Live>,
}

#[derive(Clone)]
pub struct LiveService {
    clock: Clock,
    lives: Arc<dyn LiveRepository>,
    notifier: Arc<dyn Notifier>,
}

impl LiveService {
    #[must_use]
    pub fn new(clock: Clock, lives: Arc<dyn LiveRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            clock,
            lives,
            notifier,
        }
    }

    /// All live sessions by date, then time label.
    ///
    /// # Errors
    ///
    /// Returns `LiveServiceError::Storage` if repository access fails.
    pub async fn list_lives(&self) -> Result<Vec<Live>, LiveServiceError> {
        let lives = self
            .lives
            .list_lives()
            .await
            .map_err(LiveServiceError::from)
            .inspect_err(|err| self.report("Could not load lives", err))?;
        tracing::debug!(count = lives.len(), "loaded lives");
        Ok(lives)
    }

    /// # Errors
    ///
    /// Returns `LiveServiceError::Storage` if repository access fails.
    pub async fn schedule(&self) -> Result<LiveSchedule, LiveServiceError> {
        let (past, upcoming): (Vec<Live>, Vec<Live>) = self.list_lives().await?.into_iter().partition(Live::is_past);
        Ok(LiveSchedule { upcoming, past })
    }

    /// # Errors
    ///
    /// Returns `LiveServiceError::Live` for validation failures.
    /// Returns `LiveServiceError::Storage` if persistence fails.
    pub async fn create_live(&self, draft: LiveDraft) -> Result<Live, LiveServiceError> {
        let result: Result<Live, LiveServiceError> = async {
            let live = draft.validate(LiveId::random(), self.clock.now())?;
            self.lives.insert_live(&live).await?;
            Ok(live)
        }
        .await;
        let live = result.inspect_err(|err| self.report("Could not create live", err))?;
        self.notifier.notify(Notice::success("Live created"));
        Ok(live)
    }

    fn report(&self, title: &str, err: &LiveServiceError) {
        tracing::warn!(error = %err, "{title}");
        self.notifier.notify(Notice::error(title, err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use portal_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    use crate::notify::{MemoryNotifier, NoticeLevel};

    fn draft(title: &str, day: u32, is_past: bool) -> LiveDraft {
        LiveDraft {
            title: title.into(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            time: "19:00".into(),
            image: String::new(),
            link: "https://meet.example.com/room".into(),
            is_past,
        }
    }

    #[tokio::test]
    async fn schedule_partitions_on_stored_flag() {
        let notifier = Arc::new(MemoryNotifier::new());
        let service = LiveService::new(
            fixed_clock(),
            Arc::new(InMemoryRepository::new()),
            notifier.clone(),
        );

        // A future date flagged as past still lands in `past`.
        service.create_live(draft("Replay", 30, true)).await.unwrap();
        service.create_live(draft("Kickoff", 5, false)).await.unwrap();
        service.create_live(draft("Q&A", 12, false)).await.unwrap();

        let schedule = service.schedule().await.unwrap();
        let upcoming: Vec<_> = schedule.upcoming.iter().map(Live::title).collect();
        let past: Vec<_> = schedule.past.iter().map(Live::title).collect();
        assert_eq!(upcoming, vec!["Kickoff", "Q&A"]);
        assert_eq!(past, vec!["Replay"]);
        assert_eq!(notifier.drain().len(), 3);
    }

    #[tokio::test]
    async fn invalid_link_is_rejected_and_reported() {
        let notifier = Arc::new(MemoryNotifier::new());
        let service = LiveService::new(
            fixed_clock(),
            Arc::new(InMemoryRepository::new()),
            notifier.clone(),
        );

        let mut bad = draft("Broken", 1, false);
        bad.link = "not a url".into();
        let err = service.create_live(bad).await.unwrap_err();
        assert!(matches!(err, LiveServiceError::Live(_)));
        assert!(service.list_lives().await.unwrap().is_empty());

        let notices = notifier.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }
}
