use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use portal_core::ProgressPercent;
use portal_core::model::{
    CourseDraft, CourseId, LessonDraft, LessonId, LiveDraft, ModuleDraft, ModuleId, UserId,
};
use portal_core::progress::LessonState;
use portal_core::time::fixed_now;
use services::{AppServices, Clock, MemoryNotifier, NoticeLevel};
use storage::repository::Storage;

async fn connect(name: &str) -> Storage {
    Storage::sqlite(&format!("sqlite:file:{name}?mode=memory&cache=shared"))
        .await
        .expect("sqlite storage")
}

#[tokio::test]
async fn outline_follows_stored_progress_over_sqlite() {
    let storage = connect("memdb_course_flow").await;
    let notifier = Arc::new(MemoryNotifier::new());
    let services = AppServices::from_storage(&storage, Clock::fixed(fixed_now()), notifier.clone());

    // Content written out of order; created_at decides the outline.
    let course = CourseDraft {
        title: "Chatbot Fundamentals".into(),
        ..CourseDraft::default()
    }
    .validate(CourseId::random(), fixed_now())
    .unwrap();
    storage.courses.insert_course(&course).await.unwrap();

    let second = ModuleDraft {
        course_id: course.id(),
        title: "Building".into(),
    }
    .validate(ModuleId::random(), fixed_now() + Duration::minutes(20))
    .unwrap();
    let first = ModuleDraft {
        course_id: course.id(),
        title: "Introduction".into(),
    }
    .validate(ModuleId::random(), fixed_now() + Duration::minutes(10))
    .unwrap();
    storage.modules.insert_module(&second).await.unwrap();
    storage.modules.insert_module(&first).await.unwrap();

    let lessons = [
        (second.id(), "Testing", 25),
        (first.id(), "History", 12),
        (second.id(), "Planning", 21),
        (first.id(), "What is a bot", 11),
        (first.id(), "Kinds of bots", 13),
    ];
    for (module_id, title, minutes) in lessons {
        let lesson = LessonDraft {
            module_id,
            title: title.into(),
            duration: "10:00".into(),
            video_url: "https://videos.example.com/lesson".into(),
        }
        .validate(LessonId::random(), fixed_now() + Duration::minutes(minutes))
        .unwrap();
        storage.modules.insert_lesson(&lesson).await.unwrap();
    }

    let user = UserId::random();
    let courses = services.courses();
    courses
        .record_progress(course.id(), user, ProgressPercent::clamped(40))
        .await
        .unwrap();

    let detail = courses.course_detail(course.id(), user).await.unwrap();
    let outline: Vec<_> = detail
        .outline
        .lessons()
        .map(|l| (l.lesson().title().to_owned(), l.state()))
        .collect();
    assert_eq!(
        outline,
        vec![
            ("What is a bot".to_owned(), LessonState::Completed),
            ("History".to_owned(), LessonState::Completed),
            ("Kinds of bots".to_owned(), LessonState::Current),
            ("Planning".to_owned(), LessonState::Locked),
            ("Testing".to_owned(), LessonState::Locked),
        ]
    );
    assert_eq!(detail.outline.completion_percent(), 40);

    let cards = courses.course_cards(user).await.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].lesson_count, 5);
    assert_eq!(cards[0].progress.value(), 40);
    assert!(notifier.drain().is_empty());
}

#[tokio::test]
async fn live_schedule_and_notices_over_sqlite() {
    let storage = connect("memdb_live_flow").await;
    let notifier = Arc::new(MemoryNotifier::new());
    let services = AppServices::from_storage(&storage, Clock::fixed(fixed_now()), notifier.clone());

    for (title, day, is_past) in [("Replay", 2, true), ("Upcoming", 20, false)] {
        services
            .lives()
            .create_live(LiveDraft {
                title: title.into(),
                description: String::new(),
                date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
                time: "19:00".into(),
                image: String::new(),
                link: String::new(),
                is_past,
            })
            .await
            .unwrap();
    }

    let schedule = services.lives().schedule().await.unwrap();
    assert_eq!(schedule.upcoming.len(), 1);
    assert_eq!(schedule.past[0].title(), "Replay");

    let notices = notifier.drain();
    assert_eq!(notices.len(), 2);
    assert!(notices.iter().all(|n| n.level == NoticeLevel::Success));
    assert!(services.materials().list_materials().await.unwrap().is_empty());
}
