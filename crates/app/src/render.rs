//! Plain-text views printed by the CLI.

use std::fmt::Write as _;

use portal_core::model::{Live, Material};
use portal_core::progress::{AnnotatedLesson, LessonState};
use services::{CourseCard, CourseDetail, LiveSchedule};

pub fn course_cards(cards: &[CourseCard]) -> String {
    if cards.is_empty() {
        return "No courses yet.\n".into();
    }
    let mut out = String::new();
    for card in cards {
        let status = if card.is_started() {
            format!("{} done", card.progress)
        } else {
            "not started".into()
        };
        let _ = writeln!(
            out,
            "{}  [{}]  {} lessons, {}\n  id: {}",
            card.course.title(),
            card.course.category(),
            card.lesson_count,
            status,
            card.course.id()
        );
    }
    out
}

fn marker(lesson: &AnnotatedLesson) -> &'static str {
    match lesson.state() {
        LessonState::Completed => "[x]",
        LessonState::Current => "[>]",
        LessonState::Locked => "[ ]",
    }
}

/// Outline with one line per lesson, followed by the completion summary.
pub fn course_detail(detail: &CourseDetail, selected: Option<&AnnotatedLesson>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", detail.course.title());
    if !detail.course.description().is_empty() {
        let _ = writeln!(out, "{}", detail.course.description());
    }

    let outline = &detail.outline;
    if outline.is_empty() {
        out.push_str("\nThis course has no lessons yet.\n");
        return out;
    }

    for (index, module) in outline.modules().iter().enumerate() {
        let _ = writeln!(
            out,
            "\nModule {}: {} ({}/{})",
            index + 1,
            module.title(),
            module.completed_count(),
            module.lesson_count()
        );
        for lesson in module.lessons() {
            let _ = writeln!(
                out,
                "  {} {:>2}. {} ({})",
                marker(lesson),
                lesson.position() + 1,
                lesson.lesson().title(),
                lesson.lesson().duration()
            );
        }
    }

    let _ = writeln!(
        out,
        "\n{} of {} lessons completed ({}%)",
        outline.completed_lessons(),
        outline.total_lessons(),
        outline.completion_percent()
    );
    if let Some(lesson) = selected {
        let _ = writeln!(
            out,
            "Now playing: {} <{}>",
            lesson.lesson().title(),
            lesson.lesson().video_url()
        );
    }
    out
}

fn live_line(out: &mut String, live: &Live) {
    let _ = write!(out, "  {} {}  {}", live.date(), live.time(), live.title());
    if let Some(link) = live.link() {
        let _ = write!(out, "  <{link}>");
    }
    out.push('\n');
}

pub fn schedule(schedule: &LiveSchedule) -> String {
    let mut out = String::from("Upcoming:\n");
    if schedule.upcoming.is_empty() {
        out.push_str("  (none)\n");
    }
    for live in &schedule.upcoming {
        live_line(&mut out, live);
    }
    out.push_str("Past:\n");
    if schedule.past.is_empty() {
        out.push_str("  (none)\n");
    }
    for live in &schedule.past {
        live_line(&mut out, live);
    }
    out
}

pub fn materials(materials: &[Material]) -> String {
    if materials.is_empty() {
        return "No materials yet.\n".into();
    }
    let mut out = String::new();
    for material in materials {
        let _ = writeln!(
            out,
            "{} [{}] {}  <{}>",
            material.title(),
            material.kind(),
            material.category(),
            material.download_url()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;
    use portal_core::ProgressPercent;
    use portal_core::annotate;
    use portal_core::model::{Course, CourseId, Lesson, LessonId, Module, ModuleId};
    use portal_core::time::fixed_now;

    fn detail(lessons: usize, percent: i64) -> CourseDetail {
        let course = Course::new(CourseId::random(), "Bots", "", "Chatbots", "", fixed_now())
            .unwrap();
        let module = Module::new(ModuleId::random(), course.id(), "Intro", fixed_now()).unwrap();
        let lessons = (0..lessons)
            .map(|i| {
                Lesson::new(
                    LessonId::random(),
                    module.id(),
                    format!("Lesson {i}"),
                    "05:00",
                    "https://videos.example.com/v",
                    fixed_now() + Duration::minutes(i64::try_from(i).unwrap()),
                )
                .unwrap()
            })
            .collect();
        let module = module.with_lessons(lessons).unwrap();
        CourseDetail {
            outline: annotate(&[module], ProgressPercent::clamped(percent)),
            course,
        }
    }

    #[test]
    fn outline_marks_each_state() {
        let detail = detail(4, 50);
        let text = course_detail(&detail, detail.outline.current_lesson());
        assert!(text.contains("[x]  1. Lesson 0"));
        assert!(text.contains("[>]  3. Lesson 2"));
        assert!(text.contains("[ ]  4. Lesson 3"));
        assert!(text.contains("2 of 4 lessons completed (50%)"));
        assert!(text.contains("Now playing: Lesson 2"));
    }

    #[test]
    fn empty_course_has_no_summary() {
        let detail = detail(0, 80);
        let text = course_detail(&detail, None);
        assert!(text.contains("no lessons yet"));
        assert!(!text.contains("lessons completed"));
    }

    #[test]
    fn empty_schedule_prints_placeholders() {
        let text = schedule(&LiveSchedule::default());
        assert_eq!(text, "Upcoming:\n  (none)\nPast:\n  (none)\n");
    }
}
