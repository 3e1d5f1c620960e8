use std::collections::HashMap;

use thiserror::Error;

use crate::model::{CourseId, Lesson, LessonId, Module, ModuleId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutlineError {
    #[error("module {module_id} belongs to course {owner}, not {course_id}")]
    ForeignModule {
        module_id: ModuleId,
        owner: CourseId,
        course_id: CourseId,
    },

    #[error("lesson {lesson_id} references unknown module {module_id}")]
    OrphanLesson {
        lesson_id: LessonId,
        module_id: ModuleId,
    },
}

/// Join separately fetched modules and lessons into a course outline.
///
/// Inputs may arrive in any order. Modules and lessons are ordered by
/// `(created_at, id)`, which is insertion order with a stable tie-break.
/// Any lessons already attached to the given modules are kept.
///
/// # Errors
///
/// Returns `OutlineError::ForeignModule` if a module belongs to another
/// course, or `OutlineError::OrphanLesson` if a lesson's parent is missing.
pub fn assemble_modules(
    course_id: CourseId,
    modules: Vec<Module>,
    lessons: Vec<Lesson>,
) -> Result<Vec<Module>, OutlineError> {
    let mut headers = Vec::with_capacity(modules.len());
    let mut all_lessons = lessons;
    for module in modules {
        if module.course_id() != course_id {
            return Err(OutlineError::ForeignModule {
                module_id: module.id(),
                owner: module.course_id(),
                course_id,
            });
        }
        let (header, attached) = module.into_parts();
        all_lessons.extend(attached);
        headers.push(header);
    }

    headers.sort_by_key(|m| (m.created_at(), m.id()));
    all_lessons.sort_by_key(|l| (l.created_at(), l.id()));

    let slots: HashMap<ModuleId, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, m)| (m.id(), idx))
        .collect();

    for lesson in all_lessons {
        let Some(&idx) = slots.get(&lesson.module_id()) else {
            return Err(OutlineError::OrphanLesson {
                lesson_id: lesson.id(),
                module_id: lesson.module_id(),
            });
        };
        headers[idx].push_lesson(lesson);
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn module(course_id: CourseId, title: &str, minutes: i64) -> Module {
        Module::new(
            ModuleId::random(),
            course_id,
            title,
            fixed_now() + Duration::minutes(minutes),
        )
        .unwrap()
    }

    fn lesson(module_id: ModuleId, title: &str, minutes: i64) -> Lesson {
        Lesson::new(
            LessonId::random(),
            module_id,
            title,
            "05:00",
            "https://video.example.com/x",
            fixed_now() + Duration::minutes(minutes),
        )
        .unwrap()
    }

    fn titles(modules: &[Module]) -> Vec<Vec<&str>> {
        modules
            .iter()
            .map(|m| m.lessons().iter().map(Lesson::title).collect())
            .collect()
    }

    #[test]
    fn joins_out_of_order_inputs_by_parent() {
        let course = CourseId::random();
        let intro = module(course, "Intro", 0);
        let build = module(course, "Build", 10);

        let lessons = vec![
            lesson(build.id(), "Flows", 12),
            lesson(intro.id(), "History", 2),
            lesson(build.id(), "Planning", 11),
            lesson(intro.id(), "What is a bot", 1),
        ];

        let modules = assemble_modules(course, vec![build, intro], lessons).unwrap();
        let module_titles: Vec<_> = modules.iter().map(Module::title).collect();
        assert_eq!(module_titles, vec!["Intro", "Build"]);
        assert_eq!(
            titles(&modules),
            vec![vec!["What is a bot", "History"], vec!["Planning", "Flows"]]
        );
    }

    #[test]
    fn keeps_modules_without_lessons() {
        let course = CourseId::random();
        let empty = module(course, "Empty", 0);
        let full = module(course, "Full", 1);
        let lessons = vec![lesson(full.id(), "Only", 2)];

        let modules = assemble_modules(course, vec![full, empty], lessons).unwrap();
        assert_eq!(titles(&modules), vec![vec![], vec!["Only"]]);
    }

    #[test]
    fn rejects_orphan_lesson() {
        let course = CourseId::random();
        let m = module(course, "Intro", 0);
        let stray = lesson(ModuleId::random(), "Stray", 1);
        let stray_id = stray.id();

        let err = assemble_modules(course, vec![m], vec![stray]).unwrap_err();
        assert!(matches!(err, OutlineError::OrphanLesson { lesson_id, .. } if lesson_id == stray_id));
    }

    #[test]
    fn rejects_module_from_other_course() {
        let foreign = module(CourseId::random(), "Elsewhere", 0);
        let err = assemble_modules(CourseId::random(), vec![foreign], Vec::new()).unwrap_err();
        assert!(matches!(err, OutlineError::ForeignModule { .. }));
    }

    #[test]
    fn merges_pre_attached_lessons() {
        let course = CourseId::random();
        let m = module(course, "Intro", 0);
        let early = lesson(m.id(), "Early", 1);
        let late = lesson(m.id(), "Late", 5);
        let m = m.with_lessons(vec![late]).unwrap();

        let modules = assemble_modules(course, vec![m], vec![early]).unwrap();
        assert_eq!(titles(&modules), vec![vec!["Early", "Late"]]);
    }
}
