//! # Per-Viewer Read Model
//!
//! Courses are stored without any viewer state. What a learner sees, a progress
//! percentage on each course and a completed flag on each lesson, is joined in here
//! from the [`CourseProgress`] records, for one viewer at a time.
//!
//! Everything in this module is pure: it takes collections and returns collections,
//! so it is tested against literal fixtures with no store involved.
//!
//! ## Join Rules
//!
//! - No viewer: records are returned unmodified.
//! - Listing with a viewer: every course gets a percentage, `0` when the viewer has no
//!   record for it.
//! - Single course with a viewer and a record: lessons get `completed` flags and the
//!   course gets its percentage. Without a record the base course is returned.
//!
//! ## The Formula
//!
//! `percent = round(100 * completed / total)` with halves rounded up, computed in
//! integers. Only completions of lessons that belong to the course count.

use crate::model::{Course, CourseProgress, Lesson, User};
use chrono::{DateTime, Utc};

/// `round(100 * completed / total)`, 0 for an empty course.
pub fn percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    ((200 * completed + total) / (2 * total)) as u32
}

pub fn find<'a>(
    progress: &'a [CourseProgress],
    course_id: &str,
    user_id: &str,
) -> Option<&'a CourseProgress> {
    progress.iter().find(|p| p.is_for(course_id, user_id))
}

/// Percentage for one course from a record, counting only lessons the course has.
pub fn course_percent(course: &Course, record: &CourseProgress) -> u32 {
    let done = record
        .completed_lessons
        .iter()
        .filter(|id| course.has_lesson(id))
        .count();
    percent(done, course.total_lessons())
}

pub fn with_progress(
    courses: Vec<Course>,
    progress: &[CourseProgress],
    viewer: Option<&User>,
) -> Vec<Course> {
    let Some(viewer) = viewer else {
        return courses;
    };
    courses
        .into_iter()
        .map(|mut course| {
            let pct = find(progress, &course.id, &viewer.id)
                .map(|record| course_percent(&course, record))
                .unwrap_or(0);
            course.progress = Some(pct);
            course
        })
        .collect()
}

pub fn with_lesson_flags(
    mut course: Course,
    progress: &[CourseProgress],
    viewer: Option<&User>,
) -> Course {
    let Some(viewer) = viewer else {
        return course;
    };
    let Some(record) = find(progress, &course.id, &viewer.id) else {
        return course;
    };

    course.progress = Some(course_percent(&course, record));
    for module in &mut course.modules {
        for lesson in &mut module.lessons {
            lesson.completed = Some(record.completed_lessons.contains(&lesson.id));
        }
    }
    course
}

/// First lesson in syllabus order not flagged completed.
pub fn next_lesson(course: &Course) -> Option<&Lesson> {
    course.lessons().find(|l| l.completed != Some(true))
}

/// Record one completion in place and return the resulting percentage.
///
/// Repeating a completion only refreshes `last_accessed_at`; the set of completed
/// lessons and the percentage stay the same.
pub fn record_completion(
    progress: &mut Vec<CourseProgress>,
    course: &Course,
    user_id: &str,
    lesson_id: &str,
    now: DateTime<Utc>,
) -> u32 {
    let index = match progress.iter().position(|p| p.is_for(&course.id, user_id)) {
        Some(index) => index,
        None => {
            progress.push(CourseProgress {
                course_id: course.id.clone(),
                user_id: user_id.to_string(),
                completed_lessons: Vec::new(),
                current_lesson: lesson_id.to_string(),
                progress: 0,
                last_accessed_at: now,
            });
            progress.len() - 1
        }
    };

    let record = &mut progress[index];
    if !record.completed_lessons.iter().any(|id| id == lesson_id) {
        record.completed_lessons.push(lesson_id.to_string());
        record.current_lesson = lesson_id.to_string();
    }
    record.progress = course_percent(course, record);
    record.last_accessed_at = now;
    record.progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{courses, learner_user, mentor_user, progress};

    fn js_course() -> Course {
        courses().into_iter().find(|c| c.id == "course-1").unwrap()
    }

    #[test]
    fn test_percent_rounds_half_up() {
        assert_eq!(percent(0, 4), 0);
        assert_eq!(percent(1, 4), 25);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13); // 12.5
        assert_eq!(percent(3, 3), 100);
    }

    #[test]
    fn test_percent_empty_course() {
        assert_eq!(percent(0, 0), 0);
    }

    #[test]
    fn test_percent_matches_float_formula() {
        for total in 1..=20usize {
            for done in 0..=total {
                let expected = (100.0 * done as f64 / total as f64).round() as u32;
                assert_eq!(percent(done, total), expected, "{}/{}", done, total);
            }
        }
    }

    #[test]
    fn test_anonymous_list_is_unmodified() {
        let base = courses();
        let joined = with_progress(base.clone(), &progress(), None);
        assert_eq!(joined, base);
    }

    #[test]
    fn test_list_gives_zero_without_record() {
        let viewer = learner_user();
        let joined = with_progress(courses(), &progress(), Some(&viewer));
        let by_id = |id: &str| joined.iter().find(|c| c.id == id).unwrap().progress;
        assert_eq!(by_id("course-1"), Some(0));
        assert_eq!(by_id("course-2"), Some(33));
    }

    #[test]
    fn test_progress_of_other_users_is_ignored() {
        let viewer = mentor_user();
        let joined = with_progress(courses(), &progress(), Some(&viewer));
        assert!(joined.iter().all(|c| c.progress == Some(0)));
    }

    #[test]
    fn test_lesson_flags_with_record() {
        let viewer = learner_user();
        let course = courses().into_iter().find(|c| c.id == "course-2").unwrap();
        let joined = with_lesson_flags(course, &progress(), Some(&viewer));

        assert_eq!(joined.progress, Some(33));
        let flags: Vec<_> = joined.lessons().map(|l| l.completed).collect();
        assert_eq!(flags, vec![Some(true), Some(false), Some(false)]);
        assert_eq!(next_lesson(&joined).unwrap().id, "py-2");
    }

    #[test]
    fn test_lesson_flags_without_record_returns_base() {
        let viewer = learner_user();
        let joined = with_lesson_flags(js_course(), &progress(), Some(&viewer));
        assert_eq!(joined, js_course());
    }

    #[test]
    fn test_record_completion_is_idempotent() {
        let course = js_course();
        let mut records = Vec::new();
        let now = Utc::now();

        assert_eq!(record_completion(&mut records, &course, "u", "l1", now), 25);
        assert_eq!(record_completion(&mut records, &course, "u", "l1", now), 25);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].completed_lessons, vec!["l1".to_string()]);

        assert_eq!(record_completion(&mut records, &course, "u", "l3", now), 50);
        assert_eq!(records[0].current_lesson, "l3");
    }

    #[test]
    fn test_stored_percent_round_trips() {
        let course = js_course();
        let mut records = Vec::new();
        for id in ["l1", "l2", "l4"] {
            record_completion(&mut records, &course, "u", id, Utc::now());
        }
        let record = &records[0];
        assert_eq!(record.progress, course_percent(&course, record));
        assert_eq!(record.progress, 75);
    }

    #[test]
    fn test_next_lesson_none_when_all_done() {
        let viewer = learner_user();
        let course = js_course();
        let mut records = Vec::new();
        for lesson in course.lessons() {
            record_completion(&mut records, &course, &viewer.id, &lesson.id, Utc::now());
        }
        let joined = with_lesson_flags(course, &records, Some(&viewer));
        assert_eq!(joined.progress, Some(100));
        assert!(next_lesson(&joined).is_none());
    }
}
