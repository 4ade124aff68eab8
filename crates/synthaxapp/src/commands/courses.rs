use super::helpers::matches_query;
use super::Outcome;
use crate::error::Result;
use crate::model::{Course, CourseProgress, Lesson};
use crate::progress;
use crate::store::DataStore;
use chrono::Utc;

/// All courses, with the current viewer's percentage joined in.
pub fn list<S: DataStore>(store: &mut S) -> Result<Vec<Course>> {
    let courses = store.courses()?;
    let viewer = store.current_user()?;
    if viewer.is_none() {
        return Ok(courses);
    }
    let records = store.progress()?;
    Ok(progress::with_progress(courses, &records, viewer.as_ref()))
}

/// One course with per-lesson completion flags for the current viewer.
pub fn get<S: DataStore>(store: &mut S, course_id: &str) -> Result<Option<Course>> {
    let Some(course) = store.courses()?.into_iter().find(|c| c.id == course_id) else {
        return Ok(None);
    };
    let viewer = store.current_user()?;
    if viewer.is_none() {
        return Ok(Some(course));
    }
    let records = store.progress()?;
    Ok(Some(progress::with_lesson_flags(
        course,
        &records,
        viewer.as_ref(),
    )))
}

/// Mark a lesson complete for the current user. Data is the new percentage.
pub fn mark_lesson_complete<S: DataStore>(
    store: &mut S,
    course_id: &str,
    lesson_id: &str,
) -> Result<Outcome<u32>> {
    let Some(user) = store.current_user()? else {
        return Ok(Outcome::fail("You must be logged in to track progress"));
    };
    let Some(course) = store.courses()?.into_iter().find(|c| c.id == course_id) else {
        return Ok(Outcome::fail("Course not found"));
    };
    if !course.has_lesson(lesson_id) {
        return Ok(Outcome::fail("Lesson not found"));
    }

    let mut records = store.progress()?;
    let pct = progress::record_completion(&mut records, &course, &user.id, lesson_id, Utc::now());
    store.save_progress(&records)?;
    tracing::info!(course = course_id, lesson = lesson_id, progress = pct, "lesson completed");

    Ok(Outcome::ok(pct))
}

/// Progress records belonging to the current user.
pub fn user_progress<S: DataStore>(store: &mut S) -> Result<Vec<CourseProgress>> {
    let Some(user) = store.current_user()? else {
        return Ok(Vec::new());
    };
    Ok(store
        .progress()?
        .into_iter()
        .filter(|p| p.user_id == user.id)
        .collect())
}

/// First lesson the current viewer has not completed. The data is `None` when
/// every lesson is done; an unknown course is a failure.
pub fn next_lesson<S: DataStore>(
    store: &mut S,
    course_id: &str,
) -> Result<Outcome<Option<Lesson>>> {
    let Some(course) = get(store, course_id)? else {
        return Ok(Outcome::fail("Course not found"));
    };
    Ok(Outcome::ok(progress::next_lesson(&course).cloned()))
}

/// Title, description or tag containment; an empty query returns everything.
pub fn search<S: DataStore>(store: &mut S, query: &str) -> Result<Vec<Course>> {
    let courses = list(store)?;
    if query.is_empty() {
        return Ok(courses);
    }
    Ok(courses
        .into_iter()
        .filter(|c| {
            matches_query(
                [c.title.as_str(), c.description.as_str()]
                    .into_iter()
                    .chain(c.tags.iter().map(String::as_str)),
                query,
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_anonymous_list_has_no_progress() {
        let mut store = InMemoryStore::new();
        let courses = list(&mut store).unwrap();
        assert_eq!(courses.len(), 3);
        assert!(courses.iter().all(|c| c.progress.is_none()));
    }

    #[test]
    fn test_signed_in_list_joins_progress() {
        let mut fixture = StoreFixture::new().as_learner();
        let courses = list(&mut fixture.store).unwrap();
        let pct: Vec<_> = courses.iter().map(|c| c.progress).collect();
        assert_eq!(pct, vec![Some(0), Some(33), Some(0)]);
    }

    #[test]
    fn test_complete_four_lesson_course() {
        let mut fixture = StoreFixture::new().as_learner();
        let store = &mut fixture.store;

        assert_eq!(
            mark_lesson_complete(store, "course-1", "l1").unwrap(),
            Outcome::ok(25)
        );
        assert_eq!(
            mark_lesson_complete(store, "course-1", "l1").unwrap(),
            Outcome::ok(25)
        );

        let records = user_progress(store).unwrap();
        let record = records.iter().find(|p| p.course_id == "course-1").unwrap();
        assert_eq!(record.completed_lessons.len(), 1);
        assert_eq!(record.progress, 25);
    }

    #[test]
    fn test_completion_requires_sign_in() {
        let mut store = InMemoryStore::new();
        let outcome = mark_lesson_complete(&mut store, "course-1", "l1").unwrap();
        assert!(!outcome.success);
        assert!(store.progress().unwrap().iter().all(|p| p.course_id != "course-1"));
    }

    #[test]
    fn test_completion_unknown_course_and_lesson() {
        let mut fixture = StoreFixture::new().as_learner();
        let store = &mut fixture.store;
        assert_eq!(
            mark_lesson_complete(store, "nope", "l1").unwrap().message(),
            Some("Course not found")
        );
        assert_eq!(
            mark_lesson_complete(store, "course-1", "py-1").unwrap().message(),
            Some("Lesson not found")
        );
    }

    #[test]
    fn test_get_marks_completed_lessons() {
        let mut fixture = StoreFixture::new().as_learner();
        let store = &mut fixture.store;
        mark_lesson_complete(store, "course-1", "l2").unwrap();

        let course = get(store, "course-1").unwrap().unwrap();
        assert_eq!(course.progress, Some(25));
        let done: Vec<_> = course
            .lessons()
            .filter(|l| l.completed == Some(true))
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(done, vec!["l2"]);
    }

    #[test]
    fn test_get_unknown_course() {
        let mut store = InMemoryStore::new();
        assert!(get(&mut store, "course-99").unwrap().is_none());
    }

    #[test]
    fn test_next_lesson_skips_completed() {
        let mut fixture = StoreFixture::new().as_learner();
        let store = &mut fixture.store;
        mark_lesson_complete(store, "course-1", "l1").unwrap();
        let next = |store: &mut InMemoryStore, id: &str| {
            next_lesson(store, id).unwrap().data.unwrap().unwrap().id
        };
        assert_eq!(next(store, "course-1"), "l2");
        assert_eq!(next(store, "course-2"), "py-2");
    }

    #[test]
    fn test_next_lesson_unknown_course() {
        let mut store = InMemoryStore::new();
        assert_eq!(
            next_lesson(&mut store, "course-99").unwrap(),
            Outcome::fail("Course not found")
        );
    }

    #[test]
    fn test_user_progress_is_scoped_to_viewer() {
        let mut fixture = StoreFixture::new().as_mentor();
        assert!(user_progress(&mut fixture.store).unwrap().is_empty());
    }

    #[test]
    fn test_search_matches_tags_and_title() {
        let mut store = InMemoryStore::new();
        let ids = |v: Vec<Course>| v.into_iter().map(|c| c.id).collect::<Vec<_>>();

        assert_eq!(ids(search(&mut store, "pandas").unwrap()), vec!["course-2"]);
        assert_eq!(
            ids(search(&mut store, "javascript").unwrap()),
            vec!["course-1", "course-3"]
        );
        assert_eq!(search(&mut store, "").unwrap().len(), 3);
        assert!(search(&mut store, "rust").unwrap().is_empty());
    }
}
