//! Per-lesson code snapshots. Code is stored as text and never run.

use super::Outcome;
use crate::error::Result;
use crate::model::CodeSnapshot;
use crate::store::DataStore;
use chrono::Utc;

pub fn load_snapshot<S: DataStore>(store: &S, lesson_id: &str) -> Result<Option<CodeSnapshot>> {
    store.code_snapshot(lesson_id)
}

/// Overwrites any snapshot already saved for the lesson.
pub fn save_snapshot<S: DataStore>(
    store: &mut S,
    lesson_id: &str,
    language: &str,
    code: &str,
) -> Result<Outcome<CodeSnapshot>> {
    if lesson_id.trim().is_empty() {
        return Ok(Outcome::fail("Lesson not found"));
    }
    let snapshot = CodeSnapshot {
        language: language.to_string(),
        code: code.to_string(),
        saved_at: Utc::now(),
    };
    store.save_code_snapshot(lesson_id, &snapshot)?;
    tracing::info!(lesson = lesson_id, bytes = code.len(), "code snapshot saved");

    Ok(Outcome::ok_with(snapshot, "Code saved"))
}

pub fn clear_snapshot<S: DataStore>(store: &mut S, lesson_id: &str) -> Result<Outcome<()>> {
    if !store.clear_code_snapshot(lesson_id)? {
        return Ok(Outcome::fail("No saved code for this lesson"));
    }
    tracing::info!(lesson = lesson_id, "code snapshot cleared");
    Ok(Outcome::done("Code cleared"))
}
