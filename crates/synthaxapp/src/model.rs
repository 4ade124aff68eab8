//! # Data Model
//!
//! Plain records persisted by the store. Every record serializes with camelCase
//! field names so a stored collection reads the same as the browser build's JSON.
//!
//! Ownership follows nesting: a [`Course`] owns its [`Module`]s, a module owns its
//! [`Lesson`]s, a [`ForumPost`] owns its [`Reply`]s and a [`BlogArticle`] owns its
//! [`Comment`]s. Nothing is referenced across collections except by id.
//!
//! Two fields are per-viewer and never canonical: [`Course::progress`] and
//! [`Lesson::completed`]. They are joined in at read time by [`crate::progress`]
//! and are skipped on serialization when unset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Implements `as_str`, `Display` and `FromStr` over the lowercase wire labels.
macro_rules! labelled_enum {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($label => Ok($name::$variant),)+
                    other => Err(format!(
                        "unknown {} '{}' (expected one of: {})",
                        stringify!($name),
                        other,
                        [$($label),+].join(", ")
                    )),
                }
            }
        }
    };
}

/// Builds a record id in the `{prefix}-{suffix}` shape used throughout the store.
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Learner,
    Mentor,
    Admin,
}

labelled_enum!(Role {
    Learner => "learner",
    Mentor => "mentor",
    Admin => "admin",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub earned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Fixed at creation; no operation changes it.
    pub role: Role,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub badges: Vec<Badge>,
    pub joined_at: DateTime<Utc>,
}

impl User {
    /// A freshly registered learner with an avatar derived from the name.
    pub fn new_learner(name: &str, email: &str) -> Self {
        Self {
            id: new_id("user"),
            name: name.to_string(),
            email: email.to_string(),
            role: Role::Learner,
            avatar: format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", name),
            bio: String::new(),
            streak: 0,
            badges: Vec::new(),
            joined_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

labelled_enum!(Level {
    Beginner => "beginner",
    Intermediate => "intermediate",
    Advanced => "advanced",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonType {
    Video,
    Reading,
    Code,
    Quiz,
}

labelled_enum!(LessonType {
    Video => "video",
    Reading => "reading",
    Code => "code",
    Quiz => "quiz",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub lesson_type: LessonType,
    pub duration: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Per-viewer flag, joined in at read time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: String,
    pub title: String,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub instructor: String,
    pub duration: String,
    pub level: Level,
    pub rating: f32,
    pub total_students: u32,
    pub tags: Vec<String>,
    pub modules: Vec<Module>,
    /// Per-viewer percentage, joined in at read time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
}

impl Course {
    pub fn total_lessons(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }

    /// Lessons in syllabus order.
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.modules.iter().flat_map(|m| m.lessons.iter())
    }

    pub fn has_lesson(&self, lesson_id: &str) -> bool {
        self.lessons().any(|l| l.id == lesson_id)
    }
}

/// One record per (user, course) pair. Created on first completion, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub course_id: String,
    pub user_id: String,
    /// Insertion-ordered, no duplicates.
    pub completed_lessons: Vec<String>,
    pub current_lesson: String,
    pub progress: u32,
    pub last_accessed_at: DateTime<Utc>,
}

impl CourseProgress {
    pub fn is_for(&self, course_id: &str, user_id: &str) -> bool {
        self.course_id == course_id && self.user_id == user_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub bio: String,
    pub expertise: Vec<String>,
    pub rating: f32,
    pub total_sessions: u32,
    pub availability: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

labelled_enum!(RequestStatus {
    Pending => "pending",
    Accepted => "accepted",
    Rejected => "rejected",
    Completed => "completed",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorshipRequest {
    pub id: String,
    pub mentee_id: String,
    pub mentee_name: String,
    pub mentor_id: String,
    pub topic: String,
    pub message: String,
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub author_avatar: String,
    pub content: String,
    pub upvotes: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub author_avatar: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub upvotes: u32,
    pub downvotes: u32,
    pub replies: Vec<Reply>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Up,
    Down,
}

labelled_enum!(Vote {
    Up => "up",
    Down => "down",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub author_avatar: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogArticle {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub author_avatar: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub thumbnail: String,
    pub tags: Vec<String>,
    /// Reaction name to count. Ordered so listings are stable.
    pub reactions: BTreeMap<String, u32>,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub read_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Course,
    Mentor,
    Forum,
    System,
    Community,
    Badge,
    Mentorship,
}

labelled_enum!(NotificationKind {
    Course => "course",
    Mentor => "mentor",
    Forum => "forum",
    System => "system",
    Community => "community",
    Badge => "badge",
    Mentorship => "mentorship",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Code saved from the playground for one lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSnapshot {
    pub language: String,
    pub code: String,
    pub saved_at: DateTime<Utc>,
}
