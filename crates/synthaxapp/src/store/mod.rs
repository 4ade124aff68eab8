//! # Storage Layer
//!
//! Persistence is a flat key-value store: every logical collection is one key whose
//! value is the whole collection serialized as JSON text. The layer is split in two:
//!
//! - [`backend::StorageBackend`]: the "how" of raw text I/O per key (memory or disk).
//! - [`DataStore`]: the typed repository the command layer is written against, one
//!   method pair per collection.
//!
//! [`collection_store::CollectionStore`] is the single `DataStore` implementation and is
//! generic over the backend:
//!
//! - [`memory::InMemoryStore`]: `CollectionStore<MemBackend>`, for tests.
//! - [`fs::FileStore`]: `CollectionStore<FsBackend>`, one JSON file per key.
//!
//! ## Absence vs. Corruption
//!
//! A key that was never written reads as `Ok(None)`. A key whose text no longer parses
//! reads as `Err(SynthaxError::Corrupt)`. The two are never conflated: a corrupt
//! collection is surfaced to the caller rather than replaced with seed data.
//!
//! ## Seeding
//!
//! Seeded collections (courses, progress, mentors, requests, forum posts, blog
//! articles, notifications) go through one `get_or_seed` path: when the key is absent
//! the seed value is written back immediately, then returned. The current user, the
//! playground snapshots and the two state-container records have no seed.
//!
//! ## Single Writer
//!
//! Seeded reads take `&mut self` because the first read may write. Every mutation
//! therefore needs exclusive access to the store, so sharing one across threads
//! requires an outer lock. Within one owner, sequential calls observe each other's
//! writes in call order.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── synthax.toml                  # Configuration
//! ├── synthax_user.json             # Current user (absent when signed out)
//! ├── synthax_courses.json
//! ├── synthax_progress.json
//! ├── synthax_mentors.json
//! ├── synthax_requests.json
//! ├── synthax_forum_posts.json
//! ├── synthax_blog_articles.json
//! ├── synthax_notifications.json
//! ├── synthax_code_playground.json  # lesson id -> snapshot
//! ├── synthax_auth.json             # Auth container state
//! └── synthax_theme.json            # Theme container state
//! ```

use crate::error::Result;
use crate::model::{
    BlogArticle, CodeSnapshot, Course, CourseProgress, ForumPost, Mentor, MentorshipRequest,
    Notification, User,
};
use crate::state::auth::AuthSession;
use crate::state::theme::Theme;
use std::fmt;

pub mod backend;
pub mod collection_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

/// Every key the store persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    User,
    Courses,
    Progress,
    Mentors,
    Requests,
    ForumPosts,
    BlogArticles,
    Notifications,
    CodePlayground,
    AuthSession,
    Theme,
}

impl StorageKey {
    pub const ALL: &'static [StorageKey] = &[
        StorageKey::User,
        StorageKey::Courses,
        StorageKey::Progress,
        StorageKey::Mentors,
        StorageKey::Requests,
        StorageKey::ForumPosts,
        StorageKey::BlogArticles,
        StorageKey::Notifications,
        StorageKey::CodePlayground,
        StorageKey::AuthSession,
        StorageKey::Theme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::User => "user",
            StorageKey::Courses => "courses",
            StorageKey::Progress => "progress",
            StorageKey::Mentors => "mentors",
            StorageKey::Requests => "requests",
            StorageKey::ForumPosts => "forum_posts",
            StorageKey::BlogArticles => "blog_articles",
            StorageKey::Notifications => "notifications",
            StorageKey::CodePlayground => "code_playground",
            StorageKey::AuthSession => "auth",
            StorageKey::Theme => "theme",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed repository over the persisted collections.
///
/// Collection readers return the whole collection; writers replace it. There is no
/// partial update, so the last writer wins.
pub trait DataStore {
    // --- Current user ---

    fn current_user(&self) -> Result<Option<User>>;
    fn set_current_user(&mut self, user: &User) -> Result<()>;
    fn clear_current_user(&mut self) -> Result<()>;

    // --- Seeded collections ---

    fn courses(&mut self) -> Result<Vec<Course>>;
    fn save_courses(&mut self, courses: &[Course]) -> Result<()>;

    fn progress(&mut self) -> Result<Vec<CourseProgress>>;
    fn save_progress(&mut self, progress: &[CourseProgress]) -> Result<()>;

    fn mentors(&mut self) -> Result<Vec<Mentor>>;
    fn save_mentors(&mut self, mentors: &[Mentor]) -> Result<()>;

    fn requests(&mut self) -> Result<Vec<MentorshipRequest>>;
    fn save_requests(&mut self, requests: &[MentorshipRequest]) -> Result<()>;

    fn forum_posts(&mut self) -> Result<Vec<ForumPost>>;
    fn save_forum_posts(&mut self, posts: &[ForumPost]) -> Result<()>;

    fn blog_articles(&mut self) -> Result<Vec<BlogArticle>>;
    fn save_blog_articles(&mut self, articles: &[BlogArticle]) -> Result<()>;

    fn notifications(&mut self) -> Result<Vec<Notification>>;
    fn save_notifications(&mut self, notifications: &[Notification]) -> Result<()>;

    // --- Playground snapshots (keyed by lesson id) ---

    fn code_snapshot(&self, lesson_id: &str) -> Result<Option<CodeSnapshot>>;
    fn save_code_snapshot(&mut self, lesson_id: &str, snapshot: &CodeSnapshot) -> Result<()>;
    /// Returns whether a snapshot was removed.
    fn clear_code_snapshot(&mut self, lesson_id: &str) -> Result<bool>;

    // --- State containers ---

    fn auth_session(&self) -> Result<Option<AuthSession>>;
    fn save_auth_session(&mut self, session: &AuthSession) -> Result<()>;
    fn clear_auth_session(&mut self) -> Result<()>;

    fn theme(&self) -> Result<Option<Theme>>;
    fn save_theme(&mut self, theme: Theme) -> Result<()>;

    /// Remove every persisted key. The next read of a seeded collection reseeds it.
    fn clear_all(&mut self) -> Result<()>;
}
