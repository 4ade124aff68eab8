use super::backend::StorageBackend;
use super::{DataStore, StorageKey};
use crate::error::{Result, SynthaxError};
use crate::fixtures::Seed;
use crate::model::{
    BlogArticle, CodeSnapshot, Course, CourseProgress, ForumPost, Mentor, MentorshipRequest,
    Notification, User,
};
use crate::state::auth::AuthSession;
use crate::state::theme::Theme;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

type Snapshots = BTreeMap<String, CodeSnapshot>;

pub struct CollectionStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    pub(crate) seed: Seed,
}

impl<B: StorageBackend> CollectionStore<B> {
    /// A store seeded with the demo fixtures.
    pub fn with_backend(backend: B) -> Self {
        Self::with_seed(backend, Seed::demo())
    }

    pub fn with_seed(backend: B, seed: Seed) -> Self {
        Self { backend, seed }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Typed read. `Ok(None)` is absence; unparseable text is `Corrupt`.
    pub fn get<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>> {
        let Some(raw) = self.backend.read(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(source) => {
                tracing::warn!(key = %key, error = %source, "stored value failed to parse");
                Err(SynthaxError::Corrupt { key, source })
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(SynthaxError::Serialization)?;
        self.backend.write(key, &raw)
    }

    pub fn remove(&self, key: StorageKey) -> Result<()> {
        self.backend.remove(key)
    }

    /// The one seed-fallback path: an absent key is initialised from the seed and
    /// persisted before being returned. Corruption propagates untouched.
    pub fn get_or_seed<T, F>(&self, key: StorageKey, seed: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&Seed) -> T,
    {
        if let Some(value) = self.get(key)? {
            return Ok(value);
        }
        let value = seed(&self.seed);
        tracing::debug!(key = %key, "seeding collection on first read");
        self.set(key, &value)?;
        Ok(value)
    }

    fn snapshots(&self) -> Result<Snapshots> {
        Ok(self.get(StorageKey::CodePlayground)?.unwrap_or_default())
    }
}

impl<B: StorageBackend> DataStore for CollectionStore<B> {
    fn current_user(&self) -> Result<Option<User>> {
        self.get(StorageKey::User)
    }

    fn set_current_user(&mut self, user: &User) -> Result<()> {
        self.set(StorageKey::User, user)
    }

    fn clear_current_user(&mut self) -> Result<()> {
        self.remove(StorageKey::User)
    }

    fn courses(&mut self) -> Result<Vec<Course>> {
        self.get_or_seed(StorageKey::Courses, |s| s.courses.clone())
    }

    fn save_courses(&mut self, courses: &[Course]) -> Result<()> {
        self.set(StorageKey::Courses, courses)
    }

    fn progress(&mut self) -> Result<Vec<CourseProgress>> {
        self.get_or_seed(StorageKey::Progress, |s| s.progress.clone())
    }

    fn save_progress(&mut self, progress: &[CourseProgress]) -> Result<()> {
        self.set(StorageKey::Progress, progress)
    }

    fn mentors(&mut self) -> Result<Vec<Mentor>> {
        self.get_or_seed(StorageKey::Mentors, |s| s.mentors.clone())
    }

    fn save_mentors(&mut self, mentors: &[Mentor]) -> Result<()> {
        self.set(StorageKey::Mentors, mentors)
    }

    fn requests(&mut self) -> Result<Vec<MentorshipRequest>> {
        self.get_or_seed(StorageKey::Requests, |s| s.requests.clone())
    }

    fn save_requests(&mut self, requests: &[MentorshipRequest]) -> Result<()> {
        self.set(StorageKey::Requests, requests)
    }

    fn forum_posts(&mut self) -> Result<Vec<ForumPost>> {
        self.get_or_seed(StorageKey::ForumPosts, |s| s.forum_posts.clone())
    }

    fn save_forum_posts(&mut self, posts: &[ForumPost]) -> Result<()> {
        self.set(StorageKey::ForumPosts, posts)
    }

    fn blog_articles(&mut self) -> Result<Vec<BlogArticle>> {
        self.get_or_seed(StorageKey::BlogArticles, |s| s.blog_articles.clone())
    }

    fn save_blog_articles(&mut self, articles: &[BlogArticle]) -> Result<()> {
        self.set(StorageKey::BlogArticles, articles)
    }

    fn notifications(&mut self) -> Result<Vec<Notification>> {
        self.get_or_seed(StorageKey::Notifications, |s| s.notifications.clone())
    }

    fn save_notifications(&mut self, notifications: &[Notification]) -> Result<()> {
        self.set(StorageKey::Notifications, notifications)
    }

    fn code_snapshot(&self, lesson_id: &str) -> Result<Option<CodeSnapshot>> {
        Ok(self.snapshots()?.remove(lesson_id))
    }

    fn save_code_snapshot(&mut self, lesson_id: &str, snapshot: &CodeSnapshot) -> Result<()> {
        let mut all = self.snapshots()?;
        all.insert(lesson_id.to_string(), snapshot.clone());
        self.set(StorageKey::CodePlayground, &all)
    }

    fn clear_code_snapshot(&mut self, lesson_id: &str) -> Result<bool> {
        let mut all = self.snapshots()?;
        if all.remove(lesson_id).is_none() {
            return Ok(false);
        }
        self.set(StorageKey::CodePlayground, &all)?;
        Ok(true)
    }

    fn auth_session(&self) -> Result<Option<AuthSession>> {
        self.get(StorageKey::AuthSession)
    }

    fn save_auth_session(&mut self, session: &AuthSession) -> Result<()> {
        self.set(StorageKey::AuthSession, session)
    }

    fn clear_auth_session(&mut self) -> Result<()> {
        self.remove(StorageKey::AuthSession)
    }

    fn theme(&self) -> Result<Option<Theme>> {
        self.get(StorageKey::Theme)
    }

    fn save_theme(&mut self, theme: Theme) -> Result<()> {
        self.set(StorageKey::Theme, &theme)
    }

    fn clear_all(&mut self) -> Result<()> {
        for key in StorageKey::ALL {
            self.backend.remove(*key)?;
        }
        Ok(())
    }
}
