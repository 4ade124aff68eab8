//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the two state
//! containers. It is the single entry point for every Synthax operation, whatever
//! client sits on top.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Simulates latency** per endpoint when enabled
//! - **Routes auth and theme actions** through [`AuthStore`] and [`ThemeStore`], so
//!   their in-memory state, persisted state and subscribers stay in step
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Presentation concerns**: Returns records and `Outcome`s, not strings
//!
//! ## Endpoints and Latency
//!
//! [`Endpoint`] names every mock endpoint together with the REST route a real
//! backend would serve it on and the delay the demo backend used to fake a network
//! round trip. With latency enabled the facade sleeps for that delay before
//! dispatching; disabled (the default) the delay is only logged. No behaviour
//! depends on the delay.
//!
//! ## Generic Over DataStore
//!
//! `SynthaxApi<S: DataStore>` is generic over the storage backend:
//! - Production: `SynthaxApi<FileStore>`
//! - Testing: `SynthaxApi<InMemoryStore>`

use crate::commands::{self, Outcome};
use crate::error::Result;
use crate::model::{
    BlogArticle, CodeSnapshot, Comment, Course, CourseProgress, ForumPost, Lesson, Mentor,
    MentorshipRequest, Notification, NotificationKind, Reply, RequestStatus, User, Vote,
};
use crate::state::auth::AuthStore;
use crate::state::theme::{Theme, ThemeStore};
use crate::store::DataStore;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// Every mock endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Signup,
    VerifyOtp,
    SendOtp,
    GoogleLogin,
    Logout,
    CurrentUser,
    Courses,
    Course,
    CompleteLesson,
    UserProgress,
    NextLesson,
    SearchCourses,
    Mentors,
    Mentor,
    MentorRequests,
    CreateRequest,
    UpdateRequest,
    SearchMentors,
    ForumPosts,
    ForumPost,
    CreatePost,
    AddReply,
    Vote,
    SearchPosts,
    BlogArticles,
    BlogArticle,
    React,
    AddComment,
    Notifications,
    UnreadCount,
    MarkRead,
    MarkAllRead,
    DeleteNotification,
    CreateNotification,
}

impl Endpoint {
    pub const ALL: &'static [Endpoint] = &[
        Endpoint::Login,
        Endpoint::Signup,
        Endpoint::VerifyOtp,
        Endpoint::SendOtp,
        Endpoint::GoogleLogin,
        Endpoint::Logout,
        Endpoint::CurrentUser,
        Endpoint::Courses,
        Endpoint::Course,
        Endpoint::CompleteLesson,
        Endpoint::UserProgress,
        Endpoint::NextLesson,
        Endpoint::SearchCourses,
        Endpoint::Mentors,
        Endpoint::Mentor,
        Endpoint::MentorRequests,
        Endpoint::CreateRequest,
        Endpoint::UpdateRequest,
        Endpoint::SearchMentors,
        Endpoint::ForumPosts,
        Endpoint::ForumPost,
        Endpoint::CreatePost,
        Endpoint::AddReply,
        Endpoint::Vote,
        Endpoint::SearchPosts,
        Endpoint::BlogArticles,
        Endpoint::BlogArticle,
        Endpoint::React,
        Endpoint::AddComment,
        Endpoint::Notifications,
        Endpoint::UnreadCount,
        Endpoint::MarkRead,
        Endpoint::MarkAllRead,
        Endpoint::DeleteNotification,
        Endpoint::CreateNotification,
    ];

    /// Method and path a real backend would serve this endpoint on.
    pub fn route(&self) -> &'static str {
        match self {
            Endpoint::Login => "POST /api/auth/login",
            Endpoint::Signup => "POST /api/auth/signup",
            Endpoint::VerifyOtp => "POST /api/auth/verify-otp",
            Endpoint::SendOtp => "POST /api/auth/send-otp",
            Endpoint::GoogleLogin => "GET /api/auth/google",
            Endpoint::Logout => "POST /api/auth/logout",
            Endpoint::CurrentUser => "GET /api/auth/me",
            Endpoint::Courses => "GET /api/courses",
            Endpoint::Course => "GET /api/courses/:id",
            Endpoint::CompleteLesson => "POST /api/courses/:courseId/lessons/:lessonId/complete",
            Endpoint::UserProgress => "GET /api/users/me/progress",
            Endpoint::NextLesson => "GET /api/courses/:courseId/next-lesson",
            Endpoint::SearchCourses => "GET /api/courses/search?q=query",
            Endpoint::Mentors => "GET /api/mentors",
            Endpoint::Mentor => "GET /api/mentors/:id",
            Endpoint::MentorRequests => "GET /api/mentors/me/requests",
            Endpoint::CreateRequest => "POST /api/mentorship/request",
            Endpoint::UpdateRequest => "PUT /api/mentorship/request/:id",
            Endpoint::SearchMentors => "GET /api/mentors/search?expertise=query",
            Endpoint::ForumPosts => "GET /api/forum/posts",
            Endpoint::ForumPost => "GET /api/forum/posts/:id",
            Endpoint::CreatePost => "POST /api/forum/posts",
            Endpoint::AddReply => "POST /api/forum/posts/:id/replies",
            Endpoint::Vote => "POST /api/forum/posts/:id/vote",
            Endpoint::SearchPosts => "GET /api/forum/posts/search?q=query",
            Endpoint::BlogArticles => "GET /api/blog/articles",
            Endpoint::BlogArticle => "GET /api/blog/articles/:id",
            Endpoint::React => "POST /api/blog/articles/:id/react",
            Endpoint::AddComment => "POST /api/blog/articles/:id/comments",
            Endpoint::Notifications => "GET /api/notifications",
            Endpoint::UnreadCount => "GET /api/notifications/unread-count",
            Endpoint::MarkRead => "PUT /api/notifications/:id/read",
            Endpoint::MarkAllRead => "PUT /api/notifications/read-all",
            Endpoint::DeleteNotification => "DELETE /api/notifications/:id",
            Endpoint::CreateNotification => "POST /api/notifications",
        }
    }

    /// Nominal round-trip time.
    pub fn delay(&self) -> Duration {
        let ms = match self {
            Endpoint::GoogleLogin => 1200,
            Endpoint::Signup => 1000,
            Endpoint::Login => 800,
            Endpoint::CreatePost => 700,
            Endpoint::VerifyOtp | Endpoint::Courses | Endpoint::CreateRequest => 600,
            Endpoint::SendOtp
            | Endpoint::SearchCourses
            | Endpoint::Mentors
            | Endpoint::UpdateRequest
            | Endpoint::ForumPosts
            | Endpoint::AddReply
            | Endpoint::BlogArticles
            | Endpoint::AddComment => 500,
            Endpoint::Course
            | Endpoint::CompleteLesson
            | Endpoint::Mentor
            | Endpoint::MentorRequests
            | Endpoint::SearchMentors
            | Endpoint::ForumPost
            | Endpoint::SearchPosts
            | Endpoint::BlogArticle
            | Endpoint::Notifications
            | Endpoint::UnreadCount
            | Endpoint::MarkAllRead => 400,
            Endpoint::Logout
            | Endpoint::UserProgress
            | Endpoint::NextLesson
            | Endpoint::Vote
            | Endpoint::React
            | Endpoint::MarkRead
            | Endpoint::DeleteNotification => 300,
            Endpoint::CreateNotification => 200,
            Endpoint::CurrentUser => 0,
        };
        Duration::from_millis(ms)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

/// The main API facade for Synthax operations.
///
/// Owns the store and both state containers. All UI clients should go through it.
pub struct SynthaxApi<S: DataStore> {
    store: S,
    auth: AuthStore,
    theme: ThemeStore,
    simulate_latency: bool,
}

impl<S: DataStore> SynthaxApi<S> {
    /// Restores both containers from the store. The theme defaults to dark.
    pub fn new(store: S, simulate_latency: bool) -> Result<Self> {
        Self::with_initial_theme(store, simulate_latency, Theme::default())
    }

    /// Like [`SynthaxApi::new`], with `theme` used when no theme has been saved yet.
    pub fn with_initial_theme(store: S, simulate_latency: bool, theme: Theme) -> Result<Self> {
        let auth = AuthStore::load(&store)?;
        let theme = ThemeStore::load_or(&store, theme)?;
        Ok(Self {
            store,
            auth,
            theme,
            simulate_latency,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    pub fn auth_mut(&mut self) -> &mut AuthStore {
        &mut self.auth
    }

    pub fn theme(&self) -> &ThemeStore {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeStore {
        &mut self.theme
    }

    pub fn simulates_latency(&self) -> bool {
        self.simulate_latency
    }

    fn pause(&self, endpoint: Endpoint) {
        let delay = endpoint.delay();
        tracing::trace!(
            route = endpoint.route(),
            delay_ms = delay.as_millis() as u64,
            simulated = self.simulate_latency,
            "endpoint"
        );
        if self.simulate_latency && !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    // --- Auth ---

    pub fn login(&mut self, email: &str, password: &str, remember_me: bool) -> Result<Outcome<User>> {
        self.pause(Endpoint::Login);
        self.auth.login(&mut self.store, email, password, remember_me)
    }

    pub fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<Outcome<User>> {
        self.pause(Endpoint::Signup);
        self.auth.signup(&mut self.store, name, email, password)
    }

    pub fn send_otp(&self, email: &str) -> Outcome<()> {
        self.pause(Endpoint::SendOtp);
        commands::auth::send_otp(email)
    }

    pub fn verify_otp(&mut self, otp: &str) -> Result<Outcome<()>> {
        self.pause(Endpoint::VerifyOtp);
        self.auth.verify_otp(&mut self.store, otp)
    }

    pub fn login_with_google(&mut self) -> Result<Outcome<User>> {
        self.pause(Endpoint::GoogleLogin);
        self.auth.login_with_google(&mut self.store)
    }

    pub fn logout(&mut self) -> Result<Outcome<()>> {
        self.pause(Endpoint::Logout);
        self.auth.logout(&mut self.store)
    }

    pub fn current_user(&self) -> Result<Option<User>> {
        self.pause(Endpoint::CurrentUser);
        commands::auth::current_user(&self.store)
    }

    // --- Courses ---

    pub fn courses(&mut self) -> Result<Vec<Course>> {
        self.pause(Endpoint::Courses);
        commands::courses::list(&mut self.store)
    }

    pub fn course(&mut self, course_id: &str) -> Result<Option<Course>> {
        self.pause(Endpoint::Course);
        commands::courses::get(&mut self.store, course_id)
    }

    pub fn mark_lesson_complete(&mut self, course_id: &str, lesson_id: &str) -> Result<Outcome<u32>> {
        self.pause(Endpoint::CompleteLesson);
        commands::courses::mark_lesson_complete(&mut self.store, course_id, lesson_id)
    }

    pub fn user_progress(&mut self) -> Result<Vec<CourseProgress>> {
        self.pause(Endpoint::UserProgress);
        commands::courses::user_progress(&mut self.store)
    }

    pub fn next_lesson(&mut self, course_id: &str) -> Result<Outcome<Option<Lesson>>> {
        self.pause(Endpoint::NextLesson);
        commands::courses::next_lesson(&mut self.store, course_id)
    }

    pub fn search_courses(&mut self, query: &str) -> Result<Vec<Course>> {
        self.pause(Endpoint::SearchCourses);
        commands::courses::search(&mut self.store, query)
    }

    // --- Mentors ---

    pub fn mentors(&mut self) -> Result<Vec<Mentor>> {
        self.pause(Endpoint::Mentors);
        commands::mentors::list(&mut self.store)
    }

    pub fn mentor(&mut self, mentor_id: &str) -> Result<Option<Mentor>> {
        self.pause(Endpoint::Mentor);
        commands::mentors::get(&mut self.store, mentor_id)
    }

    pub fn mentorship_requests(&mut self) -> Result<Vec<MentorshipRequest>> {
        self.pause(Endpoint::MentorRequests);
        commands::mentors::requests_for_current_mentor(&mut self.store)
    }

    /// Not a backend route of its own; shares the mentor-requests delay.
    pub fn sent_requests(&mut self) -> Result<Vec<MentorshipRequest>> {
        self.pause(Endpoint::MentorRequests);
        commands::mentors::requests_for_current_mentee(&mut self.store)
    }

    pub fn create_request(
        &mut self,
        mentor_id: &str,
        topic: &str,
        message: &str,
    ) -> Result<Outcome<MentorshipRequest>> {
        self.pause(Endpoint::CreateRequest);
        commands::mentors::create_request(&mut self.store, mentor_id, topic, message)
    }

    pub fn update_request(
        &mut self,
        request_id: &str,
        status: RequestStatus,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> Result<Outcome<MentorshipRequest>> {
        self.pause(Endpoint::UpdateRequest);
        commands::mentors::update_request(&mut self.store, request_id, status, scheduled_at)
    }

    pub fn search_mentors(&mut self, expertise: &str) -> Result<Vec<Mentor>> {
        self.pause(Endpoint::SearchMentors);
        commands::mentors::search(&mut self.store, expertise)
    }

    // --- Forum ---

    pub fn forum_posts(&mut self) -> Result<Vec<ForumPost>> {
        self.pause(Endpoint::ForumPosts);
        commands::forum::list(&mut self.store)
    }

    pub fn forum_post(&mut self, post_id: &str) -> Result<Option<ForumPost>> {
        self.pause(Endpoint::ForumPost);
        commands::forum::get(&mut self.store, post_id)
    }

    pub fn create_post(
        &mut self,
        title: &str,
        content: &str,
        tags: Vec<String>,
    ) -> Result<Outcome<ForumPost>> {
        self.pause(Endpoint::CreatePost);
        commands::forum::create_post(&mut self.store, title, content, tags)
    }

    pub fn add_reply(&mut self, post_id: &str, content: &str) -> Result<Outcome<Reply>> {
        self.pause(Endpoint::AddReply);
        commands::forum::add_reply(&mut self.store, post_id, content)
    }

    pub fn vote(&mut self, post_id: &str, vote: Vote) -> Result<Outcome<ForumPost>> {
        self.pause(Endpoint::Vote);
        commands::forum::vote(&mut self.store, post_id, vote)
    }

    pub fn search_posts(&mut self, query: &str) -> Result<Vec<ForumPost>> {
        self.pause(Endpoint::SearchPosts);
        commands::forum::search(&mut self.store, query)
    }

    // --- Blog ---

    pub fn blog_articles(&mut self) -> Result<Vec<BlogArticle>> {
        self.pause(Endpoint::BlogArticles);
        commands::blog::list(&mut self.store)
    }

    pub fn blog_article(&mut self, article_id: &str) -> Result<Option<BlogArticle>> {
        self.pause(Endpoint::BlogArticle);
        commands::blog::get(&mut self.store, article_id)
    }

    pub fn react(&mut self, article_id: &str, reaction: &str) -> Result<Outcome<u32>> {
        self.pause(Endpoint::React);
        commands::blog::react(&mut self.store, article_id, reaction)
    }

    pub fn add_comment(&mut self, article_id: &str, content: &str) -> Result<Outcome<Comment>> {
        self.pause(Endpoint::AddComment);
        commands::blog::add_comment(&mut self.store, article_id, content)
    }

    // --- Notifications ---

    pub fn notifications(&mut self) -> Result<Vec<Notification>> {
        self.pause(Endpoint::Notifications);
        commands::notifications::list(&mut self.store)
    }

    pub fn unread_count(&mut self) -> Result<usize> {
        self.pause(Endpoint::UnreadCount);
        commands::notifications::unread_count(&mut self.store)
    }

    pub fn mark_read(&mut self, notification_id: &str) -> Result<Outcome<()>> {
        self.pause(Endpoint::MarkRead);
        commands::notifications::mark_read(&mut self.store, notification_id)
    }

    pub fn mark_all_read(&mut self) -> Result<Outcome<usize>> {
        self.pause(Endpoint::MarkAllRead);
        commands::notifications::mark_all_read(&mut self.store)
    }

    pub fn delete_notification(&mut self, notification_id: &str) -> Result<Outcome<()>> {
        self.pause(Endpoint::DeleteNotification);
        commands::notifications::delete(&mut self.store, notification_id)
    }

    pub fn create_notification(
        &mut self,
        kind: NotificationKind,
        title: &str,
        message: &str,
        link: Option<&str>,
    ) -> Result<Outcome<Notification>> {
        self.pause(Endpoint::CreateNotification);
        commands::notifications::create(&mut self.store, kind, title, message, link)
    }

    // --- Playground (local only, no endpoint) ---

    pub fn load_snapshot(&self, lesson_id: &str) -> Result<Option<CodeSnapshot>> {
        commands::playground::load_snapshot(&self.store, lesson_id)
    }

    pub fn save_snapshot(
        &mut self,
        lesson_id: &str,
        language: &str,
        code: &str,
    ) -> Result<Outcome<CodeSnapshot>> {
        commands::playground::save_snapshot(&mut self.store, lesson_id, language, code)
    }

    pub fn clear_snapshot(&mut self, lesson_id: &str) -> Result<Outcome<()>> {
        commands::playground::clear_snapshot(&mut self.store, lesson_id)
    }

    // --- Theme ---

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.theme.toggle(&mut self.store)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme.set(&mut self.store, theme)
    }

    // --- Maintenance ---

    /// Wipe every persisted key and reset both containers. Collections reseed on
    /// their next read.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear_all()?;
        self.auth = AuthStore::load(&self.store)?;
        self.theme = ThemeStore::load(&self.store)?;
        tracing::info!("all stored data cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::auth::AuthStatus;
    use crate::store::memory::InMemoryStore;
    use std::collections::HashSet;

    fn api() -> SynthaxApi<InMemoryStore> {
        SynthaxApi::new(InMemoryStore::new(), false).unwrap()
    }

    #[test]
    fn test_routes_are_unique() {
        let routes: HashSet<_> = Endpoint::ALL.iter().map(|e| e.route()).collect();
        assert_eq!(routes.len(), Endpoint::ALL.len());
    }

    #[test]
    fn test_delays_stay_in_demo_range() {
        for endpoint in Endpoint::ALL {
            if *endpoint == Endpoint::CurrentUser {
                continue;
            }
            let ms = endpoint.delay().as_millis();
            assert!((200..=1200).contains(&ms), "{} has {}ms", endpoint, ms);
        }
    }

    #[test]
    fn test_login_goes_through_auth_container() {
        let mut api = api();
        let outcome = api.login("admin@test.com", "secret1", false).unwrap();

        assert_eq!(outcome.data.unwrap().id, "admin-1");
        assert_eq!(api.auth().status(), AuthStatus::Authenticated);
        assert_eq!(api.current_user().unwrap().unwrap().email, "admin@test.com");
    }

    #[test]
    fn test_signed_in_flow() {
        let mut api = api();
        api.login("learner@test.com", "secret1", false).unwrap();

        assert_eq!(api.mark_lesson_complete("course-1", "l1").unwrap().data, Some(25));
        let course = api.course("course-1").unwrap().unwrap();
        assert_eq!(course.progress, Some(25));
        let next = api.next_lesson("course-1").unwrap().into_data().flatten();
        assert_eq!(next.unwrap().id, "l2");
        assert_eq!(api.unread_count().unwrap(), 3);
    }

    #[test]
    fn test_reset_restores_demo_state() {
        let mut api = api();
        api.login("learner@test.com", "secret1", false).unwrap();
        api.set_theme(Theme::Light).unwrap();
        api.create_post("t", "c", Vec::new()).unwrap();

        api.reset().unwrap();

        assert_eq!(api.auth().status(), AuthStatus::Anonymous);
        assert_eq!(api.theme().theme(), Theme::Dark);
        assert_eq!(api.forum_posts().unwrap().len(), 3);
    }

    #[test]
    fn test_initial_theme_used_only_when_unsaved() {
        let api = SynthaxApi::with_initial_theme(InMemoryStore::new(), false, Theme::Light).unwrap();
        assert_eq!(api.theme().theme(), Theme::Light);
    }
}
