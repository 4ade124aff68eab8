//! Seed data.
//!
//! [`Seed`] holds the initial value of every seeded collection. A store writes the
//! matching field back the first time a collection is read while absent. The demo
//! accounts returned by [`learner_user`], [`mentor_user`] and [`admin_user`] are the
//! identities handed out by the mock login.
//!
//! Timestamps are fixed instants so fixtures compare equal across runs.

use crate::model::{
    Badge, BlogArticle, Comment, Course, CourseProgress, ForumPost, Lesson, LessonType, Level,
    Mentor, MentorshipRequest, Module, Notification, NotificationKind, Reply, RequestStatus,
    Role, User,
};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeMap;

pub const LEARNER_ID: &str = "user-1";
pub const MENTOR_ID: &str = "mentor-1";
pub const ADMIN_ID: &str = "admin-1";

fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

fn avatar(seed: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", seed)
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

pub fn learner_user() -> User {
    User {
        id: LEARNER_ID.to_string(),
        name: "Sahil Kumar".to_string(),
        email: "learner@test.com".to_string(),
        role: Role::Learner,
        avatar: avatar("Sahil"),
        bio: "Frontend enthusiast learning full-stack development".to_string(),
        streak: 7,
        badges: vec![
            Badge {
                id: "badge-1".to_string(),
                name: "First Steps".to_string(),
                description: "Completed your first lesson".to_string(),
                icon: "🎯".to_string(),
                earned_at: ts(2024, 1, 16, 9, 0),
            },
            Badge {
                id: "badge-2".to_string(),
                name: "Week Warrior".to_string(),
                description: "Kept a 7-day learning streak".to_string(),
                icon: "🔥".to_string(),
                earned_at: ts(2024, 1, 22, 20, 15),
            },
        ],
        joined_at: ts(2024, 1, 15, 0, 0),
    }
}

pub fn mentor_user() -> User {
    User {
        id: MENTOR_ID.to_string(),
        name: "Priya Singh".to_string(),
        email: "mentor@test.com".to_string(),
        role: Role::Mentor,
        avatar: avatar("Priya"),
        bio: "Full-stack developer with 8+ years of experience teaching web development"
            .to_string(),
        streak: 0,
        badges: Vec::new(),
        joined_at: ts(2023, 6, 20, 0, 0),
    }
}

pub fn admin_user() -> User {
    User {
        id: ADMIN_ID.to_string(),
        name: "Admin User".to_string(),
        email: "admin@test.com".to_string(),
        role: Role::Admin,
        avatar: avatar("Admin"),
        bio: String::new(),
        streak: 0,
        badges: Vec::new(),
        joined_at: ts(2023, 1, 1, 0, 0),
    }
}

fn lesson(id: &str, title: &str, lesson_type: LessonType, duration: &str) -> Lesson {
    Lesson {
        id: id.to_string(),
        title: title.to_string(),
        lesson_type,
        duration: duration.to_string(),
        content: format!("{}: lesson notes.", title),
        code_template: None,
        language: None,
        completed: None,
    }
}

fn code_lesson(id: &str, title: &str, duration: &str, language: &str, template: &str) -> Lesson {
    Lesson {
        code_template: Some(template.to_string()),
        language: Some(language.to_string()),
        ..lesson(id, title, LessonType::Code, duration)
    }
}

fn module(id: &str, title: &str, lessons: Vec<Lesson>) -> Module {
    Module {
        id: id.to_string(),
        title: title.to_string(),
        lessons,
    }
}

pub fn courses() -> Vec<Course> {
    vec![
        Course {
            id: "course-1".to_string(),
            title: "JavaScript Fundamentals".to_string(),
            description: "Master the basics of JavaScript from variables to async programming"
                .to_string(),
            thumbnail: "https://images.unsplash.com/photo-1627398242454-45a1465c2479".to_string(),
            instructor: "Priya Singh".to_string(),
            duration: "8 hours".to_string(),
            level: Level::Beginner,
            rating: 4.8,
            total_students: 12453,
            tags: tags(&["JavaScript", "Web Development", "Programming"]),
            modules: vec![
                module(
                    "m1",
                    "Getting Started",
                    vec![
                        lesson("l1", "Introduction to JavaScript", LessonType::Video, "15 min"),
                        lesson("l2", "Setting up your environment", LessonType::Reading, "10 min"),
                    ],
                ),
                module(
                    "m2",
                    "Variables and Data Types",
                    vec![
                        code_lesson(
                            "l3",
                            "Practice: Variable Declaration",
                            "30 min",
                            "javascript",
                            "let name = 'Developer';\nconsole.log(`Hello, ${name}!`);",
                        ),
                        lesson("l4", "Variables Quiz", LessonType::Quiz, "10 min"),
                    ],
                ),
            ],
            progress: None,
        },
        Course {
            id: "course-2".to_string(),
            title: "Python for Data Science".to_string(),
            description: "Learn Python programming with focus on data analysis and visualization"
                .to_string(),
            thumbnail: "https://images.unsplash.com/photo-1526379095098-d400fd0bf935".to_string(),
            instructor: "Rahul Verma".to_string(),
            duration: "12 hours".to_string(),
            level: Level::Intermediate,
            rating: 4.7,
            total_students: 8932,
            tags: tags(&["Python", "Data Science", "Pandas"]),
            modules: vec![
                module(
                    "m3",
                    "Python Basics",
                    vec![
                        lesson("py-1", "Python Syntax", LessonType::Video, "25 min"),
                        code_lesson(
                            "py-2",
                            "Lists and Dictionaries",
                            "20 min",
                            "python",
                            "scores = {'ada': 95}\nprint(scores)",
                        ),
                    ],
                ),
                module(
                    "m4",
                    "Working with Pandas",
                    vec![lesson("py-3", "DataFrames 101", LessonType::Reading, "30 min")],
                ),
            ],
            progress: None,
        },
        Course {
            id: "course-3".to_string(),
            title: "React Advanced Patterns".to_string(),
            description: "Deep dive into React hooks, context, and performance optimization"
                .to_string(),
            thumbnail: "https://images.unsplash.com/photo-1633356122544-f134324a6cee".to_string(),
            instructor: "Anjali Sharma".to_string(),
            duration: "15 hours".to_string(),
            level: Level::Advanced,
            rating: 4.9,
            total_students: 5621,
            tags: tags(&["React", "JavaScript", "Performance"]),
            modules: vec![module(
                "m5",
                "Advanced Hooks",
                vec![
                    lesson("r-1", "Custom Hooks", LessonType::Video, "30 min"),
                    lesson("r-2", "Memoization Pitfalls", LessonType::Reading, "20 min"),
                ],
            )],
            progress: None,
        },
    ]
}

pub fn progress() -> Vec<CourseProgress> {
    vec![CourseProgress {
        course_id: "course-2".to_string(),
        user_id: LEARNER_ID.to_string(),
        completed_lessons: vec!["py-1".to_string()],
        current_lesson: "py-2".to_string(),
        progress: 33,
        last_accessed_at: ts(2024, 1, 21, 18, 40),
    }]
}

pub fn mentors() -> Vec<Mentor> {
    vec![
        Mentor {
            id: MENTOR_ID.to_string(),
            name: "Priya Singh".to_string(),
            email: "mentor@test.com".to_string(),
            avatar: avatar("Priya"),
            bio: "Full-stack developer with 8+ years of experience teaching web development"
                .to_string(),
            expertise: tags(&["JavaScript", "React", "Node.js"]),
            rating: 4.9,
            total_sessions: 127,
            availability: tags(&["Mon 18:00-20:00", "Wed 18:00-20:00", "Sat 10:00-12:00"]),
        },
        Mentor {
            id: "mentor-2".to_string(),
            name: "Rahul Verma".to_string(),
            email: "rahul@synthaxsphere.com".to_string(),
            avatar: avatar("Rahul"),
            bio: "Data scientist passionate about making ML accessible to everyone".to_string(),
            expertise: tags(&["Python", "Data Science", "Machine Learning"]),
            rating: 4.8,
            total_sessions: 95,
            availability: tags(&["Tue 17:00-19:00", "Thu 17:00-19:00"]),
        },
        Mentor {
            id: "mentor-3".to_string(),
            name: "Anjali Sharma".to_string(),
            email: "anjali@synthaxsphere.com".to_string(),
            avatar: avatar("Anjali"),
            bio: "Frontend architect focused on performance and accessibility".to_string(),
            expertise: tags(&["React", "TypeScript", "Web Performance"]),
            rating: 4.7,
            total_sessions: 64,
            availability: tags(&["Fri 16:00-18:00"]),
        },
    ]
}

pub fn requests() -> Vec<MentorshipRequest> {
    vec![
        MentorshipRequest {
            id: "req-1".to_string(),
            mentee_id: LEARNER_ID.to_string(),
            mentee_name: "Sahil Kumar".to_string(),
            mentor_id: MENTOR_ID.to_string(),
            topic: "Async JavaScript".to_string(),
            message: "I'd like help understanding promises and async/await.".to_string(),
            status: RequestStatus::Pending,
            scheduled_at: None,
            created_at: ts(2024, 1, 20, 11, 0),
        },
        MentorshipRequest {
            id: "req-2".to_string(),
            mentee_id: "user-2".to_string(),
            mentee_name: "Anita Desai".to_string(),
            mentor_id: MENTOR_ID.to_string(),
            topic: "Career guidance".to_string(),
            message: "How do I move from frontend into full-stack roles?".to_string(),
            status: RequestStatus::Accepted,
            scheduled_at: Some(ts(2024, 1, 27, 18, 0)),
            created_at: ts(2024, 1, 18, 9, 30),
        },
        MentorshipRequest {
            id: "req-3".to_string(),
            mentee_id: LEARNER_ID.to_string(),
            mentee_name: "Sahil Kumar".to_string(),
            mentor_id: "mentor-2".to_string(),
            topic: "Pandas performance".to_string(),
            message: "My notebooks get slow on large CSV files.".to_string(),
            status: RequestStatus::Completed,
            scheduled_at: Some(ts(2024, 1, 12, 17, 0)),
            created_at: ts(2024, 1, 10, 8, 0),
        },
    ]
}

fn reply(
    id: &str,
    author_id: &str,
    author: &str,
    content: &str,
    upvotes: u32,
    at: DateTime<Utc>,
) -> Reply {
    Reply {
        id: id.to_string(),
        author_id: author_id.to_string(),
        author_name: author.to_string(),
        author_avatar: avatar(author),
        content: content.to_string(),
        upvotes,
        created_at: at,
    }
}

pub fn forum_posts() -> Vec<ForumPost> {
    vec![
        ForumPost {
            id: "post-1".to_string(),
            author_id: LEARNER_ID.to_string(),
            author_name: "Sahil Kumar".to_string(),
            author_avatar: avatar("Sahil"),
            title: "How to handle async/await in React?".to_string(),
            content: "I'm struggling with proper async/await patterns in React components. Any tips?"
                .to_string(),
            tags: tags(&["JavaScript", "React", "Async"]),
            upvotes: 24,
            downvotes: 1,
            replies: vec![reply(
                "reply-1",
                MENTOR_ID,
                "Priya Singh",
                "Keep the async function inside useEffect and guard against unmounted updates.",
                9,
                ts(2024, 1, 20, 12, 5),
            )],
            created_at: ts(2024, 1, 20, 10, 30),
            updated_at: ts(2024, 1, 20, 12, 5),
        },
        ForumPost {
            id: "post-2".to_string(),
            author_id: "user-2".to_string(),
            author_name: "Anita Desai".to_string(),
            author_avatar: avatar("Anita"),
            title: "Best practices for Python virtual environments".to_string(),
            content: "What's the recommended way to manage dependencies in Python projects?"
                .to_string(),
            tags: tags(&["Python", "DevOps"]),
            upvotes: 18,
            downvotes: 0,
            replies: Vec::new(),
            created_at: ts(2024, 1, 19, 14, 20),
            updated_at: ts(2024, 1, 19, 14, 20),
        },
        ForumPost {
            id: "post-3".to_string(),
            author_id: "user-3".to_string(),
            author_name: "Vikram Joshi".to_string(),
            author_avatar: avatar("Vikram"),
            title: "CSS Grid vs Flexbox - when to use what?".to_string(),
            content: "Can someone explain the use cases for Grid vs Flexbox with examples?"
                .to_string(),
            tags: tags(&["CSS", "Web Design"]),
            upvotes: 32,
            downvotes: 2,
            replies: vec![
                reply(
                    "reply-2",
                    "mentor-3",
                    "Anjali Sharma",
                    "Grid for two-dimensional layout, Flexbox for one axis.",
                    14,
                    ts(2024, 1, 18, 10, 0),
                ),
                reply(
                    "reply-3",
                    LEARNER_ID,
                    "Sahil Kumar",
                    "That rule of thumb finally made it click, thanks!",
                    3,
                    ts(2024, 1, 18, 11, 45),
                ),
            ],
            created_at: ts(2024, 1, 18, 9, 15),
            updated_at: ts(2024, 1, 18, 11, 45),
        },
    ]
}

pub fn blog_articles() -> Vec<BlogArticle> {
    vec![
        BlogArticle {
            id: "article-1".to_string(),
            author_id: MENTOR_ID.to_string(),
            author_name: "Priya Singh".to_string(),
            author_avatar: avatar("Priya"),
            title: "Understanding the JavaScript Event Loop".to_string(),
            content: "The event loop decides which callback runs next...".to_string(),
            excerpt: "A visual walkthrough of tasks, microtasks and rendering.".to_string(),
            thumbnail: "https://images.unsplash.com/photo-1555066931-4365d14bab8c".to_string(),
            tags: tags(&["JavaScript", "Internals"]),
            reactions: BTreeMap::from([("👍".to_string(), 42), ("🔥".to_string(), 17)]),
            comments: vec![Comment {
                id: "comment-1".to_string(),
                author_id: LEARNER_ID.to_string(),
                author_name: "Sahil Kumar".to_string(),
                author_avatar: avatar("Sahil"),
                content: "The microtask diagram is great.".to_string(),
                created_at: ts(2024, 1, 16, 19, 0),
            }],
            created_at: ts(2024, 1, 15, 8, 0),
            read_time: "6 min read".to_string(),
        },
        BlogArticle {
            id: "article-2".to_string(),
            author_id: "mentor-2".to_string(),
            author_name: "Rahul Verma".to_string(),
            author_avatar: avatar("Rahul"),
            title: "Pandas Tips for Faster Notebooks".to_string(),
            content: "Vectorise first, then reach for categorical dtypes...".to_string(),
            excerpt: "Five habits that keep data exploration snappy.".to_string(),
            thumbnail: "https://images.unsplash.com/photo-1551288049-bebda4e38f71".to_string(),
            tags: tags(&["Python", "Data Science"]),
            reactions: BTreeMap::from([("💡".to_string(), 23)]),
            comments: Vec::new(),
            created_at: ts(2024, 1, 12, 8, 0),
            read_time: "4 min read".to_string(),
        },
    ]
}

fn notification(
    id: &str,
    kind: NotificationKind,
    title: &str,
    message: &str,
    read: bool,
    link: Option<&str>,
    at: DateTime<Utc>,
) -> Notification {
    Notification {
        id: id.to_string(),
        user_id: LEARNER_ID.to_string(),
        kind,
        title: title.to_string(),
        message: message.to_string(),
        read,
        link: link.map(str::to_string),
        created_at: at,
    }
}

pub fn notifications() -> Vec<Notification> {
    vec![
        notification(
            "notif-1",
            NotificationKind::Course,
            "New lesson available",
            "Python for Data Science has a new module on Pandas.",
            false,
            Some("/courses/course-2"),
            ts(2024, 1, 21, 9, 0),
        ),
        notification(
            "notif-2",
            NotificationKind::Mentorship,
            "Session completed",
            "Rahul Verma marked your session as completed.",
            true,
            Some("/mentorship"),
            ts(2024, 1, 12, 18, 0),
        ),
        notification(
            "notif-3",
            NotificationKind::Forum,
            "New reply",
            "Priya Singh replied to your post.",
            false,
            Some("/community"),
            ts(2024, 1, 20, 12, 5),
        ),
        notification(
            "notif-4",
            NotificationKind::Badge,
            "Badge earned",
            "You earned the Week Warrior badge.",
            false,
            None,
            ts(2024, 1, 22, 20, 15),
        ),
    ]
}

/// Initial value of every seeded collection.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub courses: Vec<Course>,
    pub progress: Vec<CourseProgress>,
    pub mentors: Vec<Mentor>,
    pub requests: Vec<MentorshipRequest>,
    pub forum_posts: Vec<ForumPost>,
    pub blog_articles: Vec<BlogArticle>,
    pub notifications: Vec<Notification>,
}

impl Seed {
    pub fn demo() -> Self {
        Self {
            courses: courses(),
            progress: progress(),
            mentors: mentors(),
            requests: requests(),
            forum_posts: forum_posts(),
            blog_articles: blog_articles(),
            notifications: notifications(),
        }
    }

    /// Every collection starts empty.
    pub fn empty() -> Self {
        Self::default()
    }
}
