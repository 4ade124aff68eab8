//! # Rendering Module
//!
//! Turns library records into terminal text. Every `render_*` function returns a
//! `String` so layouts can be tested without capturing stdout; the handlers print
//! the result.
//!
//! ## Layout
//!
//! Listings are one line per record:
//! - an id column (`COL_ID` wide) so records can be addressed in follow-up commands
//! - a title truncated to fit `LINE_WIDTH`
//! - a right-aligned trailing column (progress, votes, relative time)
//!
//! Widths are measured with `unicode-width`, so emoji reactions and non-ASCII names
//! line up.

use super::styles::Palette;
use chrono::{DateTime, Utc};
use synthaxapp::api::Endpoint;
use synthaxapp::commands::Outcome;
use synthaxapp::model::{
    BlogArticle, CodeSnapshot, Course, CourseProgress, ForumPost, Lesson, Mentor,
    MentorshipRequest, Notification, RequestStatus, User,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const COL_ID: usize = 12;
pub const TIME_WIDTH: usize = 14;
pub const UNREAD_MARKER: &str = "●";
pub const DONE_MARKER: &str = "✔";
pub const TODO_MARKER: &str = "○";

/// The message line for an outcome, styled by success.
pub fn render_message<T>(outcome: &Outcome<T>, palette: &Palette) -> String {
    match outcome.message() {
        Some(message) if outcome.success => format!("{}\n", palette.success.apply_to(message)),
        Some(message) => format!("{}\n", palette.error.apply_to(message)),
        None => String::new(),
    }
}

pub fn render_user(user: &User, palette: &Palette) -> String {
    let mut out = format!(
        "{} {}\n",
        palette.title.apply_to(&user.name),
        palette.muted.apply_to(format!("<{}>", user.email))
    );
    out.push_str(&format!(
        "{} {}  {} {}\n",
        palette.muted.apply_to("role"),
        palette.accent.apply_to(user.role),
        palette.muted.apply_to("streak"),
        user.streak
    ));
    if !user.bio.is_empty() {
        out.push_str(&format!("{}\n", user.bio));
    }
    for badge in &user.badges {
        out.push_str(&format!("  {} {}\n", badge.icon, badge.name));
    }
    out
}

pub fn render_courses(courses: &[Course], palette: &Palette) -> String {
    if courses.is_empty() {
        return "No courses found.\n".to_string();
    }
    courses
        .iter()
        .map(|course| {
            let trailing = match course.progress {
                Some(pct) => format!("{:>3}%", pct),
                None => format!("{:>4}", ""),
            };
            let meta = format!("{} · ★{:.1}", course.level, course.rating);
            row(
                &course.id,
                &course.title,
                &format!("{}  {}", meta, trailing),
                palette,
                &palette.regular,
            )
        })
        .collect()
}

pub fn render_course(course: &Course, palette: &Palette) -> String {
    let mut out = format!("{}\n", palette.title.apply_to(&course.title));
    out.push_str(&format!(
        "{}\n",
        palette.muted.apply_to(format!(
            "{} · {} · {} · {} students",
            course.instructor, course.level, course.duration, course.total_students
        ))
    ));
    out.push_str(&format!("{}\n", course.description));
    if let Some(pct) = course.progress {
        out.push_str(&format!("{}\n", progress_bar(pct, palette)));
    }
    for module in &course.modules {
        out.push_str(&format!("\n{}\n", palette.accent.apply_to(&module.title)));
        for lesson in &module.lessons {
            out.push_str(&render_lesson_line(lesson, palette));
        }
    }
    out
}

pub fn render_lesson_line(lesson: &Lesson, palette: &Palette) -> String {
    let marker = match lesson.completed {
        Some(true) => palette.success.apply_to(DONE_MARKER).to_string(),
        _ => palette.muted.apply_to(TODO_MARKER).to_string(),
    };
    format!(
        "  {} {:<8} {} {}\n",
        marker,
        lesson.id,
        lesson.title,
        palette
            .muted
            .apply_to(format!("({}, {})", lesson.lesson_type, lesson.duration))
    )
}

pub fn progress_bar(pct: u32, palette: &Palette) -> String {
    const WIDTH: usize = 20;
    let filled = (pct.min(100) as usize * WIDTH) / 100;
    format!(
        "[{}{}] {}%",
        palette.success.apply_to("#".repeat(filled)),
        palette.muted.apply_to("-".repeat(WIDTH - filled)),
        pct
    )
}

pub fn render_progress(records: &[CourseProgress], palette: &Palette) -> String {
    if records.is_empty() {
        return "No progress yet.\n".to_string();
    }
    records
        .iter()
        .map(|p| {
            format!(
                "{:<width$} {}  {}\n",
                p.course_id,
                progress_bar(p.progress, palette),
                palette
                    .time
                    .apply_to(format_time_ago(p.last_accessed_at).trim_start()),
                width = COL_ID
            )
        })
        .collect()
}

pub fn render_mentors(mentors: &[Mentor], palette: &Palette) -> String {
    if mentors.is_empty() {
        return "No mentors found.\n".to_string();
    }
    mentors
        .iter()
        .map(|m| {
            row(
                &m.id,
                &format!("{}  {}", m.name, m.expertise.join(", ")),
                &format!("★{:.1}", m.rating),
                palette,
                &palette.regular,
            )
        })
        .collect()
}

pub fn render_mentor(mentor: &Mentor, palette: &Palette) -> String {
    let mut out = format!(
        "{} {}\n",
        palette.title.apply_to(&mentor.name),
        palette.muted.apply_to(format!("<{}>", mentor.email))
    );
    out.push_str(&format!("{}\n", mentor.bio));
    out.push_str(&format!(
        "{} {}\n",
        palette.muted.apply_to("expertise"),
        render_tags(&mentor.expertise, palette)
    ));
    out.push_str(&format!(
        "{} ★{:.1} over {} sessions\n",
        palette.muted.apply_to("rating"),
        mentor.rating,
        mentor.total_sessions
    ));
    for slot in &mentor.availability {
        out.push_str(&format!("  {}\n", slot));
    }
    out
}

pub fn render_requests(requests: &[MentorshipRequest], palette: &Palette) -> String {
    if requests.is_empty() {
        return "No mentorship requests.\n".to_string();
    }
    requests
        .iter()
        .map(|r| {
            let when = match r.scheduled_at {
                Some(at) => at.format("%Y-%m-%d %H:%M").to_string(),
                None => format_time_ago(r.created_at).trim_start().to_string(),
            };
            format!(
                "{:<width$} {} {} {}\n{:<width$} {}\n",
                r.id,
                status_style(r.status, palette).apply_to(format!("[{}]", r.status)),
                palette.title.apply_to(&r.topic),
                palette.time.apply_to(when),
                "",
                palette.muted.apply_to(format!("{}: {}", r.mentee_name, r.message)),
                width = COL_ID
            )
        })
        .collect()
}

fn status_style(status: RequestStatus, palette: &Palette) -> &console::Style {
    match status {
        RequestStatus::Pending => &palette.warning,
        RequestStatus::Rejected => &palette.error,
        RequestStatus::Accepted | RequestStatus::Completed => &palette.success,
    }
}

pub fn render_posts(posts: &[ForumPost], palette: &Palette) -> String {
    if posts.is_empty() {
        return "No posts found.\n".to_string();
    }
    posts
        .iter()
        .map(|p| {
            let score = format!(
                "▲{} ▼{} ✉{}",
                p.upvotes,
                p.downvotes,
                p.replies.len()
            );
            row(&p.id, &p.title, &score, palette, &palette.regular)
        })
        .collect()
}

pub fn render_post(post: &ForumPost, palette: &Palette) -> String {
    let mut out = format!("{}\n", palette.title.apply_to(&post.title));
    out.push_str(&format!(
        "{} {}  ▲{} ▼{}\n",
        palette.muted.apply_to(&post.author_name),
        palette.time.apply_to(format_time_ago(post.created_at).trim_start()),
        post.upvotes,
        post.downvotes
    ));
    if !post.tags.is_empty() {
        out.push_str(&format!("{}\n", render_tags(&post.tags, palette)));
    }
    out.push_str(&format!("\n{}\n", post.content));
    for reply in &post.replies {
        out.push_str(&format!(
            "\n  {} {}\n  {}\n",
            palette.accent.apply_to(&reply.author_name),
            palette.time.apply_to(format_time_ago(reply.created_at).trim_start()),
            reply.content
        ));
    }
    out
}

pub fn render_articles(articles: &[BlogArticle], palette: &Palette) -> String {
    if articles.is_empty() {
        return "No articles found.\n".to_string();
    }
    articles
        .iter()
        .map(|a| row(&a.id, &a.title, &a.read_time, palette, &palette.regular))
        .collect()
}

pub fn render_article(article: &BlogArticle, palette: &Palette) -> String {
    let mut out = format!("{}\n", palette.title.apply_to(&article.title));
    out.push_str(&format!(
        "{} · {} · {}\n",
        palette.muted.apply_to(&article.author_name),
        palette.time.apply_to(format_time_ago(article.created_at).trim_start()),
        article.read_time
    ));
    out.push_str(&format!("{}\n\n{}\n", render_tags(&article.tags, palette), article.content));
    if !article.reactions.is_empty() {
        let reactions: Vec<String> = article
            .reactions
            .iter()
            .map(|(name, count)| format!("{} {}", name, count))
            .collect();
        out.push_str(&format!("\n{}\n", reactions.join("  ")));
    }
    for comment in &article.comments {
        out.push_str(&format!(
            "\n  {} {}\n  {}\n",
            palette.accent.apply_to(&comment.author_name),
            palette.time.apply_to(format_time_ago(comment.created_at).trim_start()),
            comment.content
        ));
    }
    out
}

pub fn render_notifications(notifications: &[Notification], palette: &Palette) -> String {
    if notifications.is_empty() {
        return "No notifications.\n".to_string();
    }
    notifications
        .iter()
        .map(|n| {
            let marker = if n.read { " " } else { UNREAD_MARKER };
            let style = if n.read { &palette.muted } else { &palette.regular };
            format!(
                "{} {}",
                palette.accent.apply_to(marker),
                row(
                    &n.id,
                    &format!("{}: {}", n.title, n.message),
                    &format_time_ago(n.created_at),
                    palette,
                    style
                )
            )
        })
        .collect()
}

pub fn render_snapshot(snapshot: &CodeSnapshot, palette: &Palette) -> String {
    format!(
        "{}\n{}\n",
        palette.muted.apply_to(format!(
            "{} · saved {}",
            snapshot.language,
            format_time_ago(snapshot.saved_at).trim_start()
        )),
        snapshot.code
    )
}

pub fn render_routes(endpoints: &[Endpoint], palette: &Palette) -> String {
    let width = endpoints
        .iter()
        .map(|e| e.route().width())
        .max()
        .unwrap_or(0);
    endpoints
        .iter()
        .map(|e| {
            format!(
                "{:<width$}  {}\n",
                e.route(),
                palette
                    .muted
                    .apply_to(format!("{:>5}ms", e.delay().as_millis())),
                width = width
            )
        })
        .collect()
}

fn render_tags(tags: &[String], palette: &Palette) -> String {
    tags.iter()
        .map(|t| palette.tag.apply_to(format!("#{}", t)).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One listing line: id, title truncated to fit, right-aligned trailing column.
fn row(
    id: &str,
    title: &str,
    trailing: &str,
    palette: &Palette,
    title_style: &console::Style,
) -> String {
    let trailing_width = trailing.width();
    let title_width = LINE_WIDTH.saturating_sub(COL_ID + 2 + trailing_width);
    let title = truncate_to_width(title, title_width);
    let padding = title_width.saturating_sub(title.width());
    format!(
        "{} {}{} {}\n",
        palette.accent.apply_to(pad_to_width(id, COL_ID)),
        title_style.apply_to(&title),
        " ".repeat(padding),
        palette.muted.apply_to(trailing)
    )
}

fn pad_to_width(s: &str, width: usize) -> String {
    let used = s.width();
    format!("{}{}", s, " ".repeat(width.saturating_sub(used)))
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

pub fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
