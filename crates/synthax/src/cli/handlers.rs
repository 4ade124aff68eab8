//! Command handlers for the Synthax CLI.
//!
//! Each handler calls one API method, prints the result and turns a failed
//! [`Outcome`] into an error so the process exits non-zero. Rendering lives in
//! [`super::render`]; handlers only pick the layout.

use super::render::{self, render_message};
use super::setup::{
    BlogCommands, CourseCommands, ForumCommands, MentorCommands, NotificationCommands,
    PlaygroundCommands, ThemeCommands,
};
use super::styles::Palette;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::io::{IsTerminal, Read, Write};
use std::path::PathBuf;
use synthaxapp::api::{Endpoint, SynthaxApi};
use synthaxapp::commands::Outcome;
use synthaxapp::init::clear_data_dir;
use synthaxapp::state::theme::Theme;
use synthaxapp::store::fs::FileStore;

/// Everything a handler needs: the API, the active palette and the output mode.
pub struct AppState {
    pub api: SynthaxApi<FileStore>,
    pub palette: Palette,
    pub json: bool,
    pub data_dir: PathBuf,
}

impl AppState {
    pub fn new(
        api: SynthaxApi<FileStore>,
        palette: Palette,
        json: bool,
        data_dir: PathBuf,
    ) -> Self {
        Self {
            api,
            palette,
            json,
            data_dir,
        }
    }

    /// Print read-only data: JSON in `--json` mode, the layout otherwise.
    fn show<T, F>(&self, data: &T, layout: F) -> Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T, &Palette) -> String,
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(data)?);
        } else {
            print!("{}", layout(data, &self.palette));
        }
        Ok(())
    }

    /// Print a lookup result, failing when the record is missing.
    fn show_found<T, F>(&self, found: Option<T>, what: &str, layout: F) -> Result<()>
    where
        T: Serialize,
        F: FnOnce(&T, &Palette) -> String,
    {
        match found {
            Some(record) => self.show(&record, layout),
            None => {
                if self.json {
                    println!("null");
                }
                bail!("{} not found", what)
            }
        }
    }

    /// Print an outcome and turn failure into an error.
    ///
    /// On success the message is printed, followed by `layout` applied to the data
    /// when there is one.
    fn finish<T, F>(&self, outcome: Outcome<T>, layout: F) -> Result<()>
    where
        T: Serialize,
        F: FnOnce(&T, &Palette) -> String,
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else if outcome.success {
            print!("{}", render_message(&outcome, &self.palette));
            if let Some(data) = &outcome.data {
                print!("{}", layout(data, &self.palette));
            }
        }
        if !outcome.success {
            bail!("{}", outcome.message().unwrap_or("Request failed"));
        }
        Ok(())
    }
}

fn nothing<T>(_: &T, _: &Palette) -> String {
    String::new()
}

// --- Auth ---

pub fn login(state: &mut AppState, email: &str, password: &str, remember: bool) -> Result<()> {
    let outcome = state.api.login(email, password, remember)?;
    state.finish(outcome, render::render_user)
}

pub fn signup(state: &mut AppState, name: &str, email: &str, password: &str) -> Result<()> {
    let outcome = state.api.signup(name, email, password)?;
    let pending = outcome.success;
    state.finish(outcome, render::render_user)?;
    if pending && !state.json {
        println!(
            "{}",
            state
                .palette
                .muted
                .apply_to("Run `synthax verify-otp <code>` to finish signing up.")
        );
    }
    Ok(())
}

pub fn send_otp(state: &mut AppState, email: &str) -> Result<()> {
    let outcome = state.api.send_otp(email);
    state.finish(outcome, nothing)
}

pub fn verify_otp(state: &mut AppState, otp: &str) -> Result<()> {
    let outcome = state.api.verify_otp(otp)?;
    state.finish(outcome, nothing)
}

pub fn google(state: &mut AppState) -> Result<()> {
    let outcome = state.api.login_with_google()?;
    state.finish(outcome, render::render_user)
}

pub fn logout(state: &mut AppState) -> Result<()> {
    let outcome = state.api.logout()?;
    state.finish(outcome, nothing)
}

pub fn whoami(state: &mut AppState) -> Result<()> {
    let user = state.api.current_user()?;
    match &user {
        Some(user) => state.show(user, render::render_user),
        None if state.json => state.show(&user, nothing),
        None => {
            println!("{}", state.palette.muted.apply_to("Not signed in."));
            Ok(())
        }
    }
}

// --- Courses ---

pub fn courses(state: &mut AppState, cmd: CourseCommands) -> Result<()> {
    match cmd {
        CourseCommands::List => {
            let courses = state.api.courses()?;
            state.show(courses.as_slice(), render::render_courses)
        }
        CourseCommands::Show { course_id } => {
            let course = state.api.course(&course_id)?;
            state.show_found(course, "Course", render::render_course)
        }
        CourseCommands::Complete {
            course_id,
            lesson_id,
        } => {
            let outcome = state.api.mark_lesson_complete(&course_id, &lesson_id)?;
            state.finish(outcome, |pct, palette| {
                format!("{}\n", render::progress_bar(*pct, palette))
            })
        }
        CourseCommands::Next { course_id } => {
            let outcome = state.api.next_lesson(&course_id)?;
            state.finish(outcome, |next, palette| match next {
                Some(lesson) => render::render_lesson_line(lesson, palette),
                None => format!("{}\n", palette.success.apply_to("Course complete.")),
            })
        }
        CourseCommands::Progress => {
            let records = state.api.user_progress()?;
            state.show(records.as_slice(), render::render_progress)
        }
        CourseCommands::Search { query } => {
            let courses = state.api.search_courses(&query.join(" "))?;
            state.show(courses.as_slice(), render::render_courses)
        }
    }
}

// --- Mentors ---

pub fn mentors(state: &mut AppState, cmd: MentorCommands) -> Result<()> {
    match cmd {
        MentorCommands::List => {
            let mentors = state.api.mentors()?;
            state.show(mentors.as_slice(), render::render_mentors)
        }
        MentorCommands::Show { mentor_id } => {
            let mentor = state.api.mentor(&mentor_id)?;
            state.show_found(mentor, "Mentor", render::render_mentor)
        }
        MentorCommands::Search { expertise } => {
            let mentors = state.api.search_mentors(&expertise)?;
            state.show(mentors.as_slice(), render::render_mentors)
        }
        MentorCommands::Request(args) => {
            let outcome = state
                .api
                .create_request(&args.mentor_id, &args.topic, &args.message)?;
            state.finish(outcome, |r, palette| {
                render::render_requests(std::slice::from_ref(r), palette)
            })
        }
        MentorCommands::Requests { sent } => {
            let requests = if sent {
                state.api.sent_requests()?
            } else {
                state.api.mentorship_requests()?
            };
            state.show(requests.as_slice(), render::render_requests)
        }
        MentorCommands::Respond {
            request_id,
            status,
            at,
        } => {
            let outcome = state.api.update_request(&request_id, status, at)?;
            state.finish(outcome, |r, palette| {
                render::render_requests(std::slice::from_ref(r), palette)
            })
        }
    }
}

// --- Forum ---

pub fn forum(state: &mut AppState, cmd: ForumCommands) -> Result<()> {
    match cmd {
        ForumCommands::List => {
            let posts = state.api.forum_posts()?;
            state.show(posts.as_slice(), render::render_posts)
        }
        ForumCommands::Show { post_id } => {
            let post = state.api.forum_post(&post_id)?;
            state.show_found(post, "Post", render::render_post)
        }
        ForumCommands::Post {
            title,
            content,
            tags,
        } => {
            let outcome = state.api.create_post(&title, &content, tags)?;
            state.finish(outcome, |p, palette| {
                render::render_posts(std::slice::from_ref(p), palette)
            })
        }
        ForumCommands::Reply { post_id, content } => {
            let outcome = state.api.add_reply(&post_id, &content)?;
            state.finish(outcome, nothing)
        }
        ForumCommands::Vote { post_id, direction } => {
            let outcome = state.api.vote(&post_id, direction)?;
            state.finish(outcome, |p, palette| {
                render::render_posts(std::slice::from_ref(p), palette)
            })
        }
        ForumCommands::Search { query } => {
            let posts = state.api.search_posts(&query.join(" "))?;
            state.show(posts.as_slice(), render::render_posts)
        }
    }
}

// --- Blog ---

pub fn blog(state: &mut AppState, cmd: BlogCommands) -> Result<()> {
    match cmd {
        BlogCommands::List => {
            let articles = state.api.blog_articles()?;
            state.show(articles.as_slice(), render::render_articles)
        }
        BlogCommands::Show { article_id } => {
            let article = state.api.blog_article(&article_id)?;
            state.show_found(article, "Article", render::render_article)
        }
        BlogCommands::React {
            article_id,
            reaction,
        } => {
            let outcome = state.api.react(&article_id, &reaction)?;
            state.finish(outcome, |count, _| format!("{} {}\n", reaction, count))
        }
        BlogCommands::Comment {
            article_id,
            content,
        } => {
            let outcome = state.api.add_comment(&article_id, &content)?;
            state.finish(outcome, nothing)
        }
    }
}

// --- Notifications ---

pub fn notifications(state: &mut AppState, cmd: NotificationCommands) -> Result<()> {
    match cmd {
        NotificationCommands::List => {
            let notifications = state.api.notifications()?;
            state.show(notifications.as_slice(), render::render_notifications)
        }
        NotificationCommands::Unread => {
            let count = state.api.unread_count()?;
            state.show(&count, |n, _| format!("{}\n", n))
        }
        NotificationCommands::Read { notification_id } => {
            let outcome = state.api.mark_read(&notification_id)?;
            state.finish(outcome, nothing)
        }
        NotificationCommands::ReadAll => {
            let outcome = state.api.mark_all_read()?;
            state.finish(outcome, nothing)
        }
        NotificationCommands::Delete { notification_id } => {
            let outcome = state.api.delete_notification(&notification_id)?;
            state.finish(outcome, nothing)
        }
        NotificationCommands::Create {
            kind,
            title,
            message,
            link,
        } => {
            let outcome =
                state
                    .api
                    .create_notification(kind, &title, &message, link.as_deref())?;
            state.finish(outcome, |n, palette| {
                render::render_notifications(std::slice::from_ref(n), palette)
            })
        }
    }
}

// --- Theme ---

pub fn theme(state: &mut AppState, cmd: ThemeCommands) -> Result<()> {
    let theme = match cmd {
        ThemeCommands::Show => state.api.theme().theme(),
        ThemeCommands::Toggle => state.api.toggle_theme()?,
        ThemeCommands::Set { theme } => {
            state.api.set_theme(theme)?;
            theme
        }
    };
    // Later output in this run follows the new theme.
    state.palette = Palette::for_theme(theme);
    state.show(&theme, |t, palette| {
        format!("{}\n", palette.accent.apply_to(t))
    })
}

// --- Playground ---

pub fn playground(state: &mut AppState, cmd: PlaygroundCommands) -> Result<()> {
    match cmd {
        PlaygroundCommands::Save {
            lesson_id,
            language,
            code,
        } => {
            let code = match code {
                Some(code) => code,
                None => read_stdin()?,
            };
            let outcome = state.api.save_snapshot(&lesson_id, &language, &code)?;
            state.finish(outcome, nothing)
        }
        PlaygroundCommands::Load { lesson_id } => {
            let snapshot = state.api.load_snapshot(&lesson_id)?;
            state.show_found(snapshot, "Saved code", render::render_snapshot)
        }
        PlaygroundCommands::Clear { lesson_id } => {
            let outcome = state.api.clear_snapshot(&lesson_id)?;
            state.finish(outcome, nothing)
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("No code given: pass --code or pipe it on stdin");
    }
    let mut code = String::new();
    stdin
        .read_to_string(&mut code)
        .context("Failed to read code from stdin")?;
    Ok(code)
}

// --- Maintenance ---

pub fn routes(state: &mut AppState) -> Result<()> {
    if state.json {
        let table: Vec<_> = Endpoint::ALL
            .iter()
            .map(|e| {
                serde_json::json!({
                    "endpoint": format!("{:?}", e),
                    "route": e.route(),
                    "delayMs": e.delay().as_millis() as u64,
                })
            })
            .collect();
        return state.show(&table, nothing);
    }
    print!("{}", render::render_routes(Endpoint::ALL, &state.palette));
    Ok(())
}

/// Runs on a bare store, before any saved state is restored.
pub fn reset(data_dir: Option<PathBuf>, yes: bool, json: bool) -> Result<()> {
    if !yes && !confirm("Delete all stored Synthax data?")? {
        bail!("Reset cancelled");
    }
    clear_data_dir(data_dir).context("Failed to clear the data directory")?;

    let outcome = Outcome::<()>::done("All data cleared");
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        let palette = Palette::for_theme(Theme::default());
        print!("{}", render_message(&outcome, &palette));
    }
    Ok(())
}

/// Ask on the terminal. Anything but `y`/`yes` is a no, as is a non-interactive stdin.
fn confirm(question: &str) -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        return Ok(false);
    }
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
