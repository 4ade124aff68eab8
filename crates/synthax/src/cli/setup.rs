use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use synthaxapp::model::{NotificationKind, RequestStatus, Vote};
use synthaxapp::state::theme::Theme;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "synthax",
    bin_name = "synthax",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Courses, mentors and community from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to the OS data dir, or $SYNTHAX_DATA)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with email and password
    #[command(display_order = 1)]
    Login {
        email: String,
        password: String,
        /// Keep the session flagged as remembered
        #[arg(long)]
        remember: bool,
    },

    /// Create a learner account (needs a one-time code afterwards)
    #[command(display_order = 2)]
    Signup {
        name: String,
        email: String,
        password: String,
    },

    /// Verify the one-time code for a pending signup
    #[command(name = "verify-otp", display_order = 3)]
    VerifyOtp { otp: String },

    /// Send a one-time code to an email address
    #[command(name = "send-otp", display_order = 4)]
    SendOtp { email: String },

    /// Sign in with the demo Google account
    #[command(display_order = 5)]
    Google,

    /// Sign out
    #[command(display_order = 6)]
    Logout,

    /// Show the signed-in user
    #[command(display_order = 7)]
    Whoami,

    /// Course catalogue and progress
    #[command(subcommand, display_order = 10)]
    Courses(CourseCommands),

    /// Mentor directory and mentorship requests
    #[command(subcommand, display_order = 11)]
    Mentors(MentorCommands),

    /// Community forum
    #[command(subcommand, display_order = 12)]
    Forum(ForumCommands),

    /// Blog articles
    #[command(subcommand, display_order = 13)]
    Blog(BlogCommands),

    /// Your notifications
    #[command(subcommand, alias = "inbox", display_order = 14)]
    Notifications(NotificationCommands),

    /// Light or dark theme
    #[command(subcommand, display_order = 20)]
    Theme(ThemeCommands),

    /// Saved code per lesson
    #[command(subcommand, display_order = 21)]
    Playground(PlaygroundCommands),

    /// List every endpoint with its REST route and nominal delay
    #[command(display_order = 30)]
    Routes,

    /// Delete all stored data; collections reseed on next use
    #[command(display_order = 31)]
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    /// List courses
    #[command(alias = "ls")]
    List,
    /// Show a course with its lessons
    Show { course_id: String },
    /// Mark a lesson complete
    Complete { course_id: String, lesson_id: String },
    /// Show the next lesson to take
    Next { course_id: String },
    /// Show your progress records
    Progress,
    /// Search title, description and tags
    Search {
        #[arg(trailing_var_arg = true)]
        query: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MentorCommands {
    /// List mentors
    #[command(alias = "ls")]
    List,
    /// Show a mentor
    Show { mentor_id: String },
    /// Search by expertise
    Search { expertise: String },
    /// Ask a mentor for a session
    Request(RequestArgs),
    /// Requests addressed to you (or sent by you with --sent)
    Requests {
        #[arg(long)]
        sent: bool,
    },
    /// Accept, reject or complete a request
    Respond {
        request_id: String,
        /// pending, accepted, rejected or completed
        status: RequestStatus,
        /// Session time, RFC 3339 (e.g. 2024-02-01T18:00:00Z)
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
}

#[derive(Args, Debug)]
pub struct RequestArgs {
    pub mentor_id: String,
    #[arg(long, short)]
    pub topic: String,
    #[arg(long, short)]
    pub message: String,
}

#[derive(Subcommand, Debug)]
pub enum ForumCommands {
    /// List posts, newest first
    #[command(alias = "ls")]
    List,
    /// Show a post with its replies
    Show { post_id: String },
    /// Start a new thread
    Post {
        title: String,
        #[arg(long, short)]
        content: String,
        /// Tag, repeatable
        #[arg(long = "tag", short = 't')]
        tags: Vec<String>,
    },
    /// Reply to a post
    Reply { post_id: String, content: String },
    /// Vote a post up or down
    Vote { post_id: String, direction: Vote },
    /// Search title, content and tags
    Search {
        #[arg(trailing_var_arg = true)]
        query: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum BlogCommands {
    /// List articles
    #[command(alias = "ls")]
    List,
    /// Show an article with its comments
    Show { article_id: String },
    /// React to an article
    React { article_id: String, reaction: String },
    /// Comment on an article
    Comment { article_id: String, content: String },
}

#[derive(Subcommand, Debug)]
pub enum NotificationCommands {
    /// List your notifications, newest first
    #[command(alias = "ls")]
    List,
    /// Count unread notifications
    Unread,
    /// Mark one notification read
    Read { notification_id: String },
    /// Mark all your notifications read
    #[command(name = "read-all")]
    ReadAll,
    /// Delete a notification
    Delete { notification_id: String },
    /// Push a notification to yourself
    Create {
        kind: NotificationKind,
        title: String,
        message: String,
        #[arg(long)]
        link: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Show the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set the theme
    Set { theme: Theme },
}

#[derive(Subcommand, Debug)]
pub enum PlaygroundCommands {
    /// Save code for a lesson (reads stdin when --code is absent)
    Save {
        lesson_id: String,
        #[arg(long, short, default_value = "javascript")]
        language: String,
        #[arg(long, short)]
        code: Option<String>,
    },
    /// Print the code saved for a lesson
    Load { lesson_id: String },
    /// Forget the code saved for a lesson
    Clear { lesson_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_nested_command_with_globals() {
        let cli = Cli::try_parse_from([
            "synthax",
            "forum",
            "vote",
            "post-1",
            "up",
            "--json",
            "--data-dir",
            "/tmp/x",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Some(Commands::Forum(ForumCommands::Vote { post_id, direction })) => {
                assert_eq!(post_id, "post-1");
                assert_eq!(direction, Vote::Up);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_respond_parses_status_and_time() {
        let cli = Cli::try_parse_from([
            "synthax",
            "mentors",
            "respond",
            "req-1",
            "Accepted",
            "--at",
            "2024-02-01T18:00:00Z",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Mentors(MentorCommands::Respond { status, at, .. })) => {
                assert_eq!(status, RequestStatus::Accepted);
                assert!(at.is_some());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["synthax", "mentors", "respond", "req-1", "maybe"]).is_err());
    }

    #[test]
    fn test_naked_invocation() {
        let cli = Cli::try_parse_from(["synthax"]).unwrap();
        assert!(cli.command.is_none());
    }
}
