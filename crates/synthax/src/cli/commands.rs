//! Entry point: parse, set up logging, open the data directory and dispatch.

use super::handlers::{self, AppState};
use super::setup::{Cli, Commands, CourseCommands};
use super::styles::{detect_terminal_theme, Palette};
use anyhow::{Context, Result};
use clap::Parser;
use synthaxapp::init::initialize;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Naked `synthax` lists the catalogue.
    let command = cli
        .command
        .unwrap_or(Commands::Courses(CourseCommands::List));

    // Reset must work even when the stored auth or theme can't be restored.
    if let Commands::Reset { yes } = command {
        return handlers::reset(cli.data_dir, yes, cli.json);
    }

    let ctx = initialize(cli.data_dir, detect_terminal_theme())
        .context("Failed to open the data directory")?;
    tracing::debug!(data_dir = %ctx.data_dir.display(), "context ready");

    let palette = Palette::for_theme(ctx.api.theme().theme());
    let mut state = AppState::new(ctx.api, palette, cli.json, ctx.data_dir);
    dispatch(&mut state, command)
}

/// Logs go to stderr so stdout stays clean for `--json`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dispatch(state: &mut AppState, command: Commands) -> Result<()> {
    match command {
        Commands::Login {
            email,
            password,
            remember,
        } => handlers::login(state, &email, &password, remember),
        Commands::Signup {
            name,
            email,
            password,
        } => handlers::signup(state, &name, &email, &password),
        Commands::VerifyOtp { otp } => handlers::verify_otp(state, &otp),
        Commands::SendOtp { email } => handlers::send_otp(state, &email),
        Commands::Google => handlers::google(state),
        Commands::Logout => handlers::logout(state),
        Commands::Whoami => handlers::whoami(state),
        Commands::Courses(cmd) => handlers::courses(state, cmd),
        Commands::Mentors(cmd) => handlers::mentors(state, cmd),
        Commands::Forum(cmd) => handlers::forum(state, cmd),
        Commands::Blog(cmd) => handlers::blog(state, cmd),
        Commands::Notifications(cmd) => handlers::notifications(state, cmd),
        Commands::Theme(cmd) => handlers::theme(state, cmd),
        Commands::Playground(cmd) => handlers::playground(state, cmd),
        Commands::Routes => handlers::routes(state),
        Commands::Reset { yes } => handlers::reset(Some(state.data_dir.clone()), yes, state.json),
    }
}
