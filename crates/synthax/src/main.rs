//! # Synthax CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/synthaxapp/`: UI-agnostic library (store, commands, state, API facade)
//! - `crates/synthax/`: this CLI, a presentation stand-in on top of the library
//!
//! ## Layering
//!
//! ```text
//! +-------------------------------------------------------------+
//! |  CLI Layer (crates/synthax/src/cli/)                        |
//! |  - clap argument parsing (setup.rs)                         |
//! |  - context wiring + logging (commands.rs)                   |
//! |  - per-command handlers (handlers.rs)                       |
//! |  - terminal rendering (render.rs, styles.rs)                |
//! +-------------------------------------------------------------+
//!                              |
//!                              v
//! +-------------------------------------------------------------+
//! |  API Layer (crates/synthaxapp/src/api.rs)                   |
//! |  - latency simulation, dispatch, state containers           |
//! +-------------------------------------------------------------+
//!                              |
//!                              v
//! +-------------------------------------------------------------+
//! |  Command Layer (crates/synthaxapp/src/commands/*)           |
//! |  - endpoint behaviour over the key-value store              |
//! +-------------------------------------------------------------+
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI layer owns argument
//! parsing, context initialization, logging setup, rendering and exit codes.
//!
//! ## Testing Approach
//!
//! - Command and API behaviour is unit tested inside `synthaxapp`.
//! - Rendering is tested in `render.rs` against fixture records.
//! - `tests/` drives the built binary end to end against a temporary data
//!   directory.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
