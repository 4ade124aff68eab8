//! # CLI Behavior
//!
//! This is **one possible UI client** for Synthax, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes and output
//! formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ### Naked Execution (`synthax`)
//!
//! Running `synthax` with no arguments defaults to `synthax courses list`.
//!
//! ### Outcomes and Exit Codes
//!
//! Library operations return an `Outcome` (success flag, optional data, optional
//! message). A successful outcome prints its data or message and exits 0. A failed
//! one prints its message to stderr and exits 1. Store failures (unreadable data
//! directory, corrupt JSON) also exit 1, with the underlying cause.
//!
//! With `--json` the outcome (or the plain data for read-only commands) is printed
//! as JSON on stdout before any failure is reported.
//!
//! ### Playground Input
//!
//! `synthax playground save <lesson>` takes the code from `--code`, or reads it from
//! stdin when the flag is absent:
//!
//! ```text
//! cat solution.js | synthax playground save l3
//! ```
//!
//! ## Module Structure
//!
//! - `commands`: Entry point, logging and context wiring, dispatch
//! - `handlers`: One function per command; calls the API and prints
//! - `render`: Text layouts for every record kind
//! - `setup`: Argument parsing via clap
//! - `styles`: Light and dark palettes

mod commands;
mod handlers;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
