//! # Synthax Sphere
//!
//! The data layer of a learning platform: courses with per-learner progress, a
//! mentor directory with mentorship requests, a forum, a blog and a notification
//! inbox. There is no server. Every "endpoint" is a function that reads and writes
//! whole collections in a flat key-value store.
//!
//! This crate is UI-agnostic. The `synthax` command-line client is one thin
//! consumer of it.
//!
//! ## Architecture
//!
//! ```text
//! +-----------------------------------------------+
//! |  Client (CLI)                                 |
//! +-----------------------------------------------+
//! |  api::SynthaxApi     latency, dispatch        |
//! |  state::*            auth + theme containers  |
//! +-----------------------------------------------+
//! |  commands::*         one fn per endpoint      |
//! |  progress            per-viewer read model    |
//! +-----------------------------------------------+
//! |  store::DataStore    typed collections, seed  |
//! |  store::backend      raw text per key         |
//! +-----------------------------------------------+
//! ```
//!
//! - [`store`]: persistence. Absence and corruption are different answers, and seed
//!   data is written back the first time a collection is read.
//! - [`fixtures`]: the demo seed.
//! - [`progress`]: joins progress records onto courses for one viewer. Pure.
//! - [`commands`]: the behaviour of every endpoint, returning [`commands::Outcome`].
//! - [`state`]: observable auth and theme containers persisted through the store.
//! - [`api`]: the facade clients use, with optional simulated latency.
//! - [`config`], [`init`]: `synthax.toml` loading and data-directory setup.
//!
//! ## Failure Model
//!
//! Bad input, unknown ids and actions that need a signed-in user all come back as
//! `Ok(Outcome { success: false, message })`. Only a failing store produces
//! `Err(SynthaxError)`.
//!
//! ## Concurrency
//!
//! One writer. Store reads that may seed take `&mut self`, so concurrent use needs an
//! outer lock around the whole store.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod init;
pub mod model;
pub mod progress;
pub mod state;
pub mod store;
