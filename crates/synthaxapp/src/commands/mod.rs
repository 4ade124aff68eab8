//! # Command Layer
//!
//! One function per mock endpoint, grouped by endpoint family. This is where the
//! behaviour of the platform lives.
//!
//! ## The Endpoint Shape
//!
//! Every command takes the store plus plain arguments and returns
//! `Result<Outcome<T>>`:
//!
//! - `Ok(Outcome { success: true, data, message })` on success.
//! - `Ok(Outcome { success: false, message, .. })` for validation failures, unknown
//!   ids and mutations attempted while signed out. These are ordinary answers,
//!   never errors.
//! - `Err(_)` only when the store itself fails (I/O, a corrupt collection).
//!
//! ## Read-Modify-Write
//!
//! Mutating commands read the whole collection, find the record by id with a linear
//! scan, mutate it, and write the whole collection back. Commands never hold a
//! collection across calls.
//!
//! ## What Commands Do NOT Do
//!
//! - **Latency**: simulated delays belong to the API facade.
//! - **Presentation**: commands return records, never strings meant for a terminal
//!   beyond the fixed `message`.
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore` (see `store::memory::fixtures`) and assert on the
//! returned `Outcome` and on the collection left behind.
//!
//! ## Command Modules
//!
//! - [`auth`]: login, signup, OTP, logout, current user
//! - [`courses`]: catalogue, per-viewer detail, lesson completion, search
//! - [`mentors`]: mentor directory and mentorship requests
//! - [`forum`]: posts, replies, votes
//! - [`blog`]: articles, reactions, comments
//! - [`notifications`]: per-user inbox
//! - [`playground`]: per-lesson code snapshots
//! - [`helpers`]: shared lookups and matching

use serde::Serialize;

pub mod auth;
pub mod blog;
pub mod courses;
pub mod forum;
pub mod helpers;
pub mod mentors;
pub mod notifications;
pub mod playground;

/// The plain result object every endpoint returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Outcome<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    /// Success that carries only a message.
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        Outcome {
            success: self.success,
            data: self.data.map(f),
            message: self.message,
        }
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_serializes_without_data() {
        let outcome: Outcome<u32> = Outcome::fail("Post not found");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "message": "Post not found"})
        );
    }

    #[test]
    fn test_map_keeps_flags() {
        let outcome = Outcome::ok_with(25u32, "Lesson completed").map(|p| p * 2);
        assert!(outcome.is_success());
        assert_eq!(outcome.data, Some(50));
        assert_eq!(outcome.message(), Some("Lesson completed"));
    }
}
