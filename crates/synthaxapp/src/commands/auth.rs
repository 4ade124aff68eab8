//! Authentication endpoints.
//!
//! There is no credential check: any password of six or more characters signs in,
//! and the account handed out is chosen from the email address. The one-time code
//! is the fixed literal [`DEMO_OTP`].

use super::Outcome;
use crate::error::Result;
use crate::fixtures::{admin_user, learner_user, mentor_user};
use crate::model::{Role, User};
use crate::store::DataStore;
use serde::Serialize;

pub const DEMO_OTP: &str = "123456";
pub const MIN_PASSWORD_LEN: usize = 6;
pub const GOOGLE_EMAIL: &str = "google-user@synthaxsphere.com";

/// Data returned by login and signup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignIn {
    pub user: User,
    pub requires_otp: bool,
}

/// Role picked from the email address: `mentor` wins over `admin`, else learner.
pub fn role_for_email(email: &str) -> Role {
    let email = email.to_lowercase();
    if email.contains("mentor") {
        Role::Mentor
    } else if email.contains("admin") {
        Role::Admin
    } else {
        Role::Learner
    }
}

fn demo_account(role: Role) -> User {
    match role {
        Role::Mentor => mentor_user(),
        Role::Admin => admin_user(),
        Role::Learner => learner_user(),
    }
}

pub fn login<S: DataStore>(store: &mut S, email: &str, password: &str) -> Result<Outcome<SignIn>> {
    if email.trim().is_empty() || password.is_empty() {
        return Ok(Outcome::fail("Email and password are required"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Ok(Outcome::fail("Invalid credentials"));
    }

    let user = User {
        email: email.to_string(),
        ..demo_account(role_for_email(email))
    };
    store.set_current_user(&user)?;
    tracing::info!(user = %user.id, role = %user.role, "signed in");

    Ok(Outcome::ok_with(
        SignIn {
            user,
            requires_otp: false,
        },
        "Login successful",
    ))
}

pub fn signup<S: DataStore>(
    store: &mut S,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Outcome<SignIn>> {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Ok(Outcome::fail("All fields are required"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Ok(Outcome::fail("Password must be at least 6 characters"));
    }
    if !email.contains('@') {
        return Ok(Outcome::fail("Invalid email format"));
    }

    let user = User::new_learner(name, email);
    store.set_current_user(&user)?;
    tracing::info!(user = %user.id, "account created");

    Ok(Outcome::ok_with(
        SignIn {
            user,
            requires_otp: true,
        },
        "Account created successfully",
    ))
}

pub fn send_otp(email: &str) -> Outcome<()> {
    tracing::debug!(email, otp = DEMO_OTP, "one-time code issued");
    Outcome::done(format!(
        "OTP sent successfully. Use {} for demo.",
        DEMO_OTP
    ))
}

pub fn verify_otp(_email: &str, otp: &str) -> Outcome<()> {
    if otp.chars().count() != 6 {
        return Outcome::fail("Please enter a valid 6-digit OTP");
    }
    if otp == DEMO_OTP {
        return Outcome::done("Email verified successfully");
    }
    Outcome::fail("Invalid OTP. Please try again.")
}

pub fn login_with_google<S: DataStore>(store: &mut S) -> Result<Outcome<SignIn>> {
    let user = User {
        email: GOOGLE_EMAIL.to_string(),
        ..learner_user()
    };
    store.set_current_user(&user)?;
    tracing::info!(user = %user.id, "signed in with google");

    Ok(Outcome::ok_with(
        SignIn {
            user,
            requires_otp: false,
        },
        "Google login successful",
    ))
}

pub fn logout<S: DataStore>(store: &mut S) -> Result<Outcome<()>> {
    store.clear_current_user()?;
    tracing::info!("signed out");
    Ok(Outcome::done("Logged out"))
}

pub fn current_user<S: DataStore>(store: &S) -> Result<Option<User>> {
    store.current_user()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_login_picks_role_from_email() {
        let mut store = InMemoryStore::new();
        let outcome = login(&mut store, "mentor@test.com", "anything6").unwrap();

        assert!(outcome.success);
        let sign_in = outcome.data.unwrap();
        assert_eq!(sign_in.user.role, Role::Mentor);
        assert_eq!(sign_in.user.email, "mentor@test.com");
        assert!(!sign_in.requires_otp);
        assert_eq!(store.current_user().unwrap().unwrap().email, "mentor@test.com");
    }

    #[test]
    fn test_role_for_email() {
        assert_eq!(role_for_email("Team-Admin@corp.io"), Role::Admin);
        assert_eq!(role_for_email("MENTOR.jane@x.io"), Role::Mentor);
        assert_eq!(role_for_email("mentor-admin@x.io"), Role::Mentor);
        assert_eq!(role_for_email("ada@x.io"), Role::Learner);
    }

    #[test]
    fn test_short_password_fails_without_mutation() {
        let mut store = InMemoryStore::new();
        let outcome = login(&mut store, "ada@test.com", "12345").unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.message(), Some("Invalid credentials"));
        assert!(store.current_user().unwrap().is_none());
    }

    #[test]
    fn test_login_requires_both_fields() {
        let mut store = InMemoryStore::new();
        let outcome = login(&mut store, "", "password123").unwrap();
        assert_eq!(outcome.message(), Some("Email and password are required"));
    }

    #[test]
    fn test_signup_creates_learner_pending_otp() {
        let mut store = InMemoryStore::new();
        let outcome = signup(&mut store, "Ada", "ada@test.com", "secret1").unwrap();

        let sign_in = outcome.data.unwrap();
        assert!(sign_in.requires_otp);
        assert_eq!(sign_in.user.role, Role::Learner);
        assert_eq!(sign_in.user.streak, 0);
        assert_eq!(store.current_user().unwrap(), Some(sign_in.user));
    }

    #[test]
    fn test_signup_validation_order() {
        let mut store = InMemoryStore::new();
        let msg = |o: Outcome<SignIn>| o.message.unwrap();

        assert_eq!(
            msg(signup(&mut store, "", "a@b.c", "secret1").unwrap()),
            "All fields are required"
        );
        assert_eq!(
            msg(signup(&mut store, "Ada", "a@b.c", "short").unwrap()),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            msg(signup(&mut store, "Ada", "not-an-email", "secret1").unwrap()),
            "Invalid email format"
        );
        assert!(store.current_user().unwrap().is_none());
    }

    #[test]
    fn test_verify_otp() {
        assert_eq!(
            verify_otp("a@b.c", "000000"),
            Outcome::fail("Invalid OTP. Please try again.")
        );
        assert!(verify_otp("a@b.c", "123456").success);
        assert_eq!(
            verify_otp("a@b.c", "123").message(),
            Some("Please enter a valid 6-digit OTP")
        );
    }

    #[test]
    fn test_google_login_and_logout() {
        let mut store = InMemoryStore::new();
        let outcome = login_with_google(&mut store).unwrap();
        assert_eq!(outcome.data.unwrap().user.email, GOOGLE_EMAIL);

        logout(&mut store).unwrap();
        assert!(current_user(&store).unwrap().is_none());
    }
}
