//! Authentication state.
//!
//! ```text
//! Anonymous --login ok--------> Authenticated
//! Anonymous --signup ok-------> PendingOtp --verify_otp ok--> Authenticated
//! any       --logout----------> Anonymous
//! ```
//!
//! A failed action returns the failure `Outcome` and leaves the session as it was.

use super::{SubscriptionId, Subscribers};
use crate::commands::{self, Outcome};
use crate::error::Result;
use crate::model::User;
use crate::store::DataStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    #[default]
    Anonymous,
    PendingOtp,
    Authenticated,
}

/// The persisted part of [`AuthStore`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub status: AuthStatus,
    #[serde(default)]
    pub remember_me: bool,
}

impl AuthSession {
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }
}

#[derive(Default)]
pub struct AuthStore {
    session: AuthSession,
    subscribers: Subscribers<AuthSession>,
}

impl AuthStore {
    pub fn load<S: DataStore>(store: &S) -> Result<Self> {
        Ok(Self {
            session: store.auth_session()?.unwrap_or_default(),
            subscribers: Subscribers::default(),
        })
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    pub fn status(&self) -> AuthStatus {
        self.session.status
    }

    pub fn login<S: DataStore>(
        &mut self,
        store: &mut S,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<Outcome<User>> {
        let outcome = commands::auth::login(store, email, password)?;
        if let Some(sign_in) = &outcome.data {
            self.sign_in(
                store,
                AuthSession {
                    user: Some(sign_in.user.clone()),
                    status: AuthStatus::Authenticated,
                    remember_me,
                },
            )?;
        }
        Ok(outcome.map(|s| s.user))
    }

    pub fn login_with_google<S: DataStore>(&mut self, store: &mut S) -> Result<Outcome<User>> {
        let outcome = commands::auth::login_with_google(store)?;
        if let Some(sign_in) = &outcome.data {
            self.sign_in(
                store,
                AuthSession {
                    user: Some(sign_in.user.clone()),
                    status: AuthStatus::Authenticated,
                    remember_me: self.session.remember_me,
                },
            )?;
        }
        Ok(outcome.map(|s| s.user))
    }

    /// A successful signup waits for the one-time code before it counts as signed in.
    pub fn signup<S: DataStore>(
        &mut self,
        store: &mut S,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Outcome<User>> {
        let outcome = commands::auth::signup(store, name, email, password)?;
        if let Some(sign_in) = &outcome.data {
            let status = if sign_in.requires_otp {
                AuthStatus::PendingOtp
            } else {
                AuthStatus::Authenticated
            };
            self.sign_in(
                store,
                AuthSession {
                    user: Some(sign_in.user.clone()),
                    status,
                    remember_me: self.session.remember_me,
                },
            )?;
        }
        Ok(outcome.map(|s| s.user))
    }

    /// Checks the code for the pending user. Outside `PendingOtp` the code is still
    /// checked but the state does not move.
    pub fn verify_otp<S: DataStore>(&mut self, store: &mut S, otp: &str) -> Result<Outcome<()>> {
        let email = self
            .session
            .user
            .as_ref()
            .map(|u| u.email.clone())
            .unwrap_or_default();
        let outcome = commands::auth::verify_otp(&email, otp);
        if outcome.success && self.session.status == AuthStatus::PendingOtp {
            let next = AuthSession {
                status: AuthStatus::Authenticated,
                ..self.session.clone()
            };
            self.apply(store, next)?;
        }
        Ok(outcome)
    }

    pub fn logout<S: DataStore>(&mut self, store: &mut S) -> Result<Outcome<()>> {
        let outcome = commands::auth::logout(store)?;
        store.clear_auth_session()?;
        self.session = AuthSession::default();
        self.subscribers.notify(&self.session);
        Ok(outcome)
    }

    /// Replace the user directly. `None` signs out without going through logout.
    pub fn set_user<S: DataStore>(&mut self, store: &mut S, user: Option<User>) -> Result<()> {
        match &user {
            Some(user) => store.set_current_user(user)?,
            None => store.clear_current_user()?,
        }
        let status = if user.is_some() {
            AuthStatus::Authenticated
        } else {
            AuthStatus::Anonymous
        };
        self.apply(
            store,
            AuthSession {
                user,
                status,
                remember_me: self.session.remember_me,
            },
        )
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&AuthSession) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Apply a session whose user the commands layer has already written. When the
    /// session cannot be saved, the `user` key is put back to the container's user.
    fn sign_in<S: DataStore>(&mut self, store: &mut S, next: AuthSession) -> Result<()> {
        let Err(err) = self.apply(store, next) else {
            return Ok(());
        };
        let restored = match &self.session.user {
            Some(user) => store.set_current_user(user),
            None => store.clear_current_user(),
        };
        if let Err(rollback) = restored {
            tracing::warn!(error = %rollback, "could not restore the signed-in user");
        }
        Err(err)
    }

    fn apply<S: DataStore>(&mut self, store: &mut S, next: AuthSession) -> Result<()> {
        store.save_auth_session(&next)?;
        tracing::debug!(from = ?self.session.status, to = ?next.status, "auth state changed");
        self.session = next;
        self.subscribers.notify(&self.session);
        Ok(())
    }
}
