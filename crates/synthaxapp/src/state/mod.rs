//! # Client State Containers
//!
//! Two independent observable containers sit above the command layer:
//!
//! - [`auth::AuthStore`]: who is signed in, and whether a one-time code is pending.
//! - [`theme::ThemeStore`]: light or dark.
//!
//! Each holds its state in memory, writes it through the [`crate::store::DataStore`]
//! after every change so it survives a restart, and notifies subscribers once the
//! change has been applied. Actions that fail leave the state untouched and hand the
//! failure message back to the caller.
//!
//! The containers never coordinate. Signing out does not reset the theme and changing
//! the theme knows nothing about the session.

pub mod auth;
pub mod theme;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

/// Observer list shared by both containers.
pub struct Subscribers<T> {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback<T>)>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }
}

impl<T> Subscribers<T> {
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns false when the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    /// Calls every subscriber in subscription order.
    pub fn notify(&mut self, state: &T) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(state);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
