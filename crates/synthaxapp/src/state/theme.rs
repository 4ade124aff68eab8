use super::{SubscriptionId, Subscribers};
use crate::error::Result;
use crate::store::DataStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}' (expected light or dark)", other)),
        }
    }
}

/// Holds the active theme and persists it under the `theme` key.
#[derive(Default)]
pub struct ThemeStore {
    theme: Theme,
    subscribers: Subscribers<Theme>,
}

impl ThemeStore {
    /// Restore the persisted theme, or [`Theme::Dark`] when none was saved.
    pub fn load<S: DataStore>(store: &S) -> Result<Self> {
        Self::load_or(store, Theme::default())
    }

    /// Restore the persisted theme, falling back to `initial`.
    pub fn load_or<S: DataStore>(store: &S, initial: Theme) -> Result<Self> {
        let theme = store.theme()?.unwrap_or(initial);
        Ok(Self {
            theme,
            subscribers: Subscribers::default(),
        })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle<S: DataStore>(&mut self, store: &mut S) -> Result<Theme> {
        let next = self.theme.toggled();
        self.set(store, next)?;
        Ok(next)
    }

    pub fn set<S: DataStore>(&mut self, store: &mut S, theme: Theme) -> Result<()> {
        store.save_theme(theme)?;
        tracing::debug!(from = %self.theme, to = %theme, "theme changed");
        self.theme = theme;
        self.subscribers.notify(&self.theme);
        Ok(())
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Theme) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_defaults_to_dark() {
        let store = InMemoryStore::new();
        assert_eq!(ThemeStore::load(&store).unwrap().theme(), Theme::Dark);
    }

    #[test]
    fn test_fallback_only_when_nothing_saved() {
        let mut store = InMemoryStore::new();
        assert_eq!(
            ThemeStore::load_or(&store, Theme::Light).unwrap().theme(),
            Theme::Light
        );

        store.save_theme(Theme::Dark).unwrap();
        assert_eq!(
            ThemeStore::load_or(&store, Theme::Light).unwrap().theme(),
            Theme::Dark
        );
    }

    #[test]
    fn test_toggle_persists_and_notifies() {
        let mut store = InMemoryStore::new();
        let mut themes = ThemeStore::load(&store).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        themes.subscribe(move |t| sink.borrow_mut().push(*t));

        assert_eq!(themes.toggle(&mut store).unwrap(), Theme::Light);
        assert_eq!(themes.toggle(&mut store).unwrap(), Theme::Dark);

        assert_eq!(*seen.borrow(), vec![Theme::Light, Theme::Dark]);
        assert_eq!(store.theme().unwrap(), Some(Theme::Dark));
    }

    #[test]
    fn test_reload_restores_theme() {
        let mut store = InMemoryStore::new();
        let mut themes = ThemeStore::load(&store).unwrap();
        themes.set(&mut store, Theme::Light).unwrap();

        assert_eq!(ThemeStore::load(&store).unwrap().theme(), Theme::Light);
    }

    #[test]
    fn test_failed_write_keeps_state() {
        let mut store = InMemoryStore::new();
        let mut themes = ThemeStore::load(&store).unwrap();
        store.backend().set_simulate_write_error(true);

        assert!(themes.toggle(&mut store).is_err());
        assert_eq!(themes.theme(), Theme::Dark);
    }

    #[test]
    fn test_parse() {
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }
}
