//! Per-user inbox.
//!
//! Listing, counting and "mark all read" are scoped to the signed-in user. Marking
//! or deleting a single notification works by id alone and does not check who owns
//! it.

use super::helpers::position_by_id;
use super::Outcome;
use crate::error::Result;
use crate::model::{new_id, Notification, NotificationKind};
use crate::store::DataStore;
use chrono::Utc;

/// The signed-in user's notifications, newest first. Empty when signed out.
pub fn list<S: DataStore>(store: &mut S) -> Result<Vec<Notification>> {
    let Some(user) = store.current_user()? else {
        return Ok(Vec::new());
    };
    let mut mine: Vec<_> = store
        .notifications()?
        .into_iter()
        .filter(|n| n.user_id == user.id)
        .collect();
    mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(mine)
}

pub fn unread_count<S: DataStore>(store: &mut S) -> Result<usize> {
    Ok(list(store)?.iter().filter(|n| !n.read).count())
}

pub fn mark_read<S: DataStore>(store: &mut S, notification_id: &str) -> Result<Outcome<()>> {
    let mut notifications = store.notifications()?;
    let Some(index) = position_by_id(&notifications, notification_id, |n| n.id.as_str()) else {
        return Ok(Outcome::fail("Notification not found"));
    };

    notifications[index].read = true;
    store.save_notifications(&notifications)?;
    tracing::info!(notification = notification_id, "notification read");

    Ok(Outcome::done("Notification marked as read"))
}

/// Returns how many notifications changed.
pub fn mark_all_read<S: DataStore>(store: &mut S) -> Result<Outcome<usize>> {
    let Some(user) = store.current_user()? else {
        return Ok(Outcome::fail("User not found"));
    };

    let mut notifications = store.notifications()?;
    let mut changed = 0;
    for n in notifications
        .iter_mut()
        .filter(|n| n.user_id == user.id && !n.read)
    {
        n.read = true;
        changed += 1;
    }
    store.save_notifications(&notifications)?;
    tracing::info!(user = %user.id, changed, "all notifications read");

    Ok(Outcome::ok_with(changed, "All notifications marked as read"))
}

pub fn delete<S: DataStore>(store: &mut S, notification_id: &str) -> Result<Outcome<()>> {
    let mut notifications = store.notifications()?;
    let Some(index) = position_by_id(&notifications, notification_id, |n| n.id.as_str()) else {
        return Ok(Outcome::fail("Notification not found"));
    };

    notifications.remove(index);
    store.save_notifications(&notifications)?;
    tracing::info!(notification = notification_id, "notification deleted");

    Ok(Outcome::done("Notification deleted"))
}

/// Push a new unread notification to the signed-in user, at the head of the inbox.
pub fn create<S: DataStore>(
    store: &mut S,
    kind: NotificationKind,
    title: &str,
    message: &str,
    link: Option<&str>,
) -> Result<Outcome<Notification>> {
    let Some(user) = store.current_user()? else {
        return Ok(Outcome::fail("User not found"));
    };

    let notification = Notification {
        id: new_id("notif"),
        user_id: user.id,
        kind,
        title: title.to_string(),
        message: message.to_string(),
        read: false,
        link: link.map(str::to_string),
        created_at: Utc::now(),
    };

    let mut notifications = store.notifications()?;
    notifications.insert(0, notification.clone());
    store.save_notifications(&notifications)?;
    tracing::info!(notification = %notification.id, kind = %kind, "notification created");

    Ok(Outcome::ok(notification))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_list_is_newest_first() {
        let mut fixture = StoreFixture::new().as_learner();
        let ids: Vec<_> = list(&mut fixture.store)
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["notif-4", "notif-1", "notif-3", "notif-2"]);
    }

    #[test]
    fn test_list_scoped_to_current_user() {
        let mut fixture = StoreFixture::new().as_mentor();
        assert!(list(&mut fixture.store).unwrap().is_empty());

        let mut store = InMemoryStore::new();
        assert!(list(&mut store).unwrap().is_empty());
        assert_eq!(unread_count(&mut store).unwrap(), 0);
    }

    #[test]
    fn test_unread_count() {
        let mut fixture = StoreFixture::new().as_learner();
        assert_eq!(unread_count(&mut fixture.store).unwrap(), 3);

        mark_read(&mut fixture.store, "notif-1").unwrap();
        assert_eq!(unread_count(&mut fixture.store).unwrap(), 2);
    }

    #[test]
    fn test_mark_read_unknown() {
        let mut store = InMemoryStore::new();
        let outcome = mark_read(&mut store, "notif-99").unwrap();
        assert_eq!(outcome, Outcome::fail("Notification not found"));
    }

    #[test]
    fn test_mark_all_read() {
        let mut fixture = StoreFixture::new().as_learner();
        let outcome = mark_all_read(&mut fixture.store).unwrap();
        assert_eq!(outcome.data, Some(3));
        assert_eq!(unread_count(&mut fixture.store).unwrap(), 0);
    }

    #[test]
    fn test_mark_all_read_leaves_other_users_alone() {
        let mut fixture = StoreFixture::new().as_mentor();
        let outcome = mark_all_read(&mut fixture.store).unwrap();
        assert_eq!(outcome.data, Some(0));
        let unread = fixture
            .store
            .notifications()
            .unwrap()
            .iter()
            .filter(|n| !n.read)
            .count();
        assert_eq!(unread, 3);
    }

    #[test]
    fn test_mark_all_read_signed_out() {
        let mut store = InMemoryStore::new();
        let outcome = mark_all_read(&mut store).unwrap();
        assert_eq!(outcome.message(), Some("User not found"));
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut store = InMemoryStore::new();
        assert!(delete(&mut store, "notif-2").unwrap().success);
        let remaining = store.notifications().unwrap();
        assert_eq!(remaining.len(), 3);
        assert!(remaining.iter().all(|n| n.id != "notif-2"));

        let again = delete(&mut store, "notif-2").unwrap();
        assert_eq!(again, Outcome::fail("Notification not found"));
        assert_eq!(store.notifications().unwrap().len(), 3);
    }

    #[test]
    fn test_create_prepends_unread() {
        let mut fixture = StoreFixture::new().as_learner();
        let created = create(
            &mut fixture.store,
            NotificationKind::System,
            "Maintenance",
            "Back soon.",
            Some("/status"),
        )
        .unwrap()
        .data
        .unwrap();

        let stored = fixture.store.notifications().unwrap();
        assert_eq!(stored[0], created);
        assert!(!created.read);
        assert_eq!(list(&mut fixture.store).unwrap()[0].id, created.id);
    }

    #[test]
    fn test_create_requires_user() {
        let mut store = InMemoryStore::new();
        let outcome = create(&mut store, NotificationKind::Badge, "t", "m", None).unwrap();
        assert!(!outcome.success);
        assert_eq!(store.notifications().unwrap().len(), 4);
    }
}
