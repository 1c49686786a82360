// store.rs — NotificationStore: the authoritative in-memory notification list.
//
// One store exists per console session. It is constructed at start-up and
// handed by reference to every consumer (emitters, the panel, shortcut
// actions). Nothing is persisted; dropping the store drops the list.
//
// The list is kept newest first. The unread count is always derived from
// the list, never tracked separately.

use chrono::Utc;
use uuid::Uuid;

use crate::notification::{NewNotification, Notification};
use crate::toast::ToastDispatcher;

/// In-memory notification list plus the toast channel that accompanies it.
pub struct NotificationStore {
    notifications: Vec<Notification>,
    toasts: ToastDispatcher,
    max_entries: Option<usize>,
}

impl NotificationStore {
    /// An empty store with no toast sinks and no retention cap.
    pub fn new() -> Self {
        Self::with_dispatcher(ToastDispatcher::new())
    }

    /// An empty store that announces new entries through `toasts`.
    pub fn with_dispatcher(toasts: ToastDispatcher) -> Self {
        Self {
            notifications: Vec::new(),
            toasts,
            max_entries: None,
        }
    }

    /// Keep at most `max` entries, dropping the oldest. `None` is unbounded.
    pub fn with_max_entries(mut self, max: Option<usize>) -> Self {
        self.max_entries = max;
        self.enforce_cap();
        self
    }

    pub fn toasts(&self) -> &ToastDispatcher {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastDispatcher {
        &mut self.toasts
    }

    /// Add a new unread notification at the front of the list and show its
    /// toast. Returns the id assigned to the entry.
    pub fn add(&mut self, new: NewNotification) -> Uuid {
        let notification = Notification::from_new(new, Utc::now());
        let id = notification.id;
        tracing::debug!(%id, kind = %notification.kind, "notification added");

        self.notifications.insert(0, notification);
        // Toast before the cap runs, so a zero cap still shows it.
        self.toasts.announce(&self.notifications[0]);
        self.enforce_cap();

        tracing::debug!(unread = self.unread_count(), "unread count");
        id
    }

    /// Insert pre-built entries (e.g. session samples) without toasts.
    ///
    /// Seeded entries are sorted newest first among themselves and placed
    /// behind everything already in the list. Existing entries never move.
    pub fn seed(&mut self, entries: impl IntoIterator<Item = Notification>) {
        let mut incoming: Vec<Notification> = entries.into_iter().collect();
        // Stable sort: equal timestamps keep their given order.
        incoming.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.notifications.extend(incoming);
        self.enforce_cap();
        tracing::debug!(
            total = self.notifications.len(),
            unread = self.unread_count(),
            "notifications seeded"
        );
    }

    /// Mark one entry read. Unknown ids are ignored.
    pub fn mark_as_read(&mut self, id: Uuid) {
        if let Some(n) = self.notifications.iter_mut().find(|n| n.id == id) {
            n.read = true;
            tracing::debug!(%id, unread = self.unread_count(), "notification marked read");
        }
    }

    /// Mark every entry read.
    pub fn mark_all_as_read(&mut self) {
        for n in &mut self.notifications {
            n.read = true;
        }
        tracing::debug!(total = self.notifications.len(), "all notifications marked read");
    }

    /// Remove one entry. Unknown ids are ignored.
    pub fn clear(&mut self, id: Uuid) {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        if self.notifications.len() != before {
            tracing::debug!(%id, unread = self.unread_count(), "notification cleared");
        }
    }

    /// Remove every entry.
    pub fn clear_all(&mut self) {
        let removed = self.notifications.len();
        self.notifications.clear();
        tracing::debug!(removed, "all notifications cleared");
    }

    /// Number of entries with `read == false`.
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// The list, newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn get(&self, id: Uuid) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    fn enforce_cap(&mut self) {
        if let Some(max) = self.max_entries {
            if self.notifications.len() > max {
                let dropped = self.notifications.len() - max;
                self.notifications.truncate(max);
                tracing::debug!(dropped, max, "oldest notifications dropped");
            }
        }
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotifyError;
    use crate::notification::{sample_notifications, NotificationKind};
    use crate::toast::{Toast, ToastSink, ToastVariant};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Toast>>>);

    impl ToastSink for Recorder {
        fn show(&self, toast: &Toast) -> Result<(), NotifyError> {
            self.0.lock().unwrap().push(toast.clone());
            Ok(())
        }
    }

    fn store_with_two_unread() -> (NotificationStore, Uuid, Uuid) {
        let mut store = NotificationStore::new();
        let first = store.add(NewNotification::info("first", "m1"));
        let second = store.add(NewNotification::warning("second", "m2"));
        (store, first, second)
    }

    #[test]
    fn add_to_empty_store() {
        let mut store = NotificationStore::new();
        store.add(NewNotification::success("A", "m1"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.unread_count(), 1);
        let n = &store.notifications()[0];
        assert_eq!(n.kind, NotificationKind::Success);
        assert_eq!(n.title, "A");
        assert_eq!(n.message, "m1");
        assert!(!n.read);
    }

    #[test]
    fn add_prepends() {
        let (store, first, second) = store_with_two_unread();
        assert_eq!(store.notifications()[0].id, second);
        assert_eq!(store.notifications()[1].id, first);
    }

    #[test]
    fn add_keeps_action_url() {
        let mut store = NotificationStore::new();
        let id = store.add(NewNotification::info("Invite", "join").with_action_url("/projects/7"));
        assert_eq!(store.get(id).unwrap().action_url.as_deref(), Some("/projects/7"));
    }

    #[test]
    fn add_emits_one_toast() {
        let recorder = Recorder::default();
        let mut dispatcher = ToastDispatcher::new();
        dispatcher.add_sink(Box::new(recorder.clone()));
        let mut store = NotificationStore::with_dispatcher(dispatcher);

        store.add(NewNotification::error("Deploy failed", "rollback started"));

        let toasts = recorder.0.lock().unwrap();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "Deploy failed");
        assert_eq!(toasts[0].variant, ToastVariant::Destructive);
    }

    #[test]
    fn mark_all_as_read_zeroes_unread() {
        let (mut store, _, _) = store_with_two_unread();
        assert_eq!(store.unread_count(), 2);

        store.mark_all_as_read();

        assert_eq!(store.unread_count(), 0);
        assert!(store.notifications().iter().all(|n| n.read));
    }

    #[test]
    fn mark_as_read_is_idempotent() {
        let (mut store, first, _) = store_with_two_unread();

        store.mark_as_read(first);
        assert_eq!(store.unread_count(), 1);
        store.mark_as_read(first);
        assert_eq!(store.unread_count(), 1);
        assert!(store.get(first).unwrap().read);
    }

    #[test]
    fn mark_as_read_unknown_id_is_noop() {
        let (mut store, _, _) = store_with_two_unread();
        let before = store.notifications().to_vec();

        store.mark_as_read(Uuid::new_v4());

        assert_eq!(store.notifications(), before.as_slice());
        assert_eq!(store.unread_count(), 2);
    }

    #[test]
    fn clear_read_entry_keeps_unread_count() {
        let mut store = NotificationStore::new();
        let y = store.add(NewNotification::info("Y", "read one"));
        let x = store.add(NewNotification::info("X", "unread one"));
        store.mark_as_read(y);
        assert_eq!(store.unread_count(), 1);

        store.clear(y);

        assert_eq!(store.len(), 1);
        assert_eq!(store.notifications()[0].id, x);
        assert_eq!(store.unread_count(), 1);
    }

    #[test]
    fn clear_unread_entry_decrements_unread_count() {
        let (mut store, first, _) = store_with_two_unread();
        store.clear(first);
        assert_eq!(store.len(), 1);
        assert_eq!(store.unread_count(), 1);
        assert!(store.get(first).is_none());
    }

    #[test]
    fn clear_unknown_id_is_noop() {
        let (mut store, _, _) = store_with_two_unread();
        store.clear(Uuid::new_v4());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn clear_all_empties() {
        let (mut store, _, _) = store_with_two_unread();
        store.clear_all();
        assert!(store.is_empty());
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn seed_orders_newest_first_and_skips_toasts() {
        let recorder = Recorder::default();
        let mut dispatcher = ToastDispatcher::new();
        dispatcher.add_sink(Box::new(recorder.clone()));
        let mut store = NotificationStore::with_dispatcher(dispatcher);

        let fresh = store.add(NewNotification::info("fresh", "just now"));
        let mut samples = sample_notifications(Utc::now());
        samples.reverse();
        store.seed(samples);

        assert_eq!(store.len(), 4);
        assert_eq!(store.notifications()[0].id, fresh);
        assert!(store
            .notifications()
            .windows(2)
            .all(|w| w[0].timestamp >= w[1].timestamp));
        assert_eq!(store.unread_count(), 3);
        assert_eq!(recorder.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn seed_never_moves_added_entries() {
        let mut store = NotificationStore::new();
        let older = store.add(NewNotification::info("older", "m1"));
        let newer = store.add(NewNotification::info("newer", "m2"));

        // Seeded timestamps ahead of the added ones, as after a clock step.
        let ahead = Utc::now() + chrono::Duration::hours(1);
        let samples = sample_notifications(ahead);
        let sample_ids: Vec<Uuid> = samples.iter().map(|n| n.id).collect();
        store.seed(samples);

        let ids: Vec<Uuid> = store.notifications().iter().map(|n| n.id).collect();
        assert_eq!(ids[0], newer);
        assert_eq!(ids[1], older);
        assert_eq!(&ids[2..], sample_ids.as_slice());
    }

    #[test]
    fn toast_describes_the_stored_entry() {
        let recorder = Recorder::default();
        let mut dispatcher = ToastDispatcher::new();
        dispatcher.add_sink(Box::new(recorder.clone()));
        let mut store = NotificationStore::with_dispatcher(dispatcher).with_max_entries(Some(0));

        store.add(NewNotification::warning("Quota", "90% used"));

        // The entry is stored and announced before the cap drops it.
        assert!(store.is_empty());
        let toasts = recorder.0.lock().unwrap();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "Quota");
        assert_eq!(toasts[0].description, "90% used");
    }

    #[test]
    fn cap_drops_oldest_entries() {
        let mut store = NotificationStore::new().with_max_entries(Some(2));
        let a = store.add(NewNotification::info("a", "1"));
        let b = store.add(NewNotification::info("b", "2"));
        let c = store.add(NewNotification::info("c", "3"));

        let ids: Vec<Uuid> = store.notifications().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![c, b]);
        assert!(store.get(a).is_none());
        assert_eq!(store.unread_count(), 2);
    }

    #[test]
    fn cap_applies_when_set_later() {
        let (store, _, second) = store_with_two_unread();
        let store = store.with_max_entries(Some(1));
        assert_eq!(store.len(), 1);
        assert_eq!(store.notifications()[0].id, second);
    }
}
