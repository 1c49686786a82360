// panel.rs — Notification panel view model.
//
// The panel is a consumer of the store: it reads the list and unread count
// for display and forwards user clicks to the store's mutation operations.
// The only state it owns is the transient open/closed flag of the dropdown.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use chrono_humanize::HumanTime;
use uuid::Uuid;

use crate::notification::{Notification, NotificationKind};
use crate::store::NotificationStore;

/// Badge counts above this show as "99+".
pub const BADGE_LIMIT: usize = 99;

/// Text shown when the list is empty.
pub const EMPTY_TEXT: &str = "No new notifications";

/// Icon name and color for a kind.
pub fn icon_for(kind: NotificationKind) -> (&'static str, &'static str) {
    match kind {
        NotificationKind::Info => ("info", "blue"),
        NotificationKind::Success => ("check-circle", "green"),
        NotificationKind::Warning => ("alert-triangle", "yellow"),
        NotificationKind::Error => ("x-circle", "red"),
    }
}

/// Label for the unread badge, or `None` when there is nothing unread.
pub fn badge_label(unread: usize) -> Option<String> {
    match unread {
        0 => None,
        n if n > BADGE_LIMIT => Some(format!("{}+", BADGE_LIMIT)),
        n => Some(n.to_string()),
    }
}

/// One row of the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelItem {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub icon: &'static str,
    pub color: &'static str,
    pub title: String,
    pub message: String,
    pub unread: bool,
    /// Relative age, e.g. "30 minutes ago".
    pub age: String,
}

impl PanelItem {
    fn from_notification(n: &Notification, now: DateTime<Utc>) -> Self {
        let (icon, color) = icon_for(n.kind);
        Self {
            id: n.id,
            kind: n.kind,
            icon,
            color,
            title: n.title.clone(),
            message: n.message.clone(),
            unread: !n.read,
            age: HumanTime::from(n.timestamp - now).to_string(),
        }
    }
}

/// Transient dropdown state. Not part of the notification model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelState {
    pub open: bool,
}

impl PanelState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

/// Notification panel: a view over the store plus click handlers.
#[derive(Debug, Default)]
pub struct NotificationPanel {
    state: PanelState,
}

impl NotificationPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    pub fn toggle(&mut self) {
        self.state.toggle();
    }

    pub fn close(&mut self) {
        self.state.close();
    }

    pub fn badge(&self, store: &NotificationStore) -> Option<String> {
        badge_label(store.unread_count())
    }

    pub fn show_mark_all(&self, store: &NotificationStore) -> bool {
        store.unread_count() > 0
    }

    pub fn show_clear_all(&self, store: &NotificationStore) -> bool {
        !store.is_empty()
    }

    pub fn items(&self, store: &NotificationStore, now: DateTime<Utc>) -> Vec<PanelItem> {
        store
            .notifications()
            .iter()
            .map(|n| PanelItem::from_notification(n, now))
            .collect()
    }

    /// Clicking an entry marks it read; clicking a read entry does nothing.
    pub fn click(&self, store: &mut NotificationStore, id: Uuid) {
        if store.get(id).is_some_and(|n| !n.read) {
            store.mark_as_read(id);
        }
    }

    /// The per-row trash button.
    pub fn dismiss(&self, store: &mut NotificationStore, id: Uuid) {
        store.clear(id);
    }

    pub fn mark_all(&self, store: &mut NotificationStore) {
        store.mark_all_as_read();
    }

    pub fn clear_all(&self, store: &mut NotificationStore) {
        store.clear_all();
    }

    /// Plain-text rendering of the panel contents.
    pub fn render(&self, store: &NotificationStore, now: DateTime<Utc>) -> String {
        let mut out = String::new();
        let unread = store.unread_count();

        let mut header = String::from("Notifications");
        if unread > 0 {
            let _ = write!(header, " ({} unread)", unread);
        }
        let mut actions = Vec::new();
        if self.show_mark_all(store) {
            actions.push("[mark all read]");
        }
        if self.show_clear_all(store) {
            actions.push("[clear all]");
        }
        if actions.is_empty() {
            let _ = writeln!(out, "{}", header);
        } else {
            let _ = writeln!(out, "{}  {}", header, actions.join(" "));
        }
        let _ = writeln!(out, "{}", "-".repeat(60));

        let items = self.items(store, now);
        if items.is_empty() {
            let _ = writeln!(out, "  {}", EMPTY_TEXT);
            return out;
        }

        for (i, item) in items.iter().enumerate() {
            let dot = if item.unread { "*" } else { " " };
            let _ = writeln!(
                out,
                "{:>3}. {} [{}] {} ({})",
                i + 1,
                dot,
                item.kind,
                item.title,
                item.age
            );
            let _ = writeln!(out, "        {}", item.message);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{sample_notifications, NewNotification};

    #[test]
    fn badge_caps_at_limit() {
        assert_eq!(badge_label(0), None);
        assert_eq!(badge_label(7).as_deref(), Some("7"));
        assert_eq!(badge_label(99).as_deref(), Some("99"));
        assert_eq!(badge_label(100).as_deref(), Some("99+"));
    }

    #[test]
    fn icons_per_kind() {
        assert_eq!(icon_for(NotificationKind::Info), ("info", "blue"));
        assert_eq!(icon_for(NotificationKind::Error).1, "red");
    }

    #[test]
    fn click_marks_unread_entry_read() {
        let mut store = NotificationStore::new();
        let id = store.add(NewNotification::info("Invite", "join us"));
        let panel = NotificationPanel::new();

        panel.click(&mut store, id);

        assert!(store.get(id).unwrap().read);
        assert_eq!(panel.badge(&store), None);
        assert!(!panel.show_mark_all(&store));
        assert!(panel.show_clear_all(&store));
    }

    #[test]
    fn dismiss_removes_row() {
        let mut store = NotificationStore::new();
        let id = store.add(NewNotification::info("Invite", "join us"));
        let panel = NotificationPanel::new();

        panel.dismiss(&mut store, id);

        assert!(store.is_empty());
        assert!(!panel.show_clear_all(&store));
    }

    #[test]
    fn items_carry_relative_age() {
        let now = Utc::now();
        let mut store = NotificationStore::new();
        store.seed(sample_notifications(now));
        let panel = NotificationPanel::new();

        let items = panel.items(&store, now);
        assert_eq!(items.len(), 3);
        assert!(items[0].age.contains("30 minutes"), "age was {}", items[0].age);
        assert!(items[0].age.ends_with("ago"));
        assert!(items[0].unread);
        assert!(!items[2].unread);
        assert_eq!(items[1].color, "green");
    }

    #[test]
    fn render_empty_state() {
        let store = NotificationStore::new();
        let text = NotificationPanel::new().render(&store, Utc::now());
        assert!(text.starts_with("Notifications\n"));
        assert!(text.contains(EMPTY_TEXT));
    }

    #[test]
    fn render_lists_entries_with_actions() {
        let mut store = NotificationStore::new();
        store.add(NewNotification::warning("Quota", "80% used"));
        let text = NotificationPanel::new().render(&store, Utc::now());

        assert!(text.contains("(1 unread)"));
        assert!(text.contains("[mark all read] [clear all]"));
        assert!(text.contains("  1. * [warning] Quota"));
        assert!(text.contains("80% used"));
    }

    #[test]
    fn toggle_and_close() {
        let mut panel = NotificationPanel::new();
        assert!(!panel.is_open());
        panel.toggle();
        assert!(panel.is_open());
        panel.close();
        assert!(!panel.is_open());
    }
}
