//! # pc-notify
//!
//! Notification handling for Project Console.
//!
//! A console session owns exactly one [`NotificationStore`]: an in-memory,
//! newest-first list of [`Notification`]s with a derived unread count.
//! Every [`NotificationStore::add`] has two independent effects: the durable
//! list entry and an ephemeral [`Toast`] delivered through a
//! [`ToastDispatcher`].
//!
//! ## Key components
//!
//! - [`NotificationStore`] — the list and its only mutation operations
//! - [`ToastDispatcher`] / [`ToastSink`] — toast fan-out (tracing, JSONL, terminal)
//! - [`NotificationPanel`] — view model and click handlers over the store
//! - [`ConsoleConfig`] — TOML configuration for the store and toasts
//!
//! ## Quick Example
//!
//! ```rust
//! use pc_notify::{NewNotification, NotificationStore};
//!
//! let mut store = NotificationStore::new();
//! let id = store.add(NewNotification::success("Project created", "web-app is ready"));
//! assert_eq!(store.unread_count(), 1);
//! store.mark_as_read(id);
//! assert_eq!(store.unread_count(), 0);
//! ```

pub mod config;
pub mod error;
pub mod notification;
pub mod panel;
pub mod store;
pub mod toast;

pub use config::{ConsoleConfig, StoreConfig, ToastConfig};
pub use error::NotifyError;
pub use notification::{sample_notifications, NewNotification, Notification, NotificationKind};
pub use panel::{NotificationPanel, PanelItem, PanelState};
pub use store::NotificationStore;
pub use toast::{
    JsonlSink, TerminalSink, Toast, ToastDispatcher, ToastSink, ToastVariant, TracingSink,
};
