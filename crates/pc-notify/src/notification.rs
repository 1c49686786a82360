// notification.rs — The Notification record and its creation input.
//
// A Notification is the only entity in the console with lifecycle
// semantics: it is created unread, may be marked read, and stays in the
// list until it is explicitly cleared. There is no automatic expiry.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NotifyError;

/// The kind of a notification.
///
/// Controls icon, color, and toast variant only. No store behavior
/// branches on the kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    /// All kinds, in display order.
    pub const ALL: [NotificationKind; 4] = [
        NotificationKind::Info,
        NotificationKind::Success,
        NotificationKind::Warning,
        NotificationKind::Error,
    ];

    /// Title used for a stand-alone toast of this kind when none is given.
    pub fn default_title(&self) -> &'static str {
        match self {
            NotificationKind::Info => "Info",
            NotificationKind::Success => "Success",
            NotificationKind::Warning => "Warning",
            NotificationKind::Error => "Error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Info => write!(f, "info"),
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Error => write!(f, "error"),
        }
    }
}

impl FromStr for NotificationKind {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(NotificationKind::Info),
            "success" => Ok(NotificationKind::Success),
            "warning" => Ok(NotificationKind::Warning),
            "error" => Ok(NotificationKind::Error),
            _ => Err(NotifyError::UnknownKind(s.to_string())),
        }
    }
}

/// A notification entry held by the [`crate::NotificationStore`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    /// Unique identifier, assigned at creation.
    pub id: Uuid,

    #[serde(rename = "type")]
    pub kind: NotificationKind,

    /// Short human-readable headline.
    pub title: String,

    /// Longer human-readable body.
    pub message: String,

    /// Creation time. Never changes after creation.
    pub timestamp: DateTime<Utc>,

    /// Whether the user has seen this entry. Only moves false → true.
    pub read: bool,

    /// Optional link, display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

impl Notification {
    /// Materialize a new, unread notification from its creation input.
    pub(crate) fn from_new(new: NewNotification, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: new.kind,
            title: new.title,
            message: new.message,
            timestamp,
            read: false,
            action_url: new.action_url,
        }
    }
}

/// Input to [`crate::NotificationStore::add`].
///
/// Everything a caller controls; the store fills in id, timestamp, and the
/// read flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub action_url: Option<String>,
}

impl NewNotification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            action_url: None,
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, title, message)
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title, message)
    }

    /// Attach a display-only link.
    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }
}

/// The sample entries a fresh console session starts with when seeding is
/// enabled, relative to `now`. Returned newest first.
pub fn sample_notifications(now: DateTime<Utc>) -> Vec<Notification> {
    let sample = |new: NewNotification, age: Duration, read: bool| {
        let mut n = Notification::from_new(new, now - age);
        n.read = read;
        n
    };

    vec![
        sample(
            NewNotification::info(
                "New project invitation",
                "You were invited as a member of the Web Application project.",
            ),
            Duration::minutes(30),
            false,
        ),
        sample(
            NewNotification::success(
                "Deployment complete",
                "The API Server project was deployed successfully.",
            ),
            Duration::hours(2),
            false,
        ),
        sample(
            NewNotification::warning(
                "Permission expiring",
                "The Mobile App project's API key expires in 7 days.",
            ),
            Duration::hours(24),
            true,
        ),
    ]
}
