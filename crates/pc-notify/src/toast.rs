// toast.rs — Ephemeral toast events and their dispatch.
//
// Every `add` on the store produces two independent effects: a durable
// list entry and a transient toast. This module owns the second one.
// Sinks (tracing, a JSONL file, a terminal stream) receive each toast;
// a failing sink is logged and skipped, it never blocks the others and
// never affects the notification list.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::NotifyError;
use crate::notification::{Notification, NotificationKind};

/// How long a toast stays on screen unless configured otherwise.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(4000);

/// Visual treatment of a toast.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    Default,
    Destructive,
}

impl From<NotificationKind> for ToastVariant {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Error => ToastVariant::Destructive,
            _ => ToastVariant::Default,
        }
    }
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    pub duration: Duration,
}

impl Toast {
    /// The toast that accompanies a newly added notification.
    pub fn for_notification(notification: &Notification, duration: Duration) -> Self {
        Self {
            title: notification.title.clone(),
            description: notification.message.clone(),
            variant: notification.kind.into(),
            duration,
        }
    }

    /// A stand-alone toast titled with the kind's default title.
    pub fn for_kind(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            title: kind.default_title().to_string(),
            description: message.into(),
            variant: kind.into(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Wire shape of a toast in the JSONL log.
#[derive(Debug, Serialize)]
struct ToastRecord<'a> {
    title: &'a str,
    description: &'a str,
    variant: ToastVariant,
    duration_ms: u64,
}

impl<'a> From<&'a Toast> for ToastRecord<'a> {
    fn from(toast: &'a Toast) -> Self {
        Self {
            title: &toast.title,
            description: &toast.description,
            variant: toast.variant,
            duration_ms: toast.duration.as_millis() as u64,
        }
    }
}

/// Something that can display a toast.
pub trait ToastSink: Send {
    /// Show a toast. Errors are logged by the dispatcher, never propagated.
    fn show(&self, toast: &Toast) -> Result<(), NotifyError>;
}

/// Emits toasts as `tracing` events.
#[derive(Debug, Default)]
pub struct TracingSink;

impl ToastSink for TracingSink {
    fn show(&self, toast: &Toast) -> Result<(), NotifyError> {
        match toast.variant {
            ToastVariant::Destructive => tracing::warn!(
                title = %toast.title,
                duration_ms = toast.duration.as_millis() as u64,
                "toast: {}",
                toast.description
            ),
            ToastVariant::Default => tracing::info!(
                title = %toast.title,
                duration_ms = toast.duration.as_millis() as u64,
                "toast: {}",
                toast.description
            ),
        }
        Ok(())
    }
}

/// Appends toasts as JSON lines to a file.
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ToastSink for JsonlSink {
    fn show(&self, toast: &Toast) -> Result<(), NotifyError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| NotifyError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| NotifyError::IoError {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(&ToastRecord::from(toast))?;
        writeln!(file, "{}", json).map_err(|source| NotifyError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}

/// Writes each toast as one human-readable line to a stream.
pub struct TerminalSink<W: Write + Send> {
    out: Mutex<W>,
    label: String,
}

impl<W: Write + Send> TerminalSink<W> {
    /// `label` names the stream in error messages (e.g. "stderr").
    pub fn new(out: W, label: impl Into<String>) -> Self {
        Self {
            out: Mutex::new(out),
            label: label.into(),
        }
    }

    /// Take the underlying writer back.
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> ToastSink for TerminalSink<W> {
    fn show(&self, toast: &Toast) -> Result<(), NotifyError> {
        let marker = match toast.variant {
            ToastVariant::Destructive => "!!",
            ToastVariant::Default => "--",
        };
        let mut out = self
            .out
            .lock()
            .map_err(|_| NotifyError::SinkError(format!("{} writer poisoned", self.label)))?;
        writeln!(out, "[toast {}] {}: {}", marker, toast.title, toast.description).map_err(
            |source| NotifyError::IoError {
                path: self.label.clone(),
                source,
            },
        )
    }
}

/// Fans toasts out to every registered sink.
pub struct ToastDispatcher {
    sinks: Vec<Box<dyn ToastSink>>,
    enabled: bool,
    duration: Duration,
}

impl ToastDispatcher {
    /// A dispatcher with no sinks and the default duration.
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            enabled: true,
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Turn toast delivery on or off without dropping sinks.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn add_sink(&mut self, sink: Box<dyn ToastSink>) {
        self.sinks.push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Deliver a toast to all sinks.
    pub fn dispatch(&self, toast: &Toast) {
        if !self.enabled {
            return;
        }
        for sink in &self.sinks {
            if let Err(e) = sink.show(toast) {
                tracing::warn!("toast sink error: {}", e);
            }
        }
    }

    /// Build and deliver the toast for a notification that was just stored.
    pub fn announce(&self, notification: &Notification) {
        self.dispatch(&Toast::for_notification(notification, self.duration));
    }
}

impl Default for ToastDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
