// config.rs — Console configuration.
//
// Read from `<project>/.pc/console.toml`. Every field has a default, so a
// missing file or a partial file is fine; a malformed file is an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::NotifyError;
use crate::store::NotificationStore;
use crate::toast::{JsonlSink, ToastDispatcher};

/// Directory under the project root that holds console state.
pub const CONSOLE_DIR: &str = ".pc";

/// Top-level configuration from `.pc/console.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub toast: ToastConfig,
}

/// Notification list settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Retention cap; oldest entries are dropped beyond it. Absent means unbounded.
    #[serde(default)]
    pub max_entries: Option<usize>,

    /// Start the session with the sample notifications.
    #[serde(default)]
    pub seed_samples: bool,
}

/// Toast channel settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToastConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,

    /// Also append every toast to this JSONL file (relative to the project root).
    #[serde(default)]
    pub log_path: Option<PathBuf>,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            duration_ms: default_duration_ms(),
            log_path: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_duration_ms() -> u64 {
    4000
}

impl ToastConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl ConsoleConfig {
    /// Default config file location for a project.
    pub fn path_for_project(project_root: impl AsRef<Path>) -> PathBuf {
        project_root.as_ref().join(CONSOLE_DIR).join("console.toml")
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, NotifyError> {
        let content = std::fs::read_to_string(path).map_err(|source| NotifyError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| NotifyError::ConfigError {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load config, returning defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self, NotifyError> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Load `<project_root>/.pc/console.toml`, or defaults.
    pub fn for_project(project_root: impl AsRef<Path>) -> Result<Self, NotifyError> {
        Self::load_or_default(&Self::path_for_project(project_root))
    }

    /// Build the session's store from this config.
    ///
    /// Relative toast log paths resolve against `project_root`. Callers add
    /// their own display sinks afterwards via [`NotificationStore::toasts_mut`].
    pub fn build_store(&self, project_root: impl AsRef<Path>) -> NotificationStore {
        let mut toasts = ToastDispatcher::new().with_duration(self.toast.duration());
        toasts.set_enabled(self.toast.enabled);
        if let Some(log_path) = &self.toast.log_path {
            let path = project_root.as_ref().join(log_path);
            tracing::debug!("toast log: {}", path.display());
            toasts.add_sink(Box::new(JsonlSink::new(path)));
        }

        let mut store =
            NotificationStore::with_dispatcher(toasts).with_max_entries(self.store.max_entries);
        if self.store.seed_samples {
            store.seed(crate::notification::sample_notifications(chrono::Utc::now()));
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NewNotification;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.store.max_entries, None);
        assert!(!config.store.seed_samples);
        assert!(config.toast.enabled);
        assert_eq!(config.toast.duration(), Duration::from_millis(4000));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("console.toml");
        fs::write(&path, "[store]\nmax_entries = 50\n").unwrap();

        let config = ConsoleConfig::load(&path).unwrap();
        assert_eq!(config.store.max_entries, Some(50));
        assert_eq!(config.toast, ToastConfig::default());
    }

    #[test]
    fn full_file_parses() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("console.toml");
        fs::write(
            &path,
            r#"
[store]
max_entries = 200
seed_samples = true

[toast]
enabled = false
duration_ms = 2500
log_path = ".pc/toasts.jsonl"
"#,
        )
        .unwrap();

        let config = ConsoleConfig::load(&path).unwrap();
        assert!(config.store.seed_samples);
        assert!(!config.toast.enabled);
        assert_eq!(config.toast.duration_ms, 2500);
        assert_eq!(config.toast.log_path, Some(PathBuf::from(".pc/toasts.jsonl")));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = ConsoleConfig::for_project(dir.path()).unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("console.toml");
        fs::write(&path, "[store]\nmax_entries = \"lots\"\n").unwrap();

        let err = ConsoleConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, NotifyError::ConfigError { .. }));
    }

    #[test]
    fn build_store_applies_settings() {
        let dir = tempdir().unwrap();
        let config = ConsoleConfig {
            store: StoreConfig {
                max_entries: Some(2),
                seed_samples: true,
            },
            toast: ToastConfig {
                enabled: true,
                duration_ms: 1000,
                log_path: Some(PathBuf::from(".pc/toasts.jsonl")),
            },
        };

        let mut store = config.build_store(dir.path());
        assert_eq!(store.len(), 2);
        assert_eq!(store.toasts().sink_count(), 1);
        assert_eq!(store.toasts().duration(), Duration::from_millis(1000));

        store.add(NewNotification::success("Saved", "settings stored"));
        let log = fs::read_to_string(dir.path().join(".pc/toasts.jsonl")).unwrap();
        assert!(log.contains("\"settings stored\""));
        assert!(log.contains("\"duration_ms\":1000"));
    }
}
