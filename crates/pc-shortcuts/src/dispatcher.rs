// dispatcher.rs — Global keydown dispatch.
//
// Shortcuts are checked in registration order and the first exact match
// wins. There is no priority or conflict resolution. While focus sits in
// a text field every event is passed through untouched.

use serde::{Deserialize, Serialize};

use crate::chord::{Chord, Modifiers};

/// Where keyboard focus was when the event fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    #[default]
    Document,
    TextInput,
    TextArea,
    ContentEditable,
}

impl Focus {
    /// Text entry targets swallow shortcuts.
    pub fn is_text_entry(&self) -> bool {
        !matches!(self, Focus::Document)
    }
}

/// A keydown event as seen by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub modifiers: Modifiers,
    pub focus: Focus,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::NONE,
            focus: Focus::Document,
        }
    }

    /// The event a user produces by pressing `chord` with focus on the page.
    pub fn from_chord(chord: &Chord) -> Self {
        Self {
            key: chord.key.clone(),
            modifiers: chord.modifiers,
            focus: Focus::Document,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_focus(mut self, focus: Focus) -> Self {
        self.focus = focus;
        self
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Focus was in a text entry target; nothing ran.
    Ignored,
    /// No shortcut matched.
    Unmatched,
    /// The shortcut at `index` ran.
    Handled { index: usize },
}

impl Dispatch {
    /// Whether the host should suppress the key's default action. Every
    /// handled key is consumed; ignored and unmatched keys pass through.
    pub fn prevents_default(&self) -> bool {
        matches!(self, Dispatch::Handled { .. })
    }
}

type Callback<C> = Box<dyn FnMut(&mut C)>;

/// One registered shortcut.
pub struct Shortcut<C> {
    pub chord: Chord,
    pub description: String,
    callback: Callback<C>,
}

impl<C> Shortcut<C> {
    pub fn new(
        chord: Chord,
        description: impl Into<String>,
        callback: impl FnMut(&mut C) + 'static,
    ) -> Self {
        Self {
            chord,
            description: description.into(),
            callback: Box::new(callback),
        }
    }
}

impl<C> std::fmt::Debug for Shortcut<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shortcut")
            .field("chord", &self.chord)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Linear-scan dispatch table.
///
/// `C` is the context callbacks act on. The host owns it and lends it for
/// each dispatch, so callbacks can mutate session state without capturing
/// it.
pub struct ShortcutDispatcher<C = ()> {
    shortcuts: Vec<Shortcut<C>>,
}

impl<C> ShortcutDispatcher<C> {
    pub fn new() -> Self {
        Self {
            shortcuts: Vec::new(),
        }
    }

    pub fn register(&mut self, shortcut: Shortcut<C>) {
        tracing::debug!(chord = %shortcut.chord, "shortcut registered");
        self.shortcuts.push(shortcut);
    }

    /// Register a shortcut, builder style.
    pub fn bind(
        mut self,
        chord: Chord,
        description: impl Into<String>,
        callback: impl FnMut(&mut C) + 'static,
    ) -> Self {
        self.register(Shortcut::new(chord, description, callback));
        self
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }

    /// Index of the first shortcut matching `event`, ignoring focus.
    pub fn find(&self, event: &KeyEvent) -> Option<usize> {
        self.shortcuts
            .iter()
            .position(|s| s.chord.matches(&event.key, event.modifiers))
    }

    /// Run the first matching shortcut's callback.
    pub fn dispatch(&mut self, event: &KeyEvent, ctx: &mut C) -> Dispatch {
        if event.focus.is_text_entry() {
            tracing::trace!(key = %event.key, focus = ?event.focus, "shortcut ignored in text entry");
            return Dispatch::Ignored;
        }

        match self.find(event) {
            Some(index) => {
                let shortcut = &mut self.shortcuts[index];
                tracing::debug!(chord = %shortcut.chord, "shortcut triggered");
                (shortcut.callback)(ctx);
                Dispatch::Handled { index }
            }
            None => Dispatch::Unmatched,
        }
    }

    /// `(chord labels, description)` rows in registration order.
    ///
    /// Shortcuts sharing a description collapse into the first one's row,
    /// with their labels joined by " / ".
    pub fn help(&self) -> Vec<(String, String)> {
        let mut rows: Vec<(String, String)> = Vec::new();
        for s in &self.shortcuts {
            match rows.iter_mut().find(|(_, d)| *d == s.description) {
                Some((label, _)) => {
                    label.push_str(" / ");
                    label.push_str(&s.chord.to_string());
                }
                None => rows.push((s.chord.to_string(), s.description.clone())),
            }
        }
        rows
    }
}

impl<C> Default for ShortcutDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// The console's standard shortcut help table.
pub fn default_help() -> Vec<(&'static str, &'static str)> {
    vec![
        ("/", "Focus search"),
        ("Ctrl+N", "Create new project"),
        ("Ctrl+K", "Open command palette"),
        ("?", "Show shortcut help"),
        ("Escape", "Close dialog"),
        ("1-9", "Select sidebar project"),
        ("Tab", "Move between tabs"),
    ]
}
