// chord.rs — Key + modifier combinations.
//
// A chord is written as modifiers and a key joined by `+`, e.g. `ctrl+n`,
// `Shift+?`, `ctrl+shift+a`, `Escape`. The key itself may be `+`
// (`ctrl++`). Modifier names are case-insensitive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShortcutError;

/// The four modifier flags a key event carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    pub fn is_empty(&self) -> bool {
        *self == Modifiers::NONE
    }

    fn set(&mut self, name: &str) -> bool {
        match name.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => self.ctrl = true,
            "alt" | "option" => self.alt = true,
            "shift" => self.shift = true,
            "meta" | "cmd" | "super" => self.meta = true,
            _ => return false,
        }
        true
    }
}

/// A key plus the exact modifier set that must accompany it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chord {
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl Chord {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// A bare key with no modifiers.
    pub fn key(key: impl Into<String>) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub fn ctrl(key: impl Into<String>) -> Self {
        Self::new(key, Modifiers::CTRL)
    }

    /// Exact match: same key ignoring case, identical modifier flags.
    pub fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.modifiers == modifiers && self.key.to_lowercase() == key.to_lowercase()
    }

    pub fn parse(s: &str) -> Result<Self, ShortcutError> {
        let s = s.trim();
        let (mods, key) = if s == "+" {
            ("", "+")
        } else if let Some(rest) = s.strip_suffix("++") {
            (rest, "+")
        } else {
            s.rsplit_once('+').unwrap_or(("", s))
        };

        if key.is_empty() {
            return Err(ShortcutError::EmptyKey(s.to_string()));
        }

        let mut modifiers = Modifiers::NONE;
        for name in mods.split('+').map(str::trim).filter(|m| !m.is_empty()) {
            if !modifiers.set(name) {
                return Err(ShortcutError::UnknownModifier {
                    chord: s.to_string(),
                    modifier: name.to_string(),
                });
            }
        }

        Ok(Self::new(key, modifiers))
    }
}

impl FromStr for Chord {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chord::parse(s)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.modifiers;
        if m.ctrl {
            write!(f, "Ctrl+")?;
        }
        if m.alt {
            write!(f, "Alt+")?;
        }
        if m.shift {
            write!(f, "Shift+")?;
        }
        if m.meta {
            write!(f, "Meta+")?;
        }
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => write!(f, "{}", c.to_uppercase()),
            _ => write!(f, "{}", self.key),
        }
    }
}
