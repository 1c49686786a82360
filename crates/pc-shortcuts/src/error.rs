// error.rs — Error types for shortcut definitions.

use thiserror::Error;

/// Errors that can occur while parsing a shortcut chord.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShortcutError {
    /// The chord has no key after its modifiers (e.g. `"ctrl+"`).
    #[error("chord '{0}' has no key")]
    EmptyKey(String),

    /// A modifier name that isn't ctrl, alt, shift or meta.
    #[error("unknown modifier '{modifier}' in chord '{chord}'")]
    UnknownModifier { chord: String, modifier: String },
}
