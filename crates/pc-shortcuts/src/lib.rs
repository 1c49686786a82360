//! # pc-shortcuts
//!
//! Keyboard shortcut dispatch for Project Console.
//!
//! A [`ShortcutDispatcher`] holds an ordered list of [`Shortcut`]s. Each
//! incoming [`KeyEvent`] runs the first shortcut whose [`Chord`] matches
//! exactly (key compared case-insensitively, all four modifier flags
//! equal). Events fired while focus is in a text field are ignored.
//!
//! ```rust
//! use pc_shortcuts::{Chord, Dispatch, KeyEvent, ShortcutDispatcher};
//!
//! let mut shortcuts = ShortcutDispatcher::new()
//!     .bind(Chord::parse("ctrl+n").unwrap(), "Create new project", |count: &mut u32| *count += 1);
//!
//! let mut created = 0;
//! let event = KeyEvent::from_chord(&Chord::parse("ctrl+N").unwrap());
//! assert!(matches!(shortcuts.dispatch(&event, &mut created), Dispatch::Handled { .. }));
//! assert_eq!(created, 1);
//! ```

pub mod chord;
pub mod dispatcher;
pub mod error;

pub use chord::{Chord, Modifiers};
pub use dispatcher::{default_help, Dispatch, Focus, KeyEvent, Shortcut, ShortcutDispatcher};
pub use error::ShortcutError;
