// run.rs — Drive one console session from a command script.
//
// The session owns the single notification store for its lifetime and
// lends it to every consumer: script commands, the panel, and shortcut
// callbacks. Commands, one per line:
//
//   add <kind> <title> | <message> [| <url>]
//   read <n> | read-all | clear <n> | clear-all
//   show | count | open | close
//   key <chord> [@input|@textarea|@editable]
//
// `<n>` is the 1-based position in the current list. Blank lines and
// lines starting with `#` are skipped.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context};
use chrono::Utc;
use pc_notify::{
    ConsoleConfig, NewNotification, NotificationKind, NotificationPanel, NotificationStore,
    TerminalSink,
};
use pc_shortcuts::{Chord, Dispatch, Focus, KeyEvent, Modifiers, ShortcutDispatcher};
use uuid::Uuid;

/// Everything shortcut callbacks may act on.
pub struct Console {
    pub store: NotificationStore,
    pub panel: NotificationPanel,
    projects_created: usize,
    help_requested: bool,
}

impl Console {
    pub fn new(store: NotificationStore) -> Self {
        Self {
            store,
            panel: NotificationPanel::new(),
            projects_created: 0,
            help_requested: false,
        }
    }

    /// Emitter for the "new project" action.
    fn create_project(&mut self) {
        self.projects_created += 1;
        self.store.add(NewNotification::success(
            "Project created",
            format!("project-{} is ready", self.projects_created),
        ));
    }
}

/// The console's built-in shortcut bindings.
pub fn console_shortcuts() -> ShortcutDispatcher<Console> {
    ShortcutDispatcher::new()
        .bind(Chord::ctrl("n"), "Create new project", |c: &mut Console| {
            c.create_project()
        })
        .bind(
            Chord::new(
                "a",
                Modifiers {
                    ctrl: true,
                    shift: true,
                    ..Modifiers::NONE
                },
            ),
            "Mark all notifications read",
            |c: &mut Console| c.panel.mark_all(&mut c.store),
        )
        .bind(Chord::key("?"), "Show shortcut help", |c: &mut Console| {
            c.help_requested = true
        })
        .bind(
            Chord::new("?", Modifiers::SHIFT),
            "Show shortcut help",
            |c: &mut Console| c.help_requested = true,
        )
        .bind(Chord::key("Escape"), "Close notification panel", |c: &mut Console| {
            c.panel.close()
        })
}

/// A script-driven console session.
pub struct Session {
    console: Console,
    shortcuts: ShortcutDispatcher<Console>,
}

impl Session {
    pub fn new(store: NotificationStore) -> Self {
        Self {
            console: Console::new(store),
            shortcuts: console_shortcuts(),
        }
    }

    pub fn store(&self) -> &NotificationStore {
        &self.console.store
    }

    pub fn panel(&self) -> &NotificationPanel {
        &self.console.panel
    }

    /// Execute one script line, writing any output to `out`.
    pub fn execute_line(&mut self, line: &str, out: &mut impl Write) -> anyhow::Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match cmd {
            "add" => self.add(rest, out),
            "read" => {
                let id = self.resolve(rest)?;
                self.console.panel.click(&mut self.console.store, id);
                Ok(())
            }
            "read-all" => {
                self.console.panel.mark_all(&mut self.console.store);
                Ok(())
            }
            "clear" => {
                let id = self.resolve(rest)?;
                self.console.panel.dismiss(&mut self.console.store, id);
                Ok(())
            }
            "clear-all" => {
                self.console.panel.clear_all(&mut self.console.store);
                Ok(())
            }
            "show" => {
                write!(out, "{}", self.console.panel.render(&self.console.store, Utc::now()))?;
                Ok(())
            }
            "count" => {
                writeln!(
                    out,
                    "unread: {} / total: {}",
                    self.console.store.unread_count(),
                    self.console.store.len()
                )?;
                Ok(())
            }
            "open" => {
                if !self.console.panel.is_open() {
                    self.console.panel.toggle();
                }
                Ok(())
            }
            "close" => {
                self.console.panel.close();
                Ok(())
            }
            "key" => self.key(rest, out),
            other => bail!("unknown command '{}'", other),
        }
    }

    fn add(&mut self, rest: &str, out: &mut impl Write) -> anyhow::Result<()> {
        let (kind, rest) = rest
            .split_once(char::is_whitespace)
            .context("usage: add <kind> <title> | <message> [| <url>]")?;
        let kind: NotificationKind = kind.parse()?;

        let mut parts = rest.split('|').map(str::trim);
        let title = parts.next().unwrap_or_default();
        if title.is_empty() {
            bail!("title must not be empty");
        }
        let message = parts.next().unwrap_or_default();

        let mut new = NewNotification::new(kind, title, message);
        if let Some(url) = parts.next().filter(|u| !u.is_empty()) {
            new = new.with_action_url(url);
        }

        let id = self.console.store.add(new);
        writeln!(out, "added {}", id)?;
        Ok(())
    }

    fn key(&mut self, rest: &str, out: &mut impl Write) -> anyhow::Result<()> {
        let mut words = rest.split_whitespace();
        let chord: Chord = words.next().context("usage: key <chord> [@focus]")?.parse()?;
        let focus = match words.next() {
            None => Focus::Document,
            Some("@input") => Focus::TextInput,
            Some("@textarea") => Focus::TextArea,
            Some("@editable") => Focus::ContentEditable,
            Some(other) => bail!("unknown focus '{}'", other),
        };

        let event = KeyEvent::from_chord(&chord).with_focus(focus);
        match self.shortcuts.dispatch(&event, &mut self.console) {
            Dispatch::Handled { .. } => writeln!(out, "key {}: handled", chord)?,
            Dispatch::Unmatched => writeln!(out, "key {}: no shortcut", chord)?,
            Dispatch::Ignored => writeln!(out, "key {}: ignored (text entry)", chord)?,
        }

        if std::mem::take(&mut self.console.help_requested) {
            for (label, description) in self.shortcuts.help() {
                writeln!(out, "  {:<14} {}", label, description)?;
            }
        }
        Ok(())
    }

    /// Map a 1-based list position to an id.
    fn resolve(&self, arg: &str) -> anyhow::Result<Uuid> {
        let n: usize = arg
            .parse()
            .with_context(|| format!("expected a list position, got '{}'", arg))?;
        let len = self.console.store.len();
        if n == 0 || n > len {
            bail!("position {} out of range (list has {} entries)", n, len);
        }
        Ok(self.console.store.notifications()[n - 1].id)
    }
}

/// Build the session store from config, with toasts echoed to stderr.
pub fn session_store(config: &ConsoleConfig, project_root: &Path) -> NotificationStore {
    let mut store = config.build_store(project_root);
    store
        .toasts_mut()
        .add_sink(Box::new(TerminalSink::new(std::io::stderr(), "stderr")));
    store
}

pub fn execute(script: &Path, config: &ConsoleConfig, project_root: &Path) -> anyhow::Result<()> {
    let mut session = Session::new(session_store(config, project_root));
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if script == Path::new("-") {
        let stdin = std::io::stdin();
        run_lines(&mut session, stdin.lock(), &mut out)
    } else {
        let file = std::fs::File::open(script)
            .with_context(|| format!("opening script {}", script.display()))?;
        run_lines(&mut session, std::io::BufReader::new(file), &mut out)
    }
}

/// Execute every line of `input`, stopping at the first failing command.
pub fn run_lines(
    session: &mut Session,
    input: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    for (i, line) in input.lines().enumerate() {
        let line = line.context("reading script")?;
        session
            .execute_line(&line, out)
            .with_context(|| format!("line {}: {}", i + 1, line.trim()))?;
    }
    tracing::info!(
        total = session.store().len(),
        unread = session.store().unread_count(),
        panel_open = session.panel().is_open(),
        "session finished"
    );
    Ok(())
}
