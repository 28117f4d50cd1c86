//! Interactive numbered menu
//!
//! The default mode when `jot` runs without a subcommand. Reads one line
//! at a time through rustyline (line editing, in-session history), runs one
//! store operation per menu choice and reports every error inline so the
//! loop keeps going.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use jot::{parse_date, NoteStore};

use super::display;

// ─── Input ───────────────────────────────────────────────────────────────────

/// One read from the user
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Line {
    Text(String),
    /// Ctrl+C: abandon the current action
    Cancelled,
    /// Ctrl+D or end of piped input
    Closed,
}

/// Where menu input comes from
pub(crate) trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Line>;
}

/// Terminal input via rustyline
pub(crate) struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub(crate) fn new() -> Result<Self> {
        let config = rustyline::Config::builder()
            .max_history_size(200)?
            .auto_add_history(false)
            .build();
        Ok(Self {
            editor: DefaultEditor::with_config(config)?,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<Line> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Line::Text(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Line::Cancelled),
            Err(ReadlineError::Eof) => Ok(Line::Closed),
            Err(e) => Err(e.into()),
        }
    }
}

// ─── Actions ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuAction {
    ViewAll,
    ViewByDate,
    ViewById,
    Add,
    Edit,
    Delete,
    Quit,
    Help,
}

impl MenuAction {
    /// Menu entries in display order, numbered from 1
    const LISTED: [(MenuAction, &'static str); 7] = [
        (MenuAction::ViewAll, "View all notes"),
        (MenuAction::ViewByDate, "View notes since a date"),
        (MenuAction::ViewById, "View a note by ID"),
        (MenuAction::Add, "Add a note"),
        (MenuAction::Edit, "Edit a note"),
        (MenuAction::Delete, "Delete a note"),
        (MenuAction::Quit, "Quit"),
    ];

    /// Parse a menu choice: its number or a keyword
    pub(crate) fn parse(input: &str) -> Option<Self> {
        let input = input.trim().to_ascii_lowercase();
        if let Ok(n) = input.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| Self::LISTED.get(i).map(|(action, _)| *action));
        }
        match input.as_str() {
            "list" | "all" => Some(MenuAction::ViewAll),
            "since" | "date" => Some(MenuAction::ViewByDate),
            "show" | "view" => Some(MenuAction::ViewById),
            "add" | "new" => Some(MenuAction::Add),
            "edit" => Some(MenuAction::Edit),
            "delete" | "del" | "rm" => Some(MenuAction::Delete),
            "quit" | "exit" | "q" => Some(MenuAction::Quit),
            "help" | "?" => Some(MenuAction::Help),
            _ => None,
        }
    }
}

fn write_menu(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Choose an action:")?;
    for (i, (_, label)) in MenuAction::LISTED.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, label)?;
    }
    Ok(())
}

// ─── Loop ────────────────────────────────────────────────────────────────────

/// What the loop does after an action
enum Flow {
    Continue,
    Exit,
}

/// Run the interactive menu until the user quits or input closes
pub(crate) fn run_menu(
    store: &mut NoteStore,
    input: &mut impl LineSource,
    out: &mut impl Write,
) -> Result<()> {
    let _span = tracing::info_span!("menu", path = %store.path().display()).entered();

    if let Some(e) = store.load_error() {
        writeln!(out, "{}", display::load_warning(e))?;
    }

    loop {
        write_menu(out)?;
        let choice = match input.read_line("Enter action number: ")? {
            Line::Text(t) => t,
            Line::Cancelled => continue,
            Line::Closed => break,
        };
        if choice.trim().is_empty() {
            continue;
        }

        let Some(action) = MenuAction::parse(&choice) else {
            writeln!(out, "Invalid choice. Please pick one of the listed actions.")?;
            continue;
        };
        tracing::debug!(?action, "Menu action");

        let flow = match run_action(store, action, input, out) {
            Ok(flow) => flow,
            Err(e) => {
                tracing::warn!(error = %e, ?action, "Menu action failed");
                writeln!(out, "An error occurred: {:#}", e)?;
                Flow::Continue
            }
        };

        if let Some(e) = store.take_save_error() {
            writeln!(out, "{}", display::save_warning(&e))?;
        }
        if let Flow::Exit = flow {
            break;
        }
    }
    Ok(())
}

fn run_action(
    store: &mut NoteStore,
    action: MenuAction,
    input: &mut impl LineSource,
    out: &mut impl Write,
) -> Result<Flow> {
    match action {
        MenuAction::ViewAll => {
            display::write_notes(out, &store.view_all(None), None)?;
        }
        MenuAction::ViewByDate => {
            let Some(date) = prompt_date(input, out)? else {
                return Ok(Flow::Continue);
            };
            display::write_notes(out, &store.view_all(Some(date)), Some(date))?;
        }
        MenuAction::ViewById => {
            let Some(id) = prompt_id(input, out, "Enter note ID: ")? else {
                return Ok(Flow::Continue);
            };
            match store.view_by_id(id) {
                Ok(note) => display::write_note(out, note)?,
                Err(e) => writeln!(out, "{}.", e)?,
            }
        }
        MenuAction::Add => {
            let Some(title) = prompt_text(input, out, "Enter note title: ")? else {
                return Ok(Flow::Continue);
            };
            let Some(body) = prompt_text(input, out, "Enter note body: ")? else {
                return Ok(Flow::Continue);
            };
            let note = store.add(title, body);
            writeln!(out, "Note added:")?;
            display::write_note(out, &note)?;
        }
        MenuAction::Edit => {
            let Some(id) = prompt_id(input, out, "Enter ID of the note to edit: ")? else {
                return Ok(Flow::Continue);
            };
            // Check first so the user isn't asked for text that goes nowhere
            if let Err(e) = store.view_by_id(id) {
                writeln!(out, "{}.", e)?;
                return Ok(Flow::Continue);
            }
            let Some(title) = prompt_text(input, out, "Enter new title: ")? else {
                return Ok(Flow::Continue);
            };
            let Some(body) = prompt_text(input, out, "Enter new body: ")? else {
                return Ok(Flow::Continue);
            };
            match store.edit(id, title, body) {
                Ok(note) => {
                    writeln!(out, "Note edited:")?;
                    display::write_note(out, &note)?;
                }
                Err(e) if e.is_not_found() => writeln!(out, "{}.", e)?,
                Err(e) => return Err(e.into()),
            }
        }
        MenuAction::Delete => {
            let Some(id) = prompt_id(input, out, "Enter ID of the note to delete: ")? else {
                return Ok(Flow::Continue);
            };
            match store.delete(id) {
                Ok(removed) => writeln!(out, "Note deleted: ID {}", removed.id)?,
                Err(e) if e.is_not_found() => writeln!(out, "{}.", e)?,
                Err(e) => return Err(e.into()),
            }
        }
        MenuAction::Help => {}
        MenuAction::Quit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}

// ─── Prompts ─────────────────────────────────────────────────────────────────

/// Free text; `None` when the user cancels or input closes
fn prompt_text(
    input: &mut impl LineSource,
    out: &mut impl Write,
    prompt: &str,
) -> Result<Option<String>> {
    match input.read_line(prompt)? {
        Line::Text(t) => Ok(Some(t.trim_end_matches(['\r', '\n']).to_string())),
        Line::Cancelled | Line::Closed => {
            writeln!(out, "Cancelled.")?;
            Ok(None)
        }
    }
}

/// Numeric note id, re-prompting until valid
fn prompt_id(
    input: &mut impl LineSource,
    out: &mut impl Write,
    prompt: &str,
) -> Result<Option<u32>> {
    loop {
        let Some(raw) = prompt_text(input, out, prompt)? else {
            return Ok(None);
        };
        match raw.trim().parse::<u32>() {
            Ok(id) => return Ok(Some(id)),
            Err(_) => writeln!(out, "Error: note ID must be a number.")?,
        }
    }
}

/// `YYYY-MM-DD` date, re-prompting until valid
fn prompt_date(input: &mut impl LineSource, out: &mut impl Write) -> Result<Option<NaiveDate>> {
    loop {
        let Some(raw) = prompt_text(input, out, "Show notes since (YYYY-MM-DD): ")? else {
            return Ok(None);
        };
        match parse_date(&raw) {
            Ok(date) => return Ok(Some(date)),
            Err(_) => writeln!(out, "Error: date must look like 2024-01-31.")?,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
