//! One-shot note commands
//!
//! `list`, `show`, `add`, `edit` and `delete` run a single store operation
//! and exit. The interactive menu reaches the same operations through
//! `cli::menu`.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use jot::{NoteStore, StoreError};

use crate::cli::display;
use crate::cli::{Cli, ExitCode};

/// List notes, optionally only those written on or after `since`
pub(crate) fn cmd_list(cli: &Cli, store: &NoteStore, since: Option<NaiveDate>) -> Result<()> {
    let _span = tracing::info_span!("cmd_list", since = ?since).entered();
    let notes = store.view_all(since);

    if cli.json {
        return display::print_notes_json(&notes);
    }
    let mut stdout = std::io::stdout().lock();
    display::write_notes(&mut stdout, &notes, since)?;
    Ok(())
}

/// Show a single note
pub(crate) fn cmd_show(cli: &Cli, store: &NoteStore, id: u32) -> Result<()> {
    let _span = tracing::info_span!("cmd_show", id).entered();
    let note = match store.view_by_id(id) {
        Ok(n) => n,
        Err(e) => exit_not_found(e),
    };

    if cli.json {
        return display::print_note_json(note);
    }
    display::write_note(&mut std::io::stdout().lock(), note)?;
    Ok(())
}

/// Add a note and print it
pub(crate) fn cmd_add(cli: &Cli, store: &mut NoteStore, title: &str, body: &str) -> Result<()> {
    let _span = tracing::info_span!("cmd_add").entered();
    let note = store.add(title, body);
    check_saved(store)?;

    if cli.json {
        return display::print_note_json(&note);
    }
    if !cli.quiet {
        println!("Note added:");
        display::write_note(&mut std::io::stdout().lock(), &note)?;
    }
    Ok(())
}

/// Replace a note's title and body
pub(crate) fn cmd_edit(
    cli: &Cli,
    store: &mut NoteStore,
    id: u32,
    title: &str,
    body: &str,
) -> Result<()> {
    let _span = tracing::info_span!("cmd_edit", id).entered();
    let note = match store.edit(id, title, body) {
        Ok(n) => n,
        Err(e) if e.is_not_found() => exit_not_found(e),
        Err(e) => return Err(e.into()),
    };
    check_saved(store)?;

    if cli.json {
        return display::print_note_json(&note);
    }
    if !cli.quiet {
        println!("Note edited:");
        display::write_note(&mut std::io::stdout().lock(), &note)?;
    }
    Ok(())
}

/// Delete a note; later notes move up one id
pub(crate) fn cmd_delete(cli: &Cli, store: &mut NoteStore, id: u32) -> Result<()> {
    let _span = tracing::info_span!("cmd_delete", id).entered();
    let removed = match store.delete(id) {
        Ok(n) => n,
        Err(e) if e.is_not_found() => exit_not_found(e),
        Err(e) => return Err(e.into()),
    };
    check_saved(store)?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "deleted": display::note_json(&removed),
                "remaining": store.len(),
            }))?
        );
    } else if !cli.quiet {
        println!("Note deleted: ID {}", removed.id);
    }
    Ok(())
}

/// A one-shot process exits right after the command, so an unsaved change is lost
fn check_saved(store: &mut NoteStore) -> Result<()> {
    match store.take_save_error() {
        Some(e) => Err(e).context("Change was not saved"),
        None => Ok(()),
    }
}

fn exit_not_found(e: StoreError) -> ! {
    eprintln!("{}", e);
    std::process::exit(ExitCode::NotFound as i32);
}
