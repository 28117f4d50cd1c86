//! JSON-file note store
//!
//! `NoteStore` owns the ordered list of notes and the file backing it.
//! Every mutating operation writes the whole list back to disk before
//! returning, so memory and disk never drift apart.
//!
//! ## Ids
//!
//! Ids are positional: the n-th note has id n. `add` appends with
//! `len + 1`, `delete` renumbers everything after the removed note.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound};
use thiserror::Error;

use crate::note::{Note, NoteRecord};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Note with ID {0} not found")]
    NotFound(u32),
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to save {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is corrupt or has an invalid format: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} is invalid: {}", .path.display(), .reason)]
    Invalid { path: PathBuf, reason: String },
    #[error("Failed to encode notes: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    /// True for the "no such id" case, which callers usually report softly
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// In-memory notes plus the JSON file they live in
pub struct NoteStore {
    path: PathBuf,
    notes: Vec<Note>,
    /// Error swallowed while opening (store started empty)
    load_error: Option<StoreError>,
    /// Last save failure not yet collected by the caller
    save_error: Option<StoreError>,
}

impl NoteStore {
    /// Open the store at `path`, starting empty if the file is missing or unreadable.
    ///
    /// Corrupt files are not fatal: the error is logged and kept for
    /// [`NoteStore::load_error`], and the store starts with no notes. The
    /// file itself is left alone until the next save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let _span = tracing::debug_span!("store_open", path = %path.display()).entered();

        let (notes, load_error) = match Self::load(&path) {
            Ok(notes) => (notes, None),
            Err(e) => {
                tracing::warn!(error = %e, "Starting with an empty note list");
                (Vec::new(), Some(e))
            }
        };

        tracing::debug!(count = notes.len(), "Notes loaded");
        Self {
            path,
            notes,
            load_error,
            save_error: None,
        }
    }

    /// Read notes from `path`.
    ///
    /// A missing file is an empty list. Records must match the on-disk schema
    /// exactly and ids must be positive and unique. Unique ids with gaps are
    /// renumbered to `1..=n` in file order.
    pub fn load(path: &Path) -> Result<Vec<Note>, StoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No notes file yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        let records: Vec<NoteRecord> =
            serde_json::from_str(&content).map_err(|e| StoreError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if record.note_id == 0 {
                return Err(StoreError::Invalid {
                    path: path.to_path_buf(),
                    reason: "note_id must be a positive integer".into(),
                });
            }
            if !seen.insert(record.note_id) {
                return Err(StoreError::Invalid {
                    path: path.to_path_buf(),
                    reason: format!("duplicate note_id {}", record.note_id),
                });
            }
        }

        let mut notes: Vec<Note> = records.into_iter().map(NoteRecord::into_note).collect();
        if !is_contiguous(&notes) {
            tracing::warn!(
                path = %path.display(),
                count = notes.len(),
                "Note ids are not contiguous, renumbering"
            );
            renumber(&mut notes);
        }
        Ok(notes)
    }

    /// Write every note to disk, replacing the file.
    ///
    /// Goes through a temp file and rename so a failed write never leaves a
    /// half-written notes file behind.
    pub fn save(&self) -> Result<(), StoreError> {
        let _span = tracing::debug_span!("store_save", path = %self.path.display()).entered();
        let records: Vec<NoteRecord> = self.notes.iter().map(NoteRecord::from_note).collect();
        let content = serde_json::to_string_pretty(&records).map_err(StoreError::Encode)?;
        write_atomic(&self.path, &content)?;
        tracing::debug!(count = records.len(), "Notes saved");
        Ok(())
    }

    /// Append a new note stamped with the current time
    pub fn add(&mut self, title: impl Into<String>, body: impl Into<String>) -> Note {
        let note = Note {
            id: self.next_id(),
            title: title.into(),
            body: body.into(),
            created_at: now(),
        };
        tracing::info!(id = note.id, "Adding note");
        self.notes.push(note.clone());
        self.persist();
        note
    }

    /// Replace title and body of note `id` and refresh its timestamp
    pub fn edit(
        &mut self,
        id: u32,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Note, StoreError> {
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StoreError::NotFound(id))?;
        note.title = title.into();
        note.body = body.into();
        note.created_at = now();
        let edited = note.clone();

        tracing::info!(id, "Edited note");
        self.persist();
        Ok(edited)
    }

    /// Remove note `id` and renumber the rest.
    ///
    /// Returns the removed note with its id as it was before removal.
    pub fn delete(&mut self, id: u32) -> Result<Note, StoreError> {
        let pos = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = self.notes.remove(pos);
        renumber(&mut self.notes);

        tracing::info!(id, remaining = self.notes.len(), "Deleted note");
        self.persist();
        Ok(removed)
    }

    /// All notes in display order, optionally only those written on or after `since`
    pub fn view_all(&self, since: Option<NaiveDate>) -> Vec<&Note> {
        match since {
            Some(date) => self.notes.iter().filter(|n| n.is_since(date)).collect(),
            None => self.notes.iter().collect(),
        }
    }

    /// Look up a single note
    pub fn view_by_id(&self, id: u32) -> Result<&Note, StoreError> {
        self.notes
            .iter()
            .find(|n| n.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Error that forced the store to start empty, if any
    pub fn load_error(&self) -> Option<&StoreError> {
        self.load_error.as_ref()
    }

    /// Take the most recent save failure, clearing it
    pub fn take_save_error(&mut self) -> Option<StoreError> {
        self.save_error.take()
    }

    fn next_id(&self) -> u32 {
        u32::try_from(self.notes.len()).map_or(u32::MAX, |n| n.saturating_add(1))
    }

    /// Save after a mutation. Failures are parked, not raised: the in-memory
    /// change stands and the caller collects the error via `take_save_error`.
    fn persist(&mut self) {
        match self.save() {
            Ok(()) => self.save_error = None,
            Err(e) => {
                tracing::warn!(error = %e, "Save failed, in-memory notes kept");
                self.save_error = Some(e);
            }
        }
    }
}

/// Current local time truncated to whole seconds (the on-disk precision)
fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

fn is_contiguous(notes: &[Note]) -> bool {
    notes
        .iter()
        .zip(1u32..)
        .all(|(note, expected)| note.id == expected)
}

fn renumber(notes: &mut [Note]) {
    for (note, id) in notes.iter_mut().zip(1u32..) {
        note.id = id;
    }
}

/// Temp file + rename, with a copy fallback for cross-device renames.
///
/// A symlinked notes file is written through: the rename targets the file
/// the link points at. An existing file keeps its permissions; a new one is
/// created owner-only.
fn write_atomic(path: &Path, content: &str) -> Result<(), StoreError> {
    let write_err = |source: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let existing_perms = std::fs::metadata(&target).ok().map(|m| m.permissions());

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp_path = target.with_extension(format!(
        "json.tmp.{}.{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ));
    write_temp(&tmp_path, |f| f.write_all(content.as_bytes())).map_err(write_err)?;

    if let Err(rename_err) = std::fs::rename(&tmp_path, &target) {
        tracing::debug!(error = %rename_err, "Rename failed, trying copy");
        let copied = std::fs::copy(&tmp_path, &target);
        let _ = std::fs::remove_file(&tmp_path);
        copied.map_err(write_err)?;
    }

    match existing_perms {
        Some(perms) => {
            let _ = std::fs::set_permissions(&target, perms);
        }
        None => {
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let _ = std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o600));
            }
        }
    }
    Ok(())
}

/// Create `tmp_path` and fill it; a failed fill removes the partial file
fn write_temp(
    tmp_path: &Path,
    fill: impl FnOnce(&mut std::fs::File) -> std::io::Result<()>,
) -> std::io::Result<()> {
    let mut file = std::fs::File::create(tmp_path)?;
    if let Err(e) = fill(&mut file).and_then(|()| file.sync_all()) {
        drop(file);
        let _ = std::fs::remove_file(tmp_path);
        return Err(e);
    }
    Ok(())
}
