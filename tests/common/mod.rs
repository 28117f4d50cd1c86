//! Common test fixtures and helpers
//!
//! Usage in test files:
//! ```ignore
//! mod common;
//! use common::TestStore;
//! ```

#![allow(dead_code)]

use jot::NoteStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test store with automatic cleanup
///
/// Wraps a `NoteStore` with its backing `TempDir`, ensuring the directory
/// lives as long as the store is in use.
pub struct TestStore {
    /// The store instance
    pub store: NoteStore,
    /// Temp directory (kept alive to prevent cleanup)
    dir: TempDir,
}

impl TestStore {
    /// Create an empty store in a temporary directory
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = NoteStore::open(dir.path().join("notes.json"));
        Self { store, dir }
    }

    /// Create a store whose file already holds `content`
    pub fn with_file(content: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("notes.json");
        std::fs::write(&path, content).expect("Failed to write notes file");
        let store = NoteStore::open(&path);
        Self { store, dir }
    }

    /// Re-open the same file, as a new process would
    pub fn reopen(&self) -> NoteStore {
        NoteStore::open(self.store.path())
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self) -> PathBuf {
        self.store.path().to_path_buf()
    }
}

impl std::ops::Deref for TestStore {
    type Target = NoteStore;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl std::ops::DerefMut for TestStore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.store
    }
}

/// A notes file with fixed timestamps, one note per day from 2024-03-01
pub fn dated_notes_json(titles: &[&str]) -> String {
    let records: Vec<_> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            serde_json::json!({
                "note_id": i + 1,
                "title": title,
                "body": format!("{} body", title),
                "timestamp": format!("2024-03-{:02} 12:00:00", i + 1),
            })
        })
        .collect();
    serde_json::to_string_pretty(&records).expect("Failed to encode fixture")
}
