//! # jot - local notes
//!
//! A small note store backed by a JSON file, plus the `jot` command-line
//! front end (interactive menu and one-shot subcommands).
//!
//! ## Quick Start
//!
//! ```no_run
//! use jot::NoteStore;
//!
//! # fn main() -> Result<(), jot::StoreError> {
//! let mut store = NoteStore::open("notes.json");
//! let note = store.add("Groceries", "milk, eggs");
//! assert_eq!(note.id, store.len() as u32);
//!
//! store.edit(note.id, "Groceries", "milk, eggs, bread")?;
//! for note in store.view_all(None) {
//!     println!("{} {}", note.id, note.title);
//! }
//! store.delete(note.id)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod note;
pub mod store;

pub use note::{parse_date, Note, DATE_FORMAT, TIMESTAMP_FORMAT};
pub use store::{NoteStore, StoreError};
