//! Note types
//!
//! A note is a short title/body record with a store-assigned id and the
//! time it was last written. `NoteRecord` is the on-disk shape; `Note` is
//! what the rest of the crate works with.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timestamp format used on disk and in all human-readable output
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date format accepted by the date filter
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Position-derived id, 1-based and contiguous within a store
    pub id: u32,
    pub title: String,
    pub body: String,
    /// Creation time, bumped on every edit
    pub created_at: NaiveDateTime,
}

impl Note {
    /// `created_at` rendered as `YYYY-MM-DD HH:MM:SS`
    pub fn timestamp(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// True if the note was written on or after the start of `date`
    pub fn is_since(&self, date: NaiveDate) -> bool {
        self.created_at.date() >= date
    }
}

/// Raw note entry as stored in the JSON file
///
/// Field order here is the field order on disk.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct NoteRecord {
    pub note_id: u32,
    pub title: String,
    pub body: String,
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
}

impl NoteRecord {
    pub(crate) fn from_note(note: &Note) -> Self {
        NoteRecord {
            note_id: note.id,
            title: note.title.clone(),
            body: note.body.clone(),
            timestamp: note.created_at,
        }
    }

    pub(crate) fn into_note(self) -> Note {
        Note {
            id: self.note_id,
            title: self.title,
            body: self.body,
            created_at: self.timestamp,
        }
    }
}

/// Parse a `YYYY-MM-DD` filter date
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
}

/// Serde adapter for `YYYY-MM-DD HH:MM:SS` timestamps
mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
