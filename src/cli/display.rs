//! Output and display functions for notes

use std::io::Write;

use chrono::NaiveDate;
use colored::Colorize;

use jot::Note;

/// Write one note as a labelled block
pub fn write_note(out: &mut impl Write, note: &Note) -> std::io::Result<()> {
    writeln!(out, "{} {}", "ID:".bold(), note.id.to_string().cyan())?;
    writeln!(out, "{} {}", "Title:".bold(), note.title)?;
    writeln!(out, "{} {}", "Body:".bold(), note.body)?;
    writeln!(out, "{} {}", "Created:".bold(), note.timestamp().dimmed())
}

/// Write a list of notes separated by blank lines, or a placeholder when empty
pub fn write_notes(
    out: &mut impl Write,
    notes: &[&Note],
    since: Option<NaiveDate>,
) -> std::io::Result<()> {
    if notes.is_empty() {
        return match since {
            Some(date) => writeln!(out, "No notes since {}.", date),
            None => writeln!(out, "No notes."),
        };
    }
    for note in notes {
        write_note(out, note)?;
        writeln!(out)?;
    }
    Ok(())
}

/// JSON shape of a note in `--json` output
pub fn note_json(note: &Note) -> serde_json::Value {
    serde_json::json!({
        "id": note.id,
        "title": note.title,
        "body": note.body,
        "timestamp": note.timestamp(),
    })
}

/// Print notes as a JSON array to stdout
pub fn print_notes_json(notes: &[&Note]) -> anyhow::Result<()> {
    let json: Vec<_> = notes.iter().map(|n| note_json(n)).collect();
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Print one note as a JSON object to stdout
pub fn print_note_json(note: &Note) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&note_json(note))?);
    Ok(())
}

/// Warning line shown when the store could not be written
pub fn save_warning(error: &impl std::fmt::Display) -> String {
    format!(
        "{} {}. Changes are kept in memory only.",
        "Warning:".yellow(),
        error
    )
}

/// Warning line shown when the notes file could not be loaded
pub fn load_warning(error: &impl std::fmt::Display) -> String {
    format!(
        "{} {}. Starting with an empty note list.",
        "Warning:".yellow(),
        error
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn note(id: u32, title: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            body: format!("{} body", title),
            created_at: NaiveDateTime::parse_from_str("2024-05-06 07:08:09", jot::TIMESTAMP_FORMAT)
                .unwrap(),
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_note_block() {
        let n = note(3, "Groceries");
        let text = render(|out| write_note(out, &n));
        assert_eq!(
            text,
            "ID: 3\nTitle: Groceries\nBody: Groceries body\nCreated: 2024-05-06 07:08:09\n"
        );
    }

    #[test]
    fn test_write_notes_empty_placeholders() {
        assert_eq!(render(|out| write_notes(out, &[], None)), "No notes.\n");
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(
            render(|out| write_notes(out, &[], Some(date))),
            "No notes since 2024-01-02.\n"
        );
    }

    #[test]
    fn test_write_notes_keeps_order() {
        let (a, b) = (note(1, "A"), note(2, "B"));
        let text = render(|out| write_notes(out, &[&a, &b], None));
        let pos_a = text.find("Title: A").unwrap();
        let pos_b = text.find("Title: B").unwrap();
        assert!(pos_a < pos_b);
    }

    #[test]
    fn test_note_json_fields() {
        let v = note_json(&note(1, "A"));
        assert_eq!(v["id"], 1);
        assert_eq!(v["title"], "A");
        assert_eq!(v["body"], "A body");
        assert_eq!(v["timestamp"], "2024-05-06 07:08:09");
    }
}
