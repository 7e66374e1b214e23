//! Organum End-to-End Test Infrastructure
//!
//! This crate reproduces historical rank tables end to end: notes,
//! frequencies, lengths and diameters of reference flutes, bourdons and
//! mixtures, and whole organ documents loaded from disk.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p organum-tests
//! ```

use std::path::{Path, PathBuf};

use organum_core::{FootHeight, Note, Project, Windchest};

/// Historical Mantes-la-Jolie organ document.
pub const MANTES_DOCUMENT: &str = include_str!("../fixtures/mantes.json");

/// Parses a note, panicking on invalid text.
pub fn note(text: &str) -> Note {
    Note::parse(text).unwrap_or_else(|e| panic!("fixture note {}: {}", text, e))
}

/// Parses several notes.
pub fn notes(texts: &[&str]) -> Vec<Note> {
    texts.iter().map(|t| note(t)).collect()
}

/// Parses a foot height, panicking on invalid text.
pub fn height(text: &str) -> FootHeight {
    FootHeight::parse(text).unwrap_or_else(|e| panic!("fixture height {}: {}", text, e))
}

/// One composite row; `None` is a silent segment.
pub fn row(heights: &[Option<&str>]) -> Vec<Option<FootHeight>> {
    heights.iter().map(|h| h.map(height)).collect()
}

/// Mantes-la-Jolie at 18 °C and 440 Hz.
pub fn mantes_project() -> Project {
    Project::new("Mantes-La-Jolie", 18.0, 440.0).unwrap()
}

/// 56-note windchest from C1 (C1..G5).
pub fn grand_orgue() -> Windchest {
    Windchest::new("Grand-Orgue", note("C1"), 56).unwrap()
}

/// 61-note windchest from C1 (C1..C6).
pub fn recit() -> Windchest {
    Windchest::new("Recit", note("C1"), 61).unwrap()
}

/// Writes a document into `dir` and returns its path.
pub fn write_document(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap_or_else(|e| panic!("write {}: {}", path.display(), e));
    path
}
