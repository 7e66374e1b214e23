//! Closed, ascending note intervals.

use serde::{Deserialize, Serialize};

use super::Note;
use crate::error::{OrganError, Result};

/// A closed interval `[first, last]` of notes, iterated in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteRange {
    first: Note,
    last: Note,
}

impl NoteRange {
    /// Creates a range; fails when `first` is above `last`.
    pub fn new(first: Note, last: Note) -> Result<Self> {
        if first > last {
            return Err(OrganError::geometry(
                format!("{}..{}", first, last),
                "range starts above its last note",
            ));
        }
        Ok(Self { first, last })
    }

    /// Range of `count` consecutive notes starting at `first`.
    pub fn from_count(first: Note, count: u32) -> Result<Self> {
        if count == 0 {
            return Err(OrganError::parameter("note_count", "must be at least 1"));
        }
        Self::new(first, first.last_of(count))
    }

    pub fn first(&self) -> Note {
        self.first
    }

    pub fn last(&self) -> Note {
        self.last
    }

    /// The same range with its last note raised by `semitones`.
    pub fn extended(&self, semitones: u32) -> Self {
        Self {
            first: self.first,
            last: self.last.offset(i64::from(semitones)),
        }
    }

    /// Number of notes, both ends included.
    pub fn len(&self) -> usize {
        (self.last.semitone_index() - self.first.semitone_index() + 1) as usize
    }

    /// Always false: a range holds at least its first note.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, note: &Note) -> bool {
        self.first <= *note && *note <= self.last
    }

    /// Zero-based position of `note` in the range.
    pub fn position(&self, note: &Note) -> Option<usize> {
        self.contains(note)
            .then(|| note.semitone_offset_from(self.first) as usize)
    }

    pub fn iter(&self) -> NoteRangeIter {
        NoteRangeIter {
            next: self.first.semitone_index(),
            end: self.last.semitone_index(),
        }
    }

    /// All notes of the range.
    pub fn notes(&self) -> Vec<Note> {
        self.iter().collect()
    }
}

impl IntoIterator for NoteRange {
    type Item = Note;
    type IntoIter = NoteRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &NoteRange {
    type Item = Note;
    type IntoIter = NoteRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Display for NoteRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.first, self.last)
    }
}

/// Iterator over the notes of a [`NoteRange`].
#[derive(Debug, Clone)]
pub struct NoteRangeIter {
    next: i64,
    end: i64,
}

impl Iterator for NoteRangeIter {
    type Item = Note;

    fn next(&mut self) -> Option<Note> {
        if self.next > self.end {
            return None;
        }
        let note = Note::from_semitone_index(self.next);
        self.next += 1;
        Some(note)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next + 1).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for NoteRangeIter {}
