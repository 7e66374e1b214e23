//! Musical notes with pitch-class arithmetic.
//!
//! A [`Note`] is a pitch class plus a signed octave. Notes are totally ordered
//! by their absolute semitone index (`octave * 12 + pitch_class`), so octave
//! numbers below zero (sub-contra ranges) order correctly.
//!
//! ```
//! use organum_core::note::Note;
//!
//! let note: Note = "g#1".parse().unwrap();
//! assert_eq!(note.to_string(), "G#1");
//! assert_eq!(note.successor().to_string(), "A1");
//! ```

mod pitch;
mod range;


use std::cmp::Ordering;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{OrganError, Result};

pub use pitch::PitchClass;
pub use range::{NoteRange, NoteRangeIter};

/// Regex pattern for note names: letter, optional sharp, signed octave.
const NOTE_PATTERN: &str = r"^([A-Ga-g])(#?)(-?\d+)$";

/// Octaves accepted by [`Note::parse`].
pub const OCTAVE_RANGE: RangeInclusive<i32> = -1_000..=1_000;

static NOTE_REGEX: OnceLock<Regex> = OnceLock::new();

fn note_regex() -> &'static Regex {
    NOTE_REGEX.get_or_init(|| Regex::new(NOTE_PATTERN).expect("invalid regex pattern"))
}

/// A pitch class at a given octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Note {
    pitch_class: PitchClass,
    octave: i32,
}

impl Note {
    /// Creates a note from its parts.
    pub const fn new(pitch_class: PitchClass, octave: i32) -> Self {
        Self {
            pitch_class,
            octave,
        }
    }

    /// Parses a note such as `"C4"`, `"a#-1"` or `"G#1"` (case-insensitive).
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || OrganError::InvalidNote {
            text: text.to_string(),
        };
        let caps = note_regex().captures(text.trim()).ok_or_else(invalid)?;

        let letter = caps[1].chars().next().ok_or_else(invalid)?;
        let pitch_class = PitchClass::from_letter(letter, !caps[2].is_empty()).ok_or_else(invalid)?;
        let octave = caps[3]
            .parse::<i32>()
            .ok()
            .filter(|o| OCTAVE_RANGE.contains(o))
            .ok_or_else(invalid)?;

        Ok(Self::new(pitch_class, octave))
    }

    /// Returns the note built from an absolute semitone index.
    ///
    /// Octaves beyond `i32` saturate.
    pub fn from_semitone_index(index: i64) -> Self {
        let octave = index
            .div_euclid(12)
            .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        Self::new(PitchClass::from_index(index.rem_euclid(12) as i32), octave)
    }

    pub fn pitch_class(&self) -> PitchClass {
        self.pitch_class
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Absolute semitone index: `octave * 12 + pitch_class.index()`.
    pub fn semitone_index(&self) -> i64 {
        i64::from(self.octave) * 12 + i64::from(self.pitch_class.index())
    }

    /// Next semitone up (B wraps to C of the next octave).
    pub fn successor(&self) -> Self {
        self.offset(1)
    }

    /// Next semitone down (C wraps to B of the previous octave).
    pub fn predecessor(&self) -> Self {
        self.offset(-1)
    }

    /// The note `semitones` away from this one.
    pub fn offset(&self, semitones: i64) -> Self {
        Self::from_semitone_index(self.semitone_index().saturating_add(semitones))
    }

    /// Last note of a run of `count` consecutive notes starting here.
    ///
    /// A count of zero or one yields this note.
    pub fn last_of(&self, count: u32) -> Self {
        self.offset(i64::from(count.saturating_sub(1)))
    }

    /// Signed semitone distance from `reference` to this note.
    pub fn semitone_offset_from(&self, reference: Note) -> i64 {
        self.semitone_index() - reference.semitone_index()
    }

    /// Three-way comparison by semitone index.
    pub fn compare(&self, other: &Note) -> Ordering {
        self.cmp(other)
    }

    /// Canonical text form, e.g. `"G#1"`.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl Ord for Note {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semitone_index().cmp(&other.semitone_index())
    }
}

impl PartialOrd for Note {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}

impl std::str::FromStr for Note {
    type Err = OrganError;

    fn from_str(s: &str) -> Result<Self> {
        Note::parse(s)
    }
}

impl TryFrom<String> for Note {
    type Error = OrganError;

    fn try_from(value: String) -> Result<Self> {
        Note::parse(&value)
    }
}

impl From<Note> for String {
    fn from(note: Note) -> Self {
        note.to_string()
    }
}
