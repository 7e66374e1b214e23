//! Multi-row ranks: mixtures (open) and cornets (stopped).
//!
//! Each row carries one foot height per break segment, or `None` where the
//! row is silent. The segments partition the rank's compass at its break
//! notes, so a row can drop an octave (a reprise) as it climbs.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::length_mm;
use super::simple::SimpleRank;
use super::taper::{external_diameter, nearest_index};
use crate::error::{ensure_positive, OrganError, Result};
use crate::frequency::{frequency_of, pipe_length, round_to, PipeClosure};
use crate::height::FootHeight;
use crate::naming::{full_name, row_span};
use crate::note::{Note, NoteRange};
use crate::organ::{Acoustics, Project, Windchest};

/// Semitones the reference rank runs past the top of the compass.
pub const REFERENCE_EXTENSION: u32 = 24;

/// One-based row identifier, rendered `row_1`, `row_2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RowId(usize);

impl RowId {
    /// Row for a one-based number; `None` for zero.
    pub fn new(number: usize) -> Option<Self> {
        (number >= 1).then_some(Self(number))
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    pub fn number(self) -> usize {
        self.0
    }

    /// Zero-based index into the row list.
    pub fn index(self) -> usize {
        self.0 - 1
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row_{}", self.0)
    }
}

impl FromStr for RowId {
    type Err = OrganError;

    fn from_str(s: &str) -> Result<Self> {
        s.strip_prefix("row_")
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(RowId::new)
            .ok_or_else(|| OrganError::parameter("row", format!("'{}' is not a row id", s)))
    }
}

impl TryFrom<String> for RowId {
    type Error = OrganError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RowId> for String {
    fn from(id: RowId) -> Self {
        id.to_string()
    }
}

/// Per-row series; `None` marks a silent note.
pub type RowMap<T> = BTreeMap<RowId, Vec<Option<T>>>;

/// A rank of several interleaved rows sharing one compass and one taper.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeRank {
    name: String,
    rows: Vec<Vec<Option<FootHeight>>>,
    break_notes: Vec<Note>,
    segments: Vec<NoteRange>,
    tallest: FootHeight,
    base_diameter: f64,
    progression: f64,
    closure: PipeClosure,
    range: NoteRange,
    acoustics: Acoustics,
}

impl CompositeRank {
    /// Starts a composite rank from its rows and break notes.
    ///
    /// `rows[r][s]` is the height of row `r` in segment `s`; there is one
    /// segment per break note.
    pub fn builder(
        name: impl Into<String>,
        rows: Vec<Vec<Option<FootHeight>>>,
        break_notes: Vec<Note>,
        base_diameter: f64,
        progression: f64,
    ) -> CompositeRankBuilder {
        CompositeRankBuilder {
            name: name.into(),
            rows,
            break_notes,
            base_diameter,
            progression,
            closure: PipeClosure::Open,
            first_note: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Vec<Option<FootHeight>>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_ids(&self) -> impl Iterator<Item = RowId> {
        (0..self.rows.len()).map(RowId::from_index)
    }

    pub fn break_notes(&self) -> &[Note] {
        &self.break_notes
    }

    pub fn base_diameter(&self) -> f64 {
        self.base_diameter
    }

    pub fn progression(&self) -> f64 {
        self.progression
    }

    pub fn closure(&self) -> PipeClosure {
        self.closure
    }

    pub fn range(&self) -> NoteRange {
        self.range
    }

    pub fn acoustics(&self) -> Acoustics {
        self.acoustics
    }

    pub fn notes(&self) -> Vec<Note> {
        self.range.notes()
    }

    pub fn note_names(&self) -> Vec<String> {
        self.range.iter().map(|n| n.to_string()).collect()
    }

    /// Contiguous segments covering the compass, one per break note.
    pub fn break_segments(&self) -> Vec<NoteRange> {
        self.segments.clone()
    }

    /// Number of sounding rows in each segment.
    pub fn sounding_rows_per_segment(&self) -> Vec<usize> {
        (0..self.segments.len())
            .map(|s| self.rows.iter().filter(|row| row[s].is_some()).count())
            .collect()
    }

    /// Roman row count, e.g. `III` or `III-IV`.
    pub fn format_suffix(&self) -> String {
        let counts = self.sounding_rows_per_segment();
        let low = counts.iter().copied().min().unwrap_or(0);
        let high = counts.iter().copied().max().unwrap_or(0);
        row_span(low, high)
    }

    pub fn full_name(&self) -> String {
        full_name(&self.name, &self.format_suffix())
    }

    /// Tallest height sounding anywhere in the rank.
    pub fn tallest_height(&self) -> &FootHeight {
        &self.tallest
    }

    /// Frequency of every pipe per row (Hz, 2 decimals).
    pub fn frequencies(&self) -> RowMap<f64> {
        self.per_row(|row| {
            let mut out = Vec::with_capacity(self.range.len());
            for (segment, height) in self.segments.iter().zip(row) {
                match height {
                    Some(h) => out.extend(segment.iter().map(|note| {
                        Some(round_to(
                            frequency_of(note, self.acoustics.diapason, h.value()),
                            2,
                        ))
                    })),
                    None => out.extend(std::iter::repeat(None).take(segment.len())),
                }
            }
            out
        })
    }

    /// Length of every pipe per row (mm).
    pub fn lengths(&self) -> RowMap<f64> {
        let sos = self.acoustics.speed_of_sound;
        self.frequencies()
            .into_iter()
            .map(|(id, freqs)| {
                let lengths = freqs
                    .into_iter()
                    .map(|f| f.map(|f| length_mm(f, sos, self.closure)))
                    .collect();
                (id, lengths)
            })
            .collect()
    }

    /// Internal diameter of every pipe per row (whole mm).
    ///
    /// Each pipe takes the diameter of the pipe of nearest length on a
    /// reference rank built at the tallest height. Lengths are compared
    /// before rounding.
    pub fn sizes(&self) -> RowMap<u32> {
        let reference = self.reference_rank();
        let reference_lengths = reference.open_lengths();
        let reference_sizes = reference.sizes();

        self.open_lengths()
            .into_iter()
            .map(|(id, lengths)| {
                let sizes = lengths
                    .into_iter()
                    .map(|length| {
                        length
                            .and_then(|l| nearest_index(l, &reference_lengths))
                            .map(|i| reference_sizes[i])
                    })
                    .collect();
                (id, sizes)
            })
            .collect()
    }

    /// External diameter of every pipe per row (mm).
    pub fn external_diameters(&self) -> RowMap<f64> {
        self.sizes()
            .into_iter()
            .map(|(id, sizes)| {
                let ext = sizes
                    .into_iter()
                    .map(|s| s.map(|s| external_diameter(s as f64)))
                    .collect();
                (id, ext)
            })
            .collect()
    }

    /// The single-row rank whose taper every row borrows from.
    ///
    /// It starts on the rank's first note and runs
    /// [`REFERENCE_EXTENSION`] semitones past its last, so the short pipes of
    /// high rows still find a match.
    pub fn reference_rank(&self) -> SimpleRank {
        SimpleRank::from_parts(
            self.name.clone(),
            self.tallest,
            self.base_diameter,
            self.progression,
            self.closure,
            self.range.extended(REFERENCE_EXTENSION),
            self.acoustics,
        )
    }

    /// Unrounded open length of every sounding pipe per row (mm).
    fn open_lengths(&self) -> RowMap<f64> {
        let sos = self.acoustics.speed_of_sound;
        self.frequencies()
            .into_iter()
            .map(|(id, freqs)| {
                let lengths = freqs
                    .into_iter()
                    .map(|f| f.map(|f| pipe_length(f, sos, PipeClosure::Open)))
                    .collect();
                (id, lengths)
            })
            .collect()
    }

    fn per_row<T>(&self, compute: impl Fn(&[Option<FootHeight>]) -> Vec<Option<T>>) -> RowMap<T> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| (RowId::from_index(i), compute(row.as_slice())))
            .collect()
    }
}

/// Builder for [`CompositeRank`].
#[derive(Debug, Clone)]
pub struct CompositeRankBuilder {
    name: String,
    rows: Vec<Vec<Option<FootHeight>>>,
    break_notes: Vec<Note>,
    base_diameter: f64,
    progression: f64,
    closure: PipeClosure,
    first_note: Option<Note>,
}

impl CompositeRankBuilder {
    pub fn closure(mut self, closure: PipeClosure) -> Self {
        self.closure = closure;
        self
    }

    /// Stopped pipes.
    pub fn cornet(self) -> Self {
        self.closure(PipeClosure::Closed)
    }

    pub fn first_note(mut self, note: Note) -> Self {
        self.first_note = Some(note);
        self
    }

    /// Validates rows and break notes against the windchest compass.
    pub fn build(self, project: &Project, windchest: &Windchest) -> Result<CompositeRank> {
        self.build_in(project.acoustics(), windchest.range())
    }

    pub(crate) fn build_in(self, acoustics: Acoustics, compass: NoteRange) -> Result<CompositeRank> {
        let base_diameter = ensure_positive("diameter", self.base_diameter)?;
        let progression = ensure_positive("progression", self.progression)?;
        let fail = |message: String| Err(OrganError::geometry(&self.name, message));

        let first = self.first_note.unwrap_or(compass.first());
        if !compass.contains(&first) {
            return fail(format!(
                "first note {} is outside the windchest compass {}",
                first, compass
            ));
        }
        let range = NoteRange::new(first, compass.last())?;

        let Some((&lowest, later)) = self.break_notes.split_first() else {
            return fail("at least one break note is required".to_string());
        };
        if lowest > first {
            return fail(format!(
                "first break note {} is above the first note {}",
                lowest, first
            ));
        }
        let mut previous = first;
        for &note in later {
            if note <= previous {
                return fail(format!(
                    "break note {} is not above {}; break notes must be strictly ascending and above the first note",
                    note, previous
                ));
            }
            if note > range.last() {
                return fail(format!("break note {} is outside {}", note, range));
            }
            previous = note;
        }

        if self.rows.is_empty() {
            return fail("at least one row is required".to_string());
        }
        let segment_count = self.break_notes.len();
        for (i, row) in self.rows.iter().enumerate() {
            let id = RowId::from_index(i);
            if row.len() != segment_count {
                return fail(format!(
                    "{} has {} heights for {} break segments",
                    id,
                    row.len(),
                    segment_count
                ));
            }
            if row.iter().all(Option::is_none) {
                return fail(format!("{} is silent in every segment", id));
            }
        }
        for s in 0..segment_count {
            if self.rows.iter().all(|row| row[s].is_none()) {
                return fail(format!(
                    "no row sounds in the segment starting at break note {}",
                    self.break_notes[s]
                ));
            }
        }

        let Some(tallest) = self
            .rows
            .iter()
            .flatten()
            .flatten()
            .copied()
            .max_by(|a, b| a.value().total_cmp(&b.value()))
        else {
            return fail("no row sounds anywhere".to_string());
        };

        let mut segments = Vec::with_capacity(segment_count);
        let mut start = first;
        for &next in later {
            segments.push(NoteRange::new(start, next.predecessor())?);
            start = next;
        }
        segments.push(NoteRange::new(start, range.last())?);

        Ok(CompositeRank {
            name: self.name,
            rows: self.rows,
            break_notes: self.break_notes,
            segments,
            tallest,
            base_diameter,
            progression,
            closure: self.closure,
            range,
            acoustics,
        })
    }
}

#[cfg(test)]
mod tests;
