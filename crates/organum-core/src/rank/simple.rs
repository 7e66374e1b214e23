//! Single-row ranks: flutes (open) and bourdons (stopped).

use serde::{Deserialize, Serialize};

use super::length_mm;
use super::taper::{external_diameter, taper, TaperBreak};
use crate::error::{ensure_positive, OrganError, Result};
use crate::frequency::{frequency_of, pipe_length, round_to, PipeClosure};
use crate::height::FootHeight;
use crate::naming::full_name;
use crate::note::{Note, NoteRange};
use crate::organ::{Acoustics, Project, Windchest};

/// A change of diameter progression partway up a rank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgressionBreak {
    /// Note at which the new progression takes over.
    pub note: Note,
    /// Progression from the break note upwards.
    pub progression: f64,
    /// Internal diameter forced at the break note (mm).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
}

impl ProgressionBreak {
    pub fn new(note: Note, progression: f64) -> Self {
        Self {
            note,
            progression,
            diameter: None,
        }
    }

    /// Also resets the diameter at the break note.
    pub fn with_diameter(mut self, diameter: f64) -> Self {
        self.diameter = Some(diameter);
        self
    }
}

/// A single row of pipes, one per note from its first note to the top of its
/// windchest.
///
/// All derived sequences are recomputed from the stored parameters on each
/// call.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleRank {
    name: String,
    height: FootHeight,
    base_diameter: f64,
    progression: f64,
    closure: PipeClosure,
    range: NoteRange,
    progression_break: Option<ProgressionBreak>,
    acoustics: Acoustics,
}

impl SimpleRank {
    /// Starts a rank of `height` whose lowest pipe is `base_diameter` mm wide
    /// and whose diameters shrink by `progression` every four octaves.
    pub fn builder(
        name: impl Into<String>,
        height: FootHeight,
        base_diameter: f64,
        progression: f64,
    ) -> SimpleRankBuilder {
        SimpleRankBuilder::new(name, height, base_diameter, progression)
    }

    /// Rank over an already validated range, without a break.
    pub(crate) fn from_parts(
        name: String,
        height: FootHeight,
        base_diameter: f64,
        progression: f64,
        closure: PipeClosure,
        range: NoteRange,
        acoustics: Acoustics,
    ) -> Self {
        Self {
            name,
            height,
            base_diameter,
            progression,
            closure,
            range,
            progression_break: None,
            acoustics,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn height(&self) -> &FootHeight {
        &self.height
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

    pub fn progression_break(&self) -> Option<ProgressionBreak> {
        self.progression_break
    }

    pub fn acoustics(&self) -> Acoustics {
        self.acoustics
    }

    /// Number of pipes.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Always false: a rank has at least one pipe.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Height suffix of the full name (`8'`, `1'3/5`).
    pub fn format_suffix(&self) -> String {
        self.height.suffix()
    }

    /// Capitalized name with its height, e.g. `"Grosse Tierce 1'3/5"`.
    pub fn full_name(&self) -> String {
        full_name(&self.name, &self.format_suffix())
    }

    /// Every note of the rank, ascending.
    pub fn notes(&self) -> Vec<Note> {
        self.range.notes()
    }

    /// Notes as text (`"C1"`, `"C#1"`, ...).
    pub fn note_names(&self) -> Vec<String> {
        self.range.iter().map(|n| n.to_string()).collect()
    }

    /// Frequency of each pipe in Hz, rounded to 2 decimals.
    pub fn frequencies(&self) -> Vec<f64> {
        let height = self.height.value();
        self.range
            .iter()
            .map(|note| round_to(frequency_of(note, self.acoustics.diapason, height), 2))
            .collect()
    }

    /// Length of each pipe in mm.
    ///
    /// Open lengths are rounded to whole millimetres; stopped pipes take the
    /// integer half of that.
    pub fn lengths(&self) -> Vec<f64> {
        self.frequencies()
            .into_iter()
            .map(|f| length_mm(f, self.acoustics.speed_of_sound, self.closure))
            .collect()
    }

    /// Unrounded open length of each pipe in mm.
    pub(crate) fn open_lengths(&self) -> Vec<f64> {
        self.frequencies()
            .into_iter()
            .map(|f| pipe_length(f, self.acoustics.speed_of_sound, PipeClosure::Open))
            .collect()
    }

    /// Internal diameter of each pipe in whole millimetres.
    pub fn sizes(&self) -> Vec<u32> {
        let brk = self.progression_break.map(|b| TaperBreak {
            index: b.note.semitone_offset_from(self.range.first()) as usize,
            progression: b.progression,
            diameter: b.diameter,
        });
        taper(self.base_diameter, self.len(), self.progression, brk)
            .into_iter()
            .map(|s| s.round() as u32)
            .collect()
    }

    /// External diameter of each pipe (mm), internal plus metal thickness.
    pub fn external_diameters(&self) -> Vec<f64> {
        self.sizes()
            .into_iter()
            .map(|s| external_diameter(s as f64))
            .collect()
    }
}

/// Builder for [`SimpleRank`].
#[derive(Debug, Clone)]
pub struct SimpleRankBuilder {
    name: String,
    height: FootHeight,
    base_diameter: f64,
    progression: f64,
    closure: PipeClosure,
    first_note: Option<Note>,
    progression_break: Option<ProgressionBreak>,
}

impl SimpleRankBuilder {
    pub fn new(
        name: impl Into<String>,
        height: FootHeight,
        base_diameter: f64,
        progression: f64,
    ) -> Self {
        Self {
            name: name.into(),
            height,
            base_diameter,
            progression,
            closure: PipeClosure::Open,
            first_note: None,
            progression_break: None,
        }
    }

    /// Open (flute) or stopped (bourdon) pipes.
    pub fn closure(mut self, closure: PipeClosure) -> Self {
        self.closure = closure;
        self
    }

    /// Stopped pipes.
    pub fn bourdon(self) -> Self {
        self.closure(PipeClosure::Closed)
    }

    /// Lowest note, when the rank starts above its windchest's first note.
    pub fn first_note(mut self, note: Note) -> Self {
        self.first_note = Some(note);
        self
    }

    pub fn progression_break(mut self, progression_break: ProgressionBreak) -> Self {
        self.progression_break = Some(progression_break);
        self
    }

    /// Validates the geometry against the windchest compass.
    pub fn build(self, project: &Project, windchest: &Windchest) -> Result<SimpleRank> {
        self.build_in(project.acoustics(), windchest.range())
    }

    pub(crate) fn build_in(self, acoustics: Acoustics, compass: NoteRange) -> Result<SimpleRank> {
        let base_diameter = ensure_positive("diameter", self.base_diameter)?;
        let progression = ensure_positive("progression", self.progression)?;

        let first = self.first_note.unwrap_or(compass.first());
        if !compass.contains(&first) {
            return Err(OrganError::geometry(
                &self.name,
                format!("first note {} is outside the windchest compass {}", first, compass),
            ));
        }
        let range = NoteRange::new(first, compass.last())?;

        if let Some(brk) = &self.progression_break {
            if brk.note <= range.first() || brk.note >= range.last() {
                return Err(OrganError::geometry(
                    &self.name,
                    format!("progression break {} is not strictly inside {}", brk.note, range),
                ));
            }
            ensure_positive("break progression", brk.progression)?;
            if let Some(diameter) = brk.diameter {
                ensure_positive("break diameter", diameter)?;
            }
        }

        Ok(SimpleRank {
            name: self.name,
            height: self.height,
            base_diameter,
            progression,
            closure: self.closure,
            range,
            progression_break: self.progression_break,
            acoustics,
        })
    }
}
