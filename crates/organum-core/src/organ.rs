//! Project, windchest and manual parameters.
//!
//! These hold the validated numbers that ranks are computed from: the
//! project's temperature and diapason, and the note compass of the windchest
//! a rank stands on.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, OrganError, Result};
use crate::frequency::speed_of_sound;
use crate::naming::capitalize_name;
use crate::note::{Note, NoteRange, PitchClass};

/// Default project temperature (°C).
pub const DEFAULT_TEMPERATURE: f64 = 18.0;

/// Default diapason (Hz).
pub const DEFAULT_DIAPASON: f64 = 440.0;

/// Accepted diapason band (Hz). Historical pitches range from about 392 to 466.
pub const DIAPASON_RANGE: std::ops::RangeInclusive<f64> = 300.0..=600.0;

/// Accepted temperature band (°C).
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = -50.0..=60.0;

/// Default windchest compass.
pub const DEFAULT_WINDCHEST_NOTES: u32 = 61;

/// Default lowest windchest note.
pub const DEFAULT_WINDCHEST_FIRST_NOTE: Note = Note::new(PitchClass::C, 1);

/// Default height of a pipe foot above the windchest (mm).
pub const DEFAULT_FOOT_HEIGHT_MM: f64 = 200.0;

/// Default manual compass.
pub const DEFAULT_MANUAL_NOTES: u32 = 61;

/// Default lowest manual note.
pub const DEFAULT_MANUAL_FIRST_NOTE: Note = Note::new(PitchClass::C, 0);

/// Validates a tuning pitch against [`DIAPASON_RANGE`].
pub fn check_diapason(diapason: f64) -> Result<f64> {
    if !diapason.is_finite() || !DIAPASON_RANGE.contains(&diapason) {
        return Err(OrganError::parameter(
            "diapason",
            format!(
                "{} Hz is outside {}..={} Hz",
                diapason,
                DIAPASON_RANGE.start(),
                DIAPASON_RANGE.end()
            ),
        ));
    }
    Ok(diapason)
}

/// Validates a building temperature against [`TEMPERATURE_RANGE`].
pub fn check_temperature(temperature: f64) -> Result<f64> {
    if !temperature.is_finite() || !TEMPERATURE_RANGE.contains(&temperature) {
        return Err(OrganError::parameter(
            "temperature",
            format!(
                "{} °C is outside {}..={} °C",
                temperature,
                TEMPERATURE_RANGE.start(),
                TEMPERATURE_RANGE.end()
            ),
        ));
    }
    Ok(temperature)
}

/// An organ project: the building's temperature and the tuning pitch.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    name: String,
    temperature: f64,
    diapason: f64,
}

impl Project {
    /// Creates a project; temperature in °C, diapason in Hz.
    pub fn new(name: impl Into<String>, temperature: f64, diapason: f64) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            temperature: check_temperature(temperature)?,
            diapason: check_diapason(diapason)?,
        })
    }

    /// Project at the default temperature and diapason.
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            temperature: DEFAULT_TEMPERATURE,
            diapason: DEFAULT_DIAPASON,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn diapason(&self) -> f64 {
        self.diapason
    }

    /// Speed of sound at the project's temperature (m/s).
    pub fn speed_of_sound(&self) -> f64 {
        speed_of_sound(self.temperature)
    }

    /// The two numbers ranks depend on.
    pub fn acoustics(&self) -> Acoustics {
        Acoustics {
            diapason: self.diapason,
            speed_of_sound: self.speed_of_sound(),
        }
    }
}

/// Diapason and speed of sound, copied into every rank at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Acoustics {
    /// Frequency of A3 at 8-foot pitch (Hz).
    pub diapason: f64,
    /// Speed of sound (m/s).
    pub speed_of_sound: f64,
}

/// A windchest: the wind and valve assembly that bounds a rank's compass.
///
/// A windchest may carry more notes than the keyboard playing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Windchest {
    name: String,
    range: NoteRange,
    foot_height_mm: f64,
}

impl Windchest {
    /// Creates a windchest of `note_count` notes starting at `first_note`.
    pub fn new(name: impl Into<String>, first_note: Note, note_count: u32) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            range: NoteRange::from_count(first_note, note_count)?,
            foot_height_mm: DEFAULT_FOOT_HEIGHT_MM,
        })
    }

    /// Sets the height of the pipe feet above the chest (mm).
    pub fn with_foot_height(mut self, foot_height_mm: f64) -> Result<Self> {
        self.foot_height_mm = ensure_positive("foot_height", foot_height_mm)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn first_note(&self) -> Note {
        self.range.first()
    }

    pub fn last_note(&self) -> Note {
        self.range.last()
    }

    pub fn note_count(&self) -> usize {
        self.range.len()
    }

    pub fn range(&self) -> NoteRange {
        self.range
    }

    pub fn foot_height_mm(&self) -> f64 {
        self.foot_height_mm
    }
}

impl std::fmt::Display for Windchest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Windchest {}: from {} to {} ({} notes)",
            capitalize_name(&self.name),
            self.first_note(),
            self.last_note(),
            self.note_count()
        )
    }
}

/// A keyboard. Ranks are computed against windchests; a manual only records
/// the playable compass.
#[derive(Debug, Clone, PartialEq)]
pub struct Manual {
    name: String,
    range: NoteRange,
}

impl Manual {
    pub fn new(name: impl Into<String>, first_note: Note, note_count: u32) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            range: NoteRange::from_count(first_note, note_count)?,
        })
    }

    /// Manual of 61 notes from C0.
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            range: NoteRange::from_count(DEFAULT_MANUAL_FIRST_NOTE, DEFAULT_MANUAL_NOTES)
                .expect("default manual compass is valid"),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn range(&self) -> NoteRange {
        self.range
    }

    pub fn last_note(&self) -> Note {
        self.range.last()
    }

    pub fn note_count(&self) -> usize {
        self.range.len()
    }
}
