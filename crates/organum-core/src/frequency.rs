//! Frequency, speed-of-sound and pipe-length formulas.
//!
//! Tuning convention: the diapason is the frequency of A3 on an 8-foot rank.
//! Under equal temperament with a 440 Hz diapason this puts C1 of an 8' rank
//! at 65.41 Hz, and every halving of the foot height raises the pitch one
//! octave.

use serde::{Deserialize, Serialize};

use crate::note::{Note, PitchClass};

/// The note that sounds at the diapason frequency on an 8-foot rank.
pub const REFERENCE_NOTE: Note = Note::new(PitchClass::A, 3);

/// Foot height at which [`REFERENCE_NOTE`] sounds at the diapason.
pub const REFERENCE_HEIGHT_FEET: f64 = 8.0;

/// Speed of sound in dry air at 0 °C (m/s).
pub const SOUND_SPEED_AT_ZERO: f64 = 331.5;

/// Increase of the speed of sound per degree Celsius (m/s).
pub const SOUND_SPEED_PER_DEGREE: f64 = 0.607;

/// Whether a pipe is open or stopped at its top.
///
/// A stopped (closed) pipe sounds an octave below an open pipe of the same
/// length, so for a given pitch it is half as long.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipeClosure {
    /// Open pipes (flutes, principals, mixtures).
    #[default]
    Open,
    /// Stopped pipes (bourdons, cornets).
    Closed,
}

impl PipeClosure {
    /// Divisor applied to an open-pipe length.
    pub fn length_divisor(self) -> f64 {
        match self {
            PipeClosure::Open => 1.0,
            PipeClosure::Closed => 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PipeClosure::Open => "open",
            PipeClosure::Closed => "closed",
        }
    }
}

impl std::fmt::Display for PipeClosure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Frequency in Hz of `note` on a rank of `height_feet`, tuned to `diapason`.
///
/// # Examples
/// ```
/// use organum_core::frequency::frequency_of;
/// use organum_core::note::Note;
///
/// let a3: Note = "A3".parse().unwrap();
/// assert_eq!(frequency_of(a3, 440.0, 8.0), 440.0);
///
/// let c1: Note = "C1".parse().unwrap();
/// assert!((frequency_of(c1, 440.0, 8.0) - 65.406).abs() < 0.001);
/// ```
pub fn frequency_of(note: Note, diapason: f64, height_feet: f64) -> f64 {
    let semitones = note.semitone_offset_from(REFERENCE_NOTE) as f64;
    diapason * 2.0_f64.powf(semitones / 12.0) / (height_feet / REFERENCE_HEIGHT_FEET)
}

/// Speed of sound in m/s at `temperature_celsius`.
///
/// # Examples
/// ```
/// use organum_core::frequency::speed_of_sound;
///
/// assert!((speed_of_sound(15.0) - 340.605).abs() < 1e-9);
/// ```
pub fn speed_of_sound(temperature_celsius: f64) -> f64 {
    SOUND_SPEED_AT_ZERO + SOUND_SPEED_PER_DEGREE * temperature_celsius
}

/// Physical length in millimetres of a pipe sounding `frequency`.
///
/// An open pipe is half a wavelength long; a closed pipe half of that.
pub fn pipe_length(frequency: f64, speed_of_sound: f64, closure: PipeClosure) -> f64 {
    speed_of_sound / (frequency * 2.0) * 1000.0 / closure.length_divisor()
}

/// Rounds `value` to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10.0_f64.powi(places);
    (value * factor).round() / factor
}
