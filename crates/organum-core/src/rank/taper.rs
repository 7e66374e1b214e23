//! Diameter taper, metal thickness and nearest-length matching.

use crate::frequency::round_to;

/// Semitones over which a progression ratio applies: the diameter shrinks by
/// `progression` every 48 half-tones (four octaves).
pub const TAPER_SEMITONES: f64 = 48.0;

/// Metal thickness of the narrowest pipes (mm).
pub const BASE_METAL_THICKNESS: f64 = 0.3;

/// Internal diameter up to which [`BASE_METAL_THICKNESS`] applies (mm).
pub const BASE_THICKNESS_DIAMETER: f64 = 10.0;

/// Width of each thickness bracket above the base diameter (mm).
pub const THICKNESS_BRACKET: f64 = 5.0;

/// Thickness added per bracket (mm).
pub const THICKNESS_STEP: f64 = 0.05;

/// A change of progression (and optionally of diameter) at a given pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaperBreak {
    /// Zero-based pipe index of the break note.
    pub index: usize,
    pub progression: f64,
    pub diameter: Option<f64>,
}

/// Ratio between two neighbouring pipes for a progression.
pub fn half_tone_ratio(progression: f64) -> f64 {
    progression.powf(1.0 / TAPER_SEMITONES)
}

/// Unrounded diameters of `count` pipes, starting at `base`.
///
/// Each pipe is the previous one divided by the half-tone ratio. With a
/// break, the original progression runs up to and including the break pipe,
/// whose diameter may then be replaced, and the break progression runs from
/// there to the end.
pub fn taper(base: f64, count: usize, progression: f64, brk: Option<TaperBreak>) -> Vec<f64> {
    let mut sizes = Vec::with_capacity(count);
    if count == 0 {
        return sizes;
    }
    sizes.push(base);

    let (break_index, second) = match brk {
        Some(b) => (b.index.min(count - 1), Some(b)),
        None => (count - 1, None),
    };

    let ratio = half_tone_ratio(progression);
    extend_taper(&mut sizes, break_index, ratio);

    if let Some(b) = second {
        if let (Some(diameter), Some(last)) = (b.diameter, sizes.last_mut()) {
            *last = diameter;
        }
        extend_taper(&mut sizes, count - 1 - break_index, half_tone_ratio(b.progression));
    }

    sizes
}

fn extend_taper(sizes: &mut Vec<f64>, steps: usize, ratio: f64) {
    for _ in 0..steps {
        let next = sizes.last().copied().unwrap_or_default() / ratio;
        sizes.push(next);
    }
}

/// Metal thickness for a pipe of the given internal diameter (mm).
pub fn metal_thickness(internal: f64) -> f64 {
    let mut bracket = BASE_THICKNESS_DIAMETER;
    let mut steps = 0u32;
    while internal > bracket {
        steps += 1;
        bracket += THICKNESS_BRACKET;
    }
    round_to(BASE_METAL_THICKNESS + THICKNESS_STEP * steps as f64, 2)
}

/// External diameter: internal diameter plus the metal on both sides.
pub fn external_diameter(internal: f64) -> f64 {
    round_to(internal + 2.0 * metal_thickness(internal), 2)
}

/// Index of the reference value nearest to `value`.
///
/// Values at or beyond the extremes clamp to the index of the maximum or
/// minimum. Ties go to the lowest index. Returns `None` for an empty slice.
pub fn nearest_index(value: f64, reference: &[f64]) -> Option<usize> {
    let (max_index, max) = first_extreme(reference, |a, b| a > b)?;
    let (min_index, min) = first_extreme(reference, |a, b| a < b)?;

    if value >= max {
        return Some(max_index);
    }
    if value <= min {
        return Some(min_index);
    }

    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, r) in reference.iter().enumerate() {
        let distance = (r - value).abs();
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    Some(best)
}

/// First index holding the extreme value under `better`.
fn first_extreme(values: &[f64], better: impl Fn(f64, f64) -> bool) -> Option<(usize, f64)> {
    let mut iter = values.iter().copied().enumerate();
    let mut best = iter.next()?;
    for (i, v) in iter {
        if better(v, best.1) {
            best = (i, v);
        }
    }
    Some(best)
}
