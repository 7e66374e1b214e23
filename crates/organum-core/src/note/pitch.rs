//! The twelve chromatic pitch classes.

/// A pitch class of the 12-tone chromatic scale, spelled with sharps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    /// All pitch classes in ascending order (C=0 .. B=11).
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Semitone index within the octave (C=0, A=9, B=11).
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Pitch class for an index, wrapping modulo 12.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    /// Pitch class for an uppercase letter and an optional sharp.
    ///
    /// Returns `None` for spellings outside the sharp-only chromatic scale
    /// (`E#`, `B#`, unknown letters).
    pub fn from_letter(letter: char, sharp: bool) -> Option<Self> {
        let natural = match letter.to_ascii_uppercase() {
            'C' => PitchClass::C,
            'D' => PitchClass::D,
            'E' => PitchClass::E,
            'F' => PitchClass::F,
            'G' => PitchClass::G,
            'A' => PitchClass::A,
            'B' => PitchClass::B,
            _ => return None,
        };
        if !sharp {
            return Some(natural);
        }
        match natural {
            PitchClass::E | PitchClass::B => None,
            other => Some(Self::from_index(other.index() + 1)),
        }
    }

    /// Canonical spelling ("C", "C#", ...).
    pub fn as_str(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }
}

impl std::fmt::Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
