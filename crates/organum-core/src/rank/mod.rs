//! Ranks: the pipes of one stop, from note and height to length and diameter.

mod composite;
mod simple;
pub mod taper;

pub use composite::{CompositeRank, CompositeRankBuilder, RowId, RowMap};
pub use simple::{ProgressionBreak, SimpleRank, SimpleRankBuilder};

use serde::{Deserialize, Serialize};

use crate::frequency::{pipe_length, PipeClosure};
use crate::note::{Note, NoteRange};

/// Rank family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankKind {
    /// One row; named by its foot height.
    Simple,
    /// Several rows with break points; named by its row count.
    Composite,
}

impl std::fmt::Display for RankKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankKind::Simple => write!(f, "simple"),
            RankKind::Composite => write!(f, "composite"),
        }
    }
}

/// Any rank.
#[derive(Debug, Clone, PartialEq)]
pub enum Rank {
    Simple(SimpleRank),
    Composite(CompositeRank),
}

impl Rank {
    pub fn kind(&self) -> RankKind {
        match self {
            Rank::Simple(_) => RankKind::Simple,
            Rank::Composite(_) => RankKind::Composite,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Rank::Simple(r) => r.name(),
            Rank::Composite(r) => r.name(),
        }
    }

    /// Height (`8'`) or row count (`III-IV`).
    pub fn format_suffix(&self) -> String {
        match self {
            Rank::Simple(r) => r.format_suffix(),
            Rank::Composite(r) => r.format_suffix(),
        }
    }

    pub fn full_name(&self) -> String {
        crate::naming::full_name(self.name(), &self.format_suffix())
    }

    pub fn closure(&self) -> PipeClosure {
        match self {
            Rank::Simple(r) => r.closure(),
            Rank::Composite(r) => r.closure(),
        }
    }

    pub fn range(&self) -> NoteRange {
        match self {
            Rank::Simple(r) => r.range(),
            Rank::Composite(r) => r.range(),
        }
    }

    pub fn notes(&self) -> Vec<Note> {
        self.range().notes()
    }

    pub fn note_names(&self) -> Vec<String> {
        self.range().iter().map(|n| n.to_string()).collect()
    }

    pub fn as_simple(&self) -> Option<&SimpleRank> {
        match self {
            Rank::Simple(r) => Some(r),
            Rank::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeRank> {
        match self {
            Rank::Composite(r) => Some(r),
            Rank::Simple(_) => None,
        }
    }
}

impl From<SimpleRank> for Rank {
    fn from(rank: SimpleRank) -> Self {
        Rank::Simple(rank)
    }
}

impl From<CompositeRank> for Rank {
    fn from(rank: CompositeRank) -> Self {
        Rank::Composite(rank)
    }
}

/// Pipe length in whole mm for an already rounded frequency. Stopped pipes
/// take the integer half of the rounded open length.
pub(crate) fn length_mm(frequency: f64, speed_of_sound: f64, closure: PipeClosure) -> f64 {
    let open = pipe_length(frequency, speed_of_sound, PipeClosure::Open).round();
    match closure {
        PipeClosure::Open => open,
        PipeClosure::Closed => (open / closure.length_divisor()).floor(),
    }
}
