//! Organum Pipe-Organ Rank Library
//!
//! This crate computes the physical dimensions of organ pipes: for every pipe
//! of a rank, its note, frequency, length and diameter, from the project's
//! temperature and diapason and the compass of the windchest the rank stands
//! on.
//!
//! # Overview
//!
//! - **Simple ranks** (flutes, bourdons): one pipe per note at a single foot
//!   height, with a geometric diameter taper and an optional progression break
//! - **Composite ranks** (mixtures, cornets): several rows whose heights change
//!   at break notes; every pipe borrows its diameter from one reference taper
//!
//! # Example
//!
//! ```
//! use organum_core::{FootHeight, Note, Project, SimpleRank, Windchest};
//!
//! let project = Project::new("Mantes-la-Jolie", 18.0, 440.0).unwrap();
//! let chest = Windchest::new("grand-orgue", Note::parse("C1").unwrap(), 56).unwrap();
//!
//! let montre = SimpleRank::builder("montre", FootHeight::parse("8").unwrap(), 145.0, 6.0)
//!     .build(&project, &chest)
//!     .unwrap();
//!
//! assert_eq!(montre.full_name(), "Montre 8'");
//! assert_eq!(montre.frequencies()[0], 65.41);
//! assert_eq!(montre.lengths()[0], 2618.0);
//! assert_eq!(montre.sizes()[0], 145);
//! ```
//!
//! # Modules
//!
//! - [`note`]: Notes, pitch classes and note ranges
//! - [`height`]: Foot-height parsing
//! - [`frequency`]: Frequency, speed of sound and pipe length
//! - [`organ`]: Project, windchest and manual parameters
//! - [`naming`]: Rank name formatting
//! - [`rank`]: Simple and composite ranks
//! - [`document`]: JSON organ documents and rank tables
//! - [`error`]: Error type

pub mod document;
pub mod error;
pub mod frequency;
pub mod height;
pub mod naming;
pub mod note;
pub mod organ;
pub mod rank;

// Re-export commonly used types at the crate root
pub use document::{
    ManualSpec, MountedRank, Organ, OrganDocument, ProjectSpec, RankSpec, RankTable, RowTable,
    WindchestSpec,
};
pub use error::{OrganError, Result};
pub use frequency::{frequency_of, pipe_length, speed_of_sound, PipeClosure};
pub use height::{parse_height, FootHeight, Fraction};
pub use note::{Note, NoteRange, PitchClass};
pub use organ::{Acoustics, Manual, Project, Windchest};
pub use rank::{
    CompositeRank, CompositeRankBuilder, ProgressionBreak, Rank, RankKind, RowId, RowMap,
    SimpleRank, SimpleRankBuilder,
};
