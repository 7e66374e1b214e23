//! JSON organ documents and exported rank tables.
//!
//! An [`OrganDocument`] is the serde image of a project: its environment,
//! windchests, manuals and ranks. [`OrganDocument::build`] validates it into
//! an [`Organ`] whose ranks are ready to compute. [`RankTable`] is the
//! export format: every derived sequence of one rank, keyed by row.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{OrganError, Result};
use crate::frequency::PipeClosure;
use crate::height::FootHeight;
use crate::note::Note;
use crate::organ::{
    Manual, Project, Windchest, DEFAULT_DIAPASON, DEFAULT_FOOT_HEIGHT_MM, DEFAULT_TEMPERATURE,
    DEFAULT_WINDCHEST_FIRST_NOTE, DEFAULT_WINDCHEST_NOTES,
};
use crate::rank::{CompositeRank, ProgressionBreak, Rank, RankKind, RowId, SimpleRank};

/// Project section of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSpec {
    pub name: String,
    /// Temperature of the building (°C).
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Frequency of A3 at 8' (Hz).
    #[serde(default = "default_diapason")]
    pub diapason: f64,
}

/// Windchest section of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindchestSpec {
    pub name: String,
    #[serde(default = "default_first_note")]
    pub first_note: Note,
    #[serde(default = "default_note_count")]
    pub note_count: u32,
    #[serde(default = "default_foot_height")]
    pub foot_height_mm: f64,
}

/// Manual (keyboard) section of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManualSpec {
    pub name: String,
    pub first_note: Note,
    pub note_count: u32,
}

/// Rank section of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum RankSpec {
    /// Flute or bourdon.
    Simple {
        /// Name of the windchest the rank stands on.
        windchest: String,
        name: String,
        height: FootHeight,
        /// Internal diameter of the lowest pipe (mm).
        diameter: f64,
        progression: f64,
        #[serde(default)]
        closure: PipeClosure,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        first_note: Option<Note>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        progression_break: Option<ProgressionBreak>,
    },
    /// Mixture or cornet.
    Composite {
        windchest: String,
        name: String,
        /// One height per break note for every row; `null` is silent.
        rows: Vec<Vec<Option<FootHeight>>>,
        break_notes: Vec<Note>,
        diameter: f64,
        progression: f64,
        #[serde(default)]
        closure: PipeClosure,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        first_note: Option<Note>,
    },
}

impl RankSpec {
    pub fn name(&self) -> &str {
        match self {
            RankSpec::Simple { name, .. } | RankSpec::Composite { name, .. } => name,
        }
    }

    pub fn windchest(&self) -> &str {
        match self {
            RankSpec::Simple { windchest, .. } | RankSpec::Composite { windchest, .. } => windchest,
        }
    }

    /// Builds the rank on its windchest.
    pub fn build(&self, project: &Project, windchest: &Windchest) -> Result<Rank> {
        match self {
            RankSpec::Simple {
                name,
                height,
                diameter,
                progression,
                closure,
                first_note,
                progression_break,
                ..
            } => {
                let mut builder = SimpleRank::builder(name.as_str(), *height, *diameter, *progression)
                    .closure(*closure);
                if let Some(note) = first_note {
                    builder = builder.first_note(*note);
                }
                if let Some(brk) = progression_break {
                    builder = builder.progression_break(*brk);
                }
                Ok(builder.build(project, windchest)?.into())
            }
            RankSpec::Composite {
                name,
                rows,
                break_notes,
                diameter,
                progression,
                closure,
                first_note,
                ..
            } => {
                let mut builder = CompositeRank::builder(
                    name.as_str(),
                    rows.clone(),
                    break_notes.clone(),
                    *diameter,
                    *progression,
                )
                .closure(*closure);
                if let Some(note) = first_note {
                    builder = builder.first_note(*note);
                }
                Ok(builder.build(project, windchest)?.into())
            }
        }
    }
}

/// A whole organ as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrganDocument {
    pub project: ProjectSpec,
    #[serde(default)]
    pub windchests: Vec<WindchestSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manuals: Vec<ManualSpec>,
    #[serde(default)]
    pub ranks: Vec<RankSpec>,
}

impl OrganDocument {
    /// Parses a document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the document as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates every section and builds every rank.
    pub fn build(&self) -> Result<Organ> {
        let spec = &self.project;
        let project = Project::new(spec.name.as_str(), spec.temperature, spec.diapason)?;

        let mut windchests = Vec::with_capacity(self.windchests.len());
        for w in &self.windchests {
            if windchests.iter().any(|c: &Windchest| c.name() == w.name) {
                return Err(OrganError::parameter(
                    "windchests",
                    format!("windchest '{}' is declared twice", w.name),
                ));
            }
            windchests.push(
                Windchest::new(w.name.as_str(), w.first_note, w.note_count)?
                    .with_foot_height(w.foot_height_mm)?,
            );
        }

        let manuals = self
            .manuals
            .iter()
            .map(|m| Manual::new(m.name.as_str(), m.first_note, m.note_count))
            .collect::<Result<Vec<_>>>()?;

        let mut ranks = Vec::with_capacity(self.ranks.len());
        for spec in &self.ranks {
            let windchest = windchests
                .iter()
                .find(|w| w.name() == spec.windchest())
                .ok_or_else(|| OrganError::UnknownWindchest {
                    rank: spec.name().to_string(),
                    windchest: spec.windchest().to_string(),
                })?;
            ranks.push(MountedRank {
                windchest: windchest.name().to_string(),
                rank: spec.build(&project, windchest)?,
            });
        }

        Ok(Organ {
            project,
            windchests,
            manuals,
            ranks,
        })
    }
}

/// A rank and the name of the windchest it stands on.
#[derive(Debug, Clone, PartialEq)]
pub struct MountedRank {
    pub windchest: String,
    pub rank: Rank,
}

/// A validated organ.
#[derive(Debug, Clone, PartialEq)]
pub struct Organ {
    project: Project,
    windchests: Vec<Windchest>,
    manuals: Vec<Manual>,
    ranks: Vec<MountedRank>,
}

impl Organ {
    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn windchests(&self) -> &[Windchest] {
        &self.windchests
    }

    pub fn windchest(&self, name: &str) -> Option<&Windchest> {
        self.windchests.iter().find(|w| w.name() == name)
    }

    pub fn manuals(&self) -> &[Manual] {
        &self.manuals
    }

    pub fn ranks(&self) -> &[MountedRank] {
        &self.ranks
    }

    /// Table of every rank, in document order.
    pub fn tables(&self) -> Vec<RankTable> {
        self.ranks
            .iter()
            .filter_map(|m| {
                self.windchest(&m.windchest)
                    .map(|w| RankTable::from_rank(&m.rank, w))
            })
            .collect()
    }
}

/// Derived sequences of one row; `None` marks a silent pipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowTable {
    pub frequencies: Vec<Option<f64>>,
    pub lengths: Vec<Option<f64>>,
    pub sizes: Vec<Option<u32>>,
    pub external_diameters: Vec<Option<f64>>,
}

/// Everything computed for one rank, ready for display or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankTable {
    pub full_name: String,
    pub kind: RankKind,
    pub closure: PipeClosure,
    pub windchest: String,
    pub foot_height_mm: f64,
    pub notes: Vec<Note>,
    pub rows: BTreeMap<RowId, RowTable>,
}

impl RankTable {
    pub fn from_rank(rank: &Rank, windchest: &Windchest) -> Self {
        let rows = match rank {
            Rank::Simple(r) => {
                let mut rows = BTreeMap::new();
                rows.insert(
                    RowId::from_index(0),
                    RowTable {
                        frequencies: r.frequencies().into_iter().map(Some).collect(),
                        lengths: r.lengths().into_iter().map(Some).collect(),
                        sizes: r.sizes().into_iter().map(Some).collect(),
                        external_diameters: r.external_diameters().into_iter().map(Some).collect(),
                    },
                );
                rows
            }
            Rank::Composite(r) => {
                let mut frequencies = r.frequencies();
                let mut lengths = r.lengths();
                let mut sizes = r.sizes();
                let mut external = r.external_diameters();
                r.row_ids()
                    .map(|id| {
                        let row = RowTable {
                            frequencies: frequencies.remove(&id).unwrap_or_default(),
                            lengths: lengths.remove(&id).unwrap_or_default(),
                            sizes: sizes.remove(&id).unwrap_or_default(),
                            external_diameters: external.remove(&id).unwrap_or_default(),
                        };
                        (id, row)
                    })
                    .collect()
            }
        };

        Self {
            full_name: rank.full_name(),
            kind: rank.kind(),
            closure: rank.closure(),
            windchest: windchest.name().to_string(),
            foot_height_mm: windchest.foot_height_mm(),
            notes: rank.notes(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_diapason() -> f64 {
    DEFAULT_DIAPASON
}

fn default_first_note() -> Note {
    DEFAULT_WINDCHEST_FIRST_NOTE
}

fn default_note_count() -> u32 {
    DEFAULT_WINDCHEST_NOTES
}

fn default_foot_height() -> f64 {
    DEFAULT_FOOT_HEIGHT_MM
}
