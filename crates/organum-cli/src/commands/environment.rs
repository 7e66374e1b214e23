//! Project and windchest flags shared by the `rank` and `mixture` commands.

use anyhow::{Context, Result};
use clap::Args;
use organum_core::organ::{DEFAULT_DIAPASON, DEFAULT_TEMPERATURE, DEFAULT_WINDCHEST_NOTES};
use organum_core::{Note, Project, Windchest};

/// Building temperature, tuning pitch and windchest compass.
#[derive(Debug, Clone, PartialEq, Args)]
pub struct Environment {
    /// Temperature of the building in °C
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE, allow_hyphen_values = true)]
    pub temperature: f64,

    /// Frequency of A3 at 8' in Hz
    #[arg(long, default_value_t = DEFAULT_DIAPASON)]
    pub diapason: f64,

    /// Lowest note of the windchest
    #[arg(long, default_value = "C1")]
    pub windchest_first_note: String,

    /// Number of notes on the windchest
    #[arg(long, default_value_t = DEFAULT_WINDCHEST_NOTES)]
    pub windchest_notes: u32,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            diapason: DEFAULT_DIAPASON,
            windchest_first_note: "C1".to_string(),
            windchest_notes: DEFAULT_WINDCHEST_NOTES,
        }
    }
}

impl Environment {
    /// Validates the flags into a project and a windchest.
    pub fn build(&self) -> Result<(Project, Windchest)> {
        let project = Project::new("organum", self.temperature, self.diapason)
            .context("Invalid project parameters")?;
        let first = Note::parse(&self.windchest_first_note)
            .context("Invalid windchest first note")?;
        let windchest = Windchest::new("windchest", first, self.windchest_notes)
            .context("Invalid windchest")?;
        Ok((project, windchest))
    }
}
