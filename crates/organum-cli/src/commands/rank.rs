//! Rank command implementation
//!
//! Computes one flute or bourdon from command-line flags.

use anyhow::{Context, Result};
use colored::Colorize;
use organum_core::{
    FootHeight, Note, PipeClosure, ProgressionBreak, Rank, RankTable, SimpleRank, SimpleRankBuilder,
};
use std::process::ExitCode;

use super::json_output::{command_error_to_json, print_json, RanksOutput};
use super::table::print_rank_table;
use super::Environment;

/// Geometry of a single-row rank, as given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct RankOptions {
    pub name: String,
    pub height: String,
    pub diameter: f64,
    pub progression: f64,
    pub closed: bool,
    pub first_note: Option<String>,
    pub break_note: Option<String>,
    pub break_progression: Option<f64>,
    pub break_diameter: Option<f64>,
}

/// Run the rank command
///
/// # Returns
/// Exit code: 0 on success, 1 if the rank is invalid
pub fn run(options: &RankOptions, environment: &Environment, json_output: bool) -> Result<ExitCode> {
    if json_output {
        return Ok(match build_table(options, environment) {
            Ok(table) => {
                print_json(&RanksOutput::success(vec![table]));
                ExitCode::SUCCESS
            }
            Err(e) => {
                print_json(&RanksOutput::failure(vec![command_error_to_json(&e)]));
                ExitCode::from(1)
            }
        });
    }

    println!("{} {}", "Computing:".cyan().bold(), options.name);
    let table = build_table(options, environment)?;
    print_rank_table(&table);
    println!("{} {}", "SUCCESS".green().bold(), table.full_name);
    Ok(ExitCode::SUCCESS)
}

/// Builds the rank and its table.
pub fn build_table(options: &RankOptions, environment: &Environment) -> Result<RankTable> {
    let (project, windchest) = environment.build()?;
    let rank = build_rank(options)?
        .build(&project, &windchest)
        .with_context(|| format!("Invalid rank '{}'", options.name))?;
    Ok(RankTable::from_rank(&Rank::Simple(rank), &windchest))
}

fn build_rank(options: &RankOptions) -> Result<SimpleRankBuilder> {
    let height = FootHeight::parse(&options.height).context("Invalid height")?;
    let closure = if options.closed {
        PipeClosure::Closed
    } else {
        PipeClosure::Open
    };
    let mut builder =
        SimpleRank::builder(options.name.as_str(), height, options.diameter, options.progression)
            .closure(closure);

    if let Some(first) = &options.first_note {
        builder = builder.first_note(Note::parse(first).context("Invalid first note")?);
    }

    match (&options.break_note, options.break_progression) {
        (Some(note), Some(progression)) => {
            let note = Note::parse(note).context("Invalid break note")?;
            let mut brk = ProgressionBreak::new(note, progression);
            if let Some(diameter) = options.break_diameter {
                brk = brk.with_diameter(diameter);
            }
            builder = builder.progression_break(brk);
        }
        (None, None) if options.break_diameter.is_none() => {}
        _ => anyhow::bail!("--break-note and --break-progression must be given together"),
    }

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn montre() -> RankOptions {
        RankOptions {
            name: "montre".to_string(),
            height: "8".to_string(),
            diameter: 145.0,
            progression: 6.0,
            closed: false,
            first_note: None,
            break_note: None,
            break_progression: None,
            break_diameter: None,
        }
    }

    fn chest_56() -> Environment {
        Environment {
            windchest_notes: 56,
            ..Environment::default()
        }
    }

    #[test]
    fn test_build_table() {
        let table = build_table(&montre(), &chest_56()).unwrap();
        assert_eq!(table.full_name, "Montre 8'");
        assert_eq!(table.len(), 56);
        let row = table.rows.values().next().unwrap();
        assert_eq!(row.sizes[0], Some(145));
        assert_eq!(row.lengths[0], Some(2618.0));
    }

    #[test]
    fn test_bourdon_flag() {
        let options = RankOptions {
            closed: true,
            ..montre()
        };
        let table = build_table(&options, &chest_56()).unwrap();
        assert_eq!(table.closure, PipeClosure::Closed);
        assert_eq!(table.rows.values().next().unwrap().lengths[0], Some(1309.0));
    }

    #[test]
    fn test_break_flags() {
        let options = RankOptions {
            break_note: Some("F3".to_string()),
            break_progression: Some(4.0),
            break_diameter: Some(60.0),
            ..montre()
        };
        let table = build_table(&options, &chest_56()).unwrap();
        assert_eq!(table.rows.values().next().unwrap().sizes[29], Some(60));
    }

    #[test]
    fn test_incomplete_break_flags() {
        let options = RankOptions {
            break_note: Some("F3".to_string()),
            ..montre()
        };
        assert!(build_table(&options, &chest_56()).is_err());

        let options = RankOptions {
            break_diameter: Some(60.0),
            ..montre()
        };
        assert!(build_table(&options, &chest_56()).is_err());
    }

    #[test]
    fn test_invalid_rank_reports_context() {
        let options = RankOptions {
            first_note: Some("A6".to_string()),
            ..montre()
        };
        let err = build_table(&options, &chest_56()).unwrap_err();
        assert!(format!("{:#}", err).starts_with("Invalid rank 'montre'"));
    }
}
