//! Mixture command implementation
//!
//! Computes one mixture or cornet from command-line flags. Each `--row` lists
//! one height per break note, `-` marking a silent segment.

use anyhow::{Context, Result};
use colored::Colorize;
use organum_core::{CompositeRank, FootHeight, Note, PipeClosure, Rank, RankTable};
use std::process::ExitCode;

use super::json_output::{command_error_to_json, print_json, RanksOutput};
use super::table::print_rank_table;
use super::Environment;

/// Marker for a silent segment in a `--row` list.
pub const SILENT_MARKER: &str = "-";

/// Geometry of a composite rank, as given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureOptions {
    pub name: String,
    pub rows: Vec<String>,
    pub breaks: String,
    pub diameter: f64,
    pub progression: f64,
    pub closed: bool,
    pub first_note: Option<String>,
}

/// Run the mixture command
///
/// # Returns
/// Exit code: 0 on success, 1 if the rank is invalid
pub fn run(
    options: &MixtureOptions,
    environment: &Environment,
    json_output: bool,
) -> Result<ExitCode> {
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

/// Builds the composite rank and its table.
pub fn build_table(options: &MixtureOptions, environment: &Environment) -> Result<RankTable> {
    let (project, windchest) = environment.build()?;

    let rows = options
        .rows
        .iter()
        .map(|r| parse_row(r))
        .collect::<Result<Vec<_>>>()?;
    let breaks = parse_notes(&options.breaks)?;
    let closure = if options.closed {
        PipeClosure::Closed
    } else {
        PipeClosure::Open
    };

    let mut builder = CompositeRank::builder(
        options.name.as_str(),
        rows,
        breaks,
        options.diameter,
        options.progression,
    )
    .closure(closure);
    if let Some(first) = &options.first_note {
        builder = builder.first_note(Note::parse(first).context("Invalid first note")?);
    }

    let rank = builder
        .build(&project, &windchest)
        .with_context(|| format!("Invalid rank '{}'", options.name))?;
    Ok(RankTable::from_rank(&Rank::Composite(rank), &windchest))
}

/// Parses `"2, 2 2/3, -"` into one optional height per segment.
pub fn parse_row(text: &str) -> Result<Vec<Option<FootHeight>>> {
    split_list(text)
        .map(|cell| {
            if cell == SILENT_MARKER {
                Ok(None)
            } else {
                FootHeight::parse(cell)
                    .map(Some)
                    .with_context(|| format!("Invalid row '{}'", text))
            }
        })
        .collect()
}

/// Parses `"C1,C2,C3"` into notes.
pub fn parse_notes(text: &str) -> Result<Vec<Note>> {
    split_list(text)
        .map(|cell| Note::parse(cell).with_context(|| format!("Invalid break notes '{}'", text)))
        .collect()
}

fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|cell| !cell.is_empty())
}
