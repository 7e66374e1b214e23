//! Note command implementation
//!
//! Prints the frequency of one note at a given foot height.

use anyhow::{Context, Result};
use colored::Colorize;
use organum_core::frequency::{round_to, REFERENCE_NOTE};
use organum_core::organ::check_diapason;
use organum_core::{frequency_of, FootHeight, Note};
use std::process::ExitCode;

use super::json_output::{command_error_to_json, print_json, NoteOutput, NoteResult};

/// Run the note command
pub fn run(note: &str, diapason: f64, height: &str, json_output: bool) -> Result<ExitCode> {
    let result = lookup(note, diapason, height);

    if json_output {
        let (output, code) = match result {
            Ok(result) => (
                NoteOutput {
                    success: true,
                    errors: Vec::new(),
                    result: Some(result),
                },
                ExitCode::SUCCESS,
            ),
            Err(e) => (
                NoteOutput {
                    success: false,
                    errors: vec![command_error_to_json(&e)],
                    result: None,
                },
                ExitCode::from(1),
            ),
        };
        print_json(&output);
        return Ok(code);
    }

    let result = result?;
    println!(
        "{} {} at {}",
        "Note:".cyan().bold(),
        result.note,
        result.height
    );
    println!(
        "  {} {} semitones from {}, diapason {} Hz",
        "Offset:".dimmed(),
        result.semitones_from_reference,
        REFERENCE_NOTE,
        result.diapason
    );
    println!("  {} {:.2} Hz", "Frequency:".green().bold(), result.frequency);
    Ok(ExitCode::SUCCESS)
}

/// Frequency of `note` on a rank of `height`, rounded to 2 decimals.
pub fn lookup(note: &str, diapason: f64, height: &str) -> Result<NoteResult> {
    let parsed = Note::parse(note).context("Invalid note")?;
    let height = FootHeight::parse(height).context("Invalid height")?;
    let diapason = check_diapason(diapason).context("Invalid diapason")?;

    Ok(NoteResult {
        note: parsed.to_string(),
        height: height.suffix(),
        diapason,
        frequency: round_to(frequency_of(parsed, diapason, height.value()), 2),
        semitones_from_reference: parsed.semitone_offset_from(REFERENCE_NOTE),
    })
}
