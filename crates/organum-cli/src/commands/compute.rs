//! Compute command implementation
//!
//! Reads an organ document and computes every rank it declares.

use anyhow::{Context, Result};
use colored::Colorize;
use organum_core::{Organ, OrganDocument};
use std::fs;
use std::process::ExitCode;

use super::json_output::{error_codes, print_json, JsonError, RanksOutput};
use super::table::print_rank_table;

/// Run the compute command
///
/// # Arguments
/// * `file` - Path to the JSON organ document
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 if the document is invalid
pub fn run(file: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(file)
    } else {
        run_human(file)
    }
}

fn run_human(file: &str) -> Result<ExitCode> {
    println!("{} {}", "Computing:".cyan().bold(), file);

    let organ = load_organ(file)?;
    let project = organ.project();
    println!(
        "{} {} ({} Hz, {} °C, sound at {:.3} m/s)",
        "Project:".dimmed(),
        project.name(),
        project.diapason(),
        project.temperature(),
        project.speed_of_sound()
    );
    for windchest in organ.windchests() {
        println!("{} {}", "-".dimmed(), windchest);
    }
    println!();

    let tables = organ.tables();
    for table in &tables {
        print_rank_table(table);
    }

    println!(
        "{} {} {} computed",
        "SUCCESS".green().bold(),
        tables.len(),
        if tables.len() == 1 { "rank" } else { "ranks" }
    );
    Ok(ExitCode::SUCCESS)
}

fn run_json(file: &str) -> Result<ExitCode> {
    let text = match fs::read_to_string(file) {
        Ok(text) => text,
        Err(e) => {
            let error = JsonError::new(error_codes::FILE_READ, e.to_string()).with_file(file);
            print_json(&RanksOutput::failure(vec![error]));
            return Ok(ExitCode::from(1));
        }
    };

    match OrganDocument::from_json(&text).and_then(|doc| doc.build()) {
        Ok(organ) => {
            print_json(&RanksOutput::success(organ.tables()));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let error = JsonError::from(&e).with_file(file);
            print_json(&RanksOutput::failure(vec![error]));
            Ok(ExitCode::from(1))
        }
    }
}

/// Reads and validates an organ document.
pub fn load_organ(file: &str) -> Result<Organ> {
    let text =
        fs::read_to_string(file).with_context(|| format!("Failed to read organ file: {}", file))?;
    let document = OrganDocument::from_json(&text)
        .with_context(|| format!("Failed to parse organ file: {}", file))?;
    document
        .build()
        .with_context(|| format!("Invalid organ file: {}", file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ORGAN: &str = r#"{
        "project": { "name": "saint-leonard", "temperature": 15, "diapason": 435 },
        "windchests": [ { "name": "positif", "first_note": "C1", "note_count": 56 } ],
        "ranks": [
            { "type": "simple", "windchest": "positif", "name": "bourdon",
              "height": "8", "diameter": 90, "progression": 3, "closure": "closed" }
        ]
    }"#;

    fn write_organ(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_organ() {
        let file = write_organ(ORGAN);
        let organ = load_organ(file.path().to_str().unwrap()).unwrap();
        assert_eq!(organ.ranks().len(), 1);
        assert_eq!(organ.project().diapason(), 435.0);
        assert_eq!(organ.ranks()[0].rank.full_name(), "Bourdon 8'");
    }

    #[test]
    fn test_load_organ_missing_file() {
        let err = load_organ("/nonexistent/organ.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read organ file"));
    }

    #[test]
    fn test_load_organ_invalid_document() {
        let file = write_organ(&ORGAN.replace("\"positif\", \"name\"", "\"recit\", \"name\""));
        let err = load_organ(file.path().to_str().unwrap()).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown windchest 'recit'"));
    }

    #[test]
    fn test_run_reports_json_failures_as_output() {
        let file = write_organ(ORGAN);
        assert!(run(file.path().to_str().unwrap(), true).is_ok());
        assert!(run("/nonexistent/organ.json", true).is_ok());
        assert!(run("/nonexistent/organ.json", false).is_err());
    }
}
