//! Organum CLI - Command-line interface for pipe-organ rank computation
//!
//! This binary computes pipe frequencies, lengths and diameters for single
//! ranks, mixtures and whole organ documents.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use organum_cli::commands::{self, mixture::MixtureOptions, rank::RankOptions, Environment};
use organum_core::organ::DEFAULT_DIAPASON;

/// Organum - Pipe-Organ Rank Calculator
#[derive(Parser)]
#[command(name = "organum")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a single-row rank (flute, or bourdon with --closed)
    Rank {
        /// Name of the rank
        #[arg(short, long)]
        name: String,

        /// Foot height ("8", "2 2/3", "1'3/5")
        #[arg(long)]
        height: String,

        /// Internal diameter of the lowest pipe in mm
        #[arg(short, long)]
        diameter: f64,

        /// Diameter ratio over four octaves
        #[arg(short, long)]
        progression: f64,

        /// Stopped pipes (bourdon)
        #[arg(long)]
        closed: bool,

        /// Lowest note, when above the windchest's first note
        #[arg(long)]
        first_note: Option<String>,

        /// Note where a new progression takes over
        #[arg(long, requires = "break_progression")]
        break_note: Option<String>,

        /// Progression from the break note upwards
        #[arg(long, requires = "break_note")]
        break_progression: Option<f64>,

        /// Internal diameter forced at the break note in mm
        #[arg(long, requires = "break_note")]
        break_diameter: Option<f64>,

        #[command(flatten)]
        environment: Environment,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Compute a multi-row rank (mixture, or cornet with --closed)
    Mixture {
        /// Name of the rank
        #[arg(short, long)]
        name: String,

        /// Heights of one row, one per break note; "-" is silent (repeatable)
        #[arg(long = "row", required = true)]
        rows: Vec<String>,

        /// Comma-separated break notes, the first at or below the first note
        #[arg(long)]
        breaks: String,

        /// Internal diameter of the reference rank's lowest pipe in mm
        #[arg(short, long)]
        diameter: f64,

        /// Diameter ratio over four octaves
        #[arg(short, long)]
        progression: f64,

        /// Stopped pipes (cornet)
        #[arg(long)]
        closed: bool,

        /// Lowest note, when above the windchest's first note
        #[arg(long)]
        first_note: Option<String>,

        #[command(flatten)]
        environment: Environment,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Compute every rank of a JSON organ document
    Compute {
        /// Path to the organ document
        #[arg(short, long)]
        file: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the frequency of a note
    Note {
        /// Note such as "A3" or "C#1"
        note: String,

        /// Frequency of A3 at 8' in Hz
        #[arg(long, default_value_t = DEFAULT_DIAPASON)]
        diapason: f64,

        /// Foot height of the rank
        #[arg(long, default_value = "8")]
        height: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Rank {
            name,
            height,
            diameter,
            progression,
            closed,
            first_note,
            break_note,
            break_progression,
            break_diameter,
            environment,
            json,
        } => {
            let options = RankOptions {
                name,
                height,
                diameter,
                progression,
                closed,
                first_note,
                break_note,
                break_progression,
                break_diameter,
            };
            commands::rank::run(&options, &environment, json)
        }
        Commands::Mixture {
            name,
            rows,
            breaks,
            diameter,
            progression,
            closed,
            first_note,
            environment,
            json,
        } => {
            let options = MixtureOptions {
                name,
                rows,
                breaks,
                diameter,
                progression,
                closed,
                first_note,
            };
            commands::mixture::run(&options, &environment, json)
        }
        Commands::Compute { file, json } => commands::compute::run(&file, json),
        Commands::Note {
            note,
            diapason,
            height,
            json,
        } => commands::note::run(&note, diapason, &height, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
