//! JSON output types for machine-readable CLI output.
//!
//! Every command accepting `--json` prints exactly one of these documents on
//! stdout, with no colored text around it.

use organum_core::{OrganError, RankTable};
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// Errors raised by the rank library pass their own `ORGAN_XXX` codes through.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Command-line value could not be parsed
    pub const INVALID_ARGUMENT: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "ORGAN_003")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl From<&OrganError> for JsonError {
    fn from(e: &OrganError) -> Self {
        JsonError::new(e.code(), e.to_string())
    }
}

/// Converts a command error, keeping the library code when there is one.
pub fn command_error_to_json(e: &anyhow::Error) -> JsonError {
    let code = e
        .chain()
        .find_map(|cause| cause.downcast_ref::<OrganError>())
        .map(OrganError::code)
        .unwrap_or(error_codes::INVALID_ARGUMENT);
    JsonError::new(code, format!("{:#}", e))
}

/// Output of `rank`, `mixture` and `compute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RanksOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub ranks: Vec<RankTable>,
}

impl RanksOutput {
    pub fn success(ranks: Vec<RankTable>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            ranks,
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            ranks: Vec::new(),
        }
    }
}

/// Output of `note`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<NoteResult>,
}

/// Frequency of one note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteResult {
    pub note: String,
    pub height: String,
    pub diapason: f64,
    pub frequency: f64,
    pub semitones_from_reference: i64,
}

/// Prints a JSON document on stdout.
pub(crate) fn print_json<T: Serialize>(output: &T) {
    let json = serde_json::to_string_pretty(output).expect("output serialization should not fail");
    println!("{}", json);
}
