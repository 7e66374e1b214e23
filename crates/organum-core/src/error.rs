//! Error types for rank construction and organ documents.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OrganError>;

/// Top-level error type for organ computations.
///
/// Every variant is raised at construction time: a rank, note or height that
/// made it through its constructor is valid for all later computations.
#[derive(Debug, Error)]
pub enum OrganError {
    /// Text that is not a chromatic note followed by an octave.
    #[error("'{text}' is not a music note (expected C C# D D# E F F# G G# A A# B followed by an octave)")]
    InvalidNote { text: String },

    /// Text that is not a foot height.
    #[error("'{text}' is not a foot height: {reason}")]
    InvalidHeight { text: String, reason: String },

    /// Rank geometry that does not fit its windchest or its own break points.
    #[error("invalid rank geometry for '{rank}': {message}")]
    InvalidRankGeometry { rank: String, message: String },

    /// Numeric parameter outside its physical range.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// Rank mounted on a windchest the document does not declare.
    #[error("rank '{rank}' refers to unknown windchest '{windchest}'")]
    UnknownWindchest { rank: String, windchest: String },

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl OrganError {
    pub(crate) fn geometry(rank: impl Into<String>, message: impl Into<String>) -> Self {
        OrganError::InvalidRankGeometry {
            rank: rank.into(),
            message: message.into(),
        }
    }

    pub(crate) fn parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        OrganError::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Returns the stable error code (e.g., "ORGAN_001").
    pub fn code(&self) -> &'static str {
        match self {
            OrganError::InvalidNote { .. } => "ORGAN_001",
            OrganError::InvalidHeight { .. } => "ORGAN_002",
            OrganError::InvalidRankGeometry { .. } => "ORGAN_003",
            OrganError::InvalidParameter { .. } => "ORGAN_004",
            OrganError::UnknownWindchest { .. } => "ORGAN_005",
            OrganError::JsonParse(_) => "ORGAN_006",
        }
    }
}

/// Rejects zero, negative, NaN and infinite values.
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(OrganError::parameter(
            name,
            format!("must be a positive number, got {}", value),
        ))
    }
}
