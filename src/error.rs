//! Error types for the calculation boundary
//!
//! The engine itself is total and never returns an error. These types cover
//! loading rule books and reference files and normalizing raw requests.

use thiserror::Error;

/// Errors that can occur when loading or validating a rule book
#[derive(Error, Debug)]
pub enum RuleBookError {
    #[error("Failed to read rule book file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse rule book TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid rule book: {reason}")]
    Invalid { reason: String },
}

impl RuleBookError {
    /// Create an invalid rule book error
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}

/// Errors raised while turning a raw request into a `ProjectInput`
#[derive(Error, Debug)]
pub enum InputError {
    #[error("unknown jurisdiction '{0}'")]
    UnknownJurisdiction(String),
    #[error("unknown zone type '{0}'")]
    UnknownZoneType(String),
    #[error("unknown land use '{0}'")]
    UnknownLandUse(String),
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("Failed to read project input: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse project input TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to parse project input JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading regulation references
#[derive(Error, Debug)]
pub enum CitationError {
    #[error("Failed to read reference file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse reference TOML: {0}")]
    Parse(#[from] toml::de::Error),
}
