//! Error types for cvtex library.

use std::io;
use thiserror::Error;

/// Result type alias for cvtex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while turning a resume into LaTeX.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the resume source.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The resume source is not valid JSON.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The resume root is not a JSON object.
    #[error("Resume document must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// A localized field is an empty mapping.
    #[error("Localized field '{0}' has no values")]
    MissingLocalizedValue(String),

    /// A section's required structure is violated.
    #[error("Malformed section '{section}': {reason}")]
    MalformedSection {
        /// Section key as it appears in the document.
        section: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A typed section declares a rendering type that is not recognized.
    #[error("Unknown section type '{kind}' in section '{section}'")]
    UnknownSectionType {
        /// Section id.
        section: String,
        /// The unrecognized type tag.
        kind: String,
    },
}

impl Error {
    /// Build a [`Error::MalformedSection`].
    pub fn malformed(section: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedSection {
            section: section.into(),
            reason: reason.into(),
        }
    }

    /// Name of the section or field the error refers to, if any.
    pub fn section(&self) -> Option<&str> {
        match self {
            Error::MissingLocalizedValue(field) => Some(field),
            Error::MalformedSection { section, .. } | Error::UnknownSectionType { section, .. } => {
                Some(section)
            }
            _ => None,
        }
    }
}
