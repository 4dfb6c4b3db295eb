//! Error types for template construction, minting, and validation.

use thiserror::Error;

/// Errors raised while building a template or minting from it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template string does not match `<prefix>.<generator><classes><k?>`.
    #[error("invalid template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// The sequence value does not fit in a bounded template.
    #[error("sequence value {value} exceeds template capacity {capacity}")]
    CapacityExceeded { value: u64, capacity: u128 },

    /// A character outside the alphabet was fed to the checksum.
    #[error("character '{character}' at position {position} is not in the alphabet")]
    InvalidCharacter { character: char, position: usize },

    /// The alphabet itself is unusable.
    #[error("invalid alphabet: {reason}")]
    InvalidAlphabet { reason: String },

    /// The validation pattern could not be compiled.
    #[error("failed to compile validation pattern: {message}")]
    Pattern { message: String },
}

impl TemplateError {
    pub(crate) fn invalid_template(template: &str, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true if the template string was rejected by the grammar.
    pub fn is_invalid_template(&self) -> bool {
        matches!(self, TemplateError::InvalidTemplate { .. })
    }

    /// Returns true if a bounded template ran out of identifiers.
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, TemplateError::CapacityExceeded { .. })
    }
}

impl From<regex::Error> for TemplateError {
    fn from(err: regex::Error) -> Self {
        TemplateError::Pattern {
            message: err.to_string(),
        }
    }
}

/// Why a string was rejected by a template.
///
/// `Template::is_valid` collapses all of these into `false`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The identifier does not start with the template prefix.
    #[error("identifier does not start with prefix '{expected}'")]
    WrongPrefix { expected: String },

    /// The identifier has the prefix but the body has the wrong shape.
    #[error("identifier body does not match the template mask")]
    Malformed,

    /// The body is well formed but the check symbol is wrong.
    #[error("check symbol mismatch: expected '{expected}', got '{actual}'")]
    ChecksumMismatch { expected: char, actual: char },

    /// The body encodes a sequence value larger than `u64::MAX`.
    #[error("identifier encodes a sequence value beyond u64")]
    Overflow,
}

impl ValidationError {
    /// Returns true if this error indicates a prefix mismatch.
    pub fn is_prefix_error(&self) -> bool {
        matches!(self, ValidationError::WrongPrefix { .. })
    }
}
