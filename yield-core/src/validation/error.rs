use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Field;

/// Machine-readable validation failure codes. The serialized form is stable
/// and meant for clients and tests to match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorCode {
    RequiredField,
    InvalidNumber,
    InvalidEmail,
    NegativeNumber,
    ZeroValue,
    SurfaceOutOfRange,
    BedroomsOutOfRange,
    LocationScoreOutOfRange,
}

impl ValidationErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequiredField => "REQUIRED_FIELD",
            Self::InvalidNumber => "INVALID_NUMBER",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::NegativeNumber => "NEGATIVE_NUMBER",
            Self::ZeroValue => "ZERO_VALUE",
            Self::SurfaceOutOfRange => "SURFACE_OUT_OF_RANGE",
            Self::BedroomsOutOfRange => "BEDROOMS_OUT_OF_RANGE",
            Self::LocationScoreOutOfRange => "LOCATION_SCORE_OUT_OF_RANGE",
        }
    }

    /// User-facing message shown next to the offending field.
    pub fn message(&self) -> &'static str {
        match self {
            Self::RequiredField => "This field is required",
            Self::InvalidNumber => "Please enter a valid number",
            Self::InvalidEmail => "Please enter a valid email address",
            Self::NegativeNumber => "Please enter a positive number",
            Self::ZeroValue => "Please enter a value greater than zero",
            Self::SurfaceOutOfRange => "Surface must be between 20 and 120 m²",
            Self::BedroomsOutOfRange => "Please select a number of bedrooms between 1 and 4",
            Self::LocationScoreOutOfRange => "Location score must be between 5.0 and 10.0",
        }
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{field}: {message} ({code})")]
pub struct ValidationError {
    pub code: ValidationErrorCode,
    pub message: String,
    pub field: Field,
}

impl ValidationError {
    pub fn new(
        field: Field,
        code: ValidationErrorCode,
    ) -> Self {
        Self {
            code,
            message: code.message().to_string(),
            field,
        }
    }
}
