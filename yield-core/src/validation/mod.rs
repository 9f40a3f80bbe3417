//! Input validation for the calculator form and the persistence endpoint.
//!
//! Field rules are evaluated in a fixed order and the first failing rule
//! wins, so every rejected value maps to exactly one [`ValidationErrorCode`].

mod error;
mod field;
mod form;
mod submission;

pub use error::{ValidationError, ValidationErrorCode};
pub use field::{Field, FieldKind, FieldValue, is_valid_email, validate_field};
pub use form::{CalculatorForm, validate_form};
pub use submission::{SubmissionError, SimulationSubmission, validate_submission};
