use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::is_valid_email;
use crate::models::NewSimulation;

/// Body of a direct simulation submission, using the stored record's wire
/// names. Every field is optional so that absence can be reported instead of
/// failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSubmission {
    #[serde(rename = "propertyPurchasePrice")]
    pub purchase_price: Option<f64>,
    #[serde(rename = "monthlyRentalAmount")]
    pub monthly_rent: Option<f64>,
    #[serde(rename = "annualRentalFee")]
    pub annual_fee: Option<f64>,
    #[serde(rename = "prospectEmailAddress")]
    pub email: Option<String>,
}

/// Reasons a submission is refused, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error(
        "All fields (propertyPurchasePrice, monthlyRentalAmount, annualRentalFee, prospectEmailAddress) are required"
    )]
    MissingFields,

    #[error("Purchase price, monthly rent, and annual fee must be greater than zero")]
    NonPositiveValues,

    #[error("Please provide a valid email address")]
    InvalidEmail,
}

impl SubmissionError {
    /// Short label used as the `error` member of API error bodies.
    pub fn title(&self) -> &'static str {
        match self {
            Self::MissingFields => "Missing required fields",
            Self::NonPositiveValues => "Invalid input values",
            Self::InvalidEmail => "Invalid email format",
        }
    }
}

/// Checks a submission and turns it into a record ready for storage.
///
/// Presence is explicit: a `0` is present and then rejected as
/// non-positive. An empty or whitespace-only email counts as missing.
pub fn validate_submission(
    submission: &SimulationSubmission
) -> Result<NewSimulation, SubmissionError> {
    let email = submission
        .email
        .as_deref()
        .filter(|email| !email.trim().is_empty());

    let (Some(purchase_price), Some(monthly_rent), Some(annual_fee), Some(email)) = (
        submission.purchase_price,
        submission.monthly_rent,
        submission.annual_fee,
        email,
    ) else {
        return Err(SubmissionError::MissingFields);
    };

    // NaN fails `> 0.0` as well.
    if [purchase_price, monthly_rent, annual_fee]
        .iter()
        .any(|value| !(*value > 0.0))
    {
        return Err(SubmissionError::NonPositiveValues);
    }

    if !is_valid_email(email) {
        return Err(SubmissionError::InvalidEmail);
    }

    Ok(NewSimulation::new(
        purchase_price,
        monthly_rent,
        annual_fee,
        email,
    ))
}
