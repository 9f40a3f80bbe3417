use serde::{Deserialize, Serialize};

use super::{Field, FieldValue, ValidationError, validate_field};
use crate::models::{DataDrivenInputs, SimulationInput};

/// Raw calculator form, exactly as typed by the user.
///
/// `data_driven` mirrors the form toggle that reveals the regression inputs.
/// While it is on, those inputs are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculatorForm {
    pub purchase_price: String,
    pub monthly_rent: String,
    pub annual_fee: String,
    pub email: String,
    pub data_driven: bool,
    pub surface: String,
    pub bedrooms: String,
    pub location_score: String,
}

impl CalculatorForm {
    /// Raw value for `field`.
    pub fn value(
        &self,
        field: Field,
    ) -> &str {
        match field {
            Field::PurchasePrice => &self.purchase_price,
            Field::MonthlyRent => &self.monthly_rent,
            Field::AnnualFee => &self.annual_fee,
            Field::Email => &self.email,
            Field::Surface => &self.surface,
            Field::Bedrooms => &self.bedrooms,
            Field::LocationScore => &self.location_score,
        }
    }

    /// Whether `field` must be filled in.
    pub fn is_required(
        &self,
        field: Field,
    ) -> bool {
        !Field::DATA_DRIVEN.contains(&field) || self.data_driven
    }
}

/// Collected outcome of validating each form field.
#[derive(Default)]
struct ParsedForm {
    purchase_price: Option<f64>,
    monthly_rent: Option<f64>,
    annual_fee: Option<f64>,
    email: Option<String>,
    surface: Option<f64>,
    bedrooms: Option<u8>,
    location_score: Option<f64>,
}

impl ParsedForm {
    fn set(
        &mut self,
        field: Field,
        value: FieldValue,
    ) {
        match field {
            Field::PurchasePrice => self.purchase_price = value.as_number(),
            Field::MonthlyRent => self.monthly_rent = value.as_number(),
            Field::AnnualFee => self.annual_fee = value.as_number(),
            Field::Email => self.email = value.into_text(),
            Field::Surface => self.surface = value.as_number(),
            Field::Bedrooms => {
                self.bedrooms = value.as_integer().and_then(|n| u8::try_from(n).ok());
            }
            Field::LocationScore => self.location_score = value.as_number(),
        }
    }
}

/// Validates every field of `form` and builds the calculator input.
///
/// All failing fields are reported, one error per field, in form order. The
/// data-driven triple is attached only when all three values are present.
///
/// # Examples
///
/// ```
/// use yield_core::validation::{CalculatorForm, validate_form};
///
/// let form = CalculatorForm {
///     purchase_price: "200000".to_string(),
///     monthly_rent: "1200".to_string(),
///     annual_fee: "500".to_string(),
///     email: "owner@example.com".to_string(),
///     surface: "50".to_string(),
///     ..CalculatorForm::default()
/// };
///
/// let input = validate_form(&form).unwrap();
/// assert_eq!(input.purchase_price, 200000.0);
/// // Only one of the three optional fields was filled in.
/// assert!(input.data_driven.is_none());
/// ```
pub fn validate_form(form: &CalculatorForm) -> Result<SimulationInput, Vec<ValidationError>> {
    let mut parsed = ParsedForm::default();
    let mut errors = Vec::new();

    for field in Field::ALL {
        match validate_field(field, form.value(field), form.is_required(field)) {
            Ok(Some(value)) => parsed.set(field, value),
            Ok(None) => {}
            Err(error) => errors.push(error),
        }
    }

    let (Some(purchase_price), Some(monthly_rent), Some(annual_fee), Some(email)) = (
        parsed.purchase_price,
        parsed.monthly_rent,
        parsed.annual_fee,
        parsed.email,
    ) else {
        return Err(errors);
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(SimulationInput {
        purchase_price,
        monthly_rent,
        annual_fee,
        email,
        data_driven: DataDrivenInputs::from_parts(
            parsed.surface,
            parsed.bedrooms,
            parsed.location_score,
        ),
    })
}
