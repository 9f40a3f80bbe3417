use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{ValidationError, ValidationErrorCode};

/// `local@domain.tld` with no whitespace and exactly one `@`.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

static GROUPED_NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d+)?$").expect("grouping pattern is a valid regex")
});

/// Fields of the calculator form, serialized with their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    PurchasePrice,
    MonthlyRent,
    AnnualFee,
    Email,
    Surface,
    Bedrooms,
    LocationScore,
}

/// How a field's value is checked once it is known to be non-empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// `local@domain.tld`.
    Email,
    /// Any real number strictly greater than zero.
    PositiveNumber,
    /// A real number within `[min, max]`.
    NumberInRange {
        min: f64,
        max: f64,
        out_of_range: ValidationErrorCode,
    },
    /// An integer within `[min, max]`, picked from a fixed set of options.
    IntegerInSet {
        min: i64,
        max: i64,
        out_of_range: ValidationErrorCode,
    },
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 7] = [
        Field::PurchasePrice,
        Field::MonthlyRent,
        Field::AnnualFee,
        Field::Email,
        Field::Surface,
        Field::Bedrooms,
        Field::LocationScore,
    ];

    /// The optional regression inputs.
    pub const DATA_DRIVEN: [Field; 3] = [Field::Surface, Field::Bedrooms, Field::LocationScore];

    pub fn name(&self) -> &'static str {
        match self {
            Self::PurchasePrice => "purchasePrice",
            Self::MonthlyRent => "monthlyRent",
            Self::AnnualFee => "annualFee",
            Self::Email => "email",
            Self::Surface => "surface",
            Self::Bedrooms => "bedrooms",
            Self::LocationScore => "locationScore",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::PurchasePrice | Self::MonthlyRent | Self::AnnualFee => FieldKind::PositiveNumber,
            Self::Email => FieldKind::Email,
            Self::Surface => FieldKind::NumberInRange {
                min: 20.0,
                max: 120.0,
                out_of_range: ValidationErrorCode::SurfaceOutOfRange,
            },
            Self::Bedrooms => FieldKind::IntegerInSet {
                min: 1,
                max: 4,
                out_of_range: ValidationErrorCode::BedroomsOutOfRange,
            },
            Self::LocationScore => FieldKind::NumberInRange {
                min: 5.0,
                max: 10.0,
                out_of_range: ValidationErrorCode::LocationScoreOutOfRange,
            },
        }
    }
}

impl fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Integer(i64),
    Text(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// Returns true when `value` looks like `local@domain.tld`.
///
/// The check runs on the value as given: leading or trailing whitespace is
/// rejected.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Trims whitespace and removes commas used as thousands separators.
///
/// Returns `None` when a comma appears anywhere other than between
/// three-digit groups, so `"1,5"` is not read as 15.
fn normalize_number_input(raw: &str) -> Option<Cow<'_, str>> {
    let trimmed = raw.trim();
    if !trimmed.contains(',') {
        return Some(Cow::Borrowed(trimmed));
    }
    GROUPED_NUMBER_PATTERN
        .is_match(trimmed)
        .then(|| Cow::Owned(trimmed.replace(',', "")))
}

fn parse_number(raw: &str) -> Option<f64> {
    normalize_number_input(raw)?
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Validates one raw form value.
///
/// Returns `Ok(None)` for an empty optional value, `Ok(Some(value))` with the
/// parsed value when every rule passes, or the first failing rule as a
/// [`ValidationError`].
///
/// # Examples
///
/// ```
/// use yield_core::validation::{Field, FieldValue, ValidationErrorCode, validate_field};
///
/// assert_eq!(
///     validate_field(Field::Surface, "20", true),
///     Ok(Some(FieldValue::Number(20.0)))
/// );
/// assert_eq!(
///     validate_field(Field::Surface, "19.99", true).unwrap_err().code,
///     ValidationErrorCode::SurfaceOutOfRange
/// );
/// assert_eq!(validate_field(Field::Bedrooms, "", false), Ok(None));
/// ```
pub fn validate_field(
    field: Field,
    raw: &str,
    required: bool,
) -> Result<Option<FieldValue>, ValidationError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return if required {
            Err(ValidationError::new(field, ValidationErrorCode::RequiredField))
        } else {
            Ok(None)
        };
    }

    let fail = |code| Err(ValidationError::new(field, code));

    match field.kind() {
        FieldKind::IntegerInSet {
            min,
            max,
            out_of_range,
        } => match trimmed.parse::<i64>() {
            Ok(value) if (min..=max).contains(&value) => Ok(Some(FieldValue::Integer(value))),
            _ => fail(out_of_range),
        },
        FieldKind::Email => {
            if is_valid_email(raw) {
                Ok(Some(FieldValue::Text(raw.to_string())))
            } else {
                fail(ValidationErrorCode::InvalidEmail)
            }
        }
        FieldKind::NumberInRange {
            min,
            max,
            out_of_range,
        } => match parse_number(raw) {
            None => fail(ValidationErrorCode::InvalidNumber),
            Some(value) if value < min || value > max => fail(out_of_range),
            Some(value) => Ok(Some(FieldValue::Number(value))),
        },
        FieldKind::PositiveNumber => match parse_number(raw) {
            None => fail(ValidationErrorCode::InvalidNumber),
            Some(value) if value < 0.0 => fail(ValidationErrorCode::NegativeNumber),
            Some(value) if value == 0.0 => fail(ValidationErrorCode::ZeroValue),
            Some(value) => Ok(Some(FieldValue::Number(value))),
        },
    }
}
