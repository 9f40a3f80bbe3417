//! Three-year net rental yield projection.
//!
//! # Baseline
//!
//! | Step | Formula |
//! |------|---------|
//! | Rent       | monthly rent × 12 × years |
//! | Fees       | annual fee × years |
//! | Commission | monthly rent × 12 × (30% + 25% + 20%) |
//! | Net income | (rent − fees − commission) / (12 × years) |
//! | Return     | net income / purchase price × 100 |
//!
//! Commission is charged on one year of rent, not on the whole window.
//!
//! # Data-driven
//!
//! When the surface, bedroom count, and location score are all known, the
//! yearly price tenants actually pay is estimated with a log-linear model:
//!
//! ```text
//! annual_paid_price = e^3.608 × surface^0.285 × bedrooms^-0.043
//!                     × location_score^0.851 × (monthly_rent / 30)^0.735
//! ```
//!
//! and the projection is repeated on that estimate. Commission again covers a
//! single year.
//!
//! # Example
//!
//! ```
//! use yield_core::calculations::calculate;
//! use yield_core::SimulationInput;
//!
//! let input = SimulationInput {
//!     purchase_price: 200000.0,
//!     monthly_rent: 1200.0,
//!     annual_fee: 500.0,
//!     email: "owner@example.com".to_string(),
//!     data_driven: None,
//! };
//!
//! let result = calculate(&input);
//!
//! assert_eq!(result.three_year_rent, 43200.0);
//! assert_eq!(result.three_year_commission, 10800.0);
//! assert_eq!(result.average_monthly_net_income, 30900.0 / 36.0);
//! assert!(result.expected.is_none());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{DataDrivenInputs, ExpectedYield, SimulationInput, SimulationResult};

/// Errors raised when a [`YieldModelConfig`] is unusable.
#[derive(Debug, Error, PartialEq)]
pub enum YieldModelError {
    /// The projection window must cover at least one year.
    #[error("projection window must be at least one year, got {0}")]
    InvalidProjectionYears(u32),

    /// Every commission tier must be a rate between 0 and 1.
    #[error("commission tier must be between 0 and 1, got {0}")]
    InvalidCommissionTier(f64),

    /// Regression coefficients must be finite.
    #[error("regression coefficient '{0}' must be finite")]
    NonFiniteCoefficient(&'static str),

    /// The daily-rate divisor must be positive.
    #[error("days per month must be positive, got {0}")]
    InvalidDaysPerMonth(f64),
}

/// Coefficients of the rental price regression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionCoefficients {
    /// Natural log of the model constant (`e^intercept`).
    pub intercept: f64,
    pub surface: f64,
    pub bedrooms: f64,
    pub location_score: f64,
    /// Exponent applied to the daily rate derived from the monthly rent.
    pub daily_rate: f64,
    /// Divisor turning the monthly rent into a daily rate.
    pub days_per_month: f64,
}

impl Default for RegressionCoefficients {
    fn default() -> Self {
        Self {
            intercept: 3.608,
            surface: 0.285,
            bedrooms: -0.043,
            location_score: 0.851,
            daily_rate: 0.735,
            days_per_month: 30.0,
        }
    }
}

/// Parameters of the yield model.
///
/// The defaults reproduce the published figures; they exist as a struct so
/// tests and future variants can vary one parameter at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldModelConfig {
    /// Length of the projection window.
    pub projection_years: u32,

    /// Commission tiers, summed in order and applied to one year of income.
    pub commission_tiers: Vec<f64>,

    pub regression: RegressionCoefficients,
}

impl Default for YieldModelConfig {
    fn default() -> Self {
        Self {
            projection_years: 3,
            commission_tiers: vec![0.30, 0.25, 0.20],
            regression: RegressionCoefficients::default(),
        }
    }
}

impl YieldModelConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`YieldModelError`] if:
    /// - `projection_years` is zero
    /// - a commission tier is outside [0, 1]
    /// - a regression coefficient is NaN or infinite
    /// - `days_per_month` is not positive
    pub fn validate(&self) -> Result<(), YieldModelError> {
        if self.projection_years == 0 {
            return Err(YieldModelError::InvalidProjectionYears(
                self.projection_years,
            ));
        }
        if let Some(&tier) = self
            .commission_tiers
            .iter()
            .find(|tier| !(0.0..=1.0).contains(*tier))
        {
            return Err(YieldModelError::InvalidCommissionTier(tier));
        }

        let r = &self.regression;
        for (name, value) in [
            ("intercept", r.intercept),
            ("surface", r.surface),
            ("bedrooms", r.bedrooms),
            ("location_score", r.location_score),
            ("daily_rate", r.daily_rate),
        ] {
            if !value.is_finite() {
                return Err(YieldModelError::NonFiniteCoefficient(name));
            }
        }
        if r.days_per_month.is_nan() || r.days_per_month <= 0.0 {
            return Err(YieldModelError::InvalidDaysPerMonth(r.days_per_month));
        }
        Ok(())
    }

    /// Combined commission rate. The tiers are added in order, so the default
    /// is `0.30 + 0.25 + 0.20`.
    pub fn commission_rate(&self) -> f64 {
        self.commission_tiers
            .iter()
            .fold(0.0, |total, tier| total + tier)
    }
}

/// Baseline metrics computed from the user-supplied rent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineYield {
    pub three_year_rent: f64,
    pub three_year_fee: f64,
    pub three_year_commission: f64,
    pub average_monthly_net_income: f64,
    pub monthly_net_return_pct: f64,
}

/// Yield calculator bound to a validated [`YieldModelConfig`].
///
/// # Example
///
/// ```
/// use yield_core::calculations::{YieldCalculator, YieldModelConfig};
///
/// let calculator = YieldCalculator::new(YieldModelConfig::default()).unwrap();
/// let baseline = calculator.baseline(200000.0, 1200.0, 500.0);
///
/// assert_eq!(baseline.three_year_fee, 1500.0);
/// ```
#[derive(Debug, Clone)]
pub struct YieldCalculator {
    config: YieldModelConfig,
}

impl Default for YieldCalculator {
    fn default() -> Self {
        Self {
            config: YieldModelConfig::default(),
        }
    }
}

impl YieldCalculator {
    /// Creates a calculator after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`YieldModelError`] if the configuration is invalid.
    pub fn new(config: YieldModelConfig) -> Result<Self, YieldModelError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &YieldModelConfig {
        &self.config
    }

    /// Runs the projection for `input`.
    ///
    /// The data-driven block is computed only when `input.data_driven` is
    /// present. `purchase_price` must be non-zero; validation guarantees it.
    pub fn calculate(
        &self,
        input: &SimulationInput,
    ) -> SimulationResult {
        debug!(
            purchase_price = input.purchase_price,
            monthly_rent = input.monthly_rent,
            annual_fee = input.annual_fee,
            data_driven = input.data_driven.is_some(),
            "calculating rental yield"
        );

        let baseline = self.baseline(input.purchase_price, input.monthly_rent, input.annual_fee);

        let expected = input.data_driven.as_ref().map(|inputs| {
            self.expected(
                input.purchase_price,
                input.monthly_rent,
                input.annual_fee,
                inputs,
            )
        });

        SimulationResult {
            three_year_rent: baseline.three_year_rent,
            three_year_fee: baseline.three_year_fee,
            three_year_commission: baseline.three_year_commission,
            average_monthly_net_income: baseline.average_monthly_net_income,
            monthly_net_return_pct: baseline.monthly_net_return_pct,
            expected,
        }
    }

    /// Baseline projection from the user-supplied monthly rent.
    pub fn baseline(
        &self,
        purchase_price: f64,
        monthly_rent: f64,
        annual_fee: f64,
    ) -> BaselineYield {
        let years = self.years();
        let yearly_rent = monthly_rent * 12.0;

        let three_year_rent = yearly_rent * years;
        let three_year_fee = annual_fee * years;
        let three_year_commission = yearly_rent * self.config.commission_rate();
        let average_monthly_net_income =
            (three_year_rent - three_year_fee - three_year_commission) / self.months();
        let monthly_net_return_pct =
            self.return_pct(average_monthly_net_income, purchase_price);

        BaselineYield {
            three_year_rent,
            three_year_fee,
            three_year_commission,
            average_monthly_net_income,
            monthly_net_return_pct,
        }
    }

    /// Regression estimate of the yearly price tenants pay.
    pub fn annual_paid_price(
        &self,
        monthly_rent: f64,
        inputs: &DataDrivenInputs,
    ) -> f64 {
        let r = &self.config.regression;
        let daily_rate = monthly_rent / r.days_per_month;

        r.intercept.exp()
            * inputs.surface.powf(r.surface)
            * f64::from(inputs.bedrooms).powf(r.bedrooms)
            * inputs.location_score.powf(r.location_score)
            * daily_rate.powf(r.daily_rate)
    }

    /// Data-driven projection using [`Self::annual_paid_price`].
    fn expected(
        &self,
        purchase_price: f64,
        monthly_rent: f64,
        annual_fee: f64,
        inputs: &DataDrivenInputs,
    ) -> ExpectedYield {
        let years = self.years();
        let annual_paid_price = self.annual_paid_price(monthly_rent, inputs);

        let total_income = annual_paid_price * years;
        let commission = annual_paid_price * self.config.commission_rate();
        let total_fee = annual_fee * years;
        let net_income = total_income - commission - total_fee;

        if net_income < 0.0 {
            warn!(
                annual_paid_price,
                annual_fee,
                net_income,
                "data-driven projection is negative"
            );
        }

        let expected_monthly_net_income = net_income / self.months();
        let expected_monthly_net_return_pct =
            self.return_pct(expected_monthly_net_income, purchase_price);

        ExpectedYield {
            annual_paid_price,
            expected_monthly_net_income,
            expected_monthly_net_return_pct,
        }
    }

    fn years(&self) -> f64 {
        f64::from(self.config.projection_years)
    }

    fn months(&self) -> f64 {
        12.0 * self.years()
    }

    fn return_pct(
        &self,
        monthly_net_income: f64,
        purchase_price: f64,
    ) -> f64 {
        (monthly_net_income / purchase_price) * 100.0
    }
}

/// Runs [`YieldCalculator::calculate`] with the default model.
pub fn calculate(input: &SimulationInput) -> SimulationResult {
    YieldCalculator::default().calculate(input)
}

/// Runs [`YieldCalculator::baseline`] with the default model.
pub fn baseline_yield(
    purchase_price: f64,
    monthly_rent: f64,
    annual_fee: f64,
) -> BaselineYield {
    YieldCalculator::default().baseline(purchase_price, monthly_rent, annual_fee)
}
