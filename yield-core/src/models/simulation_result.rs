use serde::{Deserialize, Serialize};

/// Projection based on the regression-estimated rental price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedYield {
    /// Regression estimate of the yearly price actually paid by tenants.
    pub annual_paid_price: f64,

    /// Monthly average of the three-year net income.
    pub expected_monthly_net_income: f64,

    /// `expected_monthly_net_income` as a percentage of the purchase price.
    pub expected_monthly_net_return_pct: f64,
}

/// Output of the yield calculator.
///
/// Values are unrounded; rounding belongs to [`crate::presentation`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Gross rent over the projection window.
    pub three_year_rent: f64,

    /// Fees over the projection window.
    pub three_year_fee: f64,

    /// Commission charged on a single year of rent.
    pub three_year_commission: f64,

    /// Average monthly net income over the projection window.
    pub average_monthly_net_income: f64,

    /// `average_monthly_net_income` as a percentage of the purchase price.
    pub monthly_net_return_pct: f64,

    /// Present only when all data-driven inputs were supplied.
    pub expected: Option<ExpectedYield>,
}

impl SimulationResult {
    pub fn has_expected(&self) -> bool {
        self.expected.is_some()
    }
}
