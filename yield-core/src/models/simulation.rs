use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::baseline_yield;

/// A stored simulation. Only the raw inputs are kept; derived metrics are
/// recomputed whenever they are needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub id: i64,
    #[serde(rename = "propertyPurchasePrice")]
    pub purchase_price: f64,
    #[serde(rename = "monthlyRentalAmount")]
    pub monthly_rent: f64,
    #[serde(rename = "annualRentalFee")]
    pub annual_fee: f64,
    #[serde(rename = "prospectEmailAddress")]
    pub email: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// For storing new simulations (no id or timestamp)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSimulation {
    #[serde(rename = "propertyPurchasePrice")]
    pub purchase_price: f64,
    #[serde(rename = "monthlyRentalAmount")]
    pub monthly_rent: f64,
    #[serde(rename = "annualRentalFee")]
    pub annual_fee: f64,
    #[serde(rename = "prospectEmailAddress")]
    pub email: String,
}

impl NewSimulation {
    /// Creates a record ready for storage. The email is trimmed and
    /// lower-cased.
    pub fn new(
        purchase_price: f64,
        monthly_rent: f64,
        annual_fee: f64,
        email: &str,
    ) -> Self {
        Self {
            purchase_price,
            monthly_rent,
            annual_fee,
            email: email.trim().to_lowercase(),
        }
    }
}

/// Admin listing row: the stored record plus baseline metrics recomputed
/// from its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    #[serde(flatten)]
    pub simulation: Simulation,
    pub three_year_monthly_average_net_income: f64,
    pub monthly_net_return_for_three_years: f64,
}

impl From<Simulation> for SimulationSummary {
    fn from(simulation: Simulation) -> Self {
        let baseline = baseline_yield(
            simulation.purchase_price,
            simulation.monthly_rent,
            simulation.annual_fee,
        );

        Self {
            simulation,
            three_year_monthly_average_net_income: baseline.average_monthly_net_income,
            monthly_net_return_for_three_years: baseline.monthly_net_return_pct,
        }
    }
}
