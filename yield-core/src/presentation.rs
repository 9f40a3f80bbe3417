//! Display strings for a [`SimulationResult`].

use serde::{Deserialize, Serialize};

use crate::calculations::common::format_two_decimals;
use crate::models::SimulationResult;

/// Formatted figures ready to be shown next to the form.
///
/// The expected pair is `Some` exactly when `show_expected` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPresentation {
    pub average_monthly_net_income: String,
    pub monthly_net_return: String,
    pub expected_monthly_net_income: Option<String>,
    pub expected_monthly_net_return: Option<String>,
    pub show_expected: bool,
}

/// `$` followed by the amount with two decimals, e.g. `$858.33`.
pub fn format_currency(amount: f64) -> String {
    format!("${}", format_two_decimals(amount))
}

/// Percentage with two decimals and a trailing `%`, e.g. `0.43%`.
pub fn format_percentage(pct: f64) -> String {
    format!("{}%", format_two_decimals(pct))
}

pub fn present(result: &SimulationResult) -> ResultPresentation {
    ResultPresentation {
        average_monthly_net_income: format_currency(result.average_monthly_net_income),
        monthly_net_return: format_percentage(result.monthly_net_return_pct),
        expected_monthly_net_income: result
            .expected
            .map(|e| format_currency(e.expected_monthly_net_income)),
        expected_monthly_net_return: result
            .expected
            .map(|e| format_percentage(e.expected_monthly_net_return_pct)),
        show_expected: result.has_expected(),
    }
}
