use clap::Args;
use yield_core::presentation::ResultPresentation;
use yield_core::validation::{CalculatorForm, ValidationError};

/// Inputs of a one-off calculation. Values are taken as typed, so the same
/// rules apply as for the web form.
#[derive(Debug, Clone, Args)]
pub struct CalculateArgs {
    #[arg(long)]
    pub purchase_price: String,

    #[arg(long)]
    pub monthly_rent: String,

    #[arg(long)]
    pub annual_fee: String,

    #[arg(long)]
    pub email: String,

    /// Surface in m² (20 to 120).
    #[arg(long)]
    pub surface: Option<String>,

    /// Number of bedrooms (1 to 4).
    #[arg(long)]
    pub bedrooms: Option<String>,

    /// Location score (5.0 to 10.0).
    #[arg(long)]
    pub location_score: Option<String>,

    /// Store the four base inputs after a successful calculation.
    #[arg(long)]
    pub save: bool,
}

impl CalculateArgs {
    /// Passing any of the data-driven options switches the data-driven mode
    /// on, which makes the other two mandatory.
    pub fn to_form(&self) -> CalculatorForm {
        CalculatorForm {
            purchase_price: self.purchase_price.clone(),
            monthly_rent: self.monthly_rent.clone(),
            annual_fee: self.annual_fee.clone(),
            email: self.email.clone(),
            data_driven: self.surface.is_some()
                || self.bedrooms.is_some()
                || self.location_score.is_some(),
            surface: self.surface.clone().unwrap_or_default(),
            bedrooms: self.bedrooms.clone().unwrap_or_default(),
            location_score: self.location_score.clone().unwrap_or_default(),
        }
    }
}

const LABEL_WIDTH: usize = 37;

pub fn render_result(display: &ResultPresentation) -> String {
    let mut lines = vec![
        ("Average monthly net income (3 years):", &display.average_monthly_net_income),
        ("Monthly net return (3 years):", &display.monthly_net_return),
    ];

    if let (Some(income), Some(ret)) = (
        &display.expected_monthly_net_income,
        &display.expected_monthly_net_return,
    ) {
        lines.push(("Expected monthly net income:", income));
        lines.push(("Expected monthly net return:", ret));
    }

    lines
        .into_iter()
        .map(|(label, value)| format!("{label:<width$} {value}\n", width = LABEL_WIDTH))
        .collect()
}

/// One line per rejected option, named the way it is passed on the command line.
pub fn render_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("--{}: {}\n", option_name(e.field.name()), e.message))
        .collect()
}

fn option_name(wire_name: &str) -> String {
    let mut out = String::with_capacity(wire_name.len() + 2);
    for c in wire_name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
