//! Admin listing output: an aligned text table or CSV.

use std::io;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use yield_core::SimulationSummary;
use yield_core::presentation::{format_currency, format_percentage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ListFormat {
    #[default]
    Table,
    Csv,
}

/// Flat CSV layout. Amounts are written unrounded so the file can be
/// re-analysed without losing precision.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: i64,
    created_at: DateTime<Utc>,
    email: &'a str,
    purchase_price: f64,
    monthly_rent: f64,
    annual_fee: f64,
    average_monthly_net_income: f64,
    monthly_net_return_pct: f64,
}

impl<'a> From<&'a SimulationSummary> for CsvRow<'a> {
    fn from(summary: &'a SimulationSummary) -> Self {
        let s = &summary.simulation;
        Self {
            id: s.id,
            created_at: s.created_at,
            email: &s.email,
            purchase_price: s.purchase_price,
            monthly_rent: s.monthly_rent,
            annual_fee: s.annual_fee,
            average_monthly_net_income: summary.three_year_monthly_average_net_income,
            monthly_net_return_pct: summary.monthly_net_return_for_three_years,
        }
    }
}

pub fn write_csv<W: io::Write>(
    writer: W,
    summaries: &[SimulationSummary],
) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for summary in summaries {
        csv.serialize(CsvRow::from(summary))
            .with_context(|| format!("Failed to write simulation {}", summary.simulation.id))?;
    }
    csv.flush().context("Failed to flush CSV output")?;
    Ok(())
}

const HEADERS: [&str; 8] = [
    "ID",
    "Created",
    "Email",
    "Price",
    "Rent",
    "Fee",
    "Avg net income",
    "Net return",
];

pub fn render_table(summaries: &[SimulationSummary]) -> String {
    if summaries.is_empty() {
        return "No simulations found.\n".to_string();
    }

    let rows: Vec<[String; 8]> = summaries
        .iter()
        .map(|summary| {
            let s = &summary.simulation;
            [
                s.id.to_string(),
                s.created_at.format("%Y-%m-%d %H:%M").to_string(),
                s.email.clone(),
                format_currency(s.purchase_price),
                format_currency(s.monthly_rent),
                format_currency(s.annual_fee),
                format_currency(summary.three_year_monthly_average_net_income),
                format_percentage(summary.monthly_net_return_for_three_years),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line<S: AsRef<str>>(
    out: &mut String,
    cells: &[S],
    widths: &[usize],
) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
