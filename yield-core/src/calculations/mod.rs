//! Rental yield calculations.
//!
//! A single calculator covers both modes: the baseline projection from the
//! user-supplied rent, and the data-driven projection that replaces the rent
//! with a regression estimate when surface, bedrooms, and location score are
//! all known.

pub mod common;
pub mod yield_calculator;

pub use yield_calculator::{
    BaselineYield, RegressionCoefficients, YieldCalculator, YieldModelConfig, YieldModelError,
    baseline_yield, calculate,
};
