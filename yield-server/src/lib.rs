pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;

pub use state::{AppState, build_state};
