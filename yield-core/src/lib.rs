pub mod calculations;
pub mod db;
pub mod models;
pub mod presentation;
pub mod validation;

pub use db::repository::{RepositoryError, SimulationRepository};
pub use models::*;
