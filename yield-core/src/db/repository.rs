use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewSimulation, Simulation};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage for submitted simulations. Records are append-only.
#[async_trait]
pub trait SimulationRepository: Send + Sync {
    /// Persist a submission and return it with its id and creation time.
    async fn store(
        &self,
        simulation: NewSimulation,
    ) -> Result<Simulation, RepositoryError>;

    async fn get(
        &self,
        id: i64,
    ) -> Result<Simulation, RepositoryError>;

    /// Every stored simulation, newest first. Ties on `created_at` are
    /// broken by descending id.
    async fn list_all(&self) -> Result<Vec<Simulation>, RepositoryError>;
}
