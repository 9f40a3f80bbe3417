use async_trait::async_trait;
use tracing::info;
use yield_core::db::{DbConfig, RepositoryFactory};
use yield_core::{RepositoryError, SimulationRepository};

use crate::repository::SqliteRepository;

/// [`RepositoryFactory`] for SQLite.
///
/// Register this with a [`yield_core::db::RepositoryRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use yield_core::db::RepositoryRegistry;
/// use yield_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string` and bring
    /// its schema up to date.
    ///
    /// Accepted values:
    /// * A sqlx URL, e.g. `"sqlite:simulations.db?mode=rwc"`.
    /// * A bare file path, e.g. `"simulations.db"`. Created if missing.
    /// * `":memory:"`, an ephemeral database (useful for tests).
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn SimulationRepository>, RepositoryError> {
        let repo = SqliteRepository::new(&config.connection_string)
            .await
            .map_err(|e| RepositoryError::Connection(format!("{e:#}")))?;
        repo.run_migrations()
            .await
            .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;

        info!(connection = %config.connection_string, "sqlite repository ready");
        Ok(Box::new(repo))
    }
}
