use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use yield_core::SimulationRepository;
use yield_core::calculations::YieldCalculator;

use crate::config::Config;

pub struct AppState {
    pub repository: Arc<dyn SimulationRepository>,
    pub calculator: YieldCalculator,
}

impl AppState {
    /// State with the default yield model.
    pub fn new(repository: Arc<dyn SimulationRepository>) -> Self {
        Self {
            repository,
            calculator: YieldCalculator::default(),
        }
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_config = config.db_config();
    let repository = yield_db_sqlite::registry()
        .create(&db_config)
        .await
        .with_context(|| format!("Failed to open '{}' backend", db_config.backend))?;
    info!(backend = %db_config.backend, "repository ready");

    Ok(Arc::new(AppState::new(Arc::from(repository))))
}
