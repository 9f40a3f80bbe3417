use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use tracing::debug;
use yield_core::{NewSimulation, RepositoryError, Simulation, SimulationRepository};

use crate::numeric::get_f64;

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Open `database_url`, creating the file if needed.
    ///
    /// Accepts sqlx URLs (`sqlite:simulations.db?mode=rwc`), bare paths and
    /// `:memory:`. An in-memory database lives inside one connection, so the
    /// pool keeps exactly one connection open forever in that case.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database url: {}", database_url))?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new();
        if is_in_memory(database_url) {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;

        debug!(database_url, "opened sqlite pool");
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn row_to_simulation(row: &SqliteRow) -> Result<Simulation, RepositoryError> {
    Ok(Simulation {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        purchase_price: get_f64(row, "purchase_price")?,
        monthly_rent: get_f64(row, "monthly_rent")?,
        annual_fee: get_f64(row, "annual_fee")?,
        email: row
            .try_get("email")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
    })
}

#[async_trait]
impl SimulationRepository for SqliteRepository {
    async fn store(
        &self,
        simulation: NewSimulation,
    ) -> Result<Simulation, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO simulations (
                purchase_price, monthly_rent, annual_fee, email, created_at
            ) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(simulation.purchase_price)
        .bind(simulation.monthly_rent)
        .bind(simulation.annual_fee)
        .bind(&simulation.email)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        debug!(id, "stored simulation");
        self.get(id).await
    }

    async fn get(
        &self,
        id: i64,
    ) -> Result<Simulation, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, purchase_price, monthly_rent, annual_fee, email, created_at
             FROM simulations WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        row_to_simulation(&row)
    }

    async fn list_all(&self) -> Result<Vec<Simulation>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, purchase_price, monthly_rent, annual_fee, email, created_at
             FROM simulations ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_simulation).collect()
    }
}
