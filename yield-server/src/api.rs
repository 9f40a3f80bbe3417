use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};
use yield_core::presentation::{ResultPresentation, present};
use yield_core::validation::{
    CalculatorForm, SimulationSubmission, validate_form, validate_submission,
};
use yield_core::{Simulation, SimulationResult, SimulationSummary};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedSimulation {
    pub success: bool,
    pub data: Simulation,
}

#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub result: SimulationResult,
    pub display: ResultPresentation,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Validate and store a submission using the record's wire names.
async fn create_simulation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimulationSubmission>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedSimulation>)> {
    let Json(submission) = payload?;

    let record = validate_submission(&submission).inspect_err(|e| {
        warn!(reason = e.title(), "rejected simulation submission");
    })?;

    let saved = state
        .repository
        .store(record)
        .await
        .map_err(|source| {
            error!(error = %source, "error creating simulation");
            ApiError::Storage {
                message: "Failed to save simulation",
                source,
            }
        })?;

    debug!(id = saved.id, "simulation created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedSimulation {
            success: true,
            data: saved,
        }),
    ))
}

/// Admin listing, newest first, with baseline metrics recomputed per row.
async fn list_simulations(
    State(state): State<Arc<AppState>>
) -> ApiResult<Json<Vec<SimulationSummary>>> {
    let simulations = state.repository.list_all().await.map_err(|source| {
        error!(error = %source, "error fetching simulations");
        ApiError::Storage {
            message: "Failed to load simulations",
            source,
        }
    })?;

    Ok(Json(
        simulations
            .into_iter()
            .map(SimulationSummary::from)
            .collect(),
    ))
}

/// Validate the raw form, compute the projection and answer immediately.
/// The four base inputs are persisted in the background; a storage failure
/// is logged and does not affect the response.
async fn calculate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CalculatorForm>, JsonRejection>,
) -> ApiResult<Json<CalculationResponse>> {
    let Json(form) = payload?;

    let input = validate_form(&form).map_err(|errors| {
        warn!(count = errors.len(), "calculator form rejected");
        ApiError::Validation(errors)
    })?;

    let result = state.calculator.calculate(&input);
    let display = present(&result);

    let repository = Arc::clone(&state.repository);
    let record = input.to_new_simulation();
    tokio::spawn(async move {
        match repository.store(record).await {
            Ok(saved) => debug!(id = saved.id, "calculation persisted"),
            Err(e) => error!(error = %e, "failed to persist calculation"),
        }
    });

    Ok(Json(CalculationResponse { result, display }))
}

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/simulations",
            post(create_simulation).get(list_simulations),
        )
        .route("/api/calculate", post(calculate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
