use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;
use yield_core::db::DbConfig;
use yield_core::{NewSimulation, RepositoryError, Simulation, SimulationRepository};
use yield_server::api::app_router;
use yield_server::AppState;

// =============================================================================
// helpers
// =============================================================================

async fn sqlite_repository() -> Arc<dyn SimulationRepository> {
    let repo = yield_db_sqlite::registry()
        .create(&DbConfig::default())
        .await
        .expect("in-memory repository");
    Arc::from(repo)
}

/// Every operation fails as if the database were gone.
struct FailingRepository;

#[async_trait]
impl SimulationRepository for FailingRepository {
    async fn store(
        &self,
        _simulation: NewSimulation,
    ) -> Result<Simulation, RepositoryError> {
        Err(RepositoryError::Database("disk I/O error".to_string()))
    }

    async fn get(
        &self,
        _id: i64,
    ) -> Result<Simulation, RepositoryError> {
        Err(RepositoryError::Database("disk I/O error".to_string()))
    }

    async fn list_all(&self) -> Result<Vec<Simulation>, RepositoryError> {
        Err(RepositoryError::Database("disk I/O error".to_string()))
    }
}

async fn send(
    repository: Arc<dyn SimulationRepository>,
    request: Request<Body>,
) -> Response {
    app_router(Arc::new(AppState::new(repository)))
        .oneshot(request)
        .await
        .unwrap()
}

fn post_json(
    uri: &str,
    body: &Value,
) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn submission() -> Value {
    json!({
        "propertyPurchasePrice": 200000,
        "monthlyRentalAmount": 1200,
        "annualRentalFee": 500,
        "prospectEmailAddress": "Owner@Example.com"
    })
}

fn form() -> Value {
    json!({
        "purchasePrice": "200,000",
        "monthlyRent": "1200",
        "annualFee": "500",
        "email": "owner@example.com"
    })
}

/// Waits for a background store to land.
async fn wait_for_records(
    repository: &Arc<dyn SimulationRepository>,
    expected: usize,
) -> Vec<Simulation> {
    for _ in 0..100 {
        let records = repository.list_all().await.unwrap();
        if records.len() >= expected {
            return records;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("expected {expected} stored simulation(s)");
}

// =============================================================================
// /health
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let response = send(sqlite_repository().await, get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}

// =============================================================================
// POST /api/simulations
// =============================================================================

#[tokio::test]
async fn create_simulation_returns_stored_record() {
    let repository = sqlite_repository().await;

    let response = send(repository.clone(), post_json("/api/simulations", &submission())).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["propertyPurchasePrice"], 200000.0);
    assert_eq!(body["data"]["prospectEmailAddress"], "owner@example.com");
    assert!(body["data"]["id"].is_i64());
    assert!(body["data"]["createdAt"].is_string());

    assert_eq!(repository.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn create_simulation_reports_missing_fields() {
    let mut body = submission();
    body.as_object_mut().unwrap().remove("annualRentalFee");

    let response = send(sqlite_repository().await, post_json("/api/simulations", &body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({
            "error": "Missing required fields",
            "message": "All fields (propertyPurchasePrice, monthlyRentalAmount, annualRentalFee, prospectEmailAddress) are required"
        })
    );
}

#[tokio::test]
async fn create_simulation_rejects_zero_as_non_positive() {
    let mut body = submission();
    body["monthlyRentalAmount"] = json!(0);

    let response = send(sqlite_repository().await, post_json("/api/simulations", &body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid input values");
}

#[tokio::test]
async fn create_simulation_rejects_bad_email() {
    let mut body = submission();
    body["prospectEmailAddress"] = json!("owner@example");

    let response = send(sqlite_repository().await, post_json("/api/simulations", &body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({
            "error": "Invalid email format",
            "message": "Please provide a valid email address"
        })
    );
}

#[tokio::test]
async fn create_simulation_rejects_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/simulations")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = send(sqlite_repository().await, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid request body");
}

#[tokio::test]
async fn create_simulation_storage_failure_is_internal_error() {
    let response = send(
        Arc::new(FailingRepository),
        post_json("/api/simulations", &submission()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({
            "error": "Internal server error",
            "message": "Failed to save simulation"
        })
    );
}

// =============================================================================
// GET /api/simulations
// =============================================================================

#[tokio::test]
async fn list_simulations_recomputes_metrics_newest_first() {
    let repository = sqlite_repository().await;
    let first = repository
        .store(NewSimulation::new(200000.0, 1200.0, 500.0, "first@example.com"))
        .await
        .unwrap();
    let second = repository
        .store(NewSimulation::new(100000.0, 900.0, 300.0, "second@example.com"))
        .await
        .unwrap();

    let response = send(repository, get("/api/simulations")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], second.id);
    assert_eq!(rows[1]["id"], first.id);
    assert_eq!(rows[1]["threeYearMonthlyAverageNetIncome"], 30900.0 / 36.0);
    assert_eq!(
        rows[1]["monthlyNetReturnForThreeYears"],
        30900.0 / 36.0 / 200000.0 * 100.0
    );
}

#[tokio::test]
async fn list_simulations_failure_is_internal_error() {
    let response = send(Arc::new(FailingRepository), get("/api/simulations")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await["message"],
        "Failed to load simulations"
    );
}

// =============================================================================
// POST /api/calculate
// =============================================================================

#[tokio::test]
async fn calculate_returns_result_and_display() {
    let repository = sqlite_repository().await;

    let response = send(repository.clone(), post_json("/api/calculate", &form())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"]["threeYearRent"], 43200.0);
    assert_eq!(body["result"]["threeYearCommission"], 10800.0);
    assert!(body["result"]["expected"].is_null());
    assert_eq!(
        body["display"],
        json!({
            "averageMonthlyNetIncome": "$858.33",
            "monthlyNetReturn": "0.43%",
            "expectedMonthlyNetIncome": null,
            "expectedMonthlyNetReturn": null,
            "showExpected": false
        })
    );

    let stored = wait_for_records(&repository, 1).await;
    assert_eq!(stored[0].purchase_price, 200000.0);
    assert_eq!(stored[0].email, "owner@example.com");
}

#[tokio::test]
async fn calculate_with_data_driven_inputs_shows_expected() {
    let mut body = form();
    body["dataDriven"] = json!(true);
    body["surface"] = json!("50");
    body["bedrooms"] = json!("2");
    body["locationScore"] = json!("8");

    let response = send(sqlite_repository().await, post_json("/api/calculate", &body)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let display = &body_json(response).await["display"];
    assert_eq!(display["showExpected"], true);
    assert_eq!(display["expectedMonthlyNetIncome"], "$561.06");
    assert_eq!(display["expectedMonthlyNetReturn"], "0.28%");
}

#[tokio::test]
async fn calculate_lists_every_invalid_field() {
    let body = json!({
        "purchasePrice": "0",
        "monthlyRent": "abc",
        "annualFee": "500",
        "email": "nobody"
    });

    let response = send(sqlite_repository().await, post_json("/api/calculate", &body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(
        body["errors"],
        json!([
            {
                "code": "ZERO_VALUE",
                "message": "Please enter a value greater than zero",
                "field": "purchasePrice"
            },
            {
                "code": "INVALID_NUMBER",
                "message": "Please enter a valid number",
                "field": "monthlyRent"
            },
            {
                "code": "INVALID_EMAIL",
                "message": "Please enter a valid email address",
                "field": "email"
            }
        ])
    );
}

#[tokio::test]
async fn calculate_succeeds_when_storage_fails() {
    let response = send(Arc::new(FailingRepository), post_json("/api/calculate", &form())).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["display"]["averageMonthlyNetIncome"],
        "$858.33"
    );
}

#[tokio::test]
async fn calculate_does_not_store_rejected_forms() {
    let repository = sqlite_repository().await;
    let mut body = form();
    body["email"] = json!("");

    let response = send(repository.clone(), post_json("/api/calculate", &body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(repository.list_all().await.unwrap().is_empty());
}
