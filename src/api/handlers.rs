use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::{debug, info};
use utoipa::OpenApi;

use super::{dto::SensorReading, errors::ApiError, AppState};
use crate::store;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Liveness probe for deployment checks and browser smoke tests.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = String),
    ),
    tag = "system"
)]
pub async fn root() -> &'static str {
    "Backend operational."
}

/// Ingest one sensor reading: replace the latest-value cache, then persist
/// the full payload to `sensor-data-<key>.json`.
#[utoipa::path(
    post,
    path = "/api/sensor-data/add",
    request_body = SensorReading,
    responses(
        (status = 200, description = "Reading cached and persisted", body = String),
        (status = 400, description = "Timestamp cannot form a storage key"),
        (status = 422, description = "Body is not a mapping with a string timestamp"),
        (status = 500, description = "Reading could not be written to storage"),
    ),
    tag = "sensor-data"
)]
pub async fn add_sensor_data(
    State(state): State<AppState>,
    Json(reading): Json<SensorReading>,
) -> Result<&'static str, ApiError> {
    let key = store::storage_key(&reading.timestamp)?;

    // Cache before persisting; a failed write below leaves the cache updated.
    state.cache.update(reading.clone()).await;

    state.store.save(&key, &reading).await.map_err(ApiError::Save)?;

    info!(key = %key, "Sensor data saved");
    Ok("Sensor data saved successfully")
}

/// Return the most recent reading: the cached copy if present, otherwise the
/// greatest-keyed file from the data directory (which repopulates the cache).
#[utoipa::path(
    get,
    path = "/api/sensor-data/get",
    responses(
        (status = 200, description = "Latest reading, or {\"error\": ...} when none exists", body = SensorReading),
        (status = 500, description = "Storage scan, read, or parse failed"),
    ),
    tag = "sensor-data"
)]
pub async fn get_sensor_data(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    if let Some(reading) = state.cache.get().await {
        return to_body(reading).map(Json);
    }

    debug!("Latest cache empty, scanning data directory");
    match state.store.latest().await.map_err(ApiError::Read)? {
        Some(reading) => {
            state.cache.update(reading.clone()).await;
            to_body(reading).map(Json)
        }
        None => Ok(Json(json!({ "error": "No sensor data available." }))),
    }
}

fn to_body(reading: SensorReading) -> Result<Value, ApiError> {
    serde_json::to_value(reading).map_err(|e| ApiError::Read(e.into()))
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(root, add_sensor_data, get_sensor_data),
    components(schemas(SensorReading)),
    tags(
        (name = "sensor-data", description = "Telemetry ingest and latest-value endpoints"),
        (name = "system", description = "System endpoints"),
    ),
    info(
        title = "Sensor Ingest API",
        version = "0.1.0",
        description = "HTTP ingestion endpoint for sensor telemetry with flat-file storage"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
