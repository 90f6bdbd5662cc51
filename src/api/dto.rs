use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// One ingested telemetry payload.
///
/// Only `timestamp` is required and typed; every other field the sensor sends
/// is carried verbatim in `fields` and round-trips through serialization, so
/// the stored file reproduces the full request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SensorReading {
    /// ISO-8601-like timestamp, e.g. `"2025-06-05T14:23:45Z"`.
    pub timestamp: String,
    /// Remaining telemetry fields, untyped and unvalidated.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,
}
