use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::dto::SensorReading;

/// In-memory copy of the single most recently known `SensorReading`.
///
/// Wrapped in `Arc` so it can be cheaply cloned and shared across handlers.
/// Uses `tokio::sync::RwLock` so concurrent readers never block each other.
/// Starts empty; overwritten wholesale on every ingest and on every
/// disk-fallback resolution.
#[derive(Clone, Default)]
pub struct LatestCache {
    inner: Arc<RwLock<Option<SensorReading>>>,
}

impl LatestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached reading (full replace, never a merge).
    pub async fn update(&self, reading: SensorReading) {
        *self.inner.write().await = Some(reading);
    }

    /// Return the cached reading, if any.
    pub async fn get(&self) -> Option<SensorReading> {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn make_reading(timestamp: &str, value: i64) -> SensorReading {
        serde_json::from_value(json!({ "timestamp": timestamp, "temperature": value }))
            .unwrap()
    }

    #[tokio::test]
    async fn empty_cache_returns_nothing() {
        let cache = LatestCache::new();
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn update_and_get_single_reading() {
        let cache = LatestCache::new();
        cache.update(make_reading("2025-06-05T14:23:45Z", 21)).await;

        let got = cache.get().await.unwrap();
        assert_eq!(got.timestamp, "2025-06-05T14:23:45Z");
        assert_eq!(got.fields["temperature"], json!(21));
    }

    #[tokio::test]
    async fn update_overwrites_previous_reading() {
        let cache = LatestCache::new();
        cache.update(make_reading("2025-06-05T14:23:45Z", 20)).await;
        cache.update(make_reading("2025-06-05T15:00:00Z", 25)).await;

        let got = cache.get().await.unwrap();
        assert_eq!(got.timestamp, "2025-06-05T15:00:00Z");
        assert_eq!(got.fields["temperature"], json!(25));
    }

    #[tokio::test]
    async fn clone_shares_state() {
        let cache = LatestCache::new();
        let clone = cache.clone();

        cache.update(make_reading("2025-06-05T14:23:45Z", 21)).await;

        let got = clone.get().await.unwrap();
        assert_eq!(got.timestamp, "2025-06-05T14:23:45Z");
    }
}
