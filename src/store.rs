use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::api::dto::SensorReading;

const FILE_PREFIX: &str = "sensor-data-";
const FILE_SUFFIX: &str = ".json";

/// Storage keys are fixed-width so lexicographic filename order matches
/// chronological order (`YYYYMMDDHHMMSS`).
const KEY_LEN: usize = 14;

#[derive(Debug, Error)]
#[error("timestamp {0:?} does not yield a 14-digit storage key")]
pub struct InvalidTimestamp(pub String);

/// Derive the on-disk key from a reading's timestamp: strip `-`, `:` and `T`,
/// keep the first 14 characters. `"2025-06-05T14:23:45Z"` → `"20250605142345"`.
pub fn storage_key(timestamp: &str) -> Result<String, InvalidTimestamp> {
    let key: String = timestamp
        .chars()
        .filter(|c| !matches!(c, '-' | ':' | 'T'))
        .take(KEY_LEN)
        .collect();

    if key.len() == KEY_LEN && key.bytes().all(|b| b.is_ascii_digit()) {
        Ok(key)
    } else {
        Err(InvalidTimestamp(timestamp.to_owned()))
    }
}

/// Extract the digit run from a `sensor-data-<digits>.json` filename, or
/// `None` for anything else in the directory.
fn file_key(name: &str) -> Option<&str> {
    let digits = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}

/// Flat-file persistence: one JSON file per ingested reading, named by its
/// timestamp key. No indexing — the only query is "latest", answered by a
/// directory scan.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the data directory if absent. Called once at startup.
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("creating data directory {}", self.dir.display()))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{FILE_PREFIX}{key}{FILE_SUFFIX}"))
    }

    /// Serialize the full reading to `sensor-data-<key>.json`, overwriting any
    /// previous file with the same key (last write wins).
    pub async fn save(&self, key: &str, reading: &SensorReading) -> Result<()> {
        let path = self.path_for(key);
        let body = serde_json::to_vec(reading).context("serializing sensor reading")?;
        fs::write(&path, &body)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        debug!(path = %path.display(), bytes = body.len(), "Sensor reading saved");
        Ok(())
    }

    /// Fallback scan: load the stored reading with the greatest timestamp key.
    ///
    /// Directory entries that do not match `sensor-data-<digits>.json` are
    /// skipped, never an error. A missing data directory counts as empty.
    /// `Ok(None)` means "no data"; `Err` means the scan or the file read
    /// itself failed.
    pub async fn latest(&self) -> Result<Option<SensorReading>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("listing {}", self.dir.display())))
            }
        };

        let mut best: Option<String> = None;
        while let Some(entry) = entries
            .next_entry()
            .await
            .with_context(|| format!("listing {}", self.dir.display()))?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(key) = file_key(name) else { continue };
            if best.as_deref().map_or(true, |b| key > b) {
                best = Some(key.to_owned());
            }
        }

        let Some(key) = best else { return Ok(None) };

        let path = self.path_for(&key);
        let bytes = fs::read(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let reading = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(reading))
    }
}
