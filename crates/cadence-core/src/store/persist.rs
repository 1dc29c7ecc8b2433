//! Versioned file persistence for locally-owned state.
//!
//! Each piece of state lives in its own namespace and is written as a JSON
//! envelope carrying the namespace and an explicit schema version. Loading
//! never fails: a missing file, unreadable contents, or a namespace/version
//! mismatch all fall back to the default empty state, so a schema bump
//! silently discards old state on the next startup.
//!
//! Writes are full-state (no deltas) and atomic: the envelope is written to
//! a temp file and renamed into place, so an unexpected shutdown mid-write
//! never corrupts the previous state.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::PersistError;

/// Current Unix timestamp in epoch milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Envelope wrapping a persisted payload.
#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    namespace: String,
    schema_version: u32,
    /// Epoch milliseconds when this state was written.
    saved_at: u64,
    state: T,
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    namespace: &'a str,
    schema_version: u32,
    saved_at: u64,
    state: &'a T,
}

/// Default directory for persisted state files.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cadence")
}

/// Path of the state file for a namespace inside `data_dir`.
pub fn state_path(data_dir: &Path, namespace: &str) -> PathBuf {
    data_dir.join(format!("{namespace}.json"))
}

/// Load persisted state for a namespace, falling back to `T::default()` on
/// any failure (missing file, unreadable contents, namespace or schema
/// version mismatch).
pub fn load<T>(path: &Path, namespace: &str, schema_version: u32) -> T
where
    T: DeserializeOwned + Default,
{
    let Ok(bytes) = std::fs::read(path) else {
        return T::default();
    };

    let envelope: Envelope<T> = match serde_json::from_slice(&bytes) {
        Ok(envelope) => envelope,
        Err(err) => {
            tracing::warn!(
                "persist: unreadable state file {} ({err}) — starting empty",
                path.display()
            );
            return T::default();
        }
    };

    if envelope.namespace != namespace || envelope.schema_version != schema_version {
        tracing::info!(
            "persist: state at {} is {}/v{}, expected {}/v{} — starting empty",
            path.display(),
            envelope.namespace,
            envelope.schema_version,
            namespace,
            schema_version
        );
        return T::default();
    }

    envelope.state
}

/// Serialize `state` and write it atomically to `path` (write temp, rename).
pub fn save<T: Serialize>(
    path: &Path,
    namespace: &str,
    schema_version: u32,
    state: &T,
) -> Result<(), PersistError> {
    let envelope = EnvelopeRef {
        namespace,
        schema_version,
        saved_at: now_millis(),
        state,
    };
    let json = serde_json::to_string_pretty(&envelope)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let temp = path.with_extension("json.tmp");
    std::fs::write(&temp, json)?;
    std::fs::rename(&temp, path)?;
    Ok(())
}

/// Handle to a background flush task.
///
/// Mutation paths hand a full-state snapshot to the channel and return
/// immediately; the spawned task performs the file IO, so the event loop
/// never blocks on disk. Write failures are logged, never propagated.
#[derive(Clone)]
pub struct Flusher<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Flusher<T>
where
    T: Serialize + Send + 'static,
{
    /// Spawn the writer task. Must be called from within a tokio runtime.
    pub fn spawn(path: PathBuf, namespace: &'static str, schema_version: u32) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();
        tokio::spawn(async move {
            while let Some(state) = rx.recv().await {
                if let Err(err) = save(&path, namespace, schema_version, &state) {
                    tracing::warn!("persist: failed to flush {namespace}: {err}");
                }
            }
        });
        Self { tx }
    }

    /// Queue a snapshot for writing.
    pub fn flush(&self, state: T) {
        let _ = self.tx.send(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    struct Counters {
        #[serde(default)]
        hits: u32,
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempdir().unwrap();
        let path = state_path(dir.path(), "cadence.test");

        let state = Counters { hits: 7 };
        save(&path, "cadence.test", 1, &state).unwrap();

        let loaded: Counters = load(&path, "cadence.test", 1);
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = state_path(dir.path(), "cadence.test");

        let loaded: Counters = load(&path, "cadence.test", 1);
        assert_eq!(loaded, Counters::default());
    }

    #[test]
    fn test_version_mismatch_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = state_path(dir.path(), "cadence.test");

        save(&path, "cadence.test", 1, &Counters { hits: 3 }).unwrap();

        let loaded: Counters = load(&path, "cadence.test", 2);
        assert_eq!(loaded, Counters::default());
    }

    #[test]
    fn test_namespace_mismatch_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = state_path(dir.path(), "cadence.other");

        save(&path, "cadence.other", 1, &Counters { hits: 3 }).unwrap();

        let loaded: Counters = load(&path, "cadence.test", 1);
        assert_eq!(loaded, Counters::default());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = state_path(dir.path(), "cadence.test");
        std::fs::write(&path, "not json {").unwrap();

        let loaded: Counters = load(&path, "cadence.test", 1);
        assert_eq!(loaded, Counters::default());
    }
}
