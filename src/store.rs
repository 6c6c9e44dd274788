use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{error, info};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::time::RaceTime;

/// File name used when the course does not override it.
pub const DEFAULT_SAVE_FILE: &str = "fallguys_times.json";

/// Durable storage for the single best-time record.
///
/// Neither operation reports failure to the caller: a broken store must never
/// interrupt a run, it only means the record may not survive a restart.
pub trait BestTimeStore {
    fn load(&self) -> Option<RaceTime>;
    fn save(&mut self, best: RaceTime);
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed record in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode record for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("record in {path} holds an invalid time ({value})")]
    InvalidTime { path: PathBuf, value: f32 },
}

#[derive(Debug, Serialize, Deserialize)]
struct TimerRecord {
    #[serde(rename = "bestTime")]
    best_time: f32,
}

/// Returns the per-user data directory for the runtime.
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "crystal-workshop", "CourseRuntime")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Stores the record as a small JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the store under the user data directory.
    pub fn in_data_dir(file_name: &str) -> Self {
        Self::new(data_dir().join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the record, distinguishing a missing file from a broken one.
    pub fn try_load(&self) -> Result<Option<RaceTime>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let record: TimerRecord =
            serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        RaceTime::from_secs(record.best_time)
            .map(Some)
            .ok_or_else(|| StoreError::InvalidTime {
                path: self.path.clone(),
                value: record.best_time,
            })
    }

    pub fn try_save(&self, best: RaceTime) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let record = TimerRecord {
            best_time: best.as_secs(),
        };
        let json = serde_json::to_string_pretty(&record).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(io_error)
    }
}

impl BestTimeStore for JsonFileStore {
    fn load(&self) -> Option<RaceTime> {
        match self.try_load() {
            Ok(Some(best)) => {
                info!("Best time loaded: {best} from {}", self.path.display());
                Some(best)
            }
            Ok(None) => {
                info!("No saved best time found at {}", self.path.display());
                None
            }
            Err(err) => {
                error!("Failed to load best time: {err}");
                None
            }
        }
    }

    fn save(&mut self, best: RaceTime) {
        match self.try_save(best) {
            Ok(()) => info!("Best time saved: {best} to {}", self.path.display()),
            Err(err) => error!("Failed to save best time: {err}"),
        }
    }
}

/// Keeps the record in memory; clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemorySlot>>,
}

#[derive(Debug, Default)]
struct MemorySlot {
    best: Option<RaceTime>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: RaceTime) -> Self {
        let store = Self::new();
        store.inner.lock().best = Some(best);
        store
    }

    /// Number of times `save` has been called.
    pub fn writes(&self) -> usize {
        self.inner.lock().writes
    }
}

impl BestTimeStore for MemoryStore {
    fn load(&self) -> Option<RaceTime> {
        self.inner.lock().best
    }

    fn save(&mut self, best: RaceTime) {
        let mut slot = self.inner.lock();
        slot.best = Some(best);
        slot.writes += 1;
    }
}
