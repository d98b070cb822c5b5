//! JSON file history store

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::application::ports::{HistoryStore, StoreError};
use crate::domain::history::History;

/// Newest file format this build reads and the one it writes
pub const FORMAT_VERSION: u32 = 1;

const APP_DIR: &str = "cliptrail";
const HISTORY_FILE: &str = "history.json";

#[derive(Serialize)]
struct HistoryFileRef<'a> {
    version: u32,
    entries: &'a [String],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryFile {
    Versioned { version: u32, entries: Vec<String> },
    Bare(Vec<String>),
}

/// History persisted as one JSON document.
///
/// Saves go through a temporary sibling file that is fsynced and renamed
/// over the target, so readers only ever see a complete file.
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    /// Create a store at `<data_dir>/cliptrail/history.json`
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default history location for this user
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join(APP_DIR)
            .join(HISTORY_FILE)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| HISTORY_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Load the history, reporting why it could not be read.
    ///
    /// A missing file is not an error and yields an empty history.
    pub async fn try_load(&self, capacity: usize) -> Result<History, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no history file yet");
                return Ok(History::with_capacity(capacity));
            }
            Err(e) => return Err(StoreError::Read(e.to_string())),
        };

        let entries = Self::decode(&content)?;
        Ok(History::from_entries(entries, capacity))
    }

    fn decode(content: &str) -> Result<Vec<String>, StoreError> {
        match serde_json::from_str(content).map_err(|e| StoreError::Parse(e.to_string()))? {
            HistoryFile::Versioned { version, .. } if version > FORMAT_VERSION => {
                Err(StoreError::UnsupportedVersion {
                    found: version,
                    supported: FORMAT_VERSION,
                })
            }
            HistoryFile::Versioned { entries, .. } => Ok(entries),
            HistoryFile::Bare(entries) => Ok(entries),
        }
    }

    fn encode(history: &History) -> Result<Vec<u8>, StoreError> {
        serde_json::to_vec_pretty(&HistoryFileRef {
            version: FORMAT_VERSION,
            entries: history.entries(),
        })
        .map_err(|e| StoreError::Write(e.to_string()))
    }

    async fn write_atomically(&self, data: &[u8]) -> std::io::Result<()> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        fs::create_dir_all(parent).await?;

        let tmp_path = self.temp_path();
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        drop(file);

        if let Err(e) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e);
        }
        sync_dir(parent).await
    }
}

/// Flush a directory entry so a rename inside it survives a crash
#[cfg(unix)]
async fn sync_dir(dir: &Path) -> std::io::Result<()> {
    fs::File::open(dir).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

impl Default for JsonHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryStore for JsonHistoryStore {
    async fn load(&self, capacity: usize) -> History {
        match self.try_load(capacity).await {
            Ok(history) => history,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "starting with empty history");
                History::with_capacity(capacity)
            }
        }
    }

    async fn save(&self, history: &History) -> Result<(), StoreError> {
        let data = Self::encode(history)?;
        self.write_atomically(&data)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;
        debug!(path = %self.path.display(), entries = history.len(), "history saved");
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }
}
