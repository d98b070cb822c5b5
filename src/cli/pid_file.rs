//! PID file management for daemon mode

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use crate::infrastructure::desktop::is_pid_alive;

const PID_FILE_NAME: &str = "cliptrail.pid";

/// PID file for daemon mode
pub struct PidFile {
    path: PathBuf,
    owned: bool,
}

impl PidFile {
    /// PID file in `$XDG_RUNTIME_DIR`, or the temp dir when unset
    pub fn new() -> Self {
        let dir = std::env::var_os("XDG_RUNTIME_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);
        Self::with_path(dir.join(PID_FILE_NAME))
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            owned: false,
        }
    }

    /// Get the PID file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// PID of a live daemon recorded in the file.
    ///
    /// A file naming a dead process is stale and gets removed.
    pub fn is_running(&self) -> Option<u32> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let pid: u32 = contents.trim().parse().ok()?;

        if is_pid_alive(pid) {
            Some(pid)
        } else {
            let _ = fs::remove_file(&self.path);
            None
        }
    }

    /// Acquire the PID file (fails if another daemon is running)
    pub fn acquire(&mut self) -> Result<(), PidFileError> {
        if let Some(pid) = self.is_running() {
            return Err(PidFileError::AlreadyRunning(pid));
        }

        fs::write(&self.path, process::id().to_string())
            .map_err(|e| PidFileError::WriteFailed(e.to_string()))?;
        self.owned = true;

        Ok(())
    }

    /// Release the PID file if this process wrote it
    pub fn release(&mut self) -> Result<(), PidFileError> {
        if !self.owned {
            return Ok(());
        }
        self.owned = false;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PidFileError::RemoveFailed(e.to_string())),
        }
    }
}

impl Default for PidFile {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

/// PID file errors
#[derive(Debug, thiserror::Error)]
pub enum PidFileError {
    #[error("Another daemon is already running (PID: {0})")]
    AlreadyRunning(u32),

    #[error("Failed to write PID file: {0}")]
    WriteFailed(String),

    #[error("Failed to remove PID file: {0}")]
    RemoveFailed(String),
}
