use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use mimic_core::VoiceConfig;

use crate::error::{EngineError, Result};

const RECORDINGS_DIR: &str = "recordings";
const CUSTOM_SOUNDS_DIR: &str = "custom_sounds";

/// Default data directory: `$MIMIC_DATA_DIR`, else `~/.mimic`.
pub fn default_root() -> PathBuf {
    env::var("MIMIC_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".mimic"))
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// On-disk folders used by one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataLayout {
    pub root: PathBuf,
    /// Written by the recorder, drained by the scan loop.
    pub recordings: PathBuf,
    /// User-supplied clips, read once and never deleted.
    pub custom_sounds: PathBuf,
}

impl DataLayout {
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            recordings: root.join(RECORDINGS_DIR),
            custom_sounds: root.join(CUSTOM_SOUNDS_DIR),
            root,
        }
    }

    /// Create the folders the config needs for a new session. Leftover
    /// recordings are wiped unless the config keeps them between sessions.
    pub fn prepare(&self, config: &VoiceConfig) -> Result<()> {
        if config.recording_enabled() {
            if !config.capture.keep_files_between_sessions {
                remove_dir_if_exists(&self.recordings)?;
            }
            create_dir(&self.recordings)?;
        }
        if config.custom_sounds_enabled() {
            create_dir(&self.custom_sounds)?;
        }
        Ok(())
    }

    /// Remove this session's recordings unless they are kept.
    pub fn cleanup(&self, keep_files: bool) -> Result<()> {
        if keep_files {
            return Ok(());
        }
        remove_dir_if_exists(&self.recordings)
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| EngineError::io(dir, e))
}

fn remove_dir_if_exists(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {
            tracing::debug!("removed {}", dir.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(EngineError::io(dir, e)),
    }
}
