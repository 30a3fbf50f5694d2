use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("voice-line frequency is {0}; playback is disabled")]
    PlaybackDisabled(f32),
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to open audio file {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("failed to read samples from {path}")]
    Samples {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("unsupported audio format in {path}: {details}")]
    UnsupportedFormat { path: PathBuf, details: String },

    #[error("decode task for {path} did not complete: {details}")]
    Aborted { path: PathBuf, details: String },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry initialization failed: {} entries uninitialized ({})", missing.len(), missing.join(", "))]
    Incomplete { missing: Vec<String> },

    #[error("registry was already initialized for this session")]
    AlreadyInitialized,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),
}
