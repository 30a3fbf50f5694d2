//! Runtime side of mimic: folder ingestion, the shared clip store,
//! replicated voice settings and per-actor playback.
//!
//! Everything here runs on a tokio runtime. Decoding happens on blocking
//! workers, pool eviction on spawned tasks, and the recordings folder is
//! rescanned on an interval until the [`Session`] is torn down.

pub mod clip_store;
pub mod config;
pub mod decode;
pub mod error;
pub mod ingest;
pub mod layout;
pub mod playback;
pub mod registry;
pub mod roster;
pub mod selector;
pub mod session;

pub use clip_store::{ClipStore, StoreStats};
pub use config::{load_config, log_config, to_toml};
pub use decode::{AudioDecoder, WavDecoder};
pub use error::{ConfigError, DecodeError, EngineError, RegistryError, Result};
pub use ingest::{IngestionPipeline, ScanReport};
pub use layout::{DataLayout, default_root};
pub use playback::{PlaybackDirector, PlaybackGate, VoiceLine};
pub use registry::{
    Propagation, RegistryMirror, ReplicatedStateRegistry, SessionRole, StaticRole,
};
pub use roster::{BUILTIN_ROSTER, FileRoster, RosterSource, StaticRoster, discover_roster};
pub use selector::SampleSelector;
pub use session::Session;
