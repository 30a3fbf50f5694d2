//! Voice-line core: clip pools, selection policy, eligibility rules.
//!
//! Models the two clip pools (ephemeral recordings and durable custom
//! sounds), the weighted choice between them, the per-actor playback timer
//! and the category fallback chain evaluated against replicated flags.
//!
//! Zero I/O. Scheduling, decoding and replication live in `mimic-engine`.

pub mod actor;
pub mod category;
pub mod clip;
pub mod config;
pub mod constants;
pub mod eligibility;
pub mod pool;
pub mod selection;
pub mod timer;

pub use actor::{ActorId, ActorProfile, ActorSnapshot, Location, Position, TimeOfDay};
pub use category::{ActorCategory, Roster, RosterEntry, display_name};
pub use clip::{AudioBuffer, ClipHandle};
pub use config::{CaptureSettings, ModdedSettings, RegistrySnapshot, VoiceConfig, VoiceSettings};
pub use constants::{
    AUDIBLE_RADIUS, EPHEMERAL_CAPACITY, MIN_RECORDED_DURATION_SECS, MIN_SCAN_INTERVAL_SECS,
};
pub use eligibility::{Entry, FlagLookup, RegistryKey, RegistryValue, is_eligible};
pub use pool::{ClipPool, PoolKind};
pub use selection::SelectionPolicy;
pub use timer::PlaybackTimer;
