/// Ephemeral pool capacity before background eviction kicks in.
pub const EPHEMERAL_CAPACITY: usize = 200;

/// Recorded clips at or below this duration (seconds) are treated as noise.
pub const MIN_RECORDED_DURATION_SECS: f32 = 0.9;

/// Floor for the recordings folder scan period (seconds).
pub const MIN_SCAN_INTERVAL_SECS: f32 = 8.0;

/// Lower bound of the per-actor voice interval at frequency 1.0 (seconds).
pub const PLAY_INTERVAL_MIN_SECS: f64 = 15.0;

/// Upper bound of the per-actor voice interval at frequency 1.0 (seconds).
pub const PLAY_INTERVAL_MAX_SECS: f64 = 40.0;

/// Listener must be strictly closer than this for a voice line to play.
pub const AUDIBLE_RADIUS: f32 = 100.0;

/// Custom sound weight range. 0 = recordings only, 100 = custom only.
pub const CUSTOM_WEIGHT_MIN: f32 = 0.0;
pub const CUSTOM_WEIGHT_MAX: f32 = 100.0;

/// Default global voice-line frequency multiplier.
pub const DEFAULT_FREQUENCY: f32 = 1.0;

/// Default custom sound weight.
pub const DEFAULT_CUSTOM_WEIGHT: f32 = 50.0;
