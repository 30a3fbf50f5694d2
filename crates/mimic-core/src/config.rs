//! Local configuration model and the registry snapshot derived from it.
//!
//! Only the host's configuration matters for gating: it is turned into a
//! [`RegistrySnapshot`] and replicated. Capture settings stay local.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::category::{ActorCategory, Roster, RosterEntry};
use crate::constants::{
    CUSTOM_WEIGHT_MAX, CUSTOM_WEIGHT_MIN, DEFAULT_CUSTOM_WEIGHT, DEFAULT_FREQUENCY,
    MIN_SCAN_INTERVAL_SECS,
};
use crate::eligibility::{RegistryKey, RegistryValue};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    pub voice: VoiceSettings,
    pub capture: CaptureSettings,
    pub modded: ModdedSettings,
    /// Per-category enable flags keyed by roster display name.
    pub categories: BTreeMap<String, bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    /// 1.0 = one line every 15-40 s per actor, 2.0 twice as often, 0 disables.
    pub frequency: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    /// Keep the recordings folder across sessions instead of wiping it.
    pub keep_files_between_sessions: bool,
    /// Recordings folder scan period; values below 8 s are raised to 8 s.
    pub scan_interval_secs: f32,
    /// Load user-supplied clips from the custom sounds folder.
    pub add_custom_sounds: bool,
    /// 0 = recordings only, 100 = custom sounds only. Clamped on use.
    pub custom_sound_weight: f32,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            keep_files_between_sessions: false,
            scan_interval_secs: MIN_SCAN_INTERVAL_SECS,
            add_custom_sounds: false,
            custom_sound_weight: DEFAULT_CUSTOM_WEIGHT,
        }
    }
}

/// Coarse gates for actors without a category entry of their own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModdedSettings {
    pub inside: bool,
    pub outside: bool,
    pub daytime: bool,
    pub nighttime: bool,
}

impl Default for ModdedSettings {
    fn default() -> Self {
        Self {
            inside: true,
            outside: false,
            daytime: true,
            nighttime: true,
        }
    }
}

impl VoiceConfig {
    /// Effective scan period, floor-clamped. Values too large for a
    /// `Duration` saturate.
    pub fn scan_interval(&self) -> Duration {
        let secs = self.capture.scan_interval_secs;
        let secs = if secs.is_finite() {
            secs.max(MIN_SCAN_INTERVAL_SECS)
        } else {
            MIN_SCAN_INTERVAL_SECS
        };
        Duration::try_from_secs_f32(secs).unwrap_or(Duration::MAX)
    }

    pub fn custom_weight(&self) -> f32 {
        clamp_weight(self.capture.custom_sound_weight)
    }

    /// Recording capture is pointless when custom sounds take every slot.
    pub fn recording_enabled(&self) -> bool {
        !(self.capture.add_custom_sounds && self.custom_weight() >= CUSTOM_WEIGHT_MAX)
    }

    pub fn custom_sounds_enabled(&self) -> bool {
        self.capture.add_custom_sounds && self.custom_weight() > CUSTOM_WEIGHT_MIN
    }

    pub fn playback_disabled(&self) -> bool {
        !(self.voice.frequency.is_finite() && self.voice.frequency > 0.0)
    }

    pub fn category_enabled(&self, entry: &RosterEntry) -> bool {
        self.categories
            .get(&entry.display_name)
            .copied()
            .unwrap_or(entry.default_enabled)
    }

    /// Fill in a flag for every roster category the file does not mention.
    pub fn with_roster_defaults(mut self, roster: &Roster) -> Self {
        for entry in roster.iter() {
            self.categories
                .entry(entry.display_name.clone())
                .or_insert(entry.default_enabled);
        }
        self
    }
}

/// Clamp a custom sound weight into `0..=100`. NaN falls back to the default.
pub fn clamp_weight(weight: f32) -> f32 {
    if weight.is_nan() {
        DEFAULT_CUSTOM_WEIGHT
    } else {
        weight.clamp(CUSTOM_WEIGHT_MIN, CUSTOM_WEIGHT_MAX)
    }
}

/// Values the host publishes into the replicated registry.
#[derive(Clone, Debug, PartialEq)]
pub struct RegistrySnapshot {
    pub frequency: f32,
    pub modded: ModdedSettings,
    pub categories: HashMap<ActorCategory, bool>,
}

impl RegistrySnapshot {
    pub fn from_config(config: &VoiceConfig, roster: &Roster) -> Self {
        let categories = roster
            .iter()
            .map(|entry| (entry.category.clone(), config.category_enabled(entry)))
            .collect();
        Self {
            frequency: config.voice.frequency,
            modded: config.modded.clone(),
            categories,
        }
    }

    pub fn value(&self, key: &RegistryKey) -> Option<RegistryValue> {
        let v = match key {
            RegistryKey::Category(c) => RegistryValue::Bool(*self.categories.get(c)?),
            RegistryKey::VoiceLineFrequency => RegistryValue::Float(self.frequency),
            RegistryKey::InsideModded => RegistryValue::Bool(self.modded.inside),
            RegistryKey::OutsideModded => RegistryValue::Bool(self.modded.outside),
            RegistryKey::DayTimeModded => RegistryValue::Bool(self.modded.daytime),
            RegistryKey::NightTimeModded => RegistryValue::Bool(self.modded.nighttime),
        };
        Some(v)
    }
}
