//! Registry keys and the per-actor eligibility fallback chain.
//!
//! The chain is a pure function over a [`FlagLookup`], so it can be checked
//! without a live session or any actor instances.

use std::collections::HashMap;
use std::fmt;

use crate::actor::{ActorProfile, Location, TimeOfDay};
use crate::category::ActorCategory;

/// Name of one replicated registry cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegistryKey {
    Category(ActorCategory),
    VoiceLineFrequency,
    InsideModded,
    OutsideModded,
    DayTimeModded,
    NightTimeModded,
}

impl RegistryKey {
    /// The global (non-category) keys, in a fixed order.
    pub const GLOBALS: [RegistryKey; 5] = [
        RegistryKey::VoiceLineFrequency,
        RegistryKey::InsideModded,
        RegistryKey::OutsideModded,
        RegistryKey::DayTimeModded,
        RegistryKey::NightTimeModded,
    ];

    pub fn location(location: Location) -> Self {
        match location {
            Location::Inside => RegistryKey::InsideModded,
            Location::Outside => RegistryKey::OutsideModded,
        }
    }

    pub fn time_of_day(time: TimeOfDay) -> Self {
        match time {
            TimeOfDay::Day => RegistryKey::DayTimeModded,
            TimeOfDay::Night => RegistryKey::NightTimeModded,
        }
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryKey::Category(c) => write!(f, "VoiceEnabled_{c}"),
            RegistryKey::VoiceLineFrequency => f.write_str("VoiceLineFrequency"),
            RegistryKey::InsideModded => f.write_str("VoiceEnabled_InsideModdedEnemy"),
            RegistryKey::OutsideModded => f.write_str("VoiceEnabled_OutsideModdedEnemy"),
            RegistryKey::DayTimeModded => f.write_str("VoiceEnabled_DayTimeModdedEnemy"),
            RegistryKey::NightTimeModded => f.write_str("VoiceEnabled_NightTimeModdedEnemy"),
        }
    }
}

/// Value carried by a registry cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegistryValue {
    Bool(bool),
    Float(f32),
}

impl fmt::Display for RegistryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryValue::Bool(b) => write!(f, "{b}"),
            RegistryValue::Float(v) => write!(f, "{v}"),
        }
    }
}

/// State of a registry entry as seen by a reader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Entry<T> {
    /// No such cell exists (e.g. an actor category missing from the roster).
    Absent,
    /// The cell exists but the host has not written it yet.
    Uninitialized,
    Ready(T),
}

impl<T> Entry<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Entry::Ready(v) => Some(v),
            _ => None,
        }
    }
}

pub trait FlagLookup {
    fn flag(&self, key: &RegistryKey) -> Entry<bool>;
}

/// Plain map lookup: present keys are ready, missing keys are absent.
impl FlagLookup for HashMap<RegistryKey, bool> {
    fn flag(&self, key: &RegistryKey) -> Entry<bool> {
        match self.get(key) {
            Some(&v) => Entry::Ready(v),
            None => Entry::Absent,
        }
    }
}

/// Decide whether an actor may speak.
///
/// A category with its own entry uses that entry alone. Anything else must
/// pass both its time-of-day gate and its location gate. Every entry that
/// is consulted but not ready counts as "not eligible".
pub fn is_eligible(lookup: &impl FlagLookup, profile: &ActorProfile) -> bool {
    match lookup.flag(&RegistryKey::Category(profile.category.clone())) {
        Entry::Ready(enabled) => return enabled,
        Entry::Uninitialized => return false,
        Entry::Absent => {}
    }

    let time_gate = lookup
        .flag(&RegistryKey::time_of_day(profile.time_of_day))
        .ready()
        .unwrap_or(false);
    if !time_gate {
        return false;
    }

    lookup
        .flag(&RegistryKey::location(profile.location))
        .ready()
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globals(inside: bool, outside: bool, day: bool, night: bool) -> HashMap<RegistryKey, bool> {
        HashMap::from([
            (RegistryKey::InsideModded, inside),
            (RegistryKey::OutsideModded, outside),
            (RegistryKey::DayTimeModded, day),
            (RegistryKey::NightTimeModded, night),
        ])
    }

    fn modded_inside() -> ActorProfile {
        ActorProfile::new("ModdedCrawler", Location::Inside, TimeOfDay::Day)
    }

    #[test]
    fn test_specific_entry_wins() {
        let mut table = globals(false, false, false, false);
        table.insert(RegistryKey::Category("JesterAI".into()), true);
        let jester = ActorProfile::new("JesterAI", Location::Inside, TimeOfDay::Night);
        assert!(is_eligible(&table, &jester));

        let mut all_on = globals(true, true, true, true);
        all_on.insert(RegistryKey::Category("JesterAI".into()), false);
        assert!(!is_eligible(&all_on, &jester));
    }

    #[test]
    fn test_fallback_inside_gate() {
        let table = globals(true, false, true, true);
        assert!(is_eligible(&table, &modded_inside()));

        let table = globals(false, false, true, true);
        assert!(!is_eligible(&table, &modded_inside()));
    }

    #[test]
    fn test_fallback_requires_time_gate() {
        let table = globals(true, true, false, true);
        assert!(!is_eligible(&table, &modded_inside()));

        let night = ActorProfile::new("ModdedCrawler", Location::Inside, TimeOfDay::Night);
        assert!(is_eligible(&table, &night));
    }

    #[test]
    fn test_fallback_outside_gate() {
        let table = globals(true, false, true, true);
        let outside = ActorProfile::new("ModdedGiant", Location::Outside, TimeOfDay::Day);
        assert!(!is_eligible(&table, &outside));
    }

    #[test]
    fn test_missing_globals_not_eligible() {
        let table = HashMap::new();
        assert!(!is_eligible(&table, &modded_inside()));
    }

    struct AllUninitialized;

    impl FlagLookup for AllUninitialized {
        fn flag(&self, _key: &RegistryKey) -> Entry<bool> {
            Entry::Uninitialized
        }
    }

    #[test]
    fn test_uninitialized_not_eligible() {
        let jester = ActorProfile::new("JesterAI", Location::Inside, TimeOfDay::Day);
        assert!(!is_eligible(&AllUninitialized, &jester));
        assert!(!is_eligible(&AllUninitialized, &modded_inside()));
    }

    #[test]
    fn test_key_names() {
        assert_eq!(
            RegistryKey::Category("BlobAI".into()).to_string(),
            "VoiceEnabled_BlobAI"
        );
        assert_eq!(RegistryKey::VoiceLineFrequency.to_string(), "VoiceLineFrequency");
    }
}
