use rand::Rng;

use crate::config::{VoiceConfig, clamp_weight};
use crate::constants::{CUSTOM_WEIGHT_MAX, CUSTOM_WEIGHT_MIN};
use crate::pool::PoolKind;

/// Which pools may supply voice lines, and how custom sounds are weighted
/// against recordings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionPolicy {
    pub ephemeral_enabled: bool,
    pub durable_enabled: bool,
    /// Chance (percent) of drawing from the durable pool when both are enabled.
    pub durable_weight: f32,
}

impl SelectionPolicy {
    pub fn new(custom_sounds: bool, durable_weight: f32) -> Self {
        let weight = clamp_weight(durable_weight);
        Self {
            ephemeral_enabled: !(custom_sounds && weight >= CUSTOM_WEIGHT_MAX),
            durable_enabled: custom_sounds && weight > CUSTOM_WEIGHT_MIN,
            durable_weight: weight,
        }
    }

    pub fn from_config(config: &VoiceConfig) -> Self {
        Self::new(
            config.capture.add_custom_sounds,
            config.capture.custom_sound_weight,
        )
    }

    /// Pick the pool for one selection attempt. `None` when both are disabled.
    pub fn choose(&self, rng: &mut impl Rng) -> Option<PoolKind> {
        match (self.ephemeral_enabled, self.durable_enabled) {
            (true, true) => {
                let roll: u8 = rng.random_range(0..=CUSTOM_WEIGHT_MAX as u8);
                if f32::from(roll) > self.durable_weight {
                    Some(PoolKind::Ephemeral)
                } else {
                    Some(PoolKind::Durable)
                }
            }
            (true, false) => Some(PoolKind::Ephemeral),
            (false, true) => Some(PoolKind::Durable),
            (false, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn test_recordings_only_by_default() {
        let policy = SelectionPolicy::new(false, 50.0);
        assert!(policy.ephemeral_enabled);
        assert!(!policy.durable_enabled);
        assert_eq!(policy.choose(&mut rng()), Some(PoolKind::Ephemeral));
    }

    #[test]
    fn test_weight_zero_disables_durable() {
        let policy = SelectionPolicy::new(true, 0.0);
        assert!(!policy.durable_enabled);
        let mut rng = rng();
        for _ in 0..1000 {
            assert_eq!(policy.choose(&mut rng), Some(PoolKind::Ephemeral));
        }
    }

    #[test]
    fn test_weight_hundred_disables_ephemeral() {
        let policy = SelectionPolicy::new(true, 100.0);
        assert!(!policy.ephemeral_enabled);
        let mut rng = rng();
        for _ in 0..1000 {
            assert_eq!(policy.choose(&mut rng), Some(PoolKind::Durable));
        }
    }

    #[test]
    fn test_weight_is_clamped() {
        let policy = SelectionPolicy::new(true, 250.0);
        assert_eq!(policy.durable_weight, 100.0);
        assert!(!policy.ephemeral_enabled);
    }

    #[test]
    fn test_mixed_weight_draws_both() {
        let policy = SelectionPolicy::new(true, 50.0);
        let mut rng = rng();
        let durable = (0..10_000)
            .filter(|_| policy.choose(&mut rng) == Some(PoolKind::Durable))
            .count();
        // 51 of 101 rolls land at or below 50
        assert!((4_600..5_500).contains(&durable), "durable draws: {durable}");
    }

    #[test]
    fn test_nothing_enabled() {
        let policy = SelectionPolicy {
            ephemeral_enabled: false,
            durable_enabled: false,
            durable_weight: 0.0,
        };
        assert_eq!(policy.choose(&mut rng()), None);
    }
}
