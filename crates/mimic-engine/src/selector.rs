use std::sync::{Mutex, PoisonError};

use mimic_core::{ClipHandle, SelectionPolicy, VoiceConfig};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::clip_store::ClipStore;

/// Picks one clip per voice-line attempt according to the pool policy.
pub struct SampleSelector {
    store: ClipStore,
    policy: SelectionPolicy,
    rng: Mutex<SmallRng>,
}

impl SampleSelector {
    pub fn new(store: ClipStore, policy: SelectionPolicy) -> Self {
        Self::with_rng(store, policy, SmallRng::from_os_rng())
    }

    pub fn from_config(store: ClipStore, config: &VoiceConfig) -> Self {
        Self::new(store, SelectionPolicy::from_config(config))
    }

    pub fn with_seed(store: ClipStore, policy: SelectionPolicy, seed: u64) -> Self {
        Self::with_rng(store, policy, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(store: ClipStore, policy: SelectionPolicy, rng: SmallRng) -> Self {
        Self {
            store,
            policy,
            rng: Mutex::new(rng),
        }
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// `None` means "no sound this attempt": both pools disabled or the
    /// chosen pool is empty.
    pub fn pick_sample(&self) -> Option<ClipHandle> {
        let kind = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.policy.choose(&mut *rng)?
        };
        self.store.take_random(kind, kind.consumes())
    }
}
