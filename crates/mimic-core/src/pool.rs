use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::clip::ClipHandle;

/// Which of the two clip pools an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolKind {
    /// Harvested recordings: capacity-bounded, each clip played at most once.
    Ephemeral,
    /// User-supplied custom sounds: unbounded, reusable.
    Durable,
}

impl PoolKind {
    /// Whether a selection from this pool removes the clip.
    pub fn consumes(self) -> bool {
        matches!(self, PoolKind::Ephemeral)
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolKind::Ephemeral => f.write_str("ephemeral"),
            PoolKind::Durable => f.write_str("durable"),
        }
    }
}

/// Unordered bag of clips with an optional soft capacity.
///
/// The capacity is never enforced on insert; callers check
/// [`ClipPool::over_capacity`] and drain with [`ClipPool::evict_one`].
#[derive(Debug, Default)]
pub struct ClipPool {
    clips: Vec<ClipHandle>,
    capacity: Option<usize>,
}

impl ClipPool {
    pub fn bounded(capacity: usize) -> Self {
        Self {
            clips: Vec::new(),
            capacity: Some(capacity),
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn over_capacity(&self) -> bool {
        self.capacity.is_some_and(|cap| self.clips.len() > cap)
    }

    pub fn insert(&mut self, clip: ClipHandle) {
        self.clips.push(clip);
    }

    /// Uniformly random clip; with `consume` it is removed in the same call.
    pub fn take_random(&mut self, consume: bool, rng: &mut impl Rng) -> Option<ClipHandle> {
        if self.clips.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.clips.len());
        if consume {
            Some(self.clips.swap_remove(idx))
        } else {
            Some(self.clips[idx].clone())
        }
    }

    /// Drop one uniformly random clip if the pool is over capacity.
    /// Returns whether a clip was removed.
    pub fn evict_one(&mut self, rng: &mut impl Rng) -> bool {
        if !self.over_capacity() {
            return false;
        }
        let idx = rng.random_range(0..self.clips.len());
        self.clips.swap_remove(idx);
        true
    }

    pub fn clear(&mut self) {
        self.clips.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClipHandle> {
        self.clips.iter()
    }
}
