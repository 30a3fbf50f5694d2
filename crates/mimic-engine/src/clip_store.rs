//! Session-scoped holder of the two clip pools.
//!
//! Each pool sits behind its own mutex together with its RNG, so insert,
//! eviction and consuming selection are serialized per pool. Eviction of the
//! ephemeral pool runs as a spawned task that releases the lock and yields
//! after every removal; inserts never evict synchronously.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mimic_core::{ClipHandle, ClipPool, PoolKind};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::runtime::Handle;

struct PoolState {
    pool: ClipPool,
    rng: SmallRng,
}

struct PoolSlot {
    state: Mutex<PoolState>,
    /// Set while an eviction pass is scheduled or running.
    evicting: AtomicBool,
}

impl PoolSlot {
    fn new(pool: ClipPool, rng: SmallRng) -> Self {
        Self {
            state: Mutex::new(PoolState { pool, rng }),
            evicting: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn try_begin_eviction(&self) -> bool {
        self.evicting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

struct Inner {
    ephemeral: PoolSlot,
    durable: PoolSlot,
}

impl Inner {
    fn slot(&self, kind: PoolKind) -> &PoolSlot {
        match kind {
            PoolKind::Ephemeral => &self.ephemeral,
            PoolKind::Durable => &self.durable,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub ephemeral: usize,
    pub durable: usize,
}

/// Cheaply clonable handle; all clones share the same pools.
#[derive(Clone)]
pub struct ClipStore {
    inner: Arc<Inner>,
}

impl ClipStore {
    pub fn new(capacity: usize) -> Self {
        Self::build(capacity, SmallRng::from_os_rng(), SmallRng::from_os_rng())
    }

    /// Deterministic store for tests and simulations.
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self::build(
            capacity,
            SmallRng::seed_from_u64(seed),
            SmallRng::seed_from_u64(seed.wrapping_add(1)),
        )
    }

    fn build(capacity: usize, eph_rng: SmallRng, dur_rng: SmallRng) -> Self {
        Self {
            inner: Arc::new(Inner {
                ephemeral: PoolSlot::new(ClipPool::bounded(capacity), eph_rng),
                durable: PoolSlot::new(ClipPool::unbounded(), dur_rng),
            }),
        }
    }

    pub fn insert(&self, kind: PoolKind, clip: ClipHandle) {
        let over = {
            let mut state = self.inner.slot(kind).lock();
            state.pool.insert(clip);
            state.pool.over_capacity()
        };
        if over {
            self.schedule_eviction(kind);
        }
    }

    /// Uniformly random clip from `kind`. With `consume` the clip is removed
    /// under the same lock, so no two callers can receive it.
    pub fn take_random(&self, kind: PoolKind, consume: bool) -> Option<ClipHandle> {
        let mut state = self.inner.slot(kind).lock();
        let PoolState { pool, rng } = &mut *state;
        pool.take_random(consume, rng)
    }

    pub fn clear(&self, kind: PoolKind) {
        self.inner.slot(kind).lock().pool.clear();
    }

    pub fn clear_all(&self) {
        self.clear(PoolKind::Ephemeral);
        self.clear(PoolKind::Durable);
    }

    pub fn len(&self, kind: PoolKind) -> usize {
        self.inner.slot(kind).lock().pool.len()
    }

    pub fn is_empty(&self, kind: PoolKind) -> bool {
        self.len(kind) == 0
    }

    pub fn capacity(&self, kind: PoolKind) -> Option<usize> {
        self.inner.slot(kind).lock().pool.capacity()
    }

    pub fn is_evicting(&self, kind: PoolKind) -> bool {
        self.inner.slot(kind).evicting.load(Ordering::Acquire)
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            ephemeral: self.len(PoolKind::Ephemeral),
            durable: self.len(PoolKind::Durable),
        }
    }

    fn schedule_eviction(&self, kind: PoolKind) {
        let slot = self.inner.slot(kind);
        if !slot.try_begin_eviction() {
            return;
        }
        match Handle::try_current() {
            Ok(handle) => {
                tracing::debug!("scheduling {kind} pool eviction");
                handle.spawn(evict_pass(Arc::clone(&self.inner), kind));
            }
            Err(_) => {
                slot.evicting.store(false, Ordering::Release);
                tracing::warn!("no async runtime; {kind} pool eviction deferred");
            }
        }
    }
}

/// Remove random clips until the pool is back under capacity, one per step.
async fn evict_pass(inner: Arc<Inner>, kind: PoolKind) {
    let slot = inner.slot(kind);
    let mut removed = 0usize;

    loop {
        loop {
            let evicted = {
                let mut state = slot.lock();
                let PoolState { pool, rng } = &mut *state;
                pool.evict_one(rng)
            };
            if !evicted {
                break;
            }
            removed += 1;
            tokio::task::yield_now().await;
        }

        slot.evicting.store(false, Ordering::Release);

        // An insert that landed between the last check and the guard release
        // saw the guard set and did not schedule a pass of its own.
        let still_over = slot.lock().pool.over_capacity();
        if !still_over || !slot.try_begin_eviction() {
            break;
        }
    }

    tracing::debug!(removed, "{kind} pool eviction finished");
}
