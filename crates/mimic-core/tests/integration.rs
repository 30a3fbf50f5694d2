//! Cross-module checks: pools + selection policy + timer + eligibility,
//! without any runtime or I/O.

use std::collections::{HashMap, HashSet};

use mimic_core::{
    ActorProfile, AudioBuffer, ClipHandle, ClipPool, Location, PlaybackTimer, PoolKind,
    RegistryKey, SelectionPolicy, TimeOfDay, is_eligible,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(42)
}

fn clip(i: usize) -> ClipHandle {
    ClipHandle::new(format!("line{i}.wav"), AudioBuffer::silence(1.5, 100))
}

fn pools(ephemeral: usize, durable: usize) -> HashMap<PoolKind, ClipPool> {
    let mut eph = ClipPool::bounded(200);
    let mut dur = ClipPool::unbounded();
    (0..ephemeral).for_each(|i| eph.insert(clip(i)));
    (0..durable).for_each(|i| dur.insert(clip(1000 + i)));
    HashMap::from([(PoolKind::Ephemeral, eph), (PoolKind::Durable, dur)])
}

/// Draws until nothing comes back, returning how many came from each pool.
fn draw(policy: SelectionPolicy, pools: &mut HashMap<PoolKind, ClipPool>, tries: usize) -> (usize, usize) {
    let mut rng = rng();
    let (mut eph, mut dur) = (0, 0);
    for _ in 0..tries {
        let Some(kind) = policy.choose(&mut rng) else {
            continue;
        };
        let pool = pools.get_mut(&kind).unwrap();
        if pool.take_random(kind.consumes(), &mut rng).is_some() {
            match kind {
                PoolKind::Ephemeral => eph += 1,
                PoolKind::Durable => dur += 1,
            }
        }
    }
    (eph, dur)
}

#[test]
fn weight_zero_only_draws_recordings() {
    let mut pools = pools(150, 20);
    let (eph, dur) = draw(SelectionPolicy::new(true, 0.0), &mut pools, 100);
    assert_eq!(eph, 100);
    assert_eq!(dur, 0);
    assert_eq!(pools[&PoolKind::Ephemeral].len(), 50);
    assert_eq!(pools[&PoolKind::Durable].len(), 20);
}

#[test]
fn weight_hundred_only_draws_custom() {
    let mut pools = pools(150, 20);
    let (eph, dur) = draw(SelectionPolicy::new(true, 100.0), &mut pools, 500);
    assert_eq!(eph, 0);
    assert_eq!(dur, 500);
    assert_eq!(pools[&PoolKind::Ephemeral].len(), 150);
    assert_eq!(pools[&PoolKind::Durable].len(), 20);
}

#[test]
fn empty_chosen_pool_is_a_miss() {
    let mut pools = pools(0, 3);
    let (eph, dur) = draw(SelectionPolicy::new(false, 0.0), &mut pools, 50);
    assert_eq!((eph, dur), (0, 0));
}

#[test]
fn exhausted_recordings_stop_playing() {
    let mut pools = pools(10, 0);
    let (eph, _) = draw(SelectionPolicy::new(false, 0.0), &mut pools, 50);
    assert_eq!(eph, 10);
    assert!(pools[&PoolKind::Ephemeral].is_empty());
}

#[test]
fn modded_actor_gates() {
    let table = HashMap::from([
        (RegistryKey::InsideModded, true),
        (RegistryKey::OutsideModded, false),
        (RegistryKey::DayTimeModded, true),
        (RegistryKey::NightTimeModded, true),
    ]);
    let inside = ActorProfile::new("CustomSlimeAI", Location::Inside, TimeOfDay::Day);
    assert!(is_eligible(&table, &inside));

    let mut closed = table.clone();
    closed.insert(RegistryKey::InsideModded, false);
    assert!(!is_eligible(&closed, &inside));
}

#[test]
fn zero_frequency_timer_never_fires() {
    let mut rng = rng();
    let mut timer = PlaybackTimer::start(0.0, 0.0, &mut rng);
    let mut fired = 0;
    for step in 0..100_000 {
        let now = step as f64 * 10.0;
        if timer.is_due(now) {
            fired += 1;
            timer.reschedule(now, 0.0, &mut rng);
        }
    }
    assert_eq!(fired, 0);
}

proptest! {
    #[test]
    fn eviction_settles_under_capacity(cap in 1usize..64, inserts in 0usize..256, seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut pool = ClipPool::bounded(cap);
        for i in 0..inserts {
            pool.insert(clip(i));
        }
        while pool.evict_one(&mut rng) {}
        prop_assert!(pool.len() <= cap);
        prop_assert_eq!(pool.len(), inserts.min(cap));
    }

    #[test]
    fn consuming_takes_are_unique(n in 0usize..128, seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut pool = ClipPool::unbounded();
        for i in 0..n {
            pool.insert(clip(i));
        }
        let mut seen = HashSet::new();
        while let Some(c) = pool.take_random(true, &mut rng) {
            prop_assert!(seen.insert(c.id()));
        }
        prop_assert_eq!(seen.len(), n);
    }
}
