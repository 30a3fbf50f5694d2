//! Per-actor voice-line scheduling.
//!
//! A [`PlaybackGate`] is attached to each actor that is eligible when first
//! seen. Every tick the [`PlaybackDirector`] advances all gates and returns
//! the voice lines that should be emitted at the actors' positions.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use mimic_core::{
    AUDIBLE_RADIUS, ActorId, ActorSnapshot, ClipHandle, PlaybackTimer, Position,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::registry::RegistryMirror;
use crate::selector::SampleSelector;

/// A clip to play from an actor's position.
#[derive(Clone, Debug)]
pub struct VoiceLine {
    pub actor: ActorId,
    pub clip: ClipHandle,
}

pub struct PlaybackGate {
    timer: PlaybackTimer,
}

impl PlaybackGate {
    /// Schedule the first attempt. An unknown frequency never fires.
    pub fn attach(now: f64, frequency: Option<f32>, rng: &mut SmallRng) -> Self {
        Self {
            timer: PlaybackTimer::start(now, frequency.unwrap_or(0.0), rng),
        }
    }

    pub fn next_eligible(&self) -> f64 {
        self.timer.next_eligible()
    }

    /// Attempt a voice line if the timer is due. The timer is rescheduled
    /// after every due attempt, whether or not a clip was produced.
    pub fn tick(
        &mut self,
        now: f64,
        actor: &ActorSnapshot,
        listener: &Position,
        mirror: &RegistryMirror,
        selector: &SampleSelector,
        rng: &mut SmallRng,
    ) -> Option<ClipHandle> {
        if !self.timer.is_due(now) {
            return None;
        }

        let audible = actor.alive
            && !actor.suppressed
            && actor.position.distance(listener) < AUDIBLE_RADIUS
            && mirror.is_eligible(&actor.profile);
        let clip = if audible { selector.pick_sample() } else { None };

        self.timer
            .reschedule(now, mirror.frequency().unwrap_or(0.0), rng);
        clip
    }
}

pub struct PlaybackDirector {
    mirror: RegistryMirror,
    selector: Arc<SampleSelector>,
    gates: HashMap<ActorId, PlaybackGate>,
    /// Actors seen after the registry was ready that were not eligible.
    declined: HashSet<ActorId>,
    rng: SmallRng,
}

impl PlaybackDirector {
    pub fn new(mirror: RegistryMirror, selector: Arc<SampleSelector>) -> Self {
        Self::with_rng(mirror, selector, SmallRng::from_os_rng())
    }

    pub fn with_seed(mirror: RegistryMirror, selector: Arc<SampleSelector>, seed: u64) -> Self {
        Self::with_rng(mirror, selector, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(mirror: RegistryMirror, selector: Arc<SampleSelector>, rng: SmallRng) -> Self {
        Self {
            mirror,
            selector,
            gates: HashMap::new(),
            declined: HashSet::new(),
            rng,
        }
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    pub fn has_gate(&self, actor: ActorId) -> bool {
        self.gates.contains_key(&actor)
    }

    pub fn tick(
        &mut self,
        now: f64,
        listener: Position,
        actors: &[ActorSnapshot],
    ) -> Vec<VoiceLine> {
        let live: HashSet<ActorId> = actors.iter().map(|a| a.id).collect();
        self.gates.retain(|id, _| live.contains(id));
        self.declined.retain(|id| live.contains(id));

        if self.mirror.is_ready() {
            let frequency = self.mirror.frequency();
            for actor in actors {
                if self.gates.contains_key(&actor.id) || self.declined.contains(&actor.id) {
                    continue;
                }
                if self.mirror.is_eligible(&actor.profile) {
                    tracing::debug!(actor = actor.id.0, "attaching voice gate ({})", actor.profile.category);
                    let gate = PlaybackGate::attach(now, frequency, &mut self.rng);
                    self.gates.insert(actor.id, gate);
                } else {
                    self.declined.insert(actor.id);
                }
            }
        }

        let mut lines = Vec::new();
        for actor in actors {
            let Some(gate) = self.gates.get_mut(&actor.id) else {
                continue;
            };
            let picked = gate.tick(
                now,
                actor,
                &listener,
                &self.mirror,
                &self.selector,
                &mut self.rng,
            );
            if let Some(clip) = picked {
                lines.push(VoiceLine {
                    actor: actor.id,
                    clip,
                });
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip_store::ClipStore;
    use crate::registry::{ReplicatedStateRegistry, StaticRole};
    use mimic_core::{
        ActorProfile, AudioBuffer, Location, PoolKind, RegistrySnapshot, Roster, SelectionPolicy,
        TimeOfDay, VoiceConfig,
    };

    fn roster() -> Roster {
        Roster::from_type_names(["JesterAI", "DoublewingAI"])
    }

    fn setup(frequency: f32, clips: usize) -> (ReplicatedStateRegistry, Arc<SampleSelector>) {
        let registry = ReplicatedStateRegistry::new(&roster());
        let mut cfg = VoiceConfig::default();
        cfg.voice.frequency = frequency;
        registry
            .propagate(&StaticRole::HOST, &RegistrySnapshot::from_config(&cfg, &roster()))
            .unwrap();

        let store = ClipStore::with_seed(1_000, 4);
        for i in 0..clips {
            store.insert(
                PoolKind::Ephemeral,
                ClipHandle::new(format!("rec{i}"), AudioBuffer::silence(1.0, 100)),
            );
        }
        let selector = SampleSelector::with_seed(store, SelectionPolicy::new(false, 0.0), 8);
        (registry, Arc::new(selector))
    }

    fn actor(id: u64, category: &str, x: f32) -> ActorSnapshot {
        ActorSnapshot {
            id: ActorId(id),
            profile: ActorProfile::new(category, Location::Inside, TimeOfDay::Day),
            position: Position::new(x, 0.0, 0.0),
            alive: true,
            suppressed: false,
        }
    }

    fn run(director: &mut PlaybackDirector, actors: &[ActorSnapshot], secs: u32) -> usize {
        (0..=secs)
            .map(|t| director.tick(t as f64, Position::default(), actors).len())
            .sum()
    }

    #[test]
    fn test_gate_fires_and_reschedules() {
        let (registry, selector) = setup(1.0, 100);
        let mirror = registry.mirror();
        let mut rng = SmallRng::seed_from_u64(1);
        let a = actor(1, "JesterAI", 10.0);

        let mut gate = PlaybackGate::attach(0.0, mirror.frequency(), &mut rng);
        let due = gate.next_eligible();
        assert!((15.0..40.0).contains(&due));
        assert!(gate.tick(due, &a, &Position::default(), &mirror, &selector, &mut rng).is_none());

        let clip = gate.tick(due + 0.5, &a, &Position::default(), &mirror, &selector, &mut rng);
        assert!(clip.is_some());
        assert!(gate.next_eligible() >= due + 15.5);
    }

    #[test]
    fn test_out_of_range_reschedules_without_clip() {
        let (registry, selector) = setup(1.0, 100);
        let mirror = registry.mirror();
        let mut rng = SmallRng::seed_from_u64(1);
        let far = actor(1, "JesterAI", 100.0);

        let mut gate = PlaybackGate::attach(0.0, mirror.frequency(), &mut rng);
        let due = gate.next_eligible();
        assert!(gate.tick(due + 1.0, &far, &Position::default(), &mirror, &selector, &mut rng).is_none());
        assert!(gate.next_eligible() > due + 1.0);
    }

    #[test]
    fn test_director_skips_ineligible_at_spawn() {
        let (registry, selector) = setup(1.0, 100);
        let mut director = PlaybackDirector::with_seed(registry.mirror(), selector, 2);
        let actors = [actor(1, "JesterAI", 5.0), actor(2, "DoublewingAI", 5.0)];

        let lines = run(&mut director, &actors, 200);
        assert!(lines > 0);
        assert!(director.has_gate(ActorId(1)));
        assert!(!director.has_gate(ActorId(2)));
    }

    #[test]
    fn test_director_drops_vanished_actors() {
        let (registry, selector) = setup(1.0, 10);
        let mut director = PlaybackDirector::with_seed(registry.mirror(), selector, 2);
        director.tick(0.0, Position::default(), &[actor(1, "JesterAI", 5.0)]);
        assert_eq!(director.gate_count(), 1);
        director.tick(1.0, Position::default(), &[]);
        assert_eq!(director.gate_count(), 0);
    }

    #[test]
    fn test_dead_or_suppressed_actor_is_silent() {
        let (registry, selector) = setup(4.0, 100);
        let mut director = PlaybackDirector::with_seed(registry.mirror(), selector, 3);
        let mut dead = actor(1, "JesterAI", 5.0);
        dead.alive = false;
        let mut quiet = actor(2, "JesterAI", 5.0);
        quiet.suppressed = true;

        assert_eq!(run(&mut director, &[dead, quiet], 500), 0);
        assert_eq!(director.gate_count(), 2);
    }

    #[test]
    fn test_zero_frequency_requests_nothing() {
        let (registry, selector) = setup(0.0, 100);
        let mut director = PlaybackDirector::with_seed(registry.mirror(), selector, 3);
        assert_eq!(run(&mut director, &[actor(1, "JesterAI", 1.0)], 10_000), 0);
    }

    #[test]
    fn test_waits_for_registry() {
        let registry = ReplicatedStateRegistry::new(&roster());
        let (_, selector) = setup(1.0, 10);
        let mut director = PlaybackDirector::with_seed(registry.mirror(), selector, 3);
        let actors = [actor(1, "JesterAI", 1.0)];

        director.tick(0.0, Position::default(), &actors);
        assert_eq!(director.gate_count(), 0);

        registry
            .propagate(
                &StaticRole::HOST,
                &RegistrySnapshot::from_config(&VoiceConfig::default(), &roster()),
            )
            .unwrap();
        director.tick(1.0, Position::default(), &actors);
        assert_eq!(director.gate_count(), 1);
    }

    #[test]
    fn test_incomplete_registry_silences_everyone() {
        let registry = ReplicatedStateRegistry::new(&roster());
        let partial = RegistrySnapshot::from_config(
            &VoiceConfig::default(),
            &Roster::from_type_names(["JesterAI"]),
        );
        assert!(registry.propagate(&StaticRole::HOST, &partial).is_err());

        let (_, selector) = setup(1.0, 10);
        let mut director = PlaybackDirector::with_seed(registry.mirror(), selector, 3);
        let actors = [actor(1, "JesterAI", 1.0), actor(2, "DoublewingAI", 1.0)];

        assert_eq!(run(&mut director, &actors, 500), 0);
        assert_eq!(director.gate_count(), 0);
    }
}
