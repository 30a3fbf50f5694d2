//! Stand-in actors for `mimic run`.

use mimic_core::{
    ActorCategory, ActorId, ActorProfile, ActorSnapshot, Location, Position, Roster, TimeOfDay,
    display_name,
};
use rand::Rng;

/// Type name used when the roster has nothing, and for every actor that
/// should exercise the modded fallback gates.
const MODDED_TYPE: &str = "ModdedCrawlerAI";

pub struct Simulation {
    actors: Vec<ActorSnapshot>,
}

impl Simulation {
    /// Place `count` actors around the listener at the origin. Every fourth
    /// actor is a type the roster does not know.
    pub fn spawn(roster: &Roster, count: usize, rng: &mut impl Rng) -> Self {
        let known: Vec<ActorCategory> = roster.iter().map(|e| e.category.clone()).collect();

        let actors = (0..count)
            .map(|i| {
                let category = if known.is_empty() || i % 4 == 3 {
                    ActorCategory::new(MODDED_TYPE)
                } else {
                    known[i % known.len()].clone()
                };
                let location = if i % 2 == 0 {
                    Location::Inside
                } else {
                    Location::Outside
                };
                let time = if i % 3 == 2 {
                    TimeOfDay::Night
                } else {
                    TimeOfDay::Day
                };

                let distance = 10.0 + (i as f32 * 23.0) % 130.0;
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                ActorSnapshot {
                    id: ActorId(i as u64 + 1),
                    profile: ActorProfile::new(category, location, time),
                    position: Position::new(distance * angle.cos(), 0.0, distance * angle.sin()),
                    alive: true,
                    suppressed: false,
                }
            })
            .collect();

        Self { actors }
    }

    pub fn actors(&self) -> &[ActorSnapshot] {
        &self.actors
    }

    pub fn describe(&self, id: ActorId) -> String {
        self.actors
            .iter()
            .find(|a| a.id == id)
            .map(|a| display_name(a.profile.category.as_str()))
            .unwrap_or_else(|| format!("actor {}", id.0))
    }
}
