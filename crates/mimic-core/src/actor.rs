use crate::category::ActorCategory;

/// Identifies one live actor instance for the lifetime of that instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    Inside,
    Outside,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    Day,
    Night,
}

/// What the eligibility chain needs to know about an actor.
#[derive(Clone, Debug, PartialEq)]
pub struct ActorProfile {
    pub category: ActorCategory,
    pub location: Location,
    pub time_of_day: TimeOfDay,
}

impl ActorProfile {
    pub fn new(category: impl Into<ActorCategory>, location: Location, time_of_day: TimeOfDay) -> Self {
        Self {
            category: category.into(),
            location,
            time_of_day,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Per-tick view of a live actor instance, supplied by the host game.
#[derive(Clone, Debug, PartialEq)]
pub struct ActorSnapshot {
    pub id: ActorId,
    pub profile: ActorProfile,
    pub position: Position,
    pub alive: bool,
    /// Category-specific quiet state (e.g. a haunting actor not targeting
    /// the local player).
    pub suppressed: bool,
}
