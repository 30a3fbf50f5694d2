use rand::Rng;

use crate::constants::{PLAY_INTERVAL_MAX_SECS, PLAY_INTERVAL_MIN_SECS};

/// Per-actor countdown to the next voice-line attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackTimer {
    next_eligible: f64,
}

impl PlaybackTimer {
    /// A timer scheduled from `now`.
    pub fn start(now: f64, frequency: f32, rng: &mut impl Rng) -> Self {
        let mut timer = Self {
            next_eligible: f64::INFINITY,
        };
        timer.reschedule(now, frequency, rng);
        timer
    }

    /// `now + U(15, 40) / frequency`. A frequency that is zero, negative or
    /// not finite pushes the horizon to infinity, so the timer never fires.
    pub fn reschedule(&mut self, now: f64, frequency: f32, rng: &mut impl Rng) {
        self.next_eligible = if frequency.is_finite() && frequency > 0.0 {
            let interval = rng.random_range(PLAY_INTERVAL_MIN_SECS..PLAY_INTERVAL_MAX_SECS);
            now + interval / frequency as f64
        } else {
            f64::INFINITY
        };
    }

    pub fn is_due(&self, now: f64) -> bool {
        now > self.next_eligible
    }

    pub fn next_eligible(&self) -> f64 {
        self.next_eligible
    }
}
