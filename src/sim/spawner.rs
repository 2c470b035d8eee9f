//! Wedge spawn scheduling
//!
//! Spawns accelerate over a round: every spawn multiplies the gap by a decay
//! factor, bounded below by a floor. A miss resets the pacing in full - no
//! partial credit.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::Wedge;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Current gap between spawns (ms)
    interval_ms: f64,
    /// Timestamp of the most recent spawn; None until the first poll arms it
    last_spawn_ms: Option<f64>,
    /// Next wedge id (monotonic, never reused)
    next_id: u64,
}

impl SpawnScheduler {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            interval_ms: tuning.spawn_interval_start_ms,
            last_spawn_ms: None,
            next_id: 1,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Spawn a wedge if the current gap has elapsed. The first poll only
    /// records its timestamp, so pacing is independent of the clock's epoch.
    pub fn poll(&mut self, now_ms: f64, rng: &mut Pcg32, tuning: &Tuning) -> Option<Wedge> {
        let Some(last) = self.last_spawn_ms else {
            self.last_spawn_ms = Some(now_ms);
            return None;
        };
        if now_ms - last < self.interval_ms {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        let spawn_angle = rng.random_range(0.0f32..360.0);

        self.last_spawn_ms = Some(now_ms);
        self.interval_ms =
            (self.interval_ms * tuning.spawn_interval_decay).max(tuning.spawn_interval_floor_ms);

        Some(Wedge::new(id, spawn_angle))
    }

    /// Restore the starting pace. The caller clears the active wedges.
    pub fn reset(&mut self, now_ms: f64, tuning: &Tuning) {
        self.interval_ms = tuning.spawn_interval_start_ms;
        self.last_spawn_ms = Some(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_first_poll_arms_without_spawning() {
        let tuning = Tuning::default();
        let mut sched = SpawnScheduler::new(&tuning);
        let mut rng = rng();
        assert!(sched.poll(5000.0, &mut rng, &tuning).is_none());
        // Gap measured from the arming poll, not from zero
        assert!(sched.poll(5100.0, &mut rng, &tuning).is_none());
        assert!(sched.poll(7000.0, &mut rng, &tuning).is_some());
    }

    #[test]
    fn test_interval_decays_exactly_once_per_spawn() {
        let tuning = Tuning::default();
        let mut sched = SpawnScheduler::new(&tuning);
        let mut rng = rng();
        assert_eq!(sched.interval_ms(), 2000.0);

        sched.poll(0.0, &mut rng, &tuning);
        let wedge = sched.poll(2000.0, &mut rng, &tuning).unwrap();
        assert_eq!(wedge.id, 1);
        assert!((0.0..360.0).contains(&wedge.spawn_angle));
        assert_eq!(sched.interval_ms(), 1960.0);
    }

    #[test]
    fn test_interval_monotone_and_floored() {
        let tuning = Tuning::default();
        let mut sched = SpawnScheduler::new(&tuning);
        let mut rng = rng();
        let mut now = 0.0;
        let mut previous = sched.interval_ms();
        sched.poll(now, &mut rng, &tuning);

        for _ in 0..200 {
            now += previous;
            let wedge = sched.poll(now, &mut rng, &tuning);
            assert!(wedge.is_some());
            let current = sched.interval_ms();
            assert!(current <= previous);
            assert!(current >= tuning.spawn_interval_floor_ms);
            previous = current;
        }
        assert_eq!(sched.interval_ms(), tuning.spawn_interval_floor_ms);
    }

    #[test]
    fn test_ids_are_monotonic_across_reset() {
        let tuning = Tuning::default();
        let mut sched = SpawnScheduler::new(&tuning);
        let mut rng = rng();
        sched.poll(0.0, &mut rng, &tuning);
        let first = sched.poll(2000.0, &mut rng, &tuning).unwrap();

        sched.reset(2500.0, &tuning);
        assert_eq!(sched.interval_ms(), tuning.spawn_interval_start_ms);
        // Not long enough after the reset timestamp
        assert!(sched.poll(3000.0, &mut rng, &tuning).is_none());
        let second = sched.poll(4500.0, &mut rng, &tuning).unwrap();
        assert!(second.id > first.id);
    }
}
