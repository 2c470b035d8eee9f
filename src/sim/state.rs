//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::orientation::OrientationTracker;
use super::score::ScoreBoard;
use super::spawner::SpawnScheduler;
use crate::tuning::Tuning;

/// Which input path produced a pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// A pointer position in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub pos: Vec2,
    pub source: PointerSource,
}

/// A wedge target travelling toward the avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wedge {
    pub id: u64,
    /// Orientation chosen at spawn (degrees, [0, 360))
    pub spawn_angle: f32,
    /// Distance travelled toward the avatar (0 at spawn)
    pub travel: f32,
    /// Set once on arrival so judgment cannot run twice
    pub judged: bool,
}

impl Wedge {
    pub fn new(id: u64, spawn_angle: f32) -> Self {
        Self {
            id,
            spawn_angle,
            travel: 0.0,
            judged: false,
        }
    }

    /// True once the wedge has covered the full approach distance
    #[inline]
    pub fn arrived(&self, target_distance: f32) -> bool {
        self.travel >= target_distance
    }
}

/// Events reported by a tick, for HUD and sound hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new wedge entered play
    Spawned { id: u64 },
    /// A wedge arrived inside the mouth's acceptance window
    Chomped { id: u64 },
    /// A wedge arrived outside the window; the round resets
    Missed { id: u64 },
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving wedge spawn angles
    pub(super) rng: Pcg32,
    /// Pointer orientation tracker
    pub tracker: OrientationTracker,
    /// Wedge spawn pacing
    pub scheduler: SpawnScheduler,
    /// Active wedges (sorted by id; spawns append in id order)
    pub wedges: Vec<Wedge>,
    /// Session score and best
    pub scores: ScoreBoard,
    /// Avatar position on the playing surface
    pub origin: Vec2,
    /// Distance a wedge covers before it is judged
    pub target_distance: f32,
    /// Tick counter
    pub time_ticks: u64,
    /// Cleared by `shutdown`; a stopped session ignores further ticks
    running: bool,
}

impl GameState {
    /// Create a session for a default-sized surface. Call `resize` once the
    /// real surface dimensions are known.
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tracker: OrientationTracker::new(),
            scheduler: SpawnScheduler::new(tuning),
            wedges: Vec::new(),
            scores: ScoreBoard::new(),
            origin: Vec2::ZERO,
            target_distance: 0.0,
            time_ticks: 0,
            running: true,
        };
        state.resize(800.0, 600.0);
        state
    }

    /// Recompute surface geometry. The avatar sits centered horizontally,
    /// one third up from the bottom; wedges cross the full surface height.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.origin = Vec2::new(width / 2.0, height * 2.0 / 3.0);
        self.target_distance = height;
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Stop the session. Subsequent ticks are no-ops, so no wedge can
    /// re-trigger arrival logic after teardown.
    pub fn shutdown(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_places_avatar() {
        let mut state = GameState::new(1, &Tuning::default());
        state.resize(900.0, 600.0);
        assert_eq!(state.origin, Vec2::new(450.0, 400.0));
        assert_eq!(state.target_distance, 600.0);
    }

    #[test]
    fn test_wedge_arrival_threshold() {
        let mut wedge = Wedge::new(1, 120.0);
        assert!(!wedge.arrived(600.0));
        wedge.travel = 599.9;
        assert!(!wedge.arrived(600.0));
        wedge.travel = 600.0;
        assert!(wedge.arrived(600.0));
    }
}
