//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick-driven only (one tick per animation frame)
//! - Seeded RNG only
//! - Stable iteration order (by wedge ID)
//! - No rendering or platform dependencies

pub mod align;
pub mod orientation;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;

pub use align::{alignment_error, is_aligned, shortest_arc_degrees};
pub use orientation::OrientationTracker;
pub use score::ScoreBoard;
pub use spawner::SpawnScheduler;
pub use state::{GameEvent, GameState, PointerSample, PointerSource, Wedge};
pub use tick::{TickInput, tick};
