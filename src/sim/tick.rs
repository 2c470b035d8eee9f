//! Per-frame simulation tick
//!
//! One tick per animation frame: integrate the latest pointer sample, poll
//! the spawner, advance every wedge, judge arrivals against the avatar's
//! facing, and report the results.

use super::align::is_aligned;
use super::state::{GameEvent, GameState, PointerSample};
use crate::tuning::Tuning;

/// Input for a single tick. The front-end coalesces pointer events between
/// frames and hands the latest sample to the next tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub pointer: Option<PointerSample>,
}

/// Advance the session by one animation frame.
///
/// `now_ms` is the frame timestamp; wedge travel is per-frame while spawn
/// pacing is wall-clock. The avatar's facing is read once, so every wedge
/// judged in a frame sees the same orientation.
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.running() {
        return events;
    }

    state.time_ticks += 1;

    if let Some(sample) = input.pointer {
        state
            .tracker
            .update_target(sample.pos, state.origin, sample.source, tuning);
    }

    if let Some(wedge) = state.scheduler.poll(now_ms, &mut state.rng, tuning) {
        events.push(GameEvent::Spawned { id: wedge.id });
        state.wedges.push(wedge);
    }

    let avatar_angle = state.tracker.raw_angle();
    let target = state.target_distance;
    let mut missed = false;

    for wedge in &mut state.wedges {
        wedge.travel += tuning.wedge_speed;
        if wedge.judged || !wedge.arrived(target) {
            continue;
        }
        // The judged flag makes arrival idempotent even if a wedge lingers
        // in the collection for another callback this frame
        wedge.judged = true;

        let aligned = is_aligned(wedge.spawn_angle, avatar_angle, tuning);
        state.scores.report(wedge.id, aligned);
        if aligned {
            events.push(GameEvent::Chomped { id: wedge.id });
        } else {
            events.push(GameEvent::Missed { id: wedge.id });
            missed = true;
        }
    }
    state.wedges.retain(|w| !w.judged);

    if missed {
        // A single miss fully resets pacing and sweeps the field
        state.scheduler.reset(now_ms, tuning);
        state.wedges.clear();
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::UNWRAP_RESET_BOUND_DEG;
    use crate::sim::state::Wedge;
    use rand::SeedableRng;

    fn session() -> (GameState, Tuning) {
        let tuning = Tuning::default();
        (GameState::new(12345, &tuning), tuning)
    }

    /// Point the mouth straight at `angle` without going through a pointer
    fn face(state: &mut GameState, angle: f32) {
        state.tracker.integrate(angle, UNWRAP_RESET_BOUND_DEG);
    }

    #[test]
    fn test_spawn_after_interval() {
        let (mut state, tuning) = session();
        let input = TickInput::default();

        // First tick arms the scheduler, second is still inside the gap
        assert!(tick(&mut state, &input, &tuning, 0.0).is_empty());
        assert!(tick(&mut state, &input, &tuning, 16.0).is_empty());

        let events = tick(&mut state, &input, &tuning, 2016.0);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameEvent::Spawned { id: 1 }));
        assert_eq!(state.wedges.len(), 1);
    }

    #[test]
    fn test_aligned_arrival_scores_and_removes() {
        let (mut state, tuning) = session();
        face(&mut state, 50.0);

        let mut wedge = Wedge::new(9, 100.0);
        wedge.travel = state.target_distance - tuning.wedge_speed;
        state.wedges.push(wedge);

        let events = tick(&mut state, &TickInput::default(), &tuning, 0.0);
        assert!(events.contains(&GameEvent::Chomped { id: 9 }));
        assert!(state.wedges.is_empty());
        assert_eq!(state.scores.score(), 1);
    }

    #[test]
    fn test_missed_arrival_resets_round() {
        let (mut state, tuning) = session();
        face(&mut state, 0.0);
        state.scores.report(100, true);
        assert_eq!(state.scores.score(), 1);

        // One wedge about to arrive 50 degrees off, one still in flight
        let mut arriving = Wedge::new(9, 100.0);
        arriving.travel = state.target_distance;
        state.wedges.push(arriving);
        state.wedges.push(Wedge::new(10, 200.0));

        // Decay the interval so the reset is observable
        let mut rng = rand_pcg::Pcg32::seed_from_u64(0);
        state.scheduler.poll(0.0, &mut rng, &tuning);
        state.scheduler.poll(2000.0, &mut rng, &tuning);
        assert_eq!(state.scheduler.interval_ms(), 1960.0);

        let events = tick(&mut state, &TickInput::default(), &tuning, 5000.0);

        assert!(events.iter().any(|e| matches!(e, GameEvent::Missed { id: 9 })));
        assert!(state.wedges.is_empty(), "a miss sweeps the field");
        assert_eq!(state.scores.score(), 0);
        assert_eq!(state.scheduler.interval_ms(), tuning.spawn_interval_start_ms);
    }

    #[test]
    fn test_pointer_sample_steers_the_mouth() {
        let (mut state, tuning) = session();
        let input = TickInput {
            pointer: Some(PointerSample {
                pos: glam::Vec2::new(state.origin.x + 100.0, state.origin.y),
                source: crate::sim::PointerSource::Touch,
            }),
        };
        tick(&mut state, &input, &tuning, 0.0);
        assert!((state.tracker.raw_angle() - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_shutdown_stops_the_session() {
        let (mut state, tuning) = session();
        let mut wedge = Wedge::new(9, 100.0);
        wedge.travel = state.target_distance;
        state.wedges.push(wedge);

        state.shutdown();
        let events = tick(&mut state, &TickInput::default(), &tuning, 5000.0);
        assert!(events.is_empty());
        assert_eq!(state.wedges.len(), 1, "a stopped session never judges");
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let mut a = GameState::new(99999, &tuning);
        let mut b = GameState::new(99999, &tuning);

        let input = TickInput::default();
        let mut now = 0.0;
        for _ in 0..500 {
            now += 16.0;
            let ea = tick(&mut a, &input, &tuning, now);
            let eb = tick(&mut b, &input, &tuning, now);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.wedges.len(), b.wedges.len());
        for (wa, wb) in a.wedges.iter().zip(&b.wedges) {
            assert_eq!(wa.id, wb.id);
            assert_eq!(wa.spawn_angle, wb.spawn_angle);
        }
    }
}
