//! Continuous orientation tracking
//!
//! Converts pointer positions into a mouth-facing angle and folds each new
//! reading into an unwrapped angle free of 0/360 discontinuities, so the
//! rendered rotation always takes the shortest path around the circle and
//! never snaps backward across the seam.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::PointerSource;
use crate::tuning::Tuning;
use crate::{angle_between, normalize_degrees};

/// Orientation state machine: two stored angles plus the continuous sum.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OrientationTracker {
    /// Latest calibrated pointer angle, [0, 360)
    raw: f32,
    /// Raw angle seen by the previous integration step
    previous_raw: f32,
    /// Continuous render angle (runs outside [0, 360))
    unwrapped: f32,
}

impl OrientationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mouth-facing angle, [0, 360)
    #[inline]
    pub fn raw_angle(&self) -> f32 {
        self.raw
    }

    /// Continuous render angle
    #[inline]
    pub fn unwrapped_angle(&self) -> f32 {
        self.unwrapped
    }

    /// Update from a pointer position on the playing surface.
    ///
    /// Mouse and touch carry separate calibration offsets because the two
    /// input paths disagree about where the mouth's forward direction is.
    /// Returns the calibrated raw angle.
    pub fn update_target(
        &mut self,
        pointer: Vec2,
        origin: Vec2,
        source: PointerSource,
        tuning: &Tuning,
    ) -> f32 {
        let offset = match source {
            PointerSource::Mouse => tuning.mouse_offset_deg,
            PointerSource::Touch => tuning.touch_offset_deg,
        };
        let raw = normalize_degrees(angle_between(origin, pointer) + offset);
        self.integrate(raw, tuning.unwrap_reset_bound_deg);
        raw
    }

    /// Fold a new raw angle into the unwrapped angle along the shortest
    /// angular path. A single step never moves more than 180 degrees, except
    /// when the magnitude guard snaps the unwrapped angle back to `raw`.
    pub fn integrate(&mut self, raw: f32, reset_bound: f32) {
        if self.unwrapped.abs() > reset_bound {
            self.unwrapped = raw;
            self.previous_raw = raw;
            self.raw = raw;
            return;
        }

        let delta = raw - self.previous_raw;
        if delta.abs() > 180.0 {
            // Crossed the 0/360 seam
            if self.previous_raw > raw {
                self.unwrapped += delta + 360.0;
            } else {
                self.unwrapped += delta - 360.0;
            }
        } else {
            self.unwrapped += delta;
        }
        self.previous_raw = raw;
        self.raw = raw;
    }
}
