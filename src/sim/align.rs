//! Mouth/wedge angular alignment
//!
//! Arrival judgment is pure angle arithmetic: fold the difference between a
//! wedge's spawn orientation and the mouth's facing onto the shortest arc,
//! then compare against the mouth's acceptance half-width. Everything here
//! works in degrees and handles the 0/360 seam.

use crate::tuning::Tuning;

/// Absolute shortest-path difference between two angles, in [0, 180]
#[inline]
pub fn shortest_arc_degrees(a: f32, b: f32) -> f32 {
    let mut diff = (a - b).abs() % 360.0;
    if diff > 180.0 {
        diff = 360.0 - diff;
    }
    diff
}

/// Angular error between a wedge's spawn orientation and the mouth's facing.
///
/// The fixed alignment offset calibrates the wedge's spawn frame to the
/// mouth's forward direction.
#[inline]
pub fn alignment_error(spawn_angle: f32, avatar_angle: f32, tuning: &Tuning) -> f32 {
    shortest_arc_degrees(spawn_angle - tuning.alignment_offset_deg, avatar_angle)
}

/// True when the wedge falls inside the mouth's acceptance window.
#[inline]
pub fn is_aligned(spawn_angle: f32, avatar_angle: f32, tuning: &Tuning) -> bool {
    alignment_error(spawn_angle, avatar_angle, tuning) <= tuning.accept_half_width_deg
}
