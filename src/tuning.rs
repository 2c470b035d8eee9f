//! Gameplay calibration and pacing
//!
//! Every constant that shapes the feel of a session lives here so values can
//! be tweaked without touching the sim. Persisted separately from any game
//! state in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    // === Input calibration ===
    /// Offset applied to mouse-derived pointer angles (degrees)
    pub mouse_offset_deg: f32,
    /// Offset applied to touch-derived pointer angles (degrees)
    ///
    /// TODO: reconcile with `mouse_offset_deg` - the two input paths disagree
    /// about where the mouth's forward direction is, and nobody has confirmed
    /// which one is right on real hardware
    pub touch_offset_deg: f32,
    /// The unwrapped render angle snaps back to the raw angle past this
    /// magnitude (degrees)
    pub unwrap_reset_bound_deg: f32,

    // === Alignment window ===
    /// Offset between a wedge's spawn orientation and the mouth's facing (degrees)
    pub alignment_offset_deg: f32,
    /// Acceptance half-width of the mouth (degrees)
    pub accept_half_width_deg: f32,

    // === Pacing ===
    /// Starting gap between wedge spawns (ms)
    pub spawn_interval_start_ms: f64,
    /// Spawn gap floor (ms)
    pub spawn_interval_floor_ms: f64,
    /// Multiplicative decay applied to the spawn gap on every spawn
    pub spawn_interval_decay: f64,
    /// Wedge travel per frame
    pub wedge_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            mouse_offset_deg: MOUSE_OFFSET_DEG,
            touch_offset_deg: TOUCH_OFFSET_DEG,
            unwrap_reset_bound_deg: UNWRAP_RESET_BOUND_DEG,

            alignment_offset_deg: ALIGNMENT_OFFSET_DEG,
            accept_half_width_deg: ACCEPT_HALF_WIDTH_DEG,

            spawn_interval_start_ms: SPAWN_INTERVAL_START_MS,
            spawn_interval_floor_ms: SPAWN_INTERVAL_FLOOR_MS,
            spawn_interval_decay: SPAWN_INTERVAL_DECAY,
            wedge_speed: WEDGE_SPEED,
        }
    }
}

impl Tuning {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "waka_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(tuning) = serde_json::from_str(&json) {
                    log::info!("Loaded tuning from LocalStorage");
                    return tuning;
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Save tuning to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Tuning saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
