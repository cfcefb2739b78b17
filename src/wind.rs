//! Global wind and its per-biome intensity mapping.
//!
//! Wind is a sum of four noise octaves. Each octave looks up "which of my
//! periods are we in", seeds a fresh generator from that period number, and
//! contributes an angle and an intensity term scaled down by the octave
//! number. Higher octaves have shorter periods, so the low octave sets the
//! prevailing direction and the high octaves add gusty variation on top.
//! Every octave reseeds independently; no state crosses between them.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::rng::ValheimRng;
use crate::weather::WindRange;

/// In-game seconds of the shortest wind octave. Contract value.
pub const WIND_PERIOD: f64 = 10.0;

/// A global wind reading at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindSample {
    /// Direction the wind blows toward, degrees in [0, 360).
    pub angle: f64,
    /// Strength in [0, 1].
    pub intensity: f64,
}

/// Compute the global wind at an in-game time (seconds since world start).
///
/// Pure in `time`: the same instant always yields the same sample.
pub fn global_wind_at(time: f64) -> WindSample {
    let mut intensity = 0.5;
    let mut angle_rad = 0.0;

    let mut rng = ValheimRng::new(0);
    let mut octave = 1u32;
    while octave <= 8 {
        let period = (time / (WIND_PERIOD * 8.0 / f64::from(octave))).floor();
        rng.reseed(period as u64 as u32);
        angle_rad += rng.next_f64() * 2.0 * PI / f64::from(octave);
        intensity += rng.range_f64(-0.5, 0.5) / f64::from(octave);
        octave *= 2;
    }

    WindSample {
        angle: angle_rad.to_degrees().rem_euclid(360.0),
        intensity: intensity.clamp(0.0, 1.0),
    }
}

/// Map the global intensity through a condition's wind range.
pub fn biome_wind_intensity(range: WindRange, global_intensity: f64) -> f64 {
    range.min + (range.max - range.min) * global_intensity
}
