//! Seeded motion variation.
//!
//! Every parameter is a closed-form function of the seed: no generator state
//! is carried between calls, so the same seed always yields the same motion.

use crate::config::Tone;
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) for freshly drawn seeds.
pub const SEED_RANGE: f64 = 1_000_000.0;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct Seed(f64);

impl Seed {
    /// Wraps a seed value. Non-finite input degrades to `0.0`.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value)
        } else {
            Self(0.0)
        }
    }

    pub fn random() -> Self {
        Self(rand::random::<f64>() * SEED_RANGE)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Derives a sub-seed by adding an index-based offset.
    pub fn offset(self, by: f64) -> Self {
        Self::new(self.0 + by)
    }
}

impl From<f64> for Seed {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self(f64::from(value))
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariationParams {
    pub speed: f64,
    pub hand_position_offset: f64,
    pub expression_intensity: f64,
    pub arm_swing_amplitude: f64,
    pub body_movement: f64,
}

/// Remainder in `[0, modulus)`. `rem_euclid` rounds up to `modulus` itself
/// for tiny negative inputs; that case wraps to zero.
pub(crate) fn wrap(seed: f64, modulus: f64) -> f64 {
    let r = seed.rem_euclid(modulus);
    if r >= modulus {
        0.0
    } else {
        r
    }
}

/// Seed-driven speed factor: `0.8` plus a remainder in `[0, 0.4)`, before tone and speed scaling.
pub fn speed_factor(seed: Seed) -> f64 {
    0.8 + wrap(seed.value(), 40.0) / 100.0
}

pub fn derive_variation(seed: Seed, base_speed: f64, tone: Tone) -> VariationParams {
    let s = seed.value();
    VariationParams {
        speed: base_speed * tone.multiplier() * speed_factor(seed),
        hand_position_offset: (wrap(s, 20.0) - 10.0) / 100.0,
        expression_intensity: wrap(s, 15.0) / 100.0,
        arm_swing_amplitude: 0.4 + wrap(s, 20.0) / 100.0,
        body_movement: wrap(s, 10.0) / 100.0,
    }
}
