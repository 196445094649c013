//! Spatially coherent rainfall proxy.
//!
//! Three-dimensional fBm sampled on the grid, with the third axis used as
//! time: every update steps forward along it, so rain cells drift and
//! reshape between fields instead of being redrawn from scratch.

use super::TriggerProvider;
use crate::error::Result;
use crate::field::{unit_field, Fbm};
use crate::grid::GridSpec;

/// Noise-space distance travelled along the time axis per update.
const TIME_STEP: f64 = 0.35;

/// Storm cells across the longer grid axis.
const STORM_CYCLES: f64 = 3.0;

pub struct NoiseTrigger {
    fbm: Fbm,
    time: f64,
    intensity: f32,
}

impl NoiseTrigger {
    pub fn new(seed: u64) -> Self {
        Self {
            fbm: Fbm::new((seed ^ 0x4A1F_0C35) as u32, 4, 0.5),
            time: 0.0,
            intensity: 1.0,
        }
    }

    /// Scale every field by `intensity` (clamped to [0, 1]); 1.0 means the
    /// wettest cell reaches a trigger of 1.
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity.clamp(0.0, 1.0);
        self
    }
}

impl TriggerProvider for NoiseTrigger {
    fn name(&self) -> &str {
        "noise"
    }

    fn next_trigger(&mut self, grid: &GridSpec) -> Result<Vec<f32>> {
        let mut field = unit_field(&self.fbm, grid, STORM_CYCLES, self.time);
        self.time += TIME_STEP;
        if self.intensity < 1.0 {
            for v in &mut field {
                *v *= self.intensity;
            }
        }
        Ok(field)
    }
}
