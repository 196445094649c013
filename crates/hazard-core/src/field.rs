//! Smooth scalar fields over the cell grid from Perlin fBm.
//!
//! fBm: sum of octaves with amplitude = gain^i and frequency = 2^i.
//! Used as a spatially coherent placeholder for terrain susceptibility and
//! rainfall triggers.

use noise::{NoiseFn, Perlin};

use crate::grid::GridSpec;

pub struct Fbm {
    pub octaves: u32,
    pub gain: f64,
    pub lacunarity: f64,
    noise: Perlin,
}

impl Fbm {
    pub fn new(seed: u32, octaves: u32, gain: f64) -> Self {
        Self { octaves, gain, lacunarity: 2.0, noise: Perlin::new(seed) }
    }

    /// Evaluate at noise-space `(x, y, z)`; `z` is used as a time axis.
    /// Output is normalised by the octave amplitude sum, so roughly ±1.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let mut value = 0.0f64;
        let mut amp = 1.0f64;
        let mut freq = 1.0f64;
        let mut amp_sum = 0.0f64;
        for _ in 0..self.octaves {
            value += amp * self.noise.get([x * freq, y * freq, z * freq]);
            amp_sum += amp;
            amp *= self.gain;
            freq *= self.lacunarity;
        }
        if amp_sum > 0.0 { value / amp_sum } else { 0.0 }
    }
}

/// Sample `fbm` over every cell and rescale the result to [0, 1].
///
/// `cycles` is the number of base-frequency periods across the longer grid
/// axis. A constant field (e.g. a single cell) maps to 0.5.
pub fn unit_field(fbm: &Fbm, grid: &GridSpec, cycles: f64, z: f64) -> Vec<f32> {
    let n = grid.cell_count();
    if n == 0 {
        return Vec::new();
    }

    let freq = cycles / grid.width.max(grid.height) as f64;
    let mut data = Vec::with_capacity(n);
    for r in 0..grid.height {
        for c in 0..grid.width {
            data.push(fbm.sample(c as f64 * freq, r as f64 * freq, z) as f32);
        }
    }

    let min_v = data.iter().cloned().fold(f32::INFINITY, f32::min);
    let max_v = data.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let range = max_v - min_v;
    if range > 0.0 {
        for v in &mut data {
            *v = ((*v - min_v) / range).clamp(0.0, 1.0);
        }
    } else {
        data.fill(0.5);
    }
    data
}
