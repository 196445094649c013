//! Static susceptibility fields.
//!
//! Both sources are placeholders for a real terrain/soil/slope model: seeded
//! uniform noise per cell, or a smooth fBm surface.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::field::{unit_field, Fbm};
use crate::grid::GridSpec;

/// Which placeholder generates the initial susceptibility field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SusceptibilitySource {
    #[default]
    Random,
    Terrain,
}

impl SusceptibilitySource {
    pub fn generate(&self, grid: &GridSpec, seed: u64) -> Vec<f32> {
        match self {
            SusceptibilitySource::Random => random_susceptibility(grid.cell_count(), seed),
            SusceptibilitySource::Terrain => terrain_susceptibility(grid, seed),
        }
    }
}

/// Uniform [0, 1) value per cell.
pub fn random_susceptibility(n: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5E5C_0000_0000_0001);
    (0..n).map(|_| rng.gen::<f32>()).collect()
}

/// Smooth fBm surface in [0, 1]: about six ridge/valley cycles across the grid.
pub fn terrain_susceptibility(grid: &GridSpec, seed: u64) -> Vec<f32> {
    let fbm = Fbm::new((seed ^ 0x7E44_A1D0) as u32, 6, 0.55);
    unit_field(&fbm, grid, 6.0, 0.0)
}
