use serde::{Deserialize, Serialize};

use crate::error::{HazardError, Result};

/// Degrees of latitude/longitude spanned by one ~100 m cell.
pub const CELL_DEG: f64 = 0.0009;

/// Default grid: 250 × 200 = 50 000 cells of ~100 m, roughly 500 km².
pub const DEFAULT_WIDTH: usize = 250;
pub const DEFAULT_HEIGHT: usize = 200;

/// Centre of the default region (Shimla district).
const DEFAULT_CENTRE_LON: f64 = 77.17;
const DEFAULT_CENTRE_LAT: f64 = 31.10;

/// Shape and geographic extent of the cell grid.
///
/// Cells are row-major: `cell_id = row * width + col`, row 0 at `min_lat`.
/// Bounds are metadata only; scoring never looks at them. Fields missing
/// from a config file fall back to the default grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridSpec {
    pub width: usize,
    pub height: usize,
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::centred(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_CENTRE_LON, DEFAULT_CENTRE_LAT)
    }
}

impl GridSpec {
    pub fn new(
        width: usize,
        height: usize,
        min_lon: f64,
        max_lon: f64,
        min_lat: f64,
        max_lat: f64,
    ) -> Self {
        Self { width, height, min_lon, max_lon, min_lat, max_lat }
    }

    /// A grid of `CELL_DEG` cells centred on `(lon, lat)`.
    pub fn centred(width: usize, height: usize, lon: f64, lat: f64) -> Self {
        let half_w = width as f64 * CELL_DEG / 2.0;
        let half_h = height as f64 * CELL_DEG / 2.0;
        Self::new(width, height, lon - half_w, lon + half_w, lat - half_h, lat + half_h)
    }

    /// A single-row grid of `n` cells; handy when only the flat array matters.
    pub fn flat(n: usize) -> Self {
        Self::centred(n, 1, DEFAULT_CENTRE_LON, DEFAULT_CENTRE_LAT)
    }

    /// Number of cells. Saturates rather than wrapping on absurd shapes;
    /// `validate` rejects those.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// `(row, col)` of a cell, or `None` if the id is off the grid.
    pub fn row_col(&self, cell_id: usize) -> Option<(usize, usize)> {
        if cell_id >= self.cell_count() {
            return None;
        }
        Some((cell_id / self.width, cell_id % self.width))
    }

    /// Longitude/latitude of the cell centre.
    pub fn cell_centre(&self, cell_id: usize) -> Option<(f64, f64)> {
        let (row, col) = self.row_col(cell_id)?;
        let dx = (self.max_lon - self.min_lon) / self.width as f64;
        let dy = (self.max_lat - self.min_lat) / self.height as f64;
        Some((
            self.min_lon + (col as f64 + 0.5) * dx,
            self.min_lat + (row as f64 + 0.5) * dy,
        ))
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HazardError::EmptyGrid);
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(HazardError::InvalidConfig(format!(
                "grid {}x{} overflows the cell count",
                self.width, self.height
            )));
        }
        if !(self.min_lon < self.max_lon) || !(self.min_lat < self.max_lat) {
            return Err(HazardError::InvalidConfig(
                "grid bounds must satisfy min < max on both axes".into(),
            ));
        }
        Ok(())
    }
}
