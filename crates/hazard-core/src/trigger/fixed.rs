use std::path::Path;

use super::TriggerProvider;
use crate::error::{ensure_len, Result};
use crate::grid::GridSpec;

/// Replays a supplied trigger field on every update.
///
/// Stand-in for an external feed: the field is read once (e.g. from a JSON
/// array on disk) and handed out unchanged.
pub struct FixedTrigger {
    field: Vec<f32>,
}

impl FixedTrigger {
    pub fn new(field: Vec<f32>) -> Self {
        Self { field }
    }

    /// Load a JSON array of numbers, one per cell in grid order.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let field: Vec<f32> = serde_json::from_str(&text)?;
        Ok(Self::new(field))
    }

    pub fn len(&self) -> usize {
        self.field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }
}

impl TriggerProvider for FixedTrigger {
    fn name(&self) -> &str {
        "fixed"
    }

    fn next_trigger(&mut self, grid: &GridSpec) -> Result<Vec<f32>> {
        ensure_len("trigger field", grid.cell_count(), self.field.len())?;
        Ok(self.field.clone())
    }
}
