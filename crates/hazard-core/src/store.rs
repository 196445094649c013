//! Published risk state.
//!
//! A [`RiskSnapshot`] is immutable: aligned susceptibility, trigger and risk
//! arrays plus a generation counter. The [`SnapshotStore`] holds the current
//! snapshot behind an `Arc`; an update builds a complete new snapshot off to
//! the side and swaps the pointer, so readers see either the old state or
//! the new one and never a half-written array.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use serde::Serialize;

use crate::error::{ensure_len, HazardError, Result};
use crate::grid::GridSpec;
use crate::hotspots::{self, Hotspot};
use crate::risk::{compute_risk_with_model, RiskLevel, RiskModel};
use crate::trigger::TriggerProvider;

/// Provider name recorded on the initial, all-zero trigger snapshot.
pub const INITIAL_SOURCE: &str = "initial";

#[derive(Debug, Clone)]
pub struct RiskSnapshot {
    grid: GridSpec,
    generation: u64,
    source: String,
    susceptibility: Arc<[f32]>,
    trigger: Vec<f32>,
    risk: Vec<f32>,
}

/// Everything known about one cell in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellView {
    pub cell_id: usize,
    pub susceptibility: f32,
    pub trigger: f32,
    pub risk: f32,
    pub level: RiskLevel,
    pub lon: f64,
    pub lat: f64,
}

impl RiskSnapshot {
    /// Score `trigger` against `susceptibility` and package the result.
    fn build(
        grid: GridSpec,
        model: &RiskModel,
        susceptibility: Arc<[f32]>,
        trigger: Vec<f32>,
        generation: u64,
        source: &str,
    ) -> Result<Self> {
        ensure_len("susceptibility", grid.cell_count(), susceptibility.len())?;
        ensure_len("trigger", grid.cell_count(), trigger.len())?;
        let risk = compute_risk_with_model(model, &susceptibility, &trigger)?;
        Ok(Self { grid, generation, source: source.to_string(), susceptibility, trigger, risk })
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// 0 for the initial snapshot, then +1 per published update.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Name of the trigger provider that produced this snapshot.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.risk.len()
    }

    pub fn is_empty(&self) -> bool {
        self.risk.is_empty()
    }

    pub fn susceptibility(&self) -> &[f32] {
        &self.susceptibility
    }

    pub fn trigger(&self) -> &[f32] {
        &self.trigger
    }

    pub fn risk(&self) -> &[f32] {
        &self.risk
    }

    pub fn hotspots(&self, k: usize) -> Vec<Hotspot> {
        hotspots::top_hotspots(&self.risk, k)
    }

    pub fn max_risk(&self) -> Option<Hotspot> {
        hotspots::max_risk(&self.risk)
    }

    pub fn cell(&self, cell_id: usize) -> Result<CellView> {
        let (lon, lat) = self.grid.cell_centre(cell_id).ok_or(HazardError::UnknownCell(cell_id))?;
        let risk = self.risk[cell_id];
        Ok(CellView {
            cell_id,
            susceptibility: self.susceptibility[cell_id],
            trigger: self.trigger[cell_id],
            risk,
            level: RiskLevel::from_risk(risk),
            lon,
            lat,
        })
    }
}

/// Holder of the current snapshot.
pub struct SnapshotStore {
    model: RiskModel,
    current: RwLock<Arc<RiskSnapshot>>,
}

impl SnapshotStore {
    /// Build generation 0: the given susceptibility with an all-zero trigger.
    pub fn new(grid: GridSpec, susceptibility: Vec<f32>, model: RiskModel) -> Result<Self> {
        grid.validate()?;
        let trigger = vec![0.0f32; grid.cell_count()];
        let initial =
            RiskSnapshot::build(grid, &model, susceptibility.into(), trigger, 0, INITIAL_SOURCE)?;
        tracing::info!(cells = initial.len(), "risk grid initialised");
        Ok(Self { model, current: RwLock::new(Arc::new(initial)) })
    }

    /// The latest published snapshot. Holding it pins that state; later
    /// updates do not change it.
    pub fn current(&self) -> Arc<RiskSnapshot> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Pull a fresh trigger field from `provider`, rescore and publish.
    pub fn update_trigger(&self, provider: &mut dyn TriggerProvider) -> Result<Arc<RiskSnapshot>> {
        let grid = *self.current().grid();
        let trigger = provider.next_trigger(&grid)?;
        self.replace_trigger(trigger, provider.name())
    }

    /// Rescore with a supplied trigger field and publish.
    pub fn replace_trigger(&self, trigger: Vec<f32>, source: &str) -> Result<Arc<RiskSnapshot>> {
        let started = Instant::now();
        let base = self.current();
        let mut next = RiskSnapshot::build(
            base.grid,
            &self.model,
            Arc::clone(&base.susceptibility),
            trigger,
            base.generation,
            source,
        )?;
        tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "risk recomputed");

        let published = {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            next.generation = guard.generation + 1;
            let published = Arc::new(next);
            *guard = Arc::clone(&published);
            published
        };

        let peak = published.max_risk().map(|h| h.risk).unwrap_or(0.0);
        tracing::info!(
            generation = published.generation,
            source = %published.source,
            max_risk = peak,
            "risk snapshot published"
        );
        Ok(published)
    }

    pub fn hotspots(&self, k: usize) -> Vec<Hotspot> {
        self.current().hotspots(k)
    }

    pub fn max_risk(&self) -> Option<Hotspot> {
        self.current().max_risk()
    }
}
