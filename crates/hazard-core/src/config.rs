//! Service configuration.
//!
//! Every field is optional in the JSON file; missing fields take the
//! defaults below. Front ends apply their own flag/env overrides on top of
//! the loaded value before calling [`ServiceConfig::validate`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::alert::{DEFAULT_ALERT_THRESHOLD, DEFAULT_AREA_NAME};
use crate::error::{HazardError, Result};
use crate::grid::GridSpec;
use crate::hotspots::DEFAULT_TOP_K;
use crate::risk::RiskModel;
use crate::store::SnapshotStore;
use crate::susceptibility::SusceptibilitySource;
use crate::trigger::{TriggerProvider, TriggerSource};

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub grid: GridSpec,
    /// Seeds the susceptibility placeholder and the trigger provider.
    pub seed: u64,
    pub model: RiskModel,
    /// Hotspots returned when a query gives no count.
    pub top_k: usize,
    /// Peak risk that raises an alert, in [0, 1].
    pub alert_threshold: f32,
    /// Area named in SMS alerts.
    pub area_name: String,
    pub trigger: TriggerSource,
    /// Scales every generated trigger field, in [0, 1].
    pub trigger_intensity: f32,
    pub susceptibility: SusceptibilitySource,
    /// Listen address of the HTTP service.
    pub bind: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            seed: 42,
            model: RiskModel::default(),
            top_k: DEFAULT_TOP_K,
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            area_name: DEFAULT_AREA_NAME.to_string(),
            trigger: TriggerSource::default(),
            trigger_intensity: 1.0,
            susceptibility: SusceptibilitySource::default(),
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Read a JSON config file. Does not validate.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        if self.top_k == 0 {
            return Err(HazardError::InvalidConfig("top_k must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.alert_threshold) {
            return Err(HazardError::InvalidConfig(format!(
                "alert_threshold must be within [0, 1], got {}",
                self.alert_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.trigger_intensity) {
            return Err(HazardError::InvalidConfig(format!(
                "trigger_intensity must be within [0, 1], got {}",
                self.trigger_intensity
            )));
        }
        let m = &self.model;
        if !(m.a.is_finite() && m.b.is_finite() && m.c.is_finite()) {
            return Err(HazardError::InvalidConfig("model coefficients must be finite".into()));
        }
        Ok(())
    }

    /// Validate, generate the susceptibility field and build the store.
    pub fn build_store(&self) -> Result<SnapshotStore> {
        self.validate()?;
        let susceptibility = self.susceptibility.generate(&self.grid, self.seed);
        SnapshotStore::new(self.grid, susceptibility, self.model)
    }

    pub fn build_trigger_provider(&self) -> Box<dyn TriggerProvider> {
        self.trigger.build(self.seed, self.trigger_intensity)
    }
}
