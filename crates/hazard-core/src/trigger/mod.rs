//! Trigger providers: sources of whole trigger fields.
//!
//! A provider stands in for a real rainfall feed (e.g. satellite-derived
//! precipitation). Each call yields a complete field, one value per cell, in
//! grid order; the store replaces the previous field wholesale.

pub mod fixed;
pub mod rainfall;
pub mod random;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::GridSpec;

pub use fixed::FixedTrigger;
pub use rainfall::NoiseTrigger;
pub use random::RandomTrigger;

pub trait TriggerProvider: Send {
    /// Short name for logs and API responses.
    fn name(&self) -> &str;

    /// Produce the next trigger field for `grid`.
    fn next_trigger(&mut self, grid: &GridSpec) -> Result<Vec<f32>>;
}

/// Configurable choice of built-in provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSource {
    #[default]
    Random,
    Noise,
}

impl TriggerSource {
    /// Build the provider; every field it yields is scaled by `intensity`
    /// (clamped to [0, 1]).
    pub fn build(&self, seed: u64, intensity: f32) -> Box<dyn TriggerProvider> {
        match self {
            TriggerSource::Random => Box::new(RandomTrigger::new(seed).with_intensity(intensity)),
            TriggerSource::Noise => Box::new(NoiseTrigger::new(seed).with_intensity(intensity)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerSource::Random => "random",
            TriggerSource::Noise => "noise",
        }
    }
}

impl fmt::Display for TriggerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(TriggerSource::Random),
            "noise" => Ok(TriggerSource::Noise),
            other => Err(format!("unknown trigger source '{other}' (expected random or noise)")),
        }
    }
}
