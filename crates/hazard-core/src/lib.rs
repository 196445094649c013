//! Landslide hazard scoring over a fixed cell grid.
//!
//! Each cell carries a static susceptibility and a dynamic trigger value; the
//! two are combined into a risk probability by a logistic model, and the
//! highest-risk cells are reported as hotspots.

pub mod alert;
pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod hotspots;
pub mod risk;
pub mod store;
pub mod susceptibility;
pub mod trigger;

pub use alert::{build_sms, check_alert, AlertStatus};
pub use config::ServiceConfig;
pub use error::{HazardError, Result};
pub use grid::GridSpec;
pub use hotspots::{top_hotspots, Hotspot, DEFAULT_TOP_K};
pub use risk::{compute_risk, RiskLevel, RiskModel};
pub use store::{RiskSnapshot, SnapshotStore};
pub use trigger::{TriggerProvider, TriggerSource};
