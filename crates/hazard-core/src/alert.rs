//! Alert decision and SMS text.

use serde::Serialize;

use crate::hotspots::max_risk;
use crate::risk::RiskLevel;

/// Hard limit of a single SMS segment, in characters.
pub const SMS_MAX_CHARS: usize = 160;

/// Peak risk at or above which an alert is raised.
pub const DEFAULT_ALERT_THRESHOLD: f32 = 0.80;

pub const DEFAULT_AREA_NAME: &str = "Target Zone";

/// Alert text for `area_name`, cut to [`SMS_MAX_CHARS`] characters.
///
/// The cut counts characters, not bytes, so a multi-byte area name is never
/// split mid-character.
pub fn build_sms(area_name: &str, risk_score: f32) -> String {
    let msg = format!(
        "ALERT: Landslide risk HIGH ({risk_score:.2}) in {area_name} next 6h. \
         Evacuate to safe shelter. Helpline 112."
    );
    match msg.char_indices().nth(SMS_MAX_CHARS) {
        Some((cut, _)) => msg[..cut].to_string(),
        None => msg,
    }
}

/// Whether the current grid warrants an alert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlertStatus {
    pub max_risk: f32,
    /// Cell holding the peak risk; `None` for an empty grid.
    pub cell_id: Option<usize>,
    pub alert: bool,
    pub level: RiskLevel,
    pub threshold: f32,
}

pub fn check_alert(risk: &[f32], threshold: f32) -> AlertStatus {
    let peak = max_risk(risk);
    let max_risk = peak.map(|h| h.risk).unwrap_or(0.0);
    AlertStatus {
        max_risk,
        cell_id: peak.map(|h| h.cell_id),
        alert: peak.is_some() && max_risk >= threshold,
        level: RiskLevel::from_risk(max_risk),
        threshold,
    }
}
