use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use hazard_core::{alert, AlertStatus};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    pub threshold: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct AlertResponse {
    #[serde(flatten)]
    pub status: AlertStatus,
    pub area_name: String,
    /// SMS text, present only when an alert is raised.
    pub sms: Option<String>,
}

/// Compare the current peak risk against the alert threshold.
pub async fn check_alert(
    State(state): State<AppState>,
    query: Result<Query<AlertQuery>, QueryRejection>,
) -> Result<Json<AlertResponse>, ApiError> {
    let Query(params) = query?;
    let threshold = params.threshold.unwrap_or(state.config.alert_threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ApiError::BadRequest(format!(
            "threshold must be within [0, 1], got {threshold}"
        )));
    }

    let snap = state.store.current();
    let status = alert::check_alert(snap.risk(), threshold);
    let area_name = state.config.area_name.clone();
    let sms = status.alert.then(|| alert::build_sms(&area_name, status.max_risk));

    Ok(Json(AlertResponse { status, area_name, sms }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_state;

    #[tokio::test]
    async fn zero_threshold_always_alerts() {
        let query = Ok(Query(AlertQuery { threshold: Some(0.0) }));
        let Json(resp) = check_alert(State(test_state()), query).await.unwrap();
        assert!(resp.status.alert);
        let sms = resp.sms.unwrap();
        assert!(sms.contains(&resp.area_name));
        assert!(sms.chars().count() <= alert::SMS_MAX_CHARS);
    }

    /// With an all-zero trigger no cell can reach 0.8: logistic(2.0 - 2.5) < 0.5.
    #[tokio::test]
    async fn initial_grid_does_not_alert_at_default_threshold() {
        let query = Ok(Query(AlertQuery { threshold: None }));
        let Json(resp) = check_alert(State(test_state()), query).await.unwrap();
        assert!(!resp.status.alert);
        assert!(resp.sms.is_none());
        assert!(resp.status.max_risk < 0.5);
    }

    #[tokio::test]
    async fn out_of_range_threshold_is_rejected() {
        let query = Ok(Query(AlertQuery { threshold: Some(1.5) }));
        let res = check_alert(State(test_state()), query).await;
        assert!(matches!(res, Err(ApiError::BadRequest(_))));
    }
}
