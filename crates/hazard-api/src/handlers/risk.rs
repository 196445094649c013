use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use hazard_core::{RiskLevel, TriggerProvider};
use serde::{Deserialize, Serialize};
use std::sync::PoisonError;

use crate::error::ApiError;
use crate::state::AppState;
use hazard_core::store::CellView;

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub updated: bool,
    pub generation: u64,
    pub source: String,
    pub max_risk: f32,
}

/// Pull a new trigger field and publish the rescored grid.
pub async fn update_trigger(
    State(state): State<AppState>,
) -> Result<Json<UpdateResponse>, ApiError> {
    // Scoring 50k cells is CPU work; keep it off the async workers.
    let snap = tokio::task::spawn_blocking(move || {
        let mut provider = state.provider.lock().unwrap_or_else(PoisonError::into_inner);
        let provider: &mut dyn TriggerProvider = provider.as_mut();
        state.store.update_trigger(provider)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("trigger update task failed: {e}")))??;

    Ok(Json(UpdateResponse {
        updated: true,
        generation: snap.generation(),
        source: snap.source().to_string(),
        max_risk: snap.max_risk().map(|h| h.risk).unwrap_or(0.0),
    }))
}

#[derive(Debug, Deserialize)]
pub struct HotspotQuery {
    pub k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HotspotEntry {
    pub cell_id: usize,
    pub name: String,
    pub risk: f32,
    pub level: RiskLevel,
    pub lon: f64,
    pub lat: f64,
}

/// Top-k cells of the current snapshot, highest risk first.
pub async fn hotspots(
    State(state): State<AppState>,
    query: Result<Query<HotspotQuery>, QueryRejection>,
) -> Result<Json<Vec<HotspotEntry>>, ApiError> {
    let Query(params) = query?;
    let k = params.k.unwrap_or(state.config.top_k);
    let snap = state.store.current();
    let grid = snap.grid();

    let entries = snap
        .hotspots(k)
        .into_iter()
        .filter_map(|h| {
            let (lon, lat) = grid.cell_centre(h.cell_id)?;
            Some(HotspotEntry {
                cell_id: h.cell_id,
                name: format!("Cell-{}", h.cell_id),
                risk: h.risk,
                level: RiskLevel::from_risk(h.risk),
                lon,
                lat,
            })
        })
        .collect();

    Ok(Json(entries))
}

pub async fn cell(
    State(state): State<AppState>,
    path: Result<Path<usize>, PathRejection>,
) -> Result<Json<CellView>, ApiError> {
    let Path(id) = path?;
    Ok(Json(state.store.current().cell(id)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_state;

    #[tokio::test]
    async fn update_bumps_generation() {
        let state = test_state();
        let Json(first) = update_trigger(State(state.clone())).await.unwrap();
        let Json(second) = update_trigger(State(state.clone())).await.unwrap();
        assert!(first.updated);
        assert_eq!(first.generation, 1);
        assert_eq!(second.generation, 2);
        assert_eq!(first.source, "random");
        assert!(first.max_risk > 0.0 && first.max_risk < 1.0);
    }

    #[tokio::test]
    async fn hotspots_default_to_configured_k() {
        let state = test_state();
        update_trigger(State(state.clone())).await.unwrap();
        let query = Ok(Query(HotspotQuery { k: None }));
        let Json(list) = hotspots(State(state), query).await.unwrap();
        assert_eq!(list.len(), 10);
        for w in list.windows(2) {
            assert!(w[0].risk >= w[1].risk);
        }
        assert_eq!(list[0].name, format!("Cell-{}", list[0].cell_id));
    }

    #[tokio::test]
    async fn hotspots_clamp_k_to_grid() {
        let state = test_state();
        let query = Ok(Query(HotspotQuery { k: Some(1_000) }));
        let Json(list) = hotspots(State(state), query).await.unwrap();
        assert_eq!(list.len(), 200);
    }

    #[tokio::test]
    async fn hotspots_match_store_ranking() {
        let state = test_state();
        update_trigger(State(state.clone())).await.unwrap();
        let expected = state.store.hotspots(3);
        let query = Ok(Query(HotspotQuery { k: Some(3) }));
        let Json(list) = hotspots(State(state), query).await.unwrap();
        let ids: Vec<usize> = list.iter().map(|e| e.cell_id).collect();
        assert_eq!(ids, expected.iter().map(|h| h.cell_id).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn unknown_cell_is_not_found() {
        let state = test_state();
        let missing = cell(State(state.clone()), Ok(Path(200))).await;
        assert!(matches!(missing, Err(ApiError::NotFound(_))));
        let Json(view) = cell(State(state), Ok(Path(5))).await.unwrap();
        assert_eq!(view.cell_id, 5);
        assert_eq!(view.trigger, 0.0);
    }
}
