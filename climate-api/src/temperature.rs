use crate::error::ApiError;
use crate::models::{RangeSummary, StartSummary, TobsSummary};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

/// `GET /api/v1.0/tobs`: min/max/avg for the active station since the cutoff.
pub async fn tobs_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TobsSummary>, ApiError> {
    debug!("Received tobs request");
    let agg = state
        .store
        .active_station_temperatures(&state.baseline)
        .await
        .map_err(|e| state.fail(e))?;
    Ok(Json(agg.into()))
}

/// `GET /api/v1.0/:start`
// Path dates are not validated; malformed input matches nothing.
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<StartSummary>, ApiError> {
    debug!(%start, "Received start-date request");
    let agg = state
        .store
        .temperatures_from(&start)
        .await
        .map_err(|e| state.fail(e))?;
    Ok(Json(StartSummary::new(start, agg)))
}

/// `GET /api/v1.0/:start/:end`, both bounds inclusive.
pub async fn range_handler(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<RangeSummary>, ApiError> {
    debug!(%start, %end, "Received date-range request");
    let agg = state
        .store
        .temperatures_between(&start, &end)
        .await
        .map_err(|e| state.fail(e))?;
    Ok(Json(RangeSummary::new(start, end, agg)))
}
