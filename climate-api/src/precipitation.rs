use crate::error::ApiError;
use crate::models::PrecipitationReading;
use crate::state::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;

/// `GET /api/v1.0/precipitation`: every reading since the baseline cutoff, oldest first.
pub async fn precipitation_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationReading>>, ApiError> {
    debug!("Received precipitation request");
    let readings = state
        .store
        .precipitation(&state.baseline)
        .await
        .map_err(|e| state.fail(e))?;
    Ok(Json(readings))
}
