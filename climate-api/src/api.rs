pub use crate::precipitation::precipitation_handler;
pub use crate::stations::stations_handler;
pub use crate::temperature::{range_handler, start_handler, tobs_handler};

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

const ROUTE_LISTING: &str = "Climate API<br/>\
Available Routes:<br/>\
/api/v1.0/precipitation<br/>\
/api/v1.0/stations<br/>\
/api/v1.0/tobs<br/>\
/api/v1.0/<start><br/>\
/api/v1.0/<start>/<end>";

/// Build the full router. Static routes take precedence over `:start`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/api/v1.0/precipitation", get(precipitation_handler))
        .route("/api/v1.0/stations", get(stations_handler))
        .route("/api/v1.0/tobs", get(tobs_handler))
        .route("/api/v1.0/:start", get(start_handler))
        .route("/api/v1.0/:start/:end", get(range_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn home_handler() -> Html<&'static str> {
    Html(ROUTE_LISTING)
}

pub async fn health_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.ping().await.map_err(|e| state.fail(e))?;
    Ok(Json(json!({ "status": "ok" })))
}
