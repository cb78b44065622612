use crate::error::ApiError;
use crate::models::StationActivity;
use crate::state::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;

/// `GET /api/v1.0/stations`: observation count per station, most active first.
pub async fn stations_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StationActivity>>, ApiError> {
    debug!("Received stations request");
    let stations = state
        .store
        .station_activity()
        .await
        .map_err(|e| state.fail(e))?;
    Ok(Json(stations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Baseline;
    use crate::testing::{fixture_db, obs, sample_observations};

    #[tokio::test]
    async fn counts_are_sorted_and_complete() {
        let sample = sample_observations();
        let fx = fixture_db(&sample);
        let state = fx.state(Baseline::default(), false);
        let Json(stations) = stations_handler(State(state)).await.expect("resp");

        assert_eq!(stations.len(), 3);
        assert_eq!(stations[0].station_id, "USC00519281");
        assert_eq!(stations[0].station_observation_count, 4);
        assert!(stations
            .windows(2)
            .all(|w| w[0].station_observation_count >= w[1].station_observation_count));
        let total: i64 = stations.iter().map(|s| s.station_observation_count).sum();
        assert_eq!(total, sample.len() as i64);
    }

    #[tokio::test]
    async fn ties_are_broken_by_station_id() {
        let fx = fixture_db(&[
            obs("B", "2017-01-01", None, 70.0),
            obs("A", "2017-01-01", None, 70.0),
        ]);
        let state = fx.state(Baseline::default(), false);
        let Json(stations) = stations_handler(State(state)).await.expect("resp");
        let ids: Vec<&str> = stations.iter().map(|s| s.station_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn empty_dataset_gives_empty_list() {
        let fx = fixture_db(&[]);
        let state = fx.state(Baseline::default(), false);
        let Json(stations) = stations_handler(State(state)).await.expect("resp");
        assert!(stations.is_empty());
    }
}
