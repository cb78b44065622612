// SQLite fixtures shaped like hawaii.sqlite

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::{params, Connection};
use tempfile::TempDir;

use crate::config::DatabaseConfig;
use crate::db::{Baseline, ClimateStore};
use crate::models::{Observation, Station};
use crate::state::AppState;

pub struct Fixture {
    // Keeps the directory (and the database file) alive.
    _dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn config(&self) -> DatabaseConfig {
        DatabaseConfig {
            path: self.path.to_string_lossy().into_owned(),
            max_connections: Some(2),
        }
    }

    pub fn state(&self, baseline: Baseline, debug: bool) -> Arc<AppState> {
        let store = ClimateStore::open(&self.config()).expect("open fixture store");
        Arc::new(AppState::new(store, baseline, debug))
    }
}

pub fn obs(station: &str, date: &str, prcp: Option<f64>, tobs: f64) -> Observation {
    Observation {
        station: station.to_string(),
        date: date.to_string(),
        prcp,
        tobs,
    }
}

/// Three stations, seven readings straddling the default cutoff.
pub fn sample_observations() -> Vec<Observation> {
    vec![
        obs("USC00519281", "2016-08-22", Some(0.5), 70.0),
        obs("USC00519281", "2016-08-23", Some(1.79), 77.0),
        obs("USC00519281", "2017-08-22", None, 80.0),
        obs("USC00519281", "2017-08-23", Some(0.0), 77.0),
        obs("USC00519397", "2016-08-23", Some(0.08), 81.0),
        obs("USC00519397", "2017-08-23", Some(0.0), 82.0),
        obs("USC00513117", "2017-01-01", None, 66.0),
    ]
}

pub fn fixture_db(observations: &[Observation]) -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("hawaii.sqlite");
    let conn = Connection::open(&path).expect("create fixture db");
    conn.execute_batch(
        "CREATE TABLE measurement (
            id INTEGER PRIMARY KEY,
            station TEXT,
            date TEXT,
            prcp FLOAT,
            tobs FLOAT
        );
        CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT,
            name TEXT,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT
        );",
    )
    .expect("fixture schema");

    let mut stations: Vec<Station> = Vec::new();
    for o in observations {
        conn.execute(
            "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
            params![o.station, o.date, o.prcp, o.tobs],
        )
        .expect("insert observation");
        if !stations.iter().any(|s| s.station == o.station) {
            stations.push(Station {
                station: o.station.clone(),
            });
        }
    }
    for s in &stations {
        conn.execute(
            "INSERT INTO station (station, name) VALUES (?1, ?2)",
            params![s.station, format!("{} station", s.station)],
        )
        .expect("insert station");
    }

    Fixture { _dir: dir, path }
}
