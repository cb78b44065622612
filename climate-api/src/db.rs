use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{
    BaselineConfig, BaselineMode, DatabaseConfig, DEFAULT_ACTIVE_STATION, DEFAULT_CUTOFF_DATE,
    DEFAULT_MAX_CONNECTIONS,
};
use crate::models::{
    Observation, PrecipitationReading, Station, StationActivity, TemperatureAggregate,
};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database not found: {0}")]
    NotFound(String),

    #[error("Schema mismatch: {0}")]
    Schema(String),

    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type ConnectionPool = Pool<SqliteConnectionManager>;
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

// One year before the newest observation, still an ISO string.
const LATEST_CUTOFF: &str = "(SELECT date(MAX(date), '-1 year') FROM measurement)";
const MOST_ACTIVE_STATION: &str = "(SELECT station FROM measurement \
     GROUP BY station ORDER BY COUNT(station) DESC, station ASC LIMIT 1)";

/// Cutoff date and active station used by the precipitation and tobs routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Baseline {
    Fixed {
        cutoff_date: String,
        active_station: String,
    },
    Latest,
}

impl Default for Baseline {
    fn default() -> Self {
        Baseline::Fixed {
            cutoff_date: DEFAULT_CUTOFF_DATE.to_string(),
            active_station: DEFAULT_ACTIVE_STATION.to_string(),
        }
    }
}

impl Baseline {
    pub fn from_config(cfg: &BaselineConfig) -> Self {
        match cfg.mode.unwrap_or_default() {
            BaselineMode::Latest => Baseline::Latest,
            BaselineMode::Fixed => Baseline::Fixed {
                cutoff_date: cfg
                    .cutoff_date
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CUTOFF_DATE.to_string()),
                active_station: cfg
                    .active_station
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ACTIVE_STATION.to_string()),
            },
        }
    }

    /// WHERE clause restricting to the cutoff, and its bound parameters.
    fn since_cutoff(&self) -> (String, Vec<String>) {
        match self {
            Baseline::Fixed { cutoff_date, .. } => {
                ("date >= ?1".to_string(), vec![cutoff_date.clone()])
            }
            Baseline::Latest => (format!("date >= {}", LATEST_CUTOFF), Vec::new()),
        }
    }

    /// WHERE clause restricting to the active station and the cutoff.
    fn active_station_since_cutoff(&self) -> (String, Vec<String>) {
        match self {
            Baseline::Fixed {
                cutoff_date,
                active_station,
            } => (
                "station = ?1 AND date >= ?2".to_string(),
                vec![active_station.clone(), cutoff_date.clone()],
            ),
            Baseline::Latest => (
                format!(
                    "station = {} AND date >= {}",
                    MOST_ACTIVE_STATION, LATEST_CUTOFF
                ),
                Vec::new(),
            ),
        }
    }
}

/// Open a read-only pool over an existing database file and check its schema.
///
/// Fails when the file is missing, cannot be opened, or lacks the expected tables.
pub fn create_pool(config: &DatabaseConfig) -> Result<ConnectionPool, DatabaseError> {
    let max_connections = config.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS);
    info!(path = %config.path, max_connections, "Opening climate database");

    // A read-only open of a missing path only yields a generic SQLite error.
    if !Path::new(&config.path).is_file() {
        return Err(DatabaseError::NotFound(config.path.clone()));
    }

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let manager = SqliteConnectionManager::file(&config.path)
        .with_flags(flags)
        .with_init(|conn| conn.execute_batch("PRAGMA busy_timeout = 5000;"));

    let pool = Pool::builder()
        .max_size(max_connections.max(1))
        .build(manager)?;

    {
        let conn = pool.get()?;
        verify_table(&conn, Observation::TABLE, Observation::COLUMNS)?;
        verify_table(&conn, Station::TABLE, Station::COLUMNS)?;
    }

    debug!("Database pool ready");
    Ok(pool)
}

fn verify_table(conn: &Connection, table: &str, required: &[&str]) -> Result<(), DatabaseError> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Err(DatabaseError::Schema(format!("table '{}' is missing", table)));
    }
    for col in required {
        if !columns.iter().any(|c| c.eq_ignore_ascii_case(col)) {
            return Err(DatabaseError::Schema(format!(
                "table '{}' has no column '{}'",
                table, col
            )));
        }
    }
    Ok(())
}

/// The queries behind each route. Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct ClimateStore {
    pool: ConnectionPool,
}

impl std::fmt::Debug for ClimateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClimateStore")
            .field("pool", &"<ConnectionPool>")
            .finish()
    }
}

impl ClimateStore {
    pub fn new(pool: ConnectionPool) -> Self {
        ClimateStore { pool }
    }

    pub fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        Ok(ClimateStore::new(create_pool(config)?))
    }

    /// Run `f` on one pooled session off the async runtime.
    /// The session is returned to the pool when `f` finishes, on success or error.
    async fn with_session<T, F>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn: PooledConn = pool.get()?;
            Ok::<_, DatabaseError>(f(&*conn)?)
        })
        .await?
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.with_session(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)))
            .await?;
        Ok(())
    }

    /// Precipitation readings on or after the baseline cutoff, oldest first.
    pub async fn precipitation(
        &self,
        baseline: &Baseline,
    ) -> Result<Vec<PrecipitationReading>, DatabaseError> {
        let (filter, params) = baseline.since_cutoff();
        let sql = format!(
            "SELECT date, prcp FROM measurement WHERE {} ORDER BY date ASC",
            filter
        );
        let rows = self
            .with_session(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
                    Ok(PrecipitationReading {
                        date: row.get(0)?,
                        prcp: row.get(1)?,
                    })
                })?;
                rows.collect::<Result<Vec<_>, _>>()
            })
            .await?;
        debug!(rows = rows.len(), "precipitation query finished");
        Ok(rows)
    }

    /// Observation counts per station, most active first.
    pub async fn station_activity(&self) -> Result<Vec<StationActivity>, DatabaseError> {
        let rows = self
            .with_session(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT station, COUNT(station) AS station_count FROM measurement \
                     GROUP BY station ORDER BY station_count DESC, station ASC",
                )?;
                let rows = stmt.query_map([], |row| {
                    Ok(StationActivity {
                        station_id: row.get(0)?,
                        station_observation_count: row.get(1)?,
                    })
                })?;
                rows.collect::<Result<Vec<_>, _>>()
            })
            .await?;
        debug!(rows = rows.len(), "station query finished");
        Ok(rows)
    }

    /// Temperature aggregate for the active station since the cutoff.
    pub async fn active_station_temperatures(
        &self,
        baseline: &Baseline,
    ) -> Result<TemperatureAggregate, DatabaseError> {
        let (filter, params) = baseline.active_station_since_cutoff();
        self.aggregate(filter, params).await
    }

    /// Temperature aggregate over `date >= start`, compared as text.
    pub async fn temperatures_from(
        &self,
        start: &str,
    ) -> Result<TemperatureAggregate, DatabaseError> {
        self.aggregate("date >= ?1".to_string(), vec![start.to_string()])
            .await
    }

    /// Temperature aggregate over `start <= date <= end`, compared as text.
    pub async fn temperatures_between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<TemperatureAggregate, DatabaseError> {
        self.aggregate(
            "date >= ?1 AND date <= ?2".to_string(),
            vec![start.to_string(), end.to_string()],
        )
        .await
    }

    async fn aggregate(
        &self,
        filter: String,
        params: Vec<String>,
    ) -> Result<TemperatureAggregate, DatabaseError> {
        let sql = format!(
            "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement WHERE {}",
            filter
        );
        let agg = self
            .with_session(move |conn| {
                // Aggregates without GROUP BY always yield exactly one row.
                conn.query_row(&sql, params_from_iter(params.iter()), |row| {
                    Ok(TemperatureAggregate {
                        minimum: row.get(0)?,
                        average: row.get(1)?,
                        maximum: row.get(2)?,
                    })
                })
            })
            .await?;
        debug!(?agg, "temperature aggregate finished");
        Ok(agg)
    }
}
