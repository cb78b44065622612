use crate::config::Config;
use crate::db::{Baseline, ClimateStore};
use crate::error::ApiError;
use tracing::{debug, info, warn};

pub struct AppState {
    pub store: ClimateStore,
    pub baseline: Baseline,
    // Expose error details in 500 bodies
    pub debug: bool,
}

impl AppState {
    pub fn new(store: ClimateStore, baseline: Baseline, debug: bool) -> Self {
        AppState {
            store,
            baseline,
            debug,
        }
    }

    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let store = ClimateStore::open(&cfg.database).map_err(|e| {
            anyhow::anyhow!("Cannot open database '{}': {}", cfg.database.path, e)
        })?;

        let baseline = Baseline::from_config(&cfg.baseline);
        match &baseline {
            Baseline::Fixed {
                cutoff_date,
                active_station,
            } => info!(
                "Using fixed baseline: cutoff_date='{}' active_station='{}'",
                cutoff_date, active_station
            ),
            Baseline::Latest => info!("Deriving baseline from the newest observations"),
        }

        if cfg.debug {
            warn!("Debug mode enabled: error details will be returned to clients");
        } else {
            debug!("Debug mode disabled");
        }

        Ok(AppState::new(store, baseline, cfg.debug))
    }

    /// Turn a failure into the response sent to the client.
    pub fn fail(&self, err: impl std::fmt::Display) -> ApiError {
        ApiError::internal(err, self.debug)
    }
}
