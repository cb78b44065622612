use serde::Deserialize;
use std::fs;

/// Cutoff used by the precipitation and tobs routes in fixed mode.
pub const DEFAULT_CUTOFF_DATE: &str = "2016-08-23";
/// Station used by the tobs route in fixed mode.
pub const DEFAULT_ACTIVE_STATION: &str = "USC00519281";

pub const DEFAULT_LISTEN: &str = "127.0.0.1:5000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 4;

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
    // Upper bound on pooled read-only sessions. Defaults to 4.
    pub max_connections: Option<u32>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BaselineMode {
    /// Use the configured cutoff date and station as-is.
    #[default]
    Fixed,
    /// Derive both from the data on every request.
    Latest,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BaselineConfig {
    pub mode: Option<BaselineMode>,
    pub cutoff_date: Option<String>,
    pub active_station: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub listen: Option<String>,
    // Include error details in 500 bodies. Meant for local development only.
    #[serde(default)]
    pub debug: bool,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub baseline: BaselineConfig,
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let cfg_str = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read config '{}': {}", path, e))?;
        Ok(toml::from_str(&cfg_str)?)
    }
}
