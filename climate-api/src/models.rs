use serde::Serialize;

/// A single daily weather reading, one row of the `measurement` table.
/// Queries only aggregate over it; whole rows are built by test fixtures.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub station: String,
    /// Fixed-width `YYYY-MM-DD`, compared as text.
    pub date: String,
    /// Inches of precipitation, missing on some days.
    pub prcp: Option<f64>,
    /// Observed temperature in degrees Fahrenheit.
    pub tobs: f64,
}

impl Observation {
    pub const TABLE: &'static str = "measurement";
    pub const COLUMNS: &'static [&'static str] = &["station", "date", "prcp", "tobs"];
}

/// A weather station, one row of the `station` table. Only the identifier is consumed,
/// and whole rows are built by test fixtures.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub station: String,
}

impl Station {
    pub const TABLE: &'static str = "station";
    pub const COLUMNS: &'static [&'static str] = &["station"];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecipitationReading {
    pub date: String,
    pub prcp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationActivity {
    pub station_id: String,
    pub station_observation_count: i64,
}

/// Min/avg/max of `tobs` over some filtered set of observations.
/// Every field is `None` when the filter matched nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemperatureAggregate {
    pub minimum: Option<f64>,
    pub average: Option<f64>,
    pub maximum: Option<f64>,
}

// Summary fields are declared alphabetically: serde writes them in
// declaration order and clients expect sorted keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TobsSummary {
    pub average_temp: Option<f64>,
    pub maximum_temp: Option<f64>,
    pub minimum_temp: Option<f64>,
}

impl From<TemperatureAggregate> for TobsSummary {
    fn from(agg: TemperatureAggregate) -> Self {
        TobsSummary {
            average_temp: agg.average,
            maximum_temp: agg.maximum,
            minimum_temp: agg.minimum,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartSummary {
    #[serde(rename = "_start_date")]
    pub start_date: String,
    pub average_temp: Option<f64>,
    pub maximum_temp: Option<f64>,
    pub minimum_temp: Option<f64>,
}

impl StartSummary {
    pub fn new(start_date: String, agg: TemperatureAggregate) -> Self {
        StartSummary {
            start_date,
            average_temp: agg.average,
            maximum_temp: agg.maximum,
            minimum_temp: agg.minimum,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSummary {
    pub average_temp: Option<f64>,
    pub end_date: String,
    pub maximum_temp: Option<f64>,
    pub minimum_temp: Option<f64>,
    pub start_date: String,
}

impl RangeSummary {
    pub fn new(start_date: String, end_date: String, agg: TemperatureAggregate) -> Self {
        RangeSummary {
            average_temp: agg.average,
            end_date,
            maximum_temp: agg.maximum,
            minimum_temp: agg.minimum,
            start_date,
        }
    }
}
