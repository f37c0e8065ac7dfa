use std::fs::File;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use super::error::DataUnavailable;
use super::model::{AnomalyFlag, Datasets, FeatureImportance, Observation, ObservationTable, Prediction};
use crate::config::DashboardConfig;

pub const DATE_COLUMN: &str = "Date";
pub const EFFICIENCY_COLUMN: &str = "Efficiency";
pub const ANOMALY_COLUMN: &str = "anomaly";

const PREDICTION_COLUMNS: [&str; 3] = [DATE_COLUMN, "Actual_Efficiency", "Predicted_Efficiency"];
const FEATURE_COLUMNS: [&str; 2] = ["Feature", "Importance"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load all three datasets named by the configuration.
///
/// Any failure is fatal: there is no partially loaded dashboard.
pub fn load_datasets(config: &DashboardConfig) -> Result<Datasets, DataUnavailable> {
    let observations = load_observations(&config.observations_path())?;
    let predictions = load_predictions(&config.predictions_path())?;
    let features = load_features(&config.features_path())?;

    Ok(Datasets {
        observations,
        predictions,
        features,
    })
}

// ---------------------------------------------------------------------------
// Observations (boiler_ml_anomalies.csv)
// ---------------------------------------------------------------------------

/// Header row with at least `Date`, `Efficiency` and `anomaly`.
/// All other sensor columns are carried through verbatim.
pub fn load_observations(path: &Path) -> Result<ObservationTable, DataUnavailable> {
    let mut reader = open(path)?;
    let columns = read_headers(path, &mut reader)?;

    let date_idx = column_index(path, &columns, DATE_COLUMN)?;
    let eff_idx = column_index(path, &columns, EFFICIENCY_COLUMN)?;
    let anomaly_idx = column_index(path, &columns, ANOMALY_COLUMN)?;

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let line = row_no + 2;
        let record = result.map_err(|e| malformed(path, line, e.to_string()))?;
        let fields: Vec<String> = record.iter().map(str::to_string).collect();
        let cell = |idx: usize| fields.get(idx).map(String::as_str).unwrap_or("");

        let date = parse_date(cell(date_idx)).ok_or_else(|| {
            malformed(path, line, format!("'{}' is not a date", cell(date_idx)))
        })?;

        let efficiency = parse_optional_f64(cell(eff_idx)).map_err(|_| {
            malformed(path, line, format!("Efficiency '{}' is not a number", cell(eff_idx)))
        })?;

        let anomaly = cell(anomaly_idx)
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(AnomalyFlag::from_sentinel)
            .ok_or_else(|| {
                malformed(
                    path,
                    line,
                    format!("anomaly '{}' is neither -1 nor 1", cell(anomaly_idx)),
                )
            })?;

        rows.push(Observation {
            row_label: row_no,
            date,
            efficiency,
            anomaly,
            fields,
        });
    }

    log::info!("Loaded {} observations from {}", rows.len(), path.display());
    Ok(ObservationTable { columns, rows })
}

// ---------------------------------------------------------------------------
// Predictions (efficiency_predictions.csv)
// ---------------------------------------------------------------------------

pub fn load_predictions(path: &Path) -> Result<Vec<Prediction>, DataUnavailable> {
    let mut reader = open(path)?;
    let columns = read_headers(path, &mut reader)?;
    for col in PREDICTION_COLUMNS {
        column_index(path, &columns, col)?;
    }

    let predictions = reader
        .deserialize::<Prediction>()
        .enumerate()
        .map(|(row_no, result)| result.map_err(|e| malformed(path, row_no + 2, e.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    log::info!("Loaded {} predictions from {}", predictions.len(), path.display());
    Ok(predictions)
}

// ---------------------------------------------------------------------------
// Feature importance (feature_importance.csv)
// ---------------------------------------------------------------------------

pub fn load_features(path: &Path) -> Result<Vec<FeatureImportance>, DataUnavailable> {
    let mut reader = open(path)?;
    let columns = read_headers(path, &mut reader)?;
    for col in FEATURE_COLUMNS {
        column_index(path, &columns, col)?;
    }

    let mut features = Vec::new();
    for (row_no, result) in reader.deserialize::<FeatureImportance>().enumerate() {
        let line = row_no + 2;
        let feature = result.map_err(|e| malformed(path, line, e.to_string()))?;
        if !feature.importance.is_finite() || feature.importance < 0.0 {
            return Err(malformed(
                path,
                line,
                format!("importance {} of '{}' is not a non-negative number", feature.importance, feature.feature),
            ));
        }
        features.push(feature);
    }

    log::info!("Loaded {} feature importances from {}", features.len(), path.display());
    Ok(features)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a calendar date. Timestamps are accepted and truncated to their date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_date(&s).ok_or_else(|| serde::de::Error::custom(format!("'{s}' is not a date")))
}

pub(crate) fn deserialize_optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_optional_f64(&s).map_err(|_| serde::de::Error::custom(format!("'{s}' is not a number")))
}

/// Empty and NaN cells are missing values.
fn parse_optional_f64(s: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let v = s.parse::<f64>()?;
    Ok((!v.is_nan()).then_some(v))
}

fn open(path: &Path) -> Result<csv::Reader<File>, DataUnavailable> {
    csv::Reader::from_path(path).map_err(|source| DataUnavailable::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn read_headers(path: &Path, reader: &mut csv::Reader<File>) -> Result<Vec<String>, DataUnavailable> {
    let headers = reader
        .headers()
        .map_err(|e| malformed(path, 1, e.to_string()))?;
    Ok(headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect())
}

fn column_index(path: &Path, columns: &[String], name: &str) -> Result<usize, DataUnavailable> {
    columns
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| DataUnavailable::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
}

fn malformed(path: &Path, line: usize, reason: String) -> DataUnavailable {
    DataUnavailable::Malformed {
        path: path.to_path_buf(),
        line,
        reason,
    }
}
