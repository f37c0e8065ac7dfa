use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// AnomalyFlag – the two sentinel values of the `anomaly` column
// ---------------------------------------------------------------------------

/// Upstream detector verdict for one observation (`-1` = anomaly, `1` = normal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyFlag {
    Anomaly,
    Normal,
}

impl AnomalyFlag {
    /// Map a sentinel value to a flag. Anything other than -1 / 1 is rejected.
    pub fn from_sentinel(value: f64) -> Option<Self> {
        if value == -1.0 {
            Some(AnomalyFlag::Anomaly)
        } else if value == 1.0 {
            Some(AnomalyFlag::Normal)
        } else {
            None
        }
    }

    /// Human-readable label shown in the "Anomaly Status" column.
    pub fn label(self) -> &'static str {
        match self {
            AnomalyFlag::Anomaly => "Anomaly",
            AnomalyFlag::Normal => "Normal",
        }
    }

    pub fn is_anomaly(self) -> bool {
        self == AnomalyFlag::Anomaly
    }
}

impl fmt::Display for AnomalyFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of boiler_ml_anomalies.csv
// ---------------------------------------------------------------------------

/// A single daily observation.
#[derive(Debug, Clone)]
pub struct Observation {
    /// 0-based position in the source file, used as the row label.
    pub row_label: usize,
    pub date: NaiveDate,
    /// `None` when the source cell is empty.
    pub efficiency: Option<f64>,
    pub anomaly: AnomalyFlag,
    /// Every cell as written in the source, in header order.
    pub fields: Vec<String>,
}

/// The observation dataset with its source header preserved.
#[derive(Debug, Clone, Default)]
pub struct ObservationTable {
    /// Column names in source order.
    pub columns: Vec<String>,
    pub rows: Vec<Observation>,
}

impl ObservationTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest and latest observation date.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        date_span(self.rows.iter().map(|r| r.date))
    }
}

// ---------------------------------------------------------------------------
// Prediction / FeatureImportance
// ---------------------------------------------------------------------------

/// Actual vs. model-predicted efficiency for one date.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    #[serde(rename = "Date", deserialize_with = "super::loader::deserialize_date")]
    pub date: NaiveDate,
    /// `None` for an empty or NaN cell; the chart leaves a gap there.
    #[serde(rename = "Actual_Efficiency", deserialize_with = "super::loader::deserialize_optional_f64")]
    pub actual: Option<f64>,
    #[serde(rename = "Predicted_Efficiency", deserialize_with = "super::loader::deserialize_optional_f64")]
    pub predicted: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureImportance {
    #[serde(rename = "Feature")]
    pub feature: String,
    #[serde(rename = "Importance")]
    pub importance: f64,
}

// ---------------------------------------------------------------------------
// Datasets – the immutable context shared by filter, export and UI
// ---------------------------------------------------------------------------

/// Everything loaded at startup. Never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub observations: ObservationTable,
    pub predictions: Vec<Prediction>,
    pub features: Vec<FeatureImportance>,
}

impl Datasets {
    /// Span used for the default date filter: observations first, then
    /// predictions.
    pub fn default_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.observations
            .date_span()
            .or_else(|| date_span(self.predictions.iter().map(|p| p.date)))
    }

    /// Feature importances sorted ascending by importance.
    pub fn features_ascending(&self) -> Vec<FeatureImportance> {
        let mut sorted = self.features.clone();
        sorted.sort_by(|a, b| a.importance.total_cmp(&b.importance));
        sorted
    }
}

fn date_span(dates: impl Iterator<Item = NaiveDate>) -> Option<(NaiveDate, NaiveDate)> {
    dates.fold(None, |acc, d| match acc {
        None => Some((d, d)),
        Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn sentinels_map_to_labels() {
        assert_eq!(AnomalyFlag::from_sentinel(-1.0), Some(AnomalyFlag::Anomaly));
        assert_eq!(AnomalyFlag::from_sentinel(1.0), Some(AnomalyFlag::Normal));
        assert_eq!(AnomalyFlag::from_sentinel(0.0), None);
        assert_eq!(AnomalyFlag::Anomaly.label(), "Anomaly");
        assert_eq!(AnomalyFlag::Normal.to_string(), "Normal");
    }

    #[test]
    fn default_span_falls_back_to_predictions() {
        let mut ds = Datasets::default();
        assert_eq!(ds.default_span(), None);

        ds.predictions = vec![
            Prediction { date: day(9), actual: Some(1.0), predicted: Some(1.0) },
            Prediction { date: day(3), actual: Some(1.0), predicted: None },
        ];
        assert_eq!(ds.default_span(), Some((day(3), day(9))));
    }

    #[test]
    fn features_are_sorted_ascending() {
        let ds = Datasets {
            features: vec![
                FeatureImportance { feature: "a".into(), importance: 0.5 },
                FeatureImportance { feature: "b".into(), importance: 0.1 },
                FeatureImportance { feature: "c".into(), importance: 0.3 },
            ],
            ..Default::default()
        };
        let sorted = ds.features_ascending();
        let names: Vec<_> = sorted.iter().map(|f| f.feature.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
        assert!(sorted.windows(2).all(|w| w[0].importance <= w[1].importance));
    }
}
