use chrono::NaiveDate;

use super::model::{Datasets, ObservationTable, Prediction};
use super::summary::SummaryMetrics;

// ---------------------------------------------------------------------------
// Filter predicate: inclusive date interval plus the anomaly switch
// ---------------------------------------------------------------------------

/// The user's filter controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterState {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Restrict observations to anomalous rows. Predictions ignore it.
    pub anomalies_only: bool,
}

impl FilterState {
    /// Default filter: the whole span of the loaded data, all rows.
    ///
    /// With no dated rows at all both bounds fall back to today.
    pub fn for_span(datasets: &Datasets) -> Self {
        let (start, end) = datasets.default_span().unwrap_or_else(|| {
            let today = chrono::Local::now().date_naive();
            (today, today)
        });
        FilterState {
            start,
            end,
            anomalies_only: false,
        }
    }

    /// Both bounds inclusive. An inverted interval contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Indices of observations passing the filter, in source order.
pub fn filter_observations(table: &ObservationTable, filter: &FilterState) -> Vec<usize> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| filter.contains(row.date))
        .filter(|(_, row)| !filter.anomalies_only || row.anomaly.is_anomaly())
        .map(|(i, _)| i)
        .collect()
}

/// Indices of predictions inside the date interval, in source order.
pub fn filter_predictions(predictions: &[Prediction], filter: &FilterState) -> Vec<usize> {
    predictions
        .iter()
        .enumerate()
        .filter(|(_, p)| filter.contains(p.date))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// DashboardView – everything derived from (Datasets, FilterState)
// ---------------------------------------------------------------------------

/// Derived views for one render cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub observation_indices: Vec<usize>,
    pub prediction_indices: Vec<usize>,
    pub summary: SummaryMetrics,
}

impl DashboardView {
    /// Filter both dated datasets and aggregate the observations.
    pub fn compute(datasets: &Datasets, filter: &FilterState) -> Self {
        let observation_indices = filter_observations(&datasets.observations, filter);
        let prediction_indices = filter_predictions(&datasets.predictions, filter);
        let summary = SummaryMetrics::from_rows(
            observation_indices
                .iter()
                .map(|&i| &datasets.observations.rows[i]),
        );

        log::debug!(
            "Filter {filter:?}: {} observations, {} predictions",
            observation_indices.len(),
            prediction_indices.len()
        );

        DashboardView {
            observation_indices,
            prediction_indices,
            summary,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::model::{AnomalyFlag, Observation};

    pub(crate) fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    pub(crate) fn observation(row: usize, date: NaiveDate, eff: Option<f64>, flag: AnomalyFlag) -> Observation {
        Observation {
            row_label: row,
            date,
            efficiency: eff,
            anomaly: flag,
            fields: vec![
                date.format("%Y-%m-%d").to_string(),
                eff.map(|v| v.to_string()).unwrap_or_default(),
                if flag.is_anomaly() { "-1".to_string() } else { "1".to_string() },
            ],
        }
    }

    /// Two-row fixture: 01-01 (80, normal) and 01-02 (60, anomaly), plus
    /// predictions for 01-02 and 01-05.
    pub(crate) fn sample() -> Datasets {
        Datasets {
            observations: ObservationTable {
                columns: vec!["Date".into(), "Efficiency".into(), "anomaly".into()],
                rows: vec![
                    observation(0, day(1), Some(80.0), AnomalyFlag::Normal),
                    observation(1, day(2), Some(60.0), AnomalyFlag::Anomaly),
                ],
            },
            predictions: vec![
                Prediction { date: day(2), actual: Some(60.0), predicted: Some(65.0) },
                Prediction { date: day(5), actual: Some(70.0), predicted: Some(68.0) },
            ],
            features: Vec::new(),
        }
    }

    fn filter(start: NaiveDate, end: NaiveDate, anomalies_only: bool) -> FilterState {
        FilterState { start, end, anomalies_only }
    }

    #[test]
    fn full_range_matches_worked_example() {
        let ds = sample();
        let view = DashboardView::compute(&ds, &filter(day(1), day(2), false));
        assert_eq!(view.observation_indices, [0, 1]);
        assert_eq!(view.summary.average_efficiency, Some(70.0));
        assert_eq!(view.summary.anomaly_count, 1);
        assert_eq!(view.summary.row_count, 2);
    }

    #[test]
    fn anomalies_only_keeps_flagged_rows() {
        let ds = sample();
        let view = DashboardView::compute(&ds, &filter(day(1), day(2), true));
        assert_eq!(view.observation_indices, [1]);
        assert_eq!(view.summary.average_efficiency, Some(60.0));
        assert_eq!(view.summary.anomaly_count, 1);
        assert_eq!(view.summary.row_count, 1);
        assert!(view
            .observation_indices
            .iter()
            .all(|&i| ds.observations.rows[i].anomaly.is_anomaly()));
    }

    #[test]
    fn anomaly_switch_does_not_touch_predictions() {
        let ds = sample();
        let all = DashboardView::compute(&ds, &filter(day(1), day(5), false));
        let anomalies = DashboardView::compute(&ds, &filter(day(1), day(5), true));
        assert_eq!(all.prediction_indices, [0, 1]);
        assert_eq!(anomalies.prediction_indices, all.prediction_indices);
    }

    #[test]
    fn bounds_are_inclusive() {
        let ds = sample();
        let view = DashboardView::compute(&ds, &filter(day(2), day(2), false));
        assert_eq!(view.observation_indices, [1]);
        assert_eq!(view.prediction_indices, [0]);
    }

    #[test]
    fn inverted_range_is_empty() {
        let ds = sample();
        let view = DashboardView::compute(&ds, &filter(day(5), day(1), false));
        assert!(view.observation_indices.is_empty());
        assert!(view.prediction_indices.is_empty());
        assert_eq!(view.summary.row_count, 0);
    }

    #[test]
    fn range_before_data_yields_placeholder() {
        let ds = sample();
        let before = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let view = DashboardView::compute(&ds, &filter(before, before + chrono::Days::new(30), false));
        assert_eq!(view.summary.row_count, 0);
        assert_eq!(view.summary.average_efficiency, None);
        assert_eq!(view.summary.average_label(), "N/A");
    }

    #[test]
    fn filtered_sets_are_subsets_for_every_interval() {
        let ds = sample();
        for s in 1..=6 {
            for e in 1..=6 {
                for anomalies_only in [false, true] {
                    let f = filter(day(s), day(e), anomalies_only);
                    let view = DashboardView::compute(&ds, &f);
                    for &i in &view.observation_indices {
                        assert!(f.contains(ds.observations.rows[i].date));
                    }
                    for &i in &view.prediction_indices {
                        assert!(f.contains(ds.predictions[i].date));
                    }
                    assert_eq!(view.summary.row_count, view.observation_indices.len());
                    assert!(view.summary.anomaly_count <= view.summary.row_count);
                }
            }
        }
    }

    #[test]
    fn default_filter_spans_observations() {
        let f = FilterState::for_span(&sample());
        assert_eq!((f.start, f.end), (day(1), day(2)));
        assert!(!f.anomalies_only);
    }
}
