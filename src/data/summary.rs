use super::model::Observation;

/// Placeholder shown when there is nothing to average.
pub const EMPTY_AVERAGE: &str = "N/A";

/// Scalar tiles at the top of the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryMetrics {
    /// Mean of the present efficiency values; `None` when there are none.
    pub average_efficiency: Option<f64>,
    pub anomaly_count: usize,
    pub row_count: usize,
}

impl SummaryMetrics {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a Observation>) -> Self {
        let mut sum = 0.0;
        let mut valued = 0usize;
        let mut anomaly_count = 0;
        let mut row_count = 0;

        for row in rows {
            row_count += 1;
            if row.anomaly.is_anomaly() {
                anomaly_count += 1;
            }
            if let Some(eff) = row.efficiency {
                sum += eff;
                valued += 1;
            }
        }

        SummaryMetrics {
            average_efficiency: (valued > 0).then(|| sum / valued as f64),
            anomaly_count,
            row_count,
        }
    }

    pub fn average_label(&self) -> String {
        match self.average_efficiency {
            Some(avg) => format!("{avg:.2} %"),
            None => EMPTY_AVERAGE.to_string(),
        }
    }
}
