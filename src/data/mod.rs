/// Data layer: core types, loading, filtering, aggregation and export.
///
/// Architecture:
/// ```text
///  boiler_ml_anomalies.csv / efficiency_predictions.csv / feature_importance.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse files → Datasets (immutable)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  date interval + anomaly switch → row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary   │  mean efficiency, anomaly count, row count
///   └──────────┘
///        │
///        ▼
///   sort (table display order) / export (filtered CSV)
/// ```

pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sort;
pub mod summary;
