use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Env var naming an explicit JSON config file.
pub const CONFIG_ENV: &str = "BOILER_DASHBOARD_CONFIG";
/// Env var overriding `data_dir`.
pub const DATA_DIR_ENV: &str = "BOILER_DATA_DIR";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "boiler_dashboard.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the input files live and what the export is called.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory the three input file names are resolved against.
    pub data_dir: PathBuf,
    pub observations_file: String,
    pub predictions_file: String,
    pub features_file: String,
    /// Suggested file name in the download dialog.
    pub export_file_name: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            observations_file: "boiler_ml_anomalies.csv".to_string(),
            predictions_file: "efficiency_predictions.csv".to_string(),
            features_file: "feature_importance.csv".to_string(),
            export_file_name: "filtered_boiler_data.csv".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Defaults, then the JSON config file, then `BOILER_DATA_DIR`.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let file = explicit.or_else(|| {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.exists().then_some(local)
        });
        let data_dir = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        Self::from_sources(file.as_deref(), data_dir)
    }

    pub fn from_sources(file: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }
        log::debug!("Dashboard config: {config:?}");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn observations_path(&self) -> PathBuf {
        self.data_dir.join(&self.observations_file)
    }

    pub fn predictions_path(&self) -> PathBuf {
        self.data_dir.join(&self.predictions_file)
    }

    pub fn features_path(&self) -> PathBuf {
        self.data_dir.join(&self.features_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_fixed_file_names() {
        let config = DashboardConfig::from_sources(None, None).unwrap();
        assert_eq!(config.observations_path(), Path::new("./boiler_ml_anomalies.csv"));
        assert_eq!(config.predictions_path(), Path::new("./efficiency_predictions.csv"));
        assert_eq!(config.features_path(), Path::new("./feature_importance.csv"));
        assert_eq!(config.export_file_name, "filtered_boiler_data.csv");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dash.json");
        std::fs::write(&path, r#"{ "data_dir": "/srv/boiler", "features_file": "fi.csv" }"#).unwrap();

        let config = DashboardConfig::from_sources(Some(&path), None).unwrap();
        assert_eq!(config.features_path(), Path::new("/srv/boiler/fi.csv"));
        assert_eq!(config.observations_file, "boiler_ml_anomalies.csv");
    }

    #[test]
    fn data_dir_override_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dash.json");
        std::fs::write(&path, r#"{ "data_dir": "/srv/boiler" }"#).unwrap();

        let config = DashboardConfig::from_sources(Some(&path), Some(PathBuf::from("/tmp/x"))).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/x"));
    }

    #[test]
    fn unreadable_or_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            DashboardConfig::from_sources(Some(&missing), None),
            Err(ConfigError::Read { .. })
        ));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(
            DashboardConfig::from_sources(Some(&bad), None),
            Err(ConfigError::Parse { .. })
        ));
    }
}
