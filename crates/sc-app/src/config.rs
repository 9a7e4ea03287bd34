//! Calculator configuration (YAML).

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "steelcalc.yaml";

/// Model artifact location, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "models/xgb_model.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// XGBoost JSON model predicting yield and tensile strength
    pub model_path: PathBuf,
    pub chart: ChartConfig,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            chart: ChartConfig::default(),
        }
    }
}

/// Fixed strength axis of the chart, in MPa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            y_min: 0.0,
            y_max: 800.0,
        }
    }
}

impl CalculatorConfig {
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::ConfigFileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> AppResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        self.validate()?;
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        let ChartConfig { y_min, y_max } = self.chart;
        if !y_min.is_finite() || !y_max.is_finite() {
            return Err(AppError::Config("chart range must be finite".to_string()));
        }
        if y_min >= y_max {
            return Err(AppError::Config(format!(
                "chart y_min ({y_min}) must be below y_max ({y_max})"
            )));
        }
        if self.model_path.as_os_str().is_empty() {
            return Err(AppError::Config("model_path is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_is_default() {
        let cfg = CalculatorConfig::from_yaml_str("{}").unwrap();
        assert_eq!(cfg, CalculatorConfig::default());
        assert_eq!(cfg.chart.y_max, 800.0);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let cfg = CalculatorConfig::from_yaml_str("chart:\n  y_max: 1000\n").unwrap();
        assert_eq!(cfg.chart.y_min, 0.0);
        assert_eq!(cfg.chart.y_max, 1000.0);
        assert_eq!(cfg.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = CalculatorConfig::from_yaml_str("chart:\n  y_min: 900\n  y_max: 800\n")
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn unknown_types_are_yaml_errors() {
        let err = CalculatorConfig::from_yaml_str("chart: wide").unwrap_err();
        assert!(matches!(err, AppError::Yaml(_)));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let path = std::env::temp_dir().join("sc_app_config_does_not_exist.yaml");
        let _ = std::fs::remove_file(&path);
        assert_eq!(
            CalculatorConfig::load_or_default(&path).unwrap(),
            CalculatorConfig::default()
        );
        assert!(matches!(
            CalculatorConfig::load(&path).unwrap_err(),
            AppError::ConfigFileRead { .. }
        ));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let path = std::env::temp_dir().join("sc_app_config_roundtrip.yaml");
        let cfg = CalculatorConfig {
            model_path: PathBuf::from("elsewhere/model.json"),
            chart: ChartConfig {
                y_min: 100.0,
                y_max: 700.0,
            },
        };
        cfg.save(&path).unwrap();
        assert_eq!(CalculatorConfig::load(&path).unwrap(), cfg);
    }
}
