//! Solver configuration and its JSON/YAML persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::fft::FftWindow;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Settings shared by every solve of an [`ExpressionTree`](crate::ExpressionTree).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Factor applied to the x values of every referenced dataset, e.g. to
    /// convert back to the units of the originating file.
    pub x_axis_factor: f64,
    /// Variable recognised in symbolic mode.
    pub variable: char,
    /// Significant digits of coefficients in symbolic output.
    pub precision: usize,
    /// Window used by the `fft` builtin.
    pub fft_window: FftWindow,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            x_axis_factor: 1.0,
            variable: 's',
            precision: 15,
            fft_window: FftWindow::default(),
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.variable.is_ascii_alphabetic() {
            return Err(ConfigError::Invalid(format!(
                "variable must be an ASCII letter, got {:?}",
                self.variable
            )));
        }
        if self.precision == 0 {
            return Err(ConfigError::Invalid("precision must be at least 1".into()));
        }
        if !self.x_axis_factor.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "x_axis_factor must be finite, got {}",
                self.x_axis_factor
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from `path`; `.yaml`/`.yml` files are read as YAML, anything
    /// else as JSON.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let txt = std::fs::read_to_string(path).map_err(|e| {
            log::warn!("Failed to read solver config {:?}: {}", path, e);
            e
        })?;
        if is_yaml(path) {
            Self::from_yaml(&txt)
        } else {
            Self::from_json(&txt)
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        let txt = if is_yaml(path) { self.to_yaml()? } else { self.to_json()? };
        std::fs::write(path, txt)?;
        Ok(())
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
