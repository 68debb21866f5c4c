//! Engine configuration, loaded from TOML. Every key is optional.
//!
//! ```toml
//! max_length = 10000
//! window_length = 100
//! n_points = 500
//! placement_radius = 1.2
//! history_depth = 256
//! unit_circle_points = 500
//! ```

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config: {0}")]
    Io(#[from] io::Error),
    #[error("unable to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables of an editing session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Capacity of the live signal buffer.
    pub max_length: usize,
    /// Number of samples framed by the signal plots.
    pub window_length: usize,
    /// Number of frequency response samples.
    pub n_points: usize,
    /// Largest modulus at which zeros and poles may be placed or picked.
    pub placement_radius: f64,
    /// Maximum number of undo steps kept; unbounded when absent.
    pub history_depth: Option<usize>,
    /// Number of points used to draw the unit circle.
    pub unit_circle_points: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_length: 10_000,
            window_length: 100,
            n_points: 500,
            placement_radius: 1.2,
            history_depth: None,
            unit_circle_points: 500,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(s)?;
        if let Err(e) = config.validate() {
            warn!("rejecting config: {}", e);
            return Err(e);
        }
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        EngineConfig::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_length == 0 {
            return Err(ConfigError::Invalid("max_length must be positive".into()));
        }
        if self.window_length == 0 {
            return Err(ConfigError::Invalid("window_length must be positive".into()));
        }
        if self.n_points == 0 {
            return Err(ConfigError::Invalid("n_points must be positive".into()));
        }
        if self.history_depth == Some(0) {
            return Err(ConfigError::Invalid(
                "history_depth must be positive, leave it out for unbounded history".into(),
            ));
        }
        if !self.placement_radius.is_finite() || self.placement_radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "placement_radius must be a positive number, got {}",
                self.placement_radius
            )));
        }
        Ok(())
    }
}
