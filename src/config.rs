//! Extraction configuration
//!
//! Settings shared by the pipeline, the catalog runner and the CLI. Values can
//! be loaded from a JSON file and individually overridden.

use crate::error::ComputeError;
use crate::features::DEFAULT_NBINS;
use crate::types::PhaseUnits;
use serde::{Deserialize, Serialize};

/// Default in-transit half-width used by the pipeline
pub const DEFAULT_PIPELINE_WIDTH: f64 = 0.1;

/// Configuration for one extraction run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Half-width of the in-transit window, in phase units
    pub width: f64,
    /// Number of |phase| bins for the asymmetry index
    pub nbins: usize,
    /// Phase units used when folding raw curves
    pub phase_units: PhaseUnits,
    /// Worker threads for batch extraction
    pub workers: usize,
    /// Drop non-finite samples instead of rejecting the curve
    pub drop_non_finite: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_PIPELINE_WIDTH,
            nbins: DEFAULT_NBINS,
            phase_units: PhaseUnits::Fraction,
            workers: 1,
            drop_non_finite: false,
        }
    }
}

impl ExtractionConfig {
    /// Default configuration with a specific window half-width
    pub fn with_width(width: f64) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<(), ComputeError> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ComputeError::InvalidWidth(self.width));
        }
        if self.nbins == 0 {
            return Err(ComputeError::InvalidConfig(
                "nbins must be at least 1".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(ComputeError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ComputeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractionConfig::default();
        assert_eq!(config.width, 0.1);
        assert_eq!(config.nbins, 100);
        assert_eq!(config.phase_units, PhaseUnits::Fraction);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = ExtractionConfig::from_json(r#"{"width": 0.05, "phase_units": "time"}"#).unwrap();
        assert_eq!(config.width, 0.05);
        assert_eq!(config.nbins, 100);
        assert_eq!(config.phase_units, PhaseUnits::Time);
    }

    #[test]
    fn test_rejects_bad_width() {
        assert!(matches!(
            ExtractionConfig::with_width(0.0).validate(),
            Err(ComputeError::InvalidWidth(_))
        ));
        assert!(ExtractionConfig::with_width(f64::NAN).validate().is_err());
        assert!(ExtractionConfig::from_json(r#"{"width": -1.0}"#).is_err());
    }

    #[test]
    fn test_rejects_zero_workers() {
        let config = ExtractionConfig {
            workers: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ComputeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ExtractionConfig {
            width: 0.07,
            workers: 4,
            ..Default::default()
        };
        let loaded = ExtractionConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(loaded, config);
    }
}
