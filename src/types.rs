//! Core types for the transit-shape pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: raw light curves, folded light curves, baseline/depth estimates and
//! the per-target feature record.

use crate::error::ComputeError;
use serde::{Deserialize, Serialize};

/// Unit of the phase axis produced by folding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseUnits {
    /// Fraction of the period, domain [-0.5, 0.5)
    #[default]
    Fraction,
    /// Same unit as the time axis, domain [-period/2, period/2)
    Time,
}

impl PhaseUnits {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseUnits::Fraction => "fraction",
            PhaseUnits::Time => "time",
        }
    }
}

/// Unfolded brightness time series for one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLightCurve {
    /// Observation times
    pub time: Vec<f64>,
    /// Normalized flux at each observation
    pub flux: Vec<f64>,
}

impl RawLightCurve {
    /// Build a raw light curve, requiring index-aligned arrays
    pub fn new(time: Vec<f64>, flux: Vec<f64>) -> Result<Self, ComputeError> {
        if time.len() != flux.len() {
            return Err(ComputeError::ShapeMismatch {
                phase: time.len(),
                flux: flux.len(),
            });
        }
        Ok(Self { time, flux })
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Light curve folded at a transit epoch.
///
/// Phase and flux are index-aligned, equal length, non-empty and finite. No
/// ordering of the samples is required.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoldedLightCurve {
    phase: Vec<f64>,
    flux: Vec<f64>,
}

impl FoldedLightCurve {
    /// Build a folded light curve, validating the structural preconditions
    pub fn new(phase: Vec<f64>, flux: Vec<f64>) -> Result<Self, ComputeError> {
        if phase.len() != flux.len() {
            return Err(ComputeError::ShapeMismatch {
                phase: phase.len(),
                flux: flux.len(),
            });
        }
        if phase.is_empty() {
            return Err(ComputeError::EmptyLightCurve);
        }
        if let Some(index) = phase.iter().position(|p| !p.is_finite()) {
            return Err(ComputeError::NonNumeric {
                field: "phase",
                index,
            });
        }
        if let Some(index) = flux.iter().position(|f| !f.is_finite()) {
            return Err(ComputeError::NonNumeric {
                field: "flux",
                index,
            });
        }
        Ok(Self { phase, flux })
    }

    /// Build a folded light curve after discarding samples where either value is not finite
    pub fn dropping_non_finite(phase: Vec<f64>, flux: Vec<f64>) -> Result<Self, ComputeError> {
        if phase.len() != flux.len() {
            return Err(ComputeError::ShapeMismatch {
                phase: phase.len(),
                flux: flux.len(),
            });
        }
        let (phase, flux) = phase
            .into_iter()
            .zip(flux)
            .filter(|(p, f)| p.is_finite() && f.is_finite())
            .unzip();
        Self::new(phase, flux)
    }

    pub fn phase(&self) -> &[f64] {
        &self.phase
    }

    pub fn flux(&self) -> &[f64] {
        &self.flux
    }

    pub fn len(&self) -> usize {
        self.phase.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phase.is_empty()
    }

    /// Consume the curve and return its (phase, flux) arrays
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.phase, self.flux)
    }
}

/// Out-of-transit baseline and transit depth of a folded curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineDepth {
    /// Median out-of-transit flux, or the global median when too few out-of-transit samples exist
    pub baseline: f64,
    /// Transit depth, always strictly positive
    pub depth: f64,
}

/// Transit-shape descriptors for one folded light curve.
///
/// `None` means the metric is undefined for this curve (insufficient or
/// degenerate data), which is distinct from any computed value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Median pre/post mid-transit flux difference normalized by depth
    pub asymmetry_index: Option<f64>,
    /// Pearson kurtosis of the normalized in-transit profile
    pub v_u_kurtosis: Option<f64>,
    /// Linear slope of flux over the ingress half-window
    pub ingress_slope: Option<f64>,
    /// Linear slope of flux over the egress half-window
    pub egress_slope: Option<f64>,
}

/// Metric names in their persisted column order
pub const FEATURE_COLUMNS: [&str; 4] = [
    "asymmetry_index",
    "v_u_kurtosis",
    "ingress_slope",
    "egress_slope",
];

impl FeatureRecord {
    /// Metric values paired with their column names
    pub fn fields(&self) -> [(&'static str, Option<f64>); 4] {
        [
            (FEATURE_COLUMNS[0], self.asymmetry_index),
            (FEATURE_COLUMNS[1], self.v_u_kurtosis),
            (FEATURE_COLUMNS[2], self.ingress_slope),
            (FEATURE_COLUMNS[3], self.egress_slope),
        ]
    }

    /// Number of metrics that are defined
    pub fn defined_count(&self) -> usize {
        self.fields().iter().filter(|(_, v)| v.is_some()).count()
    }

    /// Whether every metric is undefined
    pub fn is_empty(&self) -> bool {
        self.defined_count() == 0
    }
}

/// Feature record tagged with the target it was extracted from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetFeatures {
    /// Catalog identifier of the star (e.g. a Kepler input catalog number)
    pub target_id: String,
    /// Extracted features
    #[serde(flatten)]
    pub features: FeatureRecord,
}

/// Producer metadata embedded in encoded payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Extraction provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub target_id: String,
    pub computed_at_utc: String,
    /// In-transit half-width used for the metrics
    pub width: f64,
    /// Asymmetry bin count
    pub nbins: usize,
}

/// Completeness of a feature record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureQuality {
    /// Number of defined metrics (0-4)
    pub defined_metrics: usize,
    /// Names of the metrics that are undefined
    pub undefined: Vec<String>,
}

/// Complete encoded feature payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePayload {
    pub schema_version: String,
    pub producer: Producer,
    pub provenance: Provenance,
    pub quality: FeatureQuality,
    pub features: FeatureRecord,
}
