//! lc.folded_curve.v1 record definition

use crate::adapters::{NumericSequenceLike, NumericSeries};
use serde::{Deserialize, Deserializer, Serialize};

/// Current schema version
pub const SCHEMA_VERSION: &str = "lc.folded_curve.v1";

/// Light curve carried by a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurvePayload {
    /// Curve already folded at the transit epoch
    Folded {
        phase: NumericSeries,
        flux: NumericSeries,
    },
    /// Unfolded curve plus the ephemeris found by the period search
    Raw {
        time: NumericSeries,
        flux: NumericSeries,
        period: f64,
        epoch: f64,
    },
    /// Upstream could not provide a curve for this target
    Unavailable {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl CurvePayload {
    pub fn kind(&self) -> &'static str {
        match self {
            CurvePayload::Folded { .. } => "folded",
            CurvePayload::Raw { .. } => "raw",
            CurvePayload::Unavailable { .. } => "unavailable",
        }
    }
}

/// One target's light curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightCurveRecord {
    /// Schema version identifier
    pub schema_version: String,
    /// Catalog identifier; integer identifiers are accepted and kept as text
    #[serde(deserialize_with = "target_id_text")]
    pub target_id: String,
    /// Originating mission or archive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    /// Curve data
    pub curve: CurvePayload,
}

impl LightCurveRecord {
    /// Create a record holding a folded curve
    pub fn folded(
        target_id: impl Into<String>,
        phase: impl Into<NumericSeries>,
        flux: impl Into<NumericSeries>,
    ) -> Self {
        Self::with_curve(
            target_id,
            CurvePayload::Folded {
                phase: phase.into(),
                flux: flux.into(),
            },
        )
    }

    /// Create a record holding a raw curve and its ephemeris
    pub fn raw(
        target_id: impl Into<String>,
        time: impl Into<NumericSeries>,
        flux: impl Into<NumericSeries>,
        period: f64,
        epoch: f64,
    ) -> Self {
        Self::with_curve(
            target_id,
            CurvePayload::Raw {
                time: time.into(),
                flux: flux.into(),
                period,
                epoch,
            },
        )
    }

    /// Create a record for a target with no curve
    pub fn unavailable(target_id: impl Into<String>, reason: Option<String>) -> Self {
        Self::with_curve(target_id, CurvePayload::Unavailable { reason })
    }

    fn with_curve(target_id: impl Into<String>, curve: CurvePayload) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            target_id: target_id.into(),
            mission: None,
            curve,
        }
    }

    /// Tag the record with its mission
    pub fn with_mission(mut self, mission: impl Into<String>) -> Self {
        self.mission = Some(mission.into());
        self
    }

    /// Check the structural rules of the schema
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ValidationError::InvalidSchemaVersion {
                expected: SCHEMA_VERSION.to_string(),
                actual: self.schema_version.clone(),
            });
        }
        if self.target_id.trim().is_empty() {
            return Err(ValidationError::MissingTargetId);
        }

        match &self.curve {
            CurvePayload::Folded { phase, flux } => {
                check_aligned("phase", phase, flux)?;
                check_non_empty(phase)
            }
            CurvePayload::Raw {
                time,
                flux,
                period,
                ..
            } => {
                check_aligned("time", time, flux)?;
                check_non_empty(time)?;
                if !period.is_finite() || *period <= 0.0 {
                    return Err(ValidationError::InvalidPeriod(*period));
                }
                Ok(())
            }
            CurvePayload::Unavailable { .. } => Ok(()),
        }
    }
}

fn check_aligned(
    axis: &'static str,
    axis_values: &NumericSeries,
    flux: &NumericSeries,
) -> Result<(), ValidationError> {
    if axis_values.len() != flux.len() {
        return Err(ValidationError::LengthMismatch {
            axis,
            axis_len: axis_values.len(),
            flux_len: flux.len(),
        });
    }
    Ok(())
}

fn check_non_empty(values: &NumericSeries) -> Result<(), ValidationError> {
    if values.unwrap_values().is_empty() {
        return Err(ValidationError::EmptyCurve);
    }
    Ok(())
}

fn target_id_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TargetId {
        Text(String),
        Number(u64),
    }

    Ok(match TargetId::deserialize(deserializer)? {
        TargetId::Text(text) => text,
        TargetId::Number(number) => number.to_string(),
    })
}

/// Validation errors for light curve records
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid schema version: expected {expected}, got {actual}")]
    InvalidSchemaVersion { expected: String, actual: String },

    #[error("Missing target identifier")]
    MissingTargetId,

    #[error("Length mismatch: {axis} has {axis_len} samples but flux has {flux_len}")]
    LengthMismatch {
        axis: &'static str,
        axis_len: usize,
        flux_len: usize,
    },

    #[error("Curve has no samples")]
    EmptyCurve,

    #[error("Period must be finite and positive, got {0}")]
    InvalidPeriod(f64),
}
