//! Feature encoding
//!
//! This module encodes per-target feature records for the downstream store:
//! JSON payloads carrying producer and provenance metadata, and flat CSV rows
//! with the fixed column set `target_id` + the four metrics.

use crate::config::ExtractionConfig;
use crate::error::ComputeError;
use crate::types::{
    FeatureQuality, FeaturePayload, FeatureRecord, Producer, Provenance, TargetFeatures,
    FEATURE_COLUMNS,
};
use crate::{PRODUCER_NAME, VERSION};
use chrono::Utc;
use uuid::Uuid;

/// Current output schema version
pub const OUTPUT_SCHEMA_VERSION: &str = "transit_shape.features.v1";

/// Name of the identifier column in tabular output
pub const TARGET_ID_COLUMN: &str = "target_id";

/// Encoder for producing feature payloads and rows
pub struct FeatureEncoder {
    instance_id: String,
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Encode one target's features into a payload
    pub fn encode(&self, row: &TargetFeatures, config: &ExtractionConfig) -> FeaturePayload {
        let producer = Producer {
            name: PRODUCER_NAME.to_string(),
            version: VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        };

        let provenance = Provenance {
            target_id: row.target_id.clone(),
            computed_at_utc: Utc::now().to_rfc3339(),
            width: config.width,
            nbins: config.nbins,
        };

        FeaturePayload {
            schema_version: OUTPUT_SCHEMA_VERSION.to_string(),
            producer,
            provenance,
            quality: build_quality(&row.features),
            features: row.features,
        }
    }

    /// Encode to a single-line JSON string
    pub fn encode_to_json(
        &self,
        row: &TargetFeatures,
        config: &ExtractionConfig,
    ) -> Result<String, ComputeError> {
        let payload = self.encode(row, config);
        serde_json::to_string(&payload).map_err(ComputeError::JsonError)
    }
}

fn build_quality(features: &FeatureRecord) -> FeatureQuality {
    let undefined = features
        .fields()
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name.to_string())
        .collect();

    FeatureQuality {
        defined_metrics: features.defined_count(),
        undefined,
    }
}

/// CSV column names: the identifier followed by the metrics
pub fn csv_header() -> Vec<&'static str> {
    std::iter::once(TARGET_ID_COLUMN)
        .chain(FEATURE_COLUMNS)
        .collect()
}

/// CSV fields for one target; undefined metrics are empty cells
pub fn csv_record(row: &TargetFeatures) -> Vec<String> {
    std::iter::once(row.target_id.clone())
        .chain(
            row.features
                .fields()
                .into_iter()
                .map(|(_, value)| value.map(|v| v.to_string()).unwrap_or_default()),
        )
        .collect()
}
