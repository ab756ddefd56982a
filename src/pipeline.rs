//! Pipeline orchestration
//!
//! This module provides the public extraction API. It runs the window
//! selector, baseline/depth estimator and shape metrics over one folded light
//! curve and assembles the feature record.

use crate::adapters::NumericSequenceLike;
use crate::config::ExtractionConfig;
use crate::error::ComputeError;
use crate::features::ShapeMetrics;
use crate::types::{FeatureRecord, FoldedLightCurve};
use std::thread;
use tracing::debug;

/// Extract transit-shape features from a folded light curve.
///
/// # Arguments
/// * `curve` - Folded light curve (phase centered on the transit epoch)
/// * `width` - Half-width of the in-transit window, in phase units
///
/// # Returns
/// A feature record; metrics lacking data are `None`, never an error
///
/// # Example
/// ```ignore
/// let curve = FoldedLightCurve::new(phase, flux)?;
/// let record = extract(&curve, 0.1)?;
/// ```
pub fn extract(curve: &FoldedLightCurve, width: f64) -> Result<FeatureRecord, ComputeError> {
    FeaturePipeline::new(ExtractionConfig::with_width(width))?.extract(curve)
}

/// Extract features from any pair of index-aligned sequences (bare or unit-wrapped).
///
/// Fails with [`ComputeError::ShapeMismatch`] before any metric is computed
/// when the lengths differ.
pub fn extract_from<P, F>(phase: &P, flux: &F, width: f64) -> Result<FeatureRecord, ComputeError>
where
    P: NumericSequenceLike + ?Sized,
    F: NumericSequenceLike + ?Sized,
{
    let curve = crate::adapters::folded_from(phase, flux)?;
    extract(&curve, width)
}

/// Stateless feature extractor bound to a validated configuration
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    config: ExtractionConfig,
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }
}

impl FeaturePipeline {
    /// Create a pipeline, validating the configuration
    pub fn new(config: ExtractionConfig) -> Result<Self, ComputeError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Run all shape metrics over one curve.
    ///
    /// Pipeline stages:
    /// 1. ShapeMetrics::asymmetry_index - binned pre/post mid-transit contrast
    /// 2. ShapeMetrics::v_u_kurtosis - peakedness of the in-transit profile
    /// 3. ShapeMetrics::ingress_egress_slopes - linear fits on each half
    pub fn extract(&self, curve: &FoldedLightCurve) -> Result<FeatureRecord, ComputeError> {
        let (phase, flux) = (curve.phase(), curve.flux());
        if phase.len() != flux.len() {
            return Err(ComputeError::ShapeMismatch {
                phase: phase.len(),
                flux: flux.len(),
            });
        }
        let width = self.config.width;

        let asymmetry_index = ShapeMetrics::asymmetry_index(phase, flux, width, self.config.nbins);
        let v_u_kurtosis = ShapeMetrics::v_u_kurtosis(phase, flux, width);
        let slopes = ShapeMetrics::ingress_egress_slopes(phase, flux, width);

        let record = FeatureRecord {
            asymmetry_index,
            v_u_kurtosis,
            ingress_slope: slopes.ingress,
            egress_slope: slopes.egress,
        };

        debug!(
            samples = curve.len(),
            width,
            defined = record.defined_count(),
            "Extracted transit-shape features"
        );

        Ok(record)
    }

    /// Extract features for many curves on `config.workers` threads.
    ///
    /// Results keep the input order; a failure for one curve does not affect
    /// the others.
    pub fn extract_batch(
        &self,
        curves: &[FoldedLightCurve],
    ) -> Vec<Result<FeatureRecord, ComputeError>> {
        let workers = self.config.workers.clamp(1, curves.len().max(1));
        if workers == 1 {
            return curves.iter().map(|curve| self.extract(curve)).collect();
        }

        let chunk_size = curves.len().div_ceil(workers);
        thread::scope(|scope| {
            let handles: Vec<_> = curves
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|curve| self.extract(curve))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(results) => results,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }
}
