//! Baseline and depth estimation
//!
//! This module estimates the out-of-transit flux baseline and the transit depth
//! of a folded light curve. The depth is used as a normalizer by the shape
//! metrics, so it is forced strictly positive for every input.

use crate::stats;
use crate::types::BaselineDepth;
use crate::window::{self, WindowSelector};

/// Minimum out-of-transit samples needed to trust a local baseline
pub const MIN_OOT_SAMPLES: usize = 10;

/// Fraction of the peak-to-peak flux used when the measured depth is not positive
pub const DEPTH_FALLBACK_FRACTION: f64 = 0.05;

/// Added to the fallback depth so it never reaches zero
pub const DEPTH_EPSILON: f64 = 1e-9;

/// Estimator for baseline flux and transit depth
pub struct BaselineDepthEstimator;

impl BaselineDepthEstimator {
    /// Estimate (baseline, depth) for the transit window of half-width `width`.
    ///
    /// The baseline is the median out-of-transit flux, or the median of all
    /// flux when fewer than [`MIN_OOT_SAMPLES`] samples are out of transit.
    /// Empty flux yields a baseline of 0. The depth is the baseline minus the
    /// minimum in-transit flux; when that is not positive (empty window, flat or
    /// inverted curve) it becomes `0.05 * ptp(flux) + 1e-9`.
    pub fn estimate(phase: &[f64], flux: &[f64], width: f64) -> BaselineDepth {
        let masks = WindowSelector::select(phase, width);

        let baseline = if window::count(&masks.out_of_transit) < MIN_OOT_SAMPLES {
            stats::median(flux)
        } else {
            stats::median(&window::masked(flux, &masks.out_of_transit))
        }
        .unwrap_or(0.0);

        let measured = stats::min(&window::masked(flux, &masks.in_transit))
            .map(|lowest| baseline - lowest)
            .unwrap_or(0.0);

        let depth = if measured > 0.0 && measured.is_finite() {
            measured
        } else {
            fallback_depth(flux)
        };

        BaselineDepth { baseline, depth }
    }
}

/// Depth used when the measured one is unusable
pub fn fallback_depth(flux: &[f64]) -> f64 {
    stats::peak_to_peak(flux) * DEPTH_FALLBACK_FRACTION + DEPTH_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_transit(n: usize, depth: f64, half_width: f64) -> (Vec<f64>, Vec<f64>) {
        let phase: Vec<f64> = (0..n)
            .map(|i| -0.5 + i as f64 / (n - 1) as f64)
            .collect();
        let flux = phase
            .iter()
            .map(|p| if p.abs() <= half_width { 1.0 - depth } else { 1.0 })
            .collect();
        (phase, flux)
    }

    #[test]
    fn test_box_transit_depth() {
        let (phase, flux) = box_transit(1000, 0.01, 0.05);
        let estimate = BaselineDepthEstimator::estimate(&phase, &flux, 0.05);

        assert!((estimate.baseline - 1.0).abs() < 1e-12);
        assert!((estimate.depth - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_sparse_oot_uses_global_median() {
        // Only 3 samples beyond 3 * width
        let phase = [-0.4, -0.35, 0.35, -0.05, 0.0, 0.05, 0.01, -0.01];
        let flux = [1.0, 1.0, 1.0, 0.9, 0.8, 0.9, 0.85, 0.85];
        let estimate = BaselineDepthEstimator::estimate(&phase, &flux, 0.1);

        // Global median of flux
        assert!((estimate.baseline - 0.9).abs() < 1e-12);
        assert!((estimate.depth - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_flat_curve_uses_fallback() {
        let phase: Vec<f64> = (0..200).map(|i| -0.5 + i as f64 / 199.0).collect();
        let flux = vec![1.0; 200];
        let estimate = BaselineDepthEstimator::estimate(&phase, &flux, 0.05);

        assert_eq!(estimate.baseline, 1.0);
        assert_eq!(estimate.depth, DEPTH_EPSILON);
    }

    #[test]
    fn test_inverted_signal_uses_fallback() {
        let (phase, flux) = box_transit(500, -0.02, 0.05);
        let estimate = BaselineDepthEstimator::estimate(&phase, &flux, 0.05);

        let expected = 0.02 * DEPTH_FALLBACK_FRACTION + DEPTH_EPSILON;
        assert!((estimate.depth - expected).abs() < 1e-12);
    }

    #[test]
    fn test_empty_in_transit_window() {
        let phase = [-0.5, -0.4, 0.4, 0.5];
        let flux = [1.0, 0.98, 1.02, 1.0];
        let estimate = BaselineDepthEstimator::estimate(&phase, &flux, 0.05);

        assert!((estimate.depth - (0.04 * 0.05 + DEPTH_EPSILON)).abs() < 1e-12);
        assert!((estimate.baseline - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input_still_positive() {
        let estimate = BaselineDepthEstimator::estimate(&[], &[], 0.1);
        assert_eq!(estimate.baseline, 0.0);
        assert_eq!(estimate.depth, DEPTH_EPSILON);
    }
}
