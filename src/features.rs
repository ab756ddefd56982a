//! Transit-shape metrics
//!
//! This module derives the shape descriptors of a folded transit:
//! - Asymmetry index (pre vs. post mid-transit flux at equal |phase|)
//! - V/U kurtosis of the depth-normalized in-transit profile
//! - Ingress and egress slopes
//!
//! Every metric returns `None` when the data is insufficient instead of
//! fabricating a number.

use crate::baseline::BaselineDepthEstimator;
use crate::stats;
use crate::window::{self, WindowSelector};
use std::collections::BTreeMap;

/// Default half-width of the transit window when a metric is called directly
pub const DEFAULT_METRIC_WIDTH: f64 = 0.05;

/// Default number of |phase| bins for the asymmetry index
pub const DEFAULT_NBINS: usize = 100;

/// Minimum in-window samples for the asymmetry index and kurtosis
pub const MIN_WINDOW_SAMPLES: usize = 20;

/// Minimum samples on one side of mid-transit for a slope fit
pub const MIN_EDGE_SAMPLES: usize = 5;

/// Slopes fitted over each half of the transit window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeSlopes {
    pub ingress: Option<f64>,
    pub egress: Option<f64>,
}

/// Shape metric computations over index-aligned phase/flux slices
pub struct ShapeMetrics;

impl ShapeMetrics {
    /// Median per-bin |flux(-phi) - flux(+phi)| normalized by the transit depth.
    ///
    /// The range [0, width] of |phase| is split into `nbins` half-open bins.
    /// Bins missing either a negative-phase or a positive-phase sample are
    /// skipped. Undefined with fewer than [`MIN_WINDOW_SAMPLES`] samples in the
    /// window, or when no bin has both sides populated.
    pub fn asymmetry_index(phase: &[f64], flux: &[f64], width: f64, nbins: usize) -> Option<f64> {
        if nbins == 0 {
            return None;
        }
        let in_window = WindowSelector::select(phase, width).in_transit;
        if window::count(&in_window) < MIN_WINDOW_SAMPLES {
            return None;
        }

        // Only occupied bins are stored, keyed by bin index
        let mut bins: BTreeMap<usize, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
        for ((&p, &f), &inside) in phase.iter().zip(flux).zip(&in_window) {
            if !inside || p == 0.0 {
                continue;
            }
            let Some(bin) = stats::uniform_bin_index(p.abs(), width, nbins) else {
                continue;
            };
            let (before, after) = bins.entry(bin).or_default();
            if p < 0.0 {
                before.push(f);
            } else {
                after.push(f);
            }
        }

        let diffs: Vec<f64> = bins
            .values()
            .filter_map(|(neg, pos)| {
                let neg = stats::median(neg)?;
                let pos = stats::median(pos)?;
                Some((pos - neg).abs())
            })
            .collect();

        let typical = stats::median(&diffs)?;
        let depth = BaselineDepthEstimator::estimate(phase, flux, width).depth;
        Some(typical / depth)
    }

    /// Pearson kurtosis of `(baseline - flux) / depth` over the in-transit window.
    ///
    /// High values indicate a V-shaped profile, low values a flat-bottomed
    /// U shape. Undefined with fewer than [`MIN_WINDOW_SAMPLES`] in-transit
    /// samples or when the profile has zero variance.
    pub fn v_u_kurtosis(phase: &[f64], flux: &[f64], width: f64) -> Option<f64> {
        let in_transit = WindowSelector::select(phase, width).in_transit;
        if window::count(&in_transit) < MIN_WINDOW_SAMPLES {
            return None;
        }

        let estimate = BaselineDepthEstimator::estimate(phase, flux, width);
        let profile: Vec<f64> = window::masked(flux, &in_transit)
            .into_iter()
            .map(|f| (estimate.baseline - f) / estimate.depth)
            .collect();

        stats::kurtosis_unbiased(&profile)
    }

    /// Least-squares slopes of flux against phase on each side of mid-transit.
    ///
    /// Each side needs at least [`MIN_EDGE_SAMPLES`] samples and is computed
    /// independently of the other.
    pub fn ingress_egress_slopes(phase: &[f64], flux: &[f64], width: f64) -> EdgeSlopes {
        let masks = WindowSelector::edges(phase, width);
        EdgeSlopes {
            ingress: edge_slope(phase, flux, &masks.ingress),
            egress: edge_slope(phase, flux, &masks.egress),
        }
    }
}

fn edge_slope(phase: &[f64], flux: &[f64], mask: &[bool]) -> Option<f64> {
    if window::count(mask) < MIN_EDGE_SAMPLES {
        return None;
    }
    let x = window::masked(phase, mask);
    let y = window::masked(flux, mask);
    stats::linear_fit(&x, &y).map(|fit| fit.slope)
}
