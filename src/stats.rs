//! Small numeric helpers shared by the estimators and shape metrics

/// Decimal resolution of f64, used to recognize rounding-level variance
const DECIMAL_RESOLUTION: f64 = 1e-15;

/// Median of a sample; the mean of the two central values for even counts
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Minimum over the finite values of a sample
pub fn min(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .reduce(f64::min)
}

/// Peak-to-peak range (max - min) over the finite values; 0 when there are none
pub fn peak_to_peak(values: &[f64]) -> f64 {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if hi >= lo {
        hi - lo
    } else {
        0.0
    }
}

/// Pearson (non-excess) kurtosis with the small-sample bias correction.
///
/// Returns `None` for fewer than four samples or zero variance, where the
/// statistic is undefined.
pub fn kurtosis_unbiased(values: &[f64]) -> Option<f64> {
    if values.len() < 4 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    let mut m2 = 0.0;
    let mut m4 = 0.0;
    for &v in values {
        let d = v - mean;
        let d2 = d * d;
        m2 += d2;
        m4 += d2 * d2;
    }
    m2 /= n;
    m4 /= n;

    // Variance at the level of rounding noise counts as zero
    if m2 <= (DECIMAL_RESOLUTION * mean).powi(2) {
        return None;
    }

    let excess = ((n * n - 1.0) * m4 / (m2 * m2) - 3.0 * (n - 1.0).powi(2))
        / ((n - 2.0) * (n - 3.0));
    let kurtosis = excess + 3.0;
    kurtosis.is_finite().then_some(kurtosis)
}

/// Least-squares straight line through (x, y)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

/// Fit a degree-1 polynomial by ordinary least squares.
///
/// Returns `None` with fewer than two points or when every x is identical.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Option<LinearFit> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        sxx += dx * dx;
        sxy += dx * (yi - y_mean);
    }
    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let fit = LinearFit {
        slope,
        intercept: y_mean - slope * x_mean,
    };
    (fit.slope.is_finite() && fit.intercept.is_finite()).then_some(fit)
}

/// Index of the half-open bin containing `value` among `nbins` equal bins over [0, stop].
///
/// Edges are `k * (stop / nbins)` with the last edge exactly `stop`, and bin `k`
/// is `[edge_k, edge_{k+1})`, so `value == stop` falls in no bin. The edges are
/// never materialized; memory does not grow with `nbins`.
pub fn uniform_bin_index(value: f64, stop: f64, nbins: usize) -> Option<usize> {
    if nbins == 0 || value.is_nan() || value < 0.0 || value >= stop {
        return None;
    }
    let step = stop / nbins as f64;
    let edge = |k: usize| if k >= nbins { stop } else { k as f64 * step };

    // Rounding can leave the estimate a few edges off either way
    let mut k = ((value / step) as usize).min(nbins - 1);
    while k > 0 && edge(k) > value {
        k -= 1;
    }
    while k + 1 < nbins && edge(k + 1) <= value {
        k += 1;
    }
    Some(k)
}
