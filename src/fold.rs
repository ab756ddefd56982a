//! Phase folding
//!
//! Maps a raw light curve onto phase relative to an externally determined
//! period and transit epoch, so that repeated transits line up at phase zero.

use crate::error::ComputeError;
use crate::types::{FoldedLightCurve, PhaseUnits, RawLightCurve};
use tracing::debug;

/// Transit ephemeris supplied by the period search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ephemeris {
    /// Orbital period, in the units of the time axis
    pub period: f64,
    /// Mid-transit reference time
    pub epoch: f64,
}

impl Ephemeris {
    pub fn new(period: f64, epoch: f64) -> Result<Self, ComputeError> {
        if !period.is_finite() || period <= 0.0 {
            return Err(ComputeError::InvalidPeriod(period));
        }
        if !epoch.is_finite() {
            return Err(ComputeError::NonNumeric {
                field: "epoch",
                index: 0,
            });
        }
        Ok(Self { period, epoch })
    }

    /// Phase of time `t` in [-period/2, period/2)
    pub fn phase_of(&self, t: f64) -> f64 {
        let half = 0.5 * self.period;
        wrap_half_open((t - self.epoch + half).rem_euclid(self.period) - half, half)
    }

    /// Phase of time `t` as a fraction of the period, in [-0.5, 0.5)
    pub fn fraction_of(&self, t: f64) -> f64 {
        wrap_half_open(self.phase_of(t) / self.period, 0.5)
    }
}

/// `rem_euclid` and the division by the period can round up onto the open end
fn wrap_half_open(phase: f64, half: f64) -> f64 {
    if phase >= half {
        -half
    } else {
        phase
    }
}

/// Fold a raw light curve at the given ephemeris.
///
/// Samples with a non-finite time or flux are dropped first. The result is
/// sorted by phase; `PhaseUnits::Fraction` divides the phase by the period.
pub fn fold(
    raw: &RawLightCurve,
    ephemeris: Ephemeris,
    units: PhaseUnits,
) -> Result<FoldedLightCurve, ComputeError> {
    let mut samples: Vec<(f64, f64)> = raw
        .time
        .iter()
        .zip(&raw.flux)
        .filter(|(t, f)| t.is_finite() && f.is_finite())
        .map(|(&t, &f)| {
            let phase = match units {
                PhaseUnits::Fraction => ephemeris.fraction_of(t),
                PhaseUnits::Time => ephemeris.phase_of(t),
            };
            (phase, f)
        })
        .collect();

    let dropped = raw.len() - samples.len();
    if dropped > 0 {
        debug!(dropped, "Dropped non-finite samples before folding");
    }

    samples.sort_by(|a, b| a.0.total_cmp(&b.0));
    let (phase, flux) = samples.into_iter().unzip();
    FoldedLightCurve::new(phase, flux)
}
