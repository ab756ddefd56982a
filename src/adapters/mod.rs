//! Numeric sequence adapters
//!
//! Folded light curves reach the pipeline either as bare float arrays or as
//! unit-tagged quantities (e.g. phase in days, flux in electrons per second).
//! Both are reduced to plain `f64` slices through [`NumericSequenceLike`].

mod quantity;

pub use quantity::{NumericSeries, Quantity};

use crate::error::ComputeError;
use crate::types::FoldedLightCurve;

/// Anything that can expose its samples as a plain float sequence
pub trait NumericSequenceLike {
    /// Borrow the underlying values, dropping any unit information
    fn unwrap_values(&self) -> &[f64];
}

impl NumericSequenceLike for [f64] {
    fn unwrap_values(&self) -> &[f64] {
        self
    }
}

impl NumericSequenceLike for Vec<f64> {
    fn unwrap_values(&self) -> &[f64] {
        self
    }
}

impl<const N: usize> NumericSequenceLike for [f64; N] {
    fn unwrap_values(&self) -> &[f64] {
        self
    }
}

impl<T: NumericSequenceLike + ?Sized> NumericSequenceLike for &T {
    fn unwrap_values(&self) -> &[f64] {
        (**self).unwrap_values()
    }
}

/// Build a validated folded curve from any pair of sequence-like values
pub fn folded_from<P, F>(phase: &P, flux: &F) -> Result<FoldedLightCurve, ComputeError>
where
    P: NumericSequenceLike + ?Sized,
    F: NumericSequenceLike + ?Sized,
{
    FoldedLightCurve::new(
        phase.unwrap_values().to_vec(),
        flux.unwrap_values().to_vec(),
    )
}
