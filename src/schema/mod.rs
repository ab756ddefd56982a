//! lc.folded_curve.v1 input schema
//!
//! This module defines the serialized form of the light curves handed to the
//! pipeline by the upstream fetch/fold step: one record per target, carrying
//! either a folded curve, a raw curve with its ephemeris, or an explicit
//! "unavailable" marker.

mod adapter;
mod light_curve;

pub use adapter::*;
pub use light_curve::*;
