//! Transit Shape - Feature extraction for phase-folded transit light curves
//!
//! Turns a folded light curve into a fixed set of transit-shape descriptors
//! through a deterministic pipeline: window selection → baseline/depth
//! estimation → shape metrics → feature record.
//!
//! ## Modules
//!
//! - **Extraction**: asymmetry index, V/U kurtosis and ingress/egress slopes for one curve
//! - **Catalog**: run extraction over many targets against an upstream source and a row sink

pub mod adapters;
pub mod baseline;
pub mod catalog;
pub mod config;
pub mod encoder;
pub mod error;
pub mod features;
pub mod fold;
pub mod pipeline;
pub mod schema;
pub mod stats;
pub mod types;
pub mod window;

pub use baseline::BaselineDepthEstimator;
pub use catalog::{CatalogRunner, CatalogSummary, FeatureSink, LightCurveSource};
pub use config::ExtractionConfig;
pub use error::ComputeError;
pub use features::ShapeMetrics;
pub use pipeline::{extract, extract_from, FeaturePipeline};
pub use types::{FeatureRecord, FoldedLightCurve, RawLightCurve, TargetFeatures};
pub use window::WindowSelector;

// Schema exports
pub use schema::{LightCurveAdapter, LightCurveRecord, SCHEMA_VERSION};

/// Crate version embedded in all feature payloads
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for feature payloads
pub const PRODUCER_NAME: &str = "transit-shape";
