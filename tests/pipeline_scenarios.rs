//! End-to-end extraction scenarios on synthetic folded light curves

use transit_shape::baseline::{BaselineDepthEstimator, DEPTH_EPSILON};
use transit_shape::catalog::{CatalogRunner, CsvFeatureSink, RecordSource};
use transit_shape::schema::{LightCurveAdapter, LightCurveRecord};
use transit_shape::{extract, extract_from, ComputeError, ExtractionConfig, FeaturePipeline, FoldedLightCurve};

fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| start + (stop - start) * i as f64 / (n - 1) as f64)
        .collect()
}

fn parabolic_dip(phase: &[f64], depth: f64, half_width: f64) -> Vec<f64> {
    phase
        .iter()
        .map(|&p| {
            if p.abs() <= half_width {
                1.0 - depth * (1.0 - (p / half_width).powi(2))
            } else {
                1.0
            }
        })
        .collect()
}

#[test]
fn symmetric_parabolic_dip() {
    let phase = linspace(-0.5, 0.5, 1000);
    let flux = parabolic_dip(&phase, 0.01, 0.05);
    let curve = FoldedLightCurve::new(phase.clone(), flux.clone()).unwrap();

    let record = extract(&curve, 0.1).unwrap();

    let asymmetry = record.asymmetry_index.unwrap();
    assert!(asymmetry.abs() < 1e-6, "asymmetry {asymmetry}");

    let kurtosis = record.v_u_kurtosis.unwrap();
    assert!(kurtosis.is_finite());

    let ingress = record.ingress_slope.unwrap();
    let egress = record.egress_slope.unwrap();
    assert!(ingress < 0.0);
    assert!(egress > 0.0);
    assert!((ingress + egress).abs() < 1e-9, "ingress {ingress}, egress {egress}");

    let estimate = BaselineDepthEstimator::estimate(&phase, &flux, 0.1);
    assert!((estimate.baseline - 1.0).abs() < 1e-12);
    assert!((estimate.depth - 0.01).abs() < 1e-5);
}

#[test]
fn flat_curve_has_epsilon_depth() {
    let phase = linspace(-0.5, 0.5, 1000);
    let flux = vec![1.0; 1000];

    let estimate = BaselineDepthEstimator::estimate(&phase, &flux, 0.1);
    assert_eq!(estimate.depth, DEPTH_EPSILON);

    let record = extract(&FoldedLightCurve::new(phase, flux).unwrap(), 0.1).unwrap();
    // Every bin difference is zero, the profile has zero variance and both edges are flat
    assert_eq!(record.asymmetry_index, Some(0.0));
    assert_eq!(record.v_u_kurtosis, None);
    assert_eq!(record.ingress_slope, Some(0.0));
    assert_eq!(record.egress_slope, Some(0.0));
}

#[test]
fn sparse_curve_is_all_undefined() {
    let phase = linspace(-0.5, 0.5, 40);
    let flux = parabolic_dip(&phase, 0.01, 0.05);

    let record = extract(&FoldedLightCurve::new(phase, flux).unwrap(), 0.05).unwrap();
    assert!(record.is_empty());
}

#[test]
fn mismatched_lengths_fail_before_extraction() {
    let phase = linspace(-0.5, 0.5, 100);
    let flux = vec![1.0; 99];

    assert!(matches!(
        extract_from(&phase, &flux, 0.1),
        Err(ComputeError::ShapeMismatch { phase: 100, flux: 99 })
    ));
}

#[test]
fn repeated_extraction_is_identical() {
    let phase = linspace(-0.5, 0.5, 1500);
    let flux: Vec<f64> = parabolic_dip(&phase, 0.02, 0.04)
        .iter()
        .zip(&phase)
        .map(|(f, p)| f + 1e-4 * (37.0 * p).sin())
        .collect();
    let curve = FoldedLightCurve::new(phase, flux).unwrap();

    let pipeline = FeaturePipeline::default();
    let first = pipeline.extract(&curve).unwrap();
    let second = pipeline.extract(&curve).unwrap();
    assert_eq!(first, second);
}

#[test]
fn raw_record_folds_then_extracts() {
    // Four transits of a period-2.5 signal sampled every 0.001 days
    let period = 2.5;
    let epoch = 1.25;
    let time = linspace(0.0, 10.0, 10_001);
    let flux: Vec<f64> = time
        .iter()
        .map(|&t| {
            let offset = ((t - epoch + period / 2.0).rem_euclid(period) - period / 2.0) / period;
            if offset.abs() <= 0.05 {
                1.0 - 0.01 * (1.0 - (offset / 0.05).powi(2))
            } else {
                1.0
            }
        })
        .collect();

    let record = LightCurveRecord::raw("8462852", time, flux, period, epoch);
    let curve = LightCurveAdapter::to_folded(&record, &ExtractionConfig::default()).unwrap();
    assert_eq!(curve.len(), 10_001);
    assert!(curve.phase().iter().all(|p| (-0.5..0.5).contains(p)));

    let features = extract(&curve, 0.1).unwrap();
    assert_eq!(features.defined_count(), 4);
    assert!(features.ingress_slope.unwrap() < 0.0);
    assert!(features.egress_slope.unwrap() > 0.0);
}

#[test]
fn catalog_run_writes_csv_rows() {
    let phase = linspace(-0.5, 0.5, 1000);
    let flux = parabolic_dip(&phase, 0.01, 0.05);
    let records = vec![
        LightCurveRecord::folded("757450", phase.clone(), flux.clone()),
        LightCurveRecord::unavailable("1026957", Some("no data".to_string())),
        LightCurveRecord::folded("10797460", phase, flux),
    ];
    let target_ids: Vec<String> = records.iter().map(|r| r.target_id.clone()).collect();

    let source = RecordSource::new(records, ExtractionConfig::default());
    let mut sink = CsvFeatureSink::new(Vec::new());
    let summary = CatalogRunner::new(FeaturePipeline::default())
        .run(&target_ids, &source, &mut sink)
        .unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed(), 0);

    let csv = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("757450,"));
    assert!(lines[2].starts_with("10797460,"));
}
