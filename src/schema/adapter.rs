//! Adapter for converting lc.folded_curve.v1 records to folded light curves
//!
//! Raw records are folded at their ephemeris; folded records are validated
//! and, when configured, stripped of non-finite samples.

use crate::adapters::NumericSequenceLike;
use crate::config::ExtractionConfig;
use crate::error::ComputeError;
use crate::fold::{self, Ephemeris};
use crate::schema::light_curve::*;
use crate::types::{FoldedLightCurve, RawLightCurve};

/// Adapter for parsing and converting light curve records
pub struct LightCurveAdapter;

impl LightCurveAdapter {
    /// Parse a JSON string containing an array of records
    pub fn parse_array(json: &str) -> Result<Vec<LightCurveRecord>, ComputeError> {
        let records: Vec<LightCurveRecord> = serde_json::from_str(json)?;
        Ok(records)
    }

    /// Parse NDJSON (newline-delimited JSON) containing records
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<LightCurveRecord>, ComputeError> {
        let mut records = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<LightCurveRecord>(trimmed) {
                Ok(record) => records.push(record),
                Err(e) => {
                    return Err(ComputeError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(records)
    }

    /// Convert one record into a folded light curve.
    ///
    /// `Unavailable` records become [`ComputeError::UpstreamUnavailable`].
    pub fn to_folded(
        record: &LightCurveRecord,
        config: &ExtractionConfig,
    ) -> Result<FoldedLightCurve, ComputeError> {
        if let Err(e) = record.validate() {
            if let ValidationError::LengthMismatch {
                axis_len, flux_len, ..
            } = e
            {
                return Err(ComputeError::ShapeMismatch {
                    phase: axis_len,
                    flux: flux_len,
                });
            }
            return Err(ComputeError::ParseError(format!(
                "Invalid record for target {}: {}",
                record.target_id, e
            )));
        }

        match &record.curve {
            CurvePayload::Folded { phase, flux } => {
                let phase = phase.unwrap_values().to_vec();
                let flux = flux.unwrap_values().to_vec();
                if config.drop_non_finite {
                    FoldedLightCurve::dropping_non_finite(phase, flux)
                } else {
                    FoldedLightCurve::new(phase, flux)
                }
            }
            CurvePayload::Raw {
                time,
                flux,
                period,
                epoch,
            } => {
                let raw = RawLightCurve::new(
                    time.unwrap_values().to_vec(),
                    flux.unwrap_values().to_vec(),
                )?;
                let ephemeris = Ephemeris::new(*period, *epoch)?;
                fold::fold(&raw, ephemeris, config.phase_units)
            }
            CurvePayload::Unavailable { .. } => {
                Err(ComputeError::UpstreamUnavailable(record.target_id.clone()))
            }
        }
    }

    /// Fold a raw record into a folded record; other kinds pass through unchanged
    pub fn fold_record(
        record: &LightCurveRecord,
        config: &ExtractionConfig,
    ) -> Result<LightCurveRecord, ComputeError> {
        if !matches!(record.curve, CurvePayload::Raw { .. }) {
            return Ok(record.clone());
        }
        let (phase, flux) = Self::to_folded(record, config)?.into_parts();
        Ok(LightCurveRecord {
            curve: CurvePayload::Folded {
                phase: phase.into(),
                flux: flux.into(),
            },
            ..record.clone()
        })
    }

    /// Validate a batch of records
    pub fn validate_records(records: &[LightCurveRecord]) -> Vec<ValidationResult> {
        records
            .iter()
            .enumerate()
            .map(|(idx, record)| ValidationResult {
                index: idx,
                target_id: record.target_id.clone(),
                result: record.validate().err(),
            })
            .filter(|r| r.result.is_some())
            .collect()
    }
}

/// Result of record validation
#[derive(Debug)]
pub struct ValidationResult {
    pub index: usize,
    pub target_id: String,
    pub result: Option<ValidationError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::Quantity;
    use crate::types::PhaseUnits;

    #[test]
    fn test_parse_ndjson_skips_blank_lines() {
        let ndjson = format!(
            "{}\n\n{}\n",
            serde_json::to_string(&LightCurveRecord::folded("1", vec![0.0], vec![1.0])).unwrap(),
            serde_json::to_string(&LightCurveRecord::unavailable("2", None)).unwrap(),
        );
        let records = LightCurveAdapter::parse_ndjson(&ndjson).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].target_id, "2");
    }

    #[test]
    fn test_parse_ndjson_reports_line() {
        let err = LightCurveAdapter::parse_ndjson("{}\n").unwrap_err();
        match err {
            ComputeError::ParseError(msg) => assert!(msg.contains("line 1")),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_to_folded_wrapped_quantity() {
        let record = LightCurveRecord::folded(
            "10797460",
            Quantity::new(vec![-0.2, 0.0, 0.2], "d"),
            Quantity::new(vec![1.0, 0.99, 1.0], ""),
        );
        let curve = LightCurveAdapter::to_folded(&record, &ExtractionConfig::default()).unwrap();
        assert_eq!(curve.phase(), &[-0.2, 0.0, 0.2]);
    }

    #[test]
    fn test_to_folded_shape_mismatch() {
        let record = LightCurveRecord::folded("1", vec![0.0, 0.1], vec![1.0]);
        assert!(matches!(
            LightCurveAdapter::to_folded(&record, &ExtractionConfig::default()),
            Err(ComputeError::ShapeMismatch { phase: 2, flux: 1 })
        ));
    }

    #[test]
    fn test_to_folded_nan_policy() {
        let record = LightCurveRecord::folded("1", vec![-0.1, 0.0, 0.1], vec![1.0, f64::NAN, 1.0]);

        let strict = ExtractionConfig::default();
        assert!(matches!(
            LightCurveAdapter::to_folded(&record, &strict),
            Err(ComputeError::NonNumeric { field: "flux", index: 1 })
        ));

        let lenient = ExtractionConfig {
            drop_non_finite: true,
            ..Default::default()
        };
        assert_eq!(LightCurveAdapter::to_folded(&record, &lenient).unwrap().len(), 2);
    }

    #[test]
    fn test_unavailable_maps_to_upstream_error() {
        let record = LightCurveRecord::unavailable("42", None);
        let err = LightCurveAdapter::to_folded(&record, &ExtractionConfig::default()).unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_fold_record_raw() {
        let record = LightCurveRecord::raw("7", vec![0.0, 0.5, 1.0, 1.5], vec![0.99, 1.0, 0.99, 1.0], 1.0, 0.0);
        let config = ExtractionConfig {
            phase_units: PhaseUnits::Fraction,
            ..Default::default()
        };

        let folded = LightCurveAdapter::fold_record(&record, &config).unwrap();
        assert_eq!(folded.target_id, "7");
        match folded.curve {
            CurvePayload::Folded { phase, flux } => {
                assert_eq!(phase.unwrap_values(), &[-0.5, -0.5, 0.0, 0.0]);
                assert_eq!(flux.unwrap_values(), &[1.0, 1.0, 0.99, 0.99]);
            }
            other => panic!("unexpected payload {}", other.kind()),
        }
    }

    #[test]
    fn test_validate_records_collects_failures() {
        let records = vec![
            LightCurveRecord::folded("1", vec![0.0], vec![1.0]),
            LightCurveRecord::folded("2", vec![0.0, 1.0], vec![1.0]),
            LightCurveRecord::folded("", vec![0.0], vec![1.0]),
        ];
        let failures = LightCurveAdapter::validate_records(&records);
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].index, 1);
        assert_eq!(failures[1].result, Some(ValidationError::MissingTargetId));
    }
}
