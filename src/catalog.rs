//! Catalog processing
//!
//! Runs the extraction pipeline over a list of targets: fetch a folded curve
//! from the upstream source, extract features, append one row per target to
//! the downstream sink. Targets without a curve are skipped; a failure on one
//! target never stops the others.

use crate::config::ExtractionConfig;
use crate::encoder::{self, FeatureEncoder};
use crate::error::ComputeError;
use crate::pipeline::FeaturePipeline;
use crate::schema::{LightCurveAdapter, LightCurveRecord};
use crate::types::{FoldedLightCurve, TargetFeatures};
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Upstream collaborator producing folded light curves
pub trait LightCurveSource {
    /// Folded curve for a target, or [`ComputeError::UpstreamUnavailable`]
    fn folded_curve(&self, target_id: &str) -> Result<FoldedLightCurve, ComputeError>;
}

/// Downstream collaborator persisting one row per target
pub trait FeatureSink {
    fn append(&mut self, row: &TargetFeatures) -> Result<(), ComputeError>;
}

/// Source backed by parsed lc.folded_curve.v1 records
pub struct RecordSource {
    records: HashMap<String, LightCurveRecord>,
    order: Vec<String>,
    config: ExtractionConfig,
}

impl RecordSource {
    /// Index records by target. The first record for a target wins; later
    /// records with the same id are ignored.
    pub fn new(records: Vec<LightCurveRecord>, config: ExtractionConfig) -> Self {
        let mut indexed = HashMap::with_capacity(records.len());
        let mut order = Vec::with_capacity(records.len());
        for record in records {
            match indexed.entry(record.target_id.clone()) {
                Entry::Occupied(_) => {
                    warn!(target_id = %record.target_id, "Duplicate record ignored");
                }
                Entry::Vacant(slot) => {
                    order.push(record.target_id.clone());
                    slot.insert(record);
                }
            }
        }
        Self {
            records: indexed,
            order,
            config,
        }
    }

    /// Distinct target ids in first-seen order
    pub fn target_ids(&self) -> &[String] {
        &self.order
    }
}

impl LightCurveSource for RecordSource {
    fn folded_curve(&self, target_id: &str) -> Result<FoldedLightCurve, ComputeError> {
        let record = self
            .records
            .get(target_id)
            .ok_or_else(|| ComputeError::UpstreamUnavailable(target_id.to_string()))?;
        LightCurveAdapter::to_folded(record, &self.config)
    }
}

/// CSV sink with the fixed column set, flushed after every row
pub struct CsvFeatureSink<W: Write> {
    writer: csv::Writer<W>,
    header_pending: bool,
}

impl<W: Write> CsvFeatureSink<W> {
    /// Sink for a fresh document; the header is written before the first row
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            header_pending: true,
        }
    }

    /// Sink appending to a document that already has a header
    pub fn appending(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            header_pending: false,
        }
    }

    /// Write the header now if it has not been written yet
    pub fn write_header(&mut self) -> Result<(), ComputeError> {
        if self.header_pending {
            self.writer.write_record(encoder::csv_header())?;
            self.writer.flush()?;
            self.header_pending = false;
        }
        Ok(())
    }

    /// Flush buffered output and hand back the underlying writer
    pub fn into_inner(self) -> Result<W, ComputeError> {
        self.writer
            .into_inner()
            .map_err(|e| ComputeError::Io(e.into_error()))
    }
}

impl<W: Write> FeatureSink for CsvFeatureSink<W> {
    fn append(&mut self, row: &TargetFeatures) -> Result<(), ComputeError> {
        self.write_header()?;
        self.writer.write_record(encoder::csv_record(row))?;
        self.writer.flush()?;
        Ok(())
    }
}

/// NDJSON sink writing one encoded payload per line
pub struct NdjsonFeatureSink<W: Write> {
    writer: W,
    encoder: FeatureEncoder,
    config: ExtractionConfig,
}

impl<W: Write> NdjsonFeatureSink<W> {
    pub fn new(writer: W, encoder: FeatureEncoder, config: ExtractionConfig) -> Self {
        Self {
            writer,
            encoder,
            config,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FeatureSink for NdjsonFeatureSink<W> {
    fn append(&mut self, row: &TargetFeatures) -> Result<(), ComputeError> {
        let line = self.encoder.encode_to_json(row, &self.config)?;
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// In-memory sink, mostly for callers that post-process rows themselves
#[derive(Debug, Default)]
pub struct VecSink {
    pub rows: Vec<TargetFeatures>,
}

impl FeatureSink for VecSink {
    fn append(&mut self, row: &TargetFeatures) -> Result<(), ComputeError> {
        self.rows.push(row.clone());
        Ok(())
    }
}

/// Target identifiers already persisted in a CSV feature file.
///
/// A missing file means nothing has been persisted yet. Ids are taken from
/// the first column exactly as written, quoting undone and nothing trimmed.
pub fn existing_target_ids(path: &Path) -> Result<Vec<String>, ComputeError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    let mut ids = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(id) = record.get(0) {
            ids.push(id.to_string());
        }
    }
    Ok(ids)
}

/// Per-target failure recorded by the catalog runner
#[derive(Debug, Clone, Serialize)]
pub struct TargetFailure {
    pub target_id: String,
    pub error: String,
}

/// Outcome of a catalog run
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogSummary {
    /// Targets whose features were written
    pub processed: usize,
    /// Targets with no curve upstream, or already persisted
    pub skipped: usize,
    /// Targets whose curve was structurally invalid
    pub failures: Vec<TargetFailure>,
}

impl CatalogSummary {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Catalog runner binding a pipeline to its collaborators
pub struct CatalogRunner {
    pipeline: FeaturePipeline,
    already_done: HashSet<String>,
}

impl CatalogRunner {
    pub fn new(pipeline: FeaturePipeline) -> Self {
        Self {
            pipeline,
            already_done: HashSet::new(),
        }
    }

    /// Skip targets that already have a persisted row
    pub fn with_completed<I, S>(mut self, target_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.already_done
            .extend(target_ids.into_iter().map(Into::into));
        self
    }

    /// Process every target in order, appending one row per extracted target.
    ///
    /// Only a sink failure aborts the run, since nothing further could be persisted.
    pub fn run<S, K>(
        &self,
        target_ids: &[String],
        source: &S,
        sink: &mut K,
    ) -> Result<CatalogSummary, ComputeError>
    where
        S: LightCurveSource + ?Sized,
        K: FeatureSink + ?Sized,
    {
        let mut summary = CatalogSummary::default();

        for target_id in target_ids {
            if self.already_done.contains(target_id) {
                summary.skipped += 1;
                continue;
            }

            let curve = match source.folded_curve(target_id) {
                Ok(curve) => curve,
                Err(e) if e.is_unavailable() => {
                    warn!(target_id = %target_id, "No light curve available, skipping");
                    summary.skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!(target_id = %target_id, error = %e, "Invalid light curve");
                    summary.failures.push(TargetFailure {
                        target_id: target_id.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            let features = match self.pipeline.extract(&curve) {
                Ok(features) => features,
                Err(e) => {
                    warn!(target_id = %target_id, error = %e, "Feature extraction failed");
                    summary.failures.push(TargetFailure {
                        target_id: target_id.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            let row = TargetFeatures {
                target_id: target_id.clone(),
                features,
            };
            sink.append(&row)?;
            summary.processed += 1;
        }

        info!(
            processed = summary.processed,
            skipped = summary.skipped,
            failed = summary.failed(),
            "Catalog run complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dip_record(target_id: &str) -> LightCurveRecord {
        let phase: Vec<f64> = (0..1000).map(|i| -0.5 + i as f64 / 999.0).collect();
        let flux: Vec<f64> = phase
            .iter()
            .map(|&p| {
                if p.abs() <= 0.05 {
                    1.0 - 0.01 * (1.0 - (p / 0.05).powi(2))
                } else {
                    1.0
                }
            })
            .collect();
        LightCurveRecord::folded(target_id, phase, flux)
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_run_skips_unavailable_and_continues_after_failure() {
        let records = vec![
            dip_record("1"),
            LightCurveRecord::unavailable("2", None),
            LightCurveRecord::folded("3", vec![0.0, 0.1], vec![1.0]),
            dip_record("4"),
        ];
        let source = RecordSource::new(records, ExtractionConfig::default());
        let runner = CatalogRunner::new(FeaturePipeline::default());
        let mut sink = VecSink::default();

        let summary = runner
            .run(&ids(&["1", "2", "3", "4", "5"]), &source, &mut sink)
            .unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.failures[0].target_id, "3");
        assert_eq!(sink.rows.len(), 2);
        assert_eq!(sink.rows[1].target_id, "4");
    }

    #[test]
    fn test_run_resumes_completed_targets() {
        let source = RecordSource::new(
            vec![dip_record("1"), dip_record("2")],
            ExtractionConfig::default(),
        );
        let runner = CatalogRunner::new(FeaturePipeline::default()).with_completed(["1"]);
        let mut sink = VecSink::default();

        let summary = runner.run(&ids(&["1", "2"]), &source, &mut sink).unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(sink.rows[0].target_id, "2");
    }

    #[test]
    fn test_csv_sink_writes_header_once() {
        let mut sink = CsvFeatureSink::new(Vec::new());
        let row = TargetFeatures {
            target_id: "9".to_string(),
            features: Default::default(),
        };
        sink.append(&row).unwrap();
        sink.append(&row).unwrap();

        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(
            text,
            "target_id,asymmetry_index,v_u_kurtosis,ingress_slope,egress_slope\n9,,,,\n9,,,,\n"
        );
    }

    #[test]
    fn test_csv_sink_appending_has_no_header() {
        let mut sink = CsvFeatureSink::appending(Vec::new());
        let row = TargetFeatures {
            target_id: "9".to_string(),
            features: Default::default(),
        };
        sink.append(&row).unwrap();
        assert_eq!(String::from_utf8(sink.into_inner().unwrap()).unwrap(), "9,,,,\n");
    }

    #[test]
    fn test_existing_target_ids_missing_file() {
        let path = std::env::temp_dir().join(format!("tshape-missing-{}.csv", uuid::Uuid::new_v4()));
        assert!(existing_target_ids(&path).unwrap().is_empty());
    }

    #[test]
    fn test_existing_target_ids_reads_written_rows() {
        let path = std::env::temp_dir().join(format!("tshape-resume-{}.csv", uuid::Uuid::new_v4()));
        let mut sink = CsvFeatureSink::new(std::fs::File::create(&path).unwrap());
        for id in ["11", "12"] {
            sink.append(&TargetFeatures {
                target_id: id.to_string(),
                features: Default::default(),
            })
            .unwrap();
        }
        drop(sink);

        let ids = existing_target_ids(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(ids, vec!["11".to_string(), "12".to_string()]);
    }

    #[test]
    fn test_existing_target_ids_keeps_padding_and_quoting() {
        let path = std::env::temp_dir().join(format!("tshape-quoted-{}.csv", uuid::Uuid::new_v4()));
        let written = ids(&[" 42", "KOI-7,01", "say \"hi\"", "two\nlines"]);
        let mut sink = CsvFeatureSink::new(std::fs::File::create(&path).unwrap());
        for id in &written {
            sink.append(&TargetFeatures {
                target_id: id.clone(),
                features: Default::default(),
            })
            .unwrap();
        }
        drop(sink);

        let read_back = existing_target_ids(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(read_back, written);

        // Resuming from that file skips every persisted target
        let source = RecordSource::new(
            written.iter().map(|id| dip_record(id)).collect(),
            ExtractionConfig::default(),
        );
        let runner = CatalogRunner::new(FeaturePipeline::default()).with_completed(read_back);
        let mut sink = VecSink::default();
        let summary = runner.run(&written, &source, &mut sink).unwrap();
        assert_eq!(summary.processed, 0);
        assert_eq!(summary.skipped, 4);
    }

    #[test]
    fn test_record_source_keeps_first_duplicate() {
        let source = RecordSource::new(
            vec![
                dip_record("7"),
                LightCurveRecord::unavailable("8", None),
                LightCurveRecord::unavailable("7", None),
                dip_record("8"),
            ],
            ExtractionConfig::default(),
        );
        assert_eq!(source.target_ids(), ids(&["7", "8"]).as_slice());
        assert!(source.folded_curve("7").is_ok());
        assert!(source.folded_curve("8").unwrap_err().is_unavailable());
    }

    #[test]
    fn test_ndjson_sink_one_line_per_row() {
        let mut sink = NdjsonFeatureSink::new(
            Vec::new(),
            FeatureEncoder::with_instance_id("run".to_string()),
            ExtractionConfig::default(),
        );
        let row = TargetFeatures {
            target_id: "9".to_string(),
            features: Default::default(),
        };
        sink.append(&row).unwrap();
        sink.append(&row).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["provenance"]["target_id"], "9");
        assert_eq!(parsed["quality"]["defined_metrics"], 0);
    }
}
