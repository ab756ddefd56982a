//! tshape CLI - Command-line interface for Transit Shape
//!
//! Commands:
//! - extract: Extract transit-shape features for every target in a record file
//! - fold: Fold raw records at their ephemeris into folded records
//! - validate: Validate light curve record schema
//! - doctor: Diagnose version and configuration
//! - schema: Print schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use transit_shape::catalog::{
    existing_target_ids, CatalogRunner, CsvFeatureSink, FeatureSink, LightCurveSource,
    NdjsonFeatureSink, RecordSource,
};
use transit_shape::encoder::{self, FeatureEncoder, OUTPUT_SCHEMA_VERSION};
use transit_shape::schema::{LightCurveAdapter, LightCurveRecord, SCHEMA_VERSION};
use transit_shape::types::{FeaturePayload, FoldedLightCurve, PhaseUnits, TargetFeatures};
use transit_shape::{ComputeError, ExtractionConfig, FeaturePipeline, PRODUCER_NAME, VERSION};

/// tshape - Transit-shape feature extraction for folded light curves
#[derive(Parser)]
#[command(name = "tshape")]
#[command(version = VERSION)]
#[command(about = "Extract transit-shape features from folded light curves", long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract features for every target in the input
    Extract {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "csv")]
        output_format: OutputFormat,

        /// Load extraction settings from a JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Half-width of the in-transit window, in phase units
        #[arg(long)]
        width: Option<f64>,

        /// Number of |phase| bins for the asymmetry index
        #[arg(long)]
        nbins: Option<usize>,

        /// Phase units used when folding raw records
        #[arg(long)]
        phase_units: Option<PhaseUnitsArg>,

        /// Worker threads for JSON output
        #[arg(long)]
        workers: Option<usize>,

        /// Drop non-finite samples instead of rejecting the curve
        #[arg(long)]
        drop_non_finite: bool,

        /// Append to an existing output file instead of truncating it
        #[arg(long)]
        append: bool,

        /// Skip targets already present in the output file (implies --append)
        #[arg(long)]
        resume: bool,
    },

    /// Fold raw records at their ephemeris (output is NDJSON)
    Fold {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Phase units of the folded output
        #[arg(long, default_value = "fraction")]
        phase_units: PhaseUnitsArg,
    },

    /// Validate light curve record schema
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose version and configuration
    Doctor {
        /// Check an extraction config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,

        /// Output as JSON schema
        #[arg(long)]
        json_schema: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one record per line)
    Ndjson,
    /// JSON array of records
    Json,
}

#[derive(Clone, PartialEq, ValueEnum)]
enum OutputFormat {
    /// One row per target with the fixed feature columns
    Csv,
    /// Newline-delimited JSON (one payload per line)
    Ndjson,
    /// JSON array of payloads
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum PhaseUnitsArg {
    /// Fraction of the period
    Fraction,
    /// Units of the time axis
    Time,
}

impl From<PhaseUnitsArg> for PhaseUnits {
    fn from(arg: PhaseUnitsArg) -> Self {
        match arg {
            PhaseUnitsArg::Fraction => PhaseUnits::Fraction,
            PhaseUnitsArg::Time => PhaseUnits::Time,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (lc.folded_curve.v1)
    Input,
    /// Output schema (transit_shape.features.v1)
    Output,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }
}

fn run(cli: Cli) -> Result<(), TshapeCliError> {
    match cli.command {
        Commands::Extract {
            input,
            output,
            input_format,
            output_format,
            config,
            width,
            nbins,
            phase_units,
            workers,
            drop_non_finite,
            append,
            resume,
        } => {
            let mut settings = match config {
                Some(path) => ExtractionConfig::from_json(&fs::read_to_string(path)?)?,
                None => ExtractionConfig::default(),
            };
            if let Some(width) = width {
                settings.width = width;
            }
            if let Some(nbins) = nbins {
                settings.nbins = nbins;
            }
            if let Some(units) = phase_units {
                settings.phase_units = units.into();
            }
            if let Some(workers) = workers {
                settings.workers = workers;
            }
            settings.drop_non_finite |= drop_non_finite;

            cmd_extract(
                &input,
                &output,
                input_format,
                output_format,
                settings,
                append || resume,
                resume,
            )
        }

        Commands::Fold {
            input,
            output,
            input_format,
            phase_units,
        } => cmd_fold(&input, &output, input_format, phase_units.into()),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Doctor { config, json } => cmd_doctor(config.as_deref(), json),

        Commands::Schema {
            schema_type,
            json_schema,
        } => cmd_schema(schema_type, json_schema),
    }
}

fn cmd_extract(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    config: ExtractionConfig,
    append: bool,
    resume: bool,
) -> Result<(), TshapeCliError> {
    let records = read_records(input, &input_format)?;
    if records.is_empty() {
        return Err(TshapeCliError::NoRecords);
    }

    let pipeline = FeaturePipeline::new(config.clone())?;
    let encoder = FeatureEncoder::new();
    let source = RecordSource::new(records, config.clone());

    match output_format {
        OutputFormat::Csv | OutputFormat::Ndjson => {}
        OutputFormat::Json | OutputFormat::JsonPretty => {
            if append {
                return Err(TshapeCliError::Usage(
                    "--append and --resume require csv or ndjson output".to_string(),
                ));
            }
            let payloads = extract_payloads(&source, &pipeline, &encoder, &config);
            let data = if output_format == OutputFormat::JsonPretty {
                serde_json::to_string_pretty(&payloads)?
            } else {
                serde_json::to_string(&payloads)?
            };
            return write_output(output, &data);
        }
    }

    let to_stdout = is_stdio(output);
    if resume && (to_stdout || output_format != OutputFormat::Csv) {
        return Err(TshapeCliError::Usage(
            "--resume requires a csv output file".to_string(),
        ));
    }

    let completed = if resume {
        existing_target_ids(output)?
    } else {
        Vec::new()
    };
    if !completed.is_empty() {
        info!(completed = completed.len(), "Resuming catalog run");
    }

    let has_header = !to_stdout && append && fs::metadata(output).map(|m| m.len() > 0).unwrap_or(false);
    let writer: Box<dyn Write> = if to_stdout {
        Box::new(io::stdout())
    } else if append {
        Box::new(OpenOptions::new().create(true).append(true).open(output)?)
    } else {
        Box::new(fs::File::create(output)?)
    };

    let mut sink: Box<dyn FeatureSink> = match output_format {
        OutputFormat::Csv if has_header => Box::new(CsvFeatureSink::appending(writer)),
        OutputFormat::Csv => {
            let mut csv = CsvFeatureSink::new(writer);
            csv.write_header()?;
            Box::new(csv)
        }
        _ => Box::new(NdjsonFeatureSink::new(writer, encoder, config.clone())),
    };

    let runner = CatalogRunner::new(pipeline).with_completed(completed);
    let summary = runner.run(source.target_ids(), &source, sink.as_mut())?;

    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        failed = summary.failed(),
        "Extraction finished"
    );
    Ok(())
}

fn cmd_fold(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    phase_units: PhaseUnits,
) -> Result<(), TshapeCliError> {
    let records = read_records(input, &input_format)?;
    if records.is_empty() {
        return Err(TshapeCliError::NoRecords);
    }

    let config = ExtractionConfig {
        phase_units,
        ..Default::default()
    };

    let mut lines = Vec::with_capacity(records.len());
    let mut failed = 0;
    for record in &records {
        match LightCurveAdapter::fold_record(record, &config) {
            Ok(folded) => lines.push(serde_json::to_string(&folded)?),
            Err(e) => {
                warn!(target_id = %record.target_id, error = %e, "Could not fold record");
                failed += 1;
            }
        }
    }

    let mut data = lines.join("\n");
    if !data.is_empty() {
        data.push('\n');
    }
    write_output(output, &data)?;

    if failed > 0 {
        Err(TshapeCliError::FoldFailed(failed))
    } else {
        Ok(())
    }
}

fn cmd_validate(input: &Path, input_format: InputFormat, json: bool) -> Result<(), TshapeCliError> {
    let records = read_records(input, &input_format)?;
    let results = LightCurveAdapter::validate_records(&records);

    let report = ValidationReport {
        total_records: records.len(),
        valid_records: records.len() - results.len(),
        invalid_records: results.len(),
        errors: results
            .iter()
            .map(|r| ValidationErrorDetail {
                index: r.index,
                target_id: r.target_id.clone(),
                error: r.result.as_ref().map(|e| e.to_string()).unwrap_or_default(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:   {}", report.total_records);
        println!("Valid records:   {}", report.valid_records);
        println!("Invalid records: {}", report.invalid_records);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!(
                    "  - Target {} (index {}): {}",
                    if err.target_id.is_empty() { "unknown" } else { &err.target_id },
                    err.index,
                    err.error
                );
            }
        }
    }

    if report.invalid_records > 0 {
        Err(TshapeCliError::ValidationFailed(report.invalid_records))
    } else {
        Ok(())
    }
}

fn cmd_doctor(config: Option<&Path>, json: bool) -> Result<(), TshapeCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "version".to_string(),
        status: CheckStatus::Ok,
        message: format!("{} version {}", PRODUCER_NAME, VERSION),
    });

    checks.push(DoctorCheck {
        name: "schema_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Input schema: {}, output schema: {}", SCHEMA_VERSION, OUTPUT_SCHEMA_VERSION),
    });

    if let Some(config_path) = config {
        let check = if !config_path.exists() {
            DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Warning,
                message: "Config file does not exist, defaults will be used".to_string(),
            }
        } else {
            match fs::read_to_string(config_path) {
                Ok(content) => match ExtractionConfig::from_json(&content) {
                    Ok(settings) => DoctorCheck {
                        name: "config".to_string(),
                        status: CheckStatus::Ok,
                        message: format!(
                            "Config valid (width {}, nbins {}, workers {})",
                            settings.width, settings.nbins, settings.workers
                        ),
                    },
                    Err(e) => DoctorCheck {
                        name: "config".to_string(),
                        status: CheckStatus::Error,
                        message: format!("Invalid config: {}", e),
                    },
                },
                Err(e) => DoctorCheck {
                    name: "config".to_string(),
                    status: CheckStatus::Error,
                    message: format!("Cannot read config file: {}", e),
                },
            }
        };
        checks.push(check);
    }

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (use -i - to read records from it)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("tshape Doctor Report");
        println!("====================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report.checks.iter().any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(TshapeCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType, json_schema: bool) -> Result<(), TshapeCliError> {
    match schema_type {
        SchemaType::Input => {
            if json_schema {
                println!("{}", get_input_json_schema());
            } else {
                println!("Input Schema: {}", SCHEMA_VERSION);
                println!();
                println!("One record per target with a curve of one of three kinds:");
                println!();
                println!("1. folded - Light curve already folded at the transit epoch");
                println!("   - phase, flux: index-aligned series of equal length");
                println!();
                println!("2. raw - Unfolded light curve plus the period search result");
                println!("   - time, flux: index-aligned series of equal length");
                println!("   - period (> 0), epoch: folded before extraction");
                println!();
                println!("3. unavailable - No curve for this target (skipped)");
                println!("   - reason: optional text");
                println!();
                println!("A series is a bare number array or {{ \"value\": [...], \"unit\": \"d\" }}.");
                println!("null entries are read as NaN.");
            }
        }
        SchemaType::Output => {
            if json_schema {
                println!("{}", get_output_json_schema());
            } else {
                println!("Output Schema: {}", OUTPUT_SCHEMA_VERSION);
                println!();
                println!("CSV columns: {}", encoder::csv_header().join(","));
                println!("Undefined metrics are empty cells.");
                println!();
                println!("JSON payload contains:");
                println!();
                println!("- schema_version: {}", OUTPUT_SCHEMA_VERSION);
                println!("- producer: {{ name, version, instance_id }}");
                println!("- provenance: {{ target_id, computed_at_utc, width, nbins }}");
                println!("- quality: {{ defined_metrics, undefined }}");
                println!("- features: {{ asymmetry_index, v_u_kurtosis, ingress_slope, egress_slope }}");
                println!("  (null when undefined)");
            }
        }
    }

    Ok(())
}

// Helper functions

fn is_stdio(path: &Path) -> bool {
    path.to_string_lossy() == "-"
}

fn read_records(input: &Path, format: &InputFormat) -> Result<Vec<LightCurveRecord>, TshapeCliError> {
    let input_data = if is_stdio(input) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let records = match format {
        InputFormat::Ndjson => LightCurveAdapter::parse_ndjson(&input_data)?,
        InputFormat::Json => LightCurveAdapter::parse_array(&input_data)?,
    };
    Ok(records)
}

fn write_output(output: &Path, data: &str) -> Result<(), TshapeCliError> {
    if is_stdio(output) {
        let mut stdout = io::stdout();
        stdout.write_all(data.as_bytes())?;
        stdout.flush()?;
    } else {
        fs::write(output, data)?;
    }
    Ok(())
}

/// Fold every available target and extract on the pipeline's worker threads
fn extract_payloads(
    source: &RecordSource,
    pipeline: &FeaturePipeline,
    encoder: &FeatureEncoder,
    config: &ExtractionConfig,
) -> Vec<FeaturePayload> {
    let mut target_ids = Vec::new();
    let mut curves: Vec<FoldedLightCurve> = Vec::new();

    for target_id in source.target_ids() {
        match source.folded_curve(target_id) {
            Ok(curve) => {
                target_ids.push(target_id.clone());
                curves.push(curve);
            }
            Err(e) if e.is_unavailable() => {
                warn!(target_id = %target_id, "No light curve available, skipping");
            }
            Err(e) => {
                warn!(target_id = %target_id, error = %e, "Invalid light curve");
            }
        }
    }

    target_ids
        .into_iter()
        .zip(pipeline.extract_batch(&curves))
        .filter_map(|(target_id, result)| match result {
            Ok(features) => Some(encoder.encode(&TargetFeatures { target_id, features }, config)),
            Err(e) => {
                warn!(target_id = %target_id, error = %e, "Feature extraction failed");
                None
            }
        })
        .collect()
}

fn get_input_json_schema() -> String {
    let series = serde_json::json!({
        "oneOf": [
            { "type": "array", "items": { "type": ["number", "null"] } },
            {
                "type": "object",
                "required": ["value"],
                "properties": {
                    "value": { "type": "array", "items": { "type": ["number", "null"] } },
                    "unit": { "type": "string" }
                }
            }
        ]
    });

    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": SCHEMA_VERSION,
        "description": "Folded or raw light curve for one target",
        "type": "object",
        "required": ["schema_version", "target_id", "curve"],
        "properties": {
            "schema_version": { "type": "string", "const": SCHEMA_VERSION },
            "target_id": { "type": ["string", "integer"] },
            "mission": { "type": "string" },
            "curve": {
                "oneOf": [
                    {
                        "type": "object",
                        "required": ["kind", "phase", "flux"],
                        "properties": {
                            "kind": { "const": "folded" },
                            "phase": series,
                            "flux": series
                        }
                    },
                    {
                        "type": "object",
                        "required": ["kind", "time", "flux", "period", "epoch"],
                        "properties": {
                            "kind": { "const": "raw" },
                            "time": series,
                            "flux": series,
                            "period": { "type": "number", "exclusiveMinimum": 0 },
                            "epoch": { "type": "number" }
                        }
                    },
                    {
                        "type": "object",
                        "required": ["kind"],
                        "properties": {
                            "kind": { "const": "unavailable" },
                            "reason": { "type": "string" }
                        }
                    }
                ]
            }
        }
    })
    .to_string()
}

fn get_output_json_schema() -> String {
    let metric = serde_json::json!({ "type": ["number", "null"] });

    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": OUTPUT_SCHEMA_VERSION,
        "description": "Transit-shape features for one target",
        "type": "object",
        "required": ["schema_version", "producer", "provenance", "quality", "features"],
        "properties": {
            "schema_version": { "type": "string", "const": OUTPUT_SCHEMA_VERSION },
            "producer": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "version": { "type": "string" },
                    "instance_id": { "type": "string" }
                }
            },
            "provenance": {
                "type": "object",
                "properties": {
                    "target_id": { "type": "string" },
                    "computed_at_utc": { "type": "string", "format": "date-time" },
                    "width": { "type": "number" },
                    "nbins": { "type": "integer" }
                }
            },
            "quality": {
                "type": "object",
                "properties": {
                    "defined_metrics": { "type": "integer", "minimum": 0, "maximum": 4 },
                    "undefined": { "type": "array", "items": { "type": "string" } }
                }
            },
            "features": {
                "type": "object",
                "properties": {
                    "asymmetry_index": metric,
                    "v_u_kurtosis": metric,
                    "ingress_slope": metric,
                    "egress_slope": metric
                }
            }
        }
    })
    .to_string()
}

// Error types

#[derive(Debug)]
enum TshapeCliError {
    Io(io::Error),
    Compute(ComputeError),
    Json(serde_json::Error),
    Usage(String),
    NoRecords,
    FoldFailed(usize),
    ValidationFailed(usize),
    DoctorFailed,
}

impl From<io::Error> for TshapeCliError {
    fn from(e: io::Error) -> Self {
        TshapeCliError::Io(e)
    }
}

impl From<ComputeError> for TshapeCliError {
    fn from(e: ComputeError) -> Self {
        TshapeCliError::Compute(e)
    }
}

impl From<serde_json::Error> for TshapeCliError {
    fn from(e: serde_json::Error) -> Self {
        TshapeCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<TshapeCliError> for CliError {
    fn from(e: TshapeCliError) -> Self {
        match e {
            TshapeCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            TshapeCliError::Compute(e) => {
                let (code, hint) = match &e {
                    ComputeError::InvalidWidth(_) | ComputeError::InvalidConfig(_) => {
                        ("CONFIG_ERROR", "Run 'tshape doctor --config <file>' to check settings")
                    }
                    ComputeError::Io(_) => ("IO_ERROR", "Check file paths and permissions"),
                    _ => (
                        "PARSE_ERROR",
                        "Ensure input matches lc.folded_curve.v1 schema",
                    ),
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            TshapeCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            TshapeCliError::Usage(msg) => CliError {
                code: "USAGE_ERROR".to_string(),
                message: msg,
                hint: Some("Run 'tshape extract --help'".to_string()),
            },
            TshapeCliError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            TshapeCliError::FoldFailed(count) => CliError {
                code: "FOLD_FAILED".to_string(),
                message: format!("{} records could not be folded", count),
                hint: Some("Run 'tshape validate' for details".to_string()),
            },
            TshapeCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            TshapeCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    valid_records: usize,
    invalid_records: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    target_id: String,
    error: String,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
