//! Scan command - detect the amount on a single receipt image.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use tally_core::{create_engine_from_dir, Detection, PureOcrEngine, ReceiptScanner, TallyConfig};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Receipt image (PNG, JPEG, WebP, TIFF, BMP)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Language hint for recognition (e.g. "vie+eng")
    #[arg(short, long)]
    language: Option<String>,

    /// Also print the recognized text
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for outputs in this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(language) = &args.language {
        config.ocr.language = language.clone();
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Scanning receipt: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Loading OCR models...");
    let scanner = build_scanner(args.model_dir.as_deref(), &config)?;

    pb.set_message("Recognizing text...");
    let outcome = scanner
        .scan_file(&args.input)
        .map_err(|e| anyhow::anyhow!("Recognition failed: {}", e))?;

    pb.finish_and_clear();

    debug!("Recognized text:\n{}", outcome.text);

    let output = format_detection(&outcome.detection, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_text {
        println!();
        println!("{}", style("Recognized text:").blue());
        println!("{}", outcome.text);
    }

    debug!("Total processing time: {}ms", outcome.processing_time_ms);

    Ok(())
}

/// Build a scanner over the `pure-onnx-ocr` models in `model_dir`, or the configured directory.
pub fn build_scanner(
    model_dir: Option<&Path>,
    config: &TallyConfig,
) -> anyhow::Result<ReceiptScanner<PureOcrEngine>> {
    let model_dir = model_dir.unwrap_or(&config.models.model_dir);

    let engine = create_engine_from_dir(model_dir, config).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load OCR models from {}: {}\n\n\
             Place {}, {} and {} there or pass --model-dir.",
            model_dir.display(),
            e,
            config.models.detection_model,
            config.models.recognition_model,
            config.models.dictionary
        )
    })?;

    Ok(ReceiptScanner::from_config(engine, config)?)
}

/// Render a detection in the requested format.
pub fn format_detection(detection: &Detection, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(detection)?),
        OutputFormat::Csv => format_csv(detection),
        OutputFormat::Text => Ok(format_text(detection)),
    }
}

fn format_csv(detection: &Detection) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["status", "amount", "display", "raw_value", "source", "token"])?;

    match detection {
        Detection::Found(found) => {
            let amount = found.amount.to_string();
            let raw_value = found.raw_value.to_string();
            wtr.write_record([
                "found",
                amount.as_str(),
                found.display.as_str(),
                raw_value.as_str(),
                found.source.as_str(),
                found.token.as_str(),
            ])?
        }
        Detection::NothingDetected => {
            wtr.write_record(["nothing_detected", "", "", "", "", ""])?
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(detection: &Detection) -> String {
    match detection {
        Detection::Found(found) => format!(
            "{} Detected: {}\n  Amount: {}\n  Token:  {} ({} tier)",
            style("✓").green(),
            found.display,
            found.amount,
            found.token,
            found.source.as_str()
        ),
        Detection::NothingDetected => format!("{} No amount detected", style("ℹ").yellow()),
    }
}
