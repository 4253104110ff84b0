//! Batch command - scan multiple receipt images.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use tally_core::{Detection, PureOcrEngine, ReceiptScanner};

use super::scan::{build_scanner, format_detection, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching receipt images
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Result of scanning a single file.
struct ScanRecord {
    path: PathBuf,
    detection: Option<Detection>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let files = expand_images(&args.input)?;
    if files.is_empty() {
        anyhow::bail!("No matching images found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} receipts to scan",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let scanner = build_scanner(args.model_dir.as_deref(), &config)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} receipts")?
            .progress_chars("=>-"),
    );

    let mut records = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = scan_file(&path, &scanner);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(detection) => records.push(ScanRecord {
                path,
                detection: Some(detection),
                error: None,
                processing_time_ms,
            }),
            Err(e) if args.continue_on_error => {
                warn!("Failed to scan {}: {}", path.display(), e);
                records.push(ScanRecord {
                    path,
                    detection: None,
                    error: Some(e.to_string()),
                    processing_time_ms,
                });
            }
            Err(e) => {
                error!("Failed to scan {}: {}", path.display(), e);
                anyhow::bail!("Scanning failed: {}", e);
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if let Some(output_dir) = &args.output_dir {
        for record in &records {
            let Some(detection) = &record.detection else {
                continue;
            };

            let stem = record
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("receipt");
            let output_path = output_dir.join(format!("{}.{}", stem, args.format.extension()));

            fs::write(&output_path, format_detection(detection, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &records)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let detected = records
        .iter()
        .filter(|r| r.detection.as_ref().is_some_and(Detection::is_found))
        .count();
    let failed: Vec<_> = records.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Scanned {} receipts in {:?}",
        style("✓").green(),
        records.len(),
        start.elapsed()
    );
    println!(
        "   {} detected, {} nothing detected, {} failed",
        style(detected).green(),
        style(records.len() - detected - failed.len()).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for record in &failed {
            println!(
                "  - {}: {}",
                record.path.display(),
                record.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Expand a glob into image files, sorted for stable output.
fn expand_images(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = glob(pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| is_image(p))
        .collect();
    files.sort();
    Ok(files)
}

fn is_image(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    matches!(
        ext.as_str(),
        "png" | "jpg" | "jpeg" | "webp" | "tiff" | "tif" | "bmp"
    )
}

fn scan_file(path: &Path, scanner: &ReceiptScanner<PureOcrEngine>) -> anyhow::Result<Detection> {
    Ok(scanner.scan_file(path)?.detection)
}

fn write_summary(path: &Path, records: &[ScanRecord]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "amount",
        "display",
        "source",
        "processing_time_ms",
        "error",
    ])?;

    for record in records {
        let filename = record
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time = record.processing_time_ms.to_string();

        match &record.detection {
            Some(Detection::Found(found)) => {
                let amount = found.amount.to_string();
                wtr.write_record([
                    filename,
                    "found",
                    amount.as_str(),
                    found.display.as_str(),
                    found.source.as_str(),
                    time.as_str(),
                    "",
                ])?
            }
            Some(Detection::NothingDetected) => {
                wtr.write_record([filename, "nothing_detected", "", "", "", time.as_str(), ""])?
            }
            None => wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                time.as_str(),
                record.error.as_deref().unwrap_or(""),
            ])?,
        }
    }

    wtr.flush()?;
    Ok(())
}
