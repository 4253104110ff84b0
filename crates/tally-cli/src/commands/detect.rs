//! Detect command - find the amount in already recognized text.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::debug;

use tally_core::{AmountDetector, TokenSource};

use super::scan::{format_detection, OutputFormat};

/// Arguments for the detect command.
#[derive(Args)]
pub struct DetectArgs {
    /// Text file to read (default: stdin)
    input: Option<PathBuf>,

    /// Detect in this text instead of reading a file
    #[arg(short, long, conflicts_with = "input")]
    text: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// List every candidate of both tiers
    #[arg(long)]
    show_candidates: bool,
}

pub async fn run(args: DetectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let text = match (&args.text, &args.input) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    debug!("Detecting amount in {} bytes of text", text.len());

    let detector = AmountDetector::from_config(&config.detection);
    let detection = detector.detect(&text);

    println!("{}", format_detection(&detection, args.format)?);

    if args.show_candidates {
        for source in [TokenSource::Primary, TokenSource::Fallback] {
            println!();
            println!("{}", style(format!("{} candidates:", source.as_str())).blue());
            for candidate in detector.candidates(&text, source) {
                println!("  {:>20}  {:?}", candidate.value, candidate.token);
            }
        }
    }

    Ok(())
}
