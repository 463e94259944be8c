//! Scan command - extract label facts from a single file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::{debug, info};

use labelscan_core::{LabelFacts, LabelParser, LabelscanConfig, LabelscanError, create_engine};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Input file (label image, or .txt transcript)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print the raw OCR transcript as well
    #[arg(long)]
    show_transcript: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Scanning file: {}", args.input.display());

    let transcript = read_transcript(&args.input, &config)?;
    debug!("transcript is {} chars", transcript.len());

    let parser = LabelParser::from_config(&config.extraction);
    let facts = parser.extract_details(&transcript);

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&facts)?,
        OutputFormat::Text => format_text(&facts, args.show_transcript),
    };

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

    Ok(())
}

/// Read the transcript: text files directly, images through the
/// configured OCR engine.
pub fn read_transcript(path: &Path, config: &LabelscanConfig) -> labelscan_core::Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "txt" | "text" => Ok(fs::read_to_string(path)?),
        "png" | "jpg" | "jpeg" | "tiff" | "bmp" => {
            let image = image::open(path)?;
            let engine = create_engine(config)?;
            info!("recognizing with {} engine", engine.name());
            Ok(engine.recognize(&image)?)
        }
        _ => Err(LabelscanError::UnsupportedFormat(extension)),
    }
}

fn format_text(facts: &LabelFacts, show_transcript: bool) -> String {
    let mut out = String::new();

    match &facts.product_name {
        Some(name) => out.push_str(&format!("{} {}\n", style("Product:").bold(), name)),
        None => out.push_str(&format!("{} (not detected)\n", style("Product:").bold())),
    }

    match facts.expiry_date {
        Some(expiry) => {
            out.push_str(&format!(
                "{} {} ({})\n",
                style("Expiry:").bold(),
                expiry.format("%Y-%m-%d"),
                expiry_status(expiry)
            ));
        }
        None => out.push_str(&format!("{} (no date detected)\n", style("Expiry:").bold())),
    }

    for (name, value) in &facts.labels {
        out.push_str(&format!("{} {}\n", style(format!("{}:", name)).bold(), value));
    }

    if show_transcript {
        out.push_str(&format!("\n{}\n{}\n", style("Transcript:").dim(), facts.raw_text));
    }

    out.trim_end().to_string()
}

/// Human-readable days-left status, derived from the expiry date by
/// calendar-day subtraction.
fn expiry_status(expiry: chrono::NaiveDate) -> String {
    let today = chrono::Local::now().date_naive();
    let days = expiry.signed_duration_since(today).num_days();

    if days < 0 {
        style(format!("expired {} days ago", -days)).red().to_string()
    } else if days == 0 {
        style("expires today".to_string()).yellow().to_string()
    } else {
        style(format!("{} days left", days)).green().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};
    use labelscan_core::extract_details;

    #[test]
    fn test_expiry_status_wording() {
        let today = Local::now().date_naive();
        assert!(expiry_status(today).contains("expires today"));
        assert!(expiry_status(today + Duration::days(10)).contains("10 days left"));
        assert!(expiry_status(today - Duration::days(3)).contains("expired 3 days ago"));
    }

    #[test]
    fn test_format_text_lists_labels() {
        let facts = extract_details("MFD 01/02/24 LOT XYZ9");
        let text = format_text(&facts, false);
        assert!(text.contains("Batch/Lot"));
        assert!(text.contains("XYZ9"));
        assert!(text.contains("Manufactured"));
    }
}
