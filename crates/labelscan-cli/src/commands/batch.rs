//! Batch command - scan multiple label files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};

use labelscan_core::{LabelFacts, LabelParser};

use super::scan::read_transcript;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file JSON results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of scanning a single file.
struct ScanOutcome {
    path: PathBuf,
    facts: Option<LabelFacts>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(
                ext.to_lowercase().as_str(),
                "txt" | "text" | "png" | "jpg" | "jpeg" | "tiff" | "bmp"
            )
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files for pattern: {}", args.input);
    }

    println!("Scanning {} files", files.len());

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let parser = LabelParser::from_config(&config.extraction);
    let mut outcomes = Vec::with_capacity(files.len());

    for path in files {
        pb.set_message(path.display().to_string());

        let outcome = match read_transcript(&path, &config) {
            Ok(transcript) => {
                let facts = parser.extract_details(&transcript);
                debug!("{}: {} labels", path.display(), facts.labels.len());
                ScanOutcome {
                    path: path.clone(),
                    facts: Some(facts),
                    error: None,
                }
            }
            Err(e) => {
                error!("{}: {}", path.display(), e);
                if !args.continue_on_error {
                    pb.finish_and_clear();
                    return Err(e.into());
                }
                ScanOutcome {
                    path: path.clone(),
                    facts: None,
                    error: Some(e.to_string()),
                }
            }
        };

        if let (Some(dir), Some(facts)) = (&args.output_dir, &outcome.facts) {
            let file_name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("label");
            let out_path = dir.join(format!("{}.json", file_name));
            fs::write(&out_path, serde_json::to_string_pretty(facts)?)?;
        }

        outcomes.push(outcome);
        pb.inc(1);
    }

    pb.finish_with_message("Done");

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &outcomes)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    println!(
        "{} Scanned {} files ({} failed) in {:.1}s",
        style("✓").green(),
        outcomes.len(),
        failed,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn write_summary(path: &PathBuf, outcomes: &[ScanOutcome]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "file",
        "expiry_date",
        "manufactured_date",
        "batch",
        "mrp",
        "product_name",
        "error",
    ])?;

    for outcome in outcomes {
        let facts = outcome.facts.as_ref();
        let record = [
            outcome.path.display().to_string(),
            facts
                .and_then(|f| f.expiry_date)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            facts
                .and_then(|f| f.manufactured_date)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            facts.and_then(|f| f.batch.clone()).unwrap_or_default(),
            facts.and_then(|f| f.mrp.clone()).unwrap_or_default(),
            facts
                .and_then(|f| f.product_name.clone())
                .unwrap_or_default(),
            outcome.error.clone().unwrap_or_default(),
        ];
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
