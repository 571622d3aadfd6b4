//! Batch processing command for multiple invoice files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use cartslip_core::invoice::{GroceryInvoiceParser, InvoiceParser};
use cartslip_core::models::config::CartslipConfig;
use cartslip_core::models::invoice::ExtractionResult;

use super::process::{format_result, OutputFormat};
use super::{is_supported_input, load_config, load_document};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of files processed concurrently
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    outcome: Result<ExtractionResult, String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported_input(p))
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let results = process_all(files, Arc::new(config.clone()), args.jobs, &overall_pb).await?;
    overall_pb.finish_and_clear();

    for result in &results {
        if let Err(error_msg) = &result.outcome {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                anyhow::bail!("Processing failed for {}: {}", result.path.display(), error_msg);
            }
        }
    }

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            let Ok(extraction) = &result.outcome else {
                continue;
            };

            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("invoice");
            let output_path =
                output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            let content = format_result(extraction, args.format, config.output.pretty_json)?;
            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<&FileResult> = results.iter().filter(|r| r.outcome.is_err()).collect();
    let successful = results.len() - failed.len();
    let total_items: usize = results
        .iter()
        .filter_map(|r| r.outcome.as_ref().ok())
        .map(|e| e.items.len())
        .sum();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed, {} items",
        style(successful).green(),
        style(failed.len()).red(),
        total_items
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            if let Err(error_msg) = &result.outcome {
                println!("  - {}: {}", result.path.display(), error_msg);
            }
        }
    }

    Ok(())
}

/// Run every file on the blocking pool, at most `jobs` at a time. Results
/// come back in input order.
async fn process_all(
    files: Vec<PathBuf>,
    config: Arc<CartslipConfig>,
    jobs: usize,
    pb: &ProgressBar,
) -> anyhow::Result<Vec<FileResult>> {
    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let mut handles = Vec::with_capacity(files.len());

    for path in files {
        let semaphore = Arc::clone(&semaphore);
        let config = Arc::clone(&config);
        let pb = pb.clone();

        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let file_start = Instant::now();

            let task_path = path.clone();
            let outcome = tokio::task::spawn_blocking(move || process_file(&task_path, &config))
                .await?
                .map_err(|e| e.to_string());

            pb.inc(1);
            Ok::<_, anyhow::Error>(FileResult {
                path,
                outcome,
                processing_time_ms: file_start.elapsed().as_millis() as u64,
            })
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await??);
    }

    Ok(results)
}

fn process_file(path: &Path, config: &CartslipConfig) -> anyhow::Result<ExtractionResult> {
    let document = load_document(path, config)?;
    let parser = GroceryInvoiceParser::new().with_item_logging(config.output.log_items);
    Ok(parser.parse(&document))
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "provider",
        "items",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time_ms = result.processing_time_ms.to_string();

        match &result.outcome {
            Ok(extraction) => {
                let items = extraction.items.len().to_string();
                wtr.write_record([
                    filename,
                    "success",
                    extraction.provider.as_str(),
                    items.as_str(),
                    time_ms.as_str(),
                    "",
                ])?;
            }
            Err(error_msg) => {
                wtr.write_record([filename, "error", "", "", time_ms.as_str(), error_msg.as_str()])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
