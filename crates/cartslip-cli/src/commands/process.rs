//! Process command - extract items from a single invoice file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cartslip_core::invoice::{GroceryInvoiceParser, InvoiceParser};
use cartslip_core::models::config::CartslipConfig;
use cartslip_core::models::invoice::ExtractionResult;

use super::{load_config, load_document};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or fragment JSON)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Treat an invoice without items as an error
    #[arg(long)]
    fail_on_empty: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per item
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = extract_file(&args.input, &config, &pb);
    pb.finish_and_clear();
    let result = result?;

    if args.fail_on_empty && result.is_empty() {
        anyhow::bail!("No items found in {}", args.input.display());
    }

    let output = format_result(&result, args.format, config.output.pretty_json)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} items written to {}",
            style("✓").green(),
            result.items.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn extract_file(
    input: &Path,
    config: &CartslipConfig,
    pb: &ProgressBar,
) -> anyhow::Result<ExtractionResult> {
    pb.set_message("Reading text...");
    let document = load_document(input, config)?;

    pb.set_message("Extracting items...");
    let parser = GroceryInvoiceParser::new().with_item_logging(config.output.log_items);

    Ok(parser.parse(&document))
}

/// Render a result in the requested format.
pub fn format_result(
    result: &ExtractionResult,
    format: OutputFormat,
    pretty_json: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty_json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["name", "count", "unit_value", "unit", "provider"])?;

    for item in &result.items {
        let count = item.count.to_string();
        let unit_value = item.unit_value.to_string();
        wtr.write_record([
            item.name.as_str(),
            count.as_str(),
            unit_value.as_str(),
            item.unit.as_str(),
            result.provider.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Provider: {}\n", result.provider));
    output.push_str(&format!("Items: {}\n", result.items.len()));

    if !result.items.is_empty() {
        output.push('\n');
    }
    for item in &result.items {
        output.push_str(&format!(
            "  {} x{}  ({} {})\n",
            item.name, item.count, item.unit_value, item.unit
        ));
    }

    output
}
