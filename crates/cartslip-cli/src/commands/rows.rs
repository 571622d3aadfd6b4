//! Rows command - show how fragments cluster into rows and where the
//! columns were found.

use std::path::PathBuf;

use clap::Args;
use console::style;

use cartslip_core::invoice::{cluster_rows, locate_columns};
use cartslip_core::models::document::TextPage;

use super::{load_config, load_document};

/// Arguments for the rows command.
#[derive(Args)]
pub struct RowsArgs {
    /// Input file (PDF or fragment JSON)
    #[arg(required = true)]
    input: PathBuf,
}

pub async fn run(args: RowsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let document = load_document(&args.input, &config)?;

    for page in &document.pages {
        print!("{}", format_page(page));
    }

    Ok(())
}

fn format_page(page: &TextPage) -> String {
    let rows = cluster_rows(&page.fragments);
    let columns = locate_columns(&rows);
    let mut output = String::new();

    output.push_str(&format!(
        "{} ({} rows)\n",
        style(format!("Page {}", page.number)).bold(),
        rows.len()
    ));

    for row in &rows {
        output.push_str(&format!("  y={:<8.2} {}\n", row.y, row.joined_text()));
    }

    if columns.is_complete() {
        output.push_str(&format!(
            "  columns: name_x={:.2} qty_x={:.2}\n",
            columns.name_x, columns.qty_x
        ));
    } else {
        output.push_str(&format!(
            "  {} (name_x={:.2} qty_x={:.2}), page yields no items\n",
            style("columns not found").yellow(),
            columns.name_x,
            columns.qty_x
        ));
    }

    output
}
