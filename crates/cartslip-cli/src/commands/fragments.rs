//! Fragments command - dump the positioned text of a PDF.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use cartslip_core::models::document::TextDocument;
use cartslip_core::pdf::{PdfExtractor, TextSource};

use super::load_config;

/// Arguments for the fragments command.
#[derive(Args)]
pub struct FragmentsArgs {
    /// Input PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Emit the fragment JSON accepted by `process`
    #[arg(long)]
    json: bool,

    /// Only show this page (1-indexed)
    #[arg(short, long)]
    page: Option<u32>,
}

pub async fn run(args: FragmentsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let data = fs::read(&args.input)?;
    let mut extractor = PdfExtractor::from_config(&config.pdf);
    extractor.load(&data)?;

    let document = match args.page {
        Some(number) => TextDocument::new(vec![extractor.extract_page(number)?]),
        None => extractor.extract_document()?,
    };

    if args.json {
        println!("{}", document.to_json()?);
    } else {
        print!("{}", format_listing(&document));
    }

    Ok(())
}

/// One line per fragment, grouped under page headings.
pub fn format_listing(document: &TextDocument) -> String {
    let mut output = String::new();

    for page in &document.pages {
        output.push_str(&format!(
            "{} ({} fragments)\n",
            style(format!("Page {}", page.number)).bold(),
            page.fragments.len()
        ));

        for (idx, fragment) in page.fragments.iter().enumerate() {
            output.push_str(&format!(
                "[{}] X:{:.2} Y:{:.2} Text:{:?}\n",
                idx, fragment.x, fragment.y, fragment.content
            ));
        }
    }

    output
}
