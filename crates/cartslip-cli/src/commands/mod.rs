//! Subcommands and the input handling they share.

pub mod batch;
pub mod config;
pub mod fragments;
pub mod name;
pub mod process;
pub mod rows;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use cartslip_core::models::config::CartslipConfig;
use cartslip_core::models::document::TextDocument;
use cartslip_core::pdf::PdfExtractor;

/// Per-user configuration file, the one `config init`/`config set` manage.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cartslip")
        .join("config.json")
}

/// Load the configuration.
///
/// An explicit `-c` file must exist. Without one the per-user file is read
/// when present, otherwise built-in defaults apply.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CartslipConfig> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => {
            let path = default_config_path();
            if !path.exists() {
                return Ok(CartslipConfig::default());
            }
            path
        }
    };

    debug!("Loading configuration from {}", path.display());
    Ok(CartslipConfig::from_file(&path)?)
}

/// Lowercased file extension, empty when absent.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Whether a path names an input this tool understands.
pub fn is_supported_input(path: &Path) -> bool {
    matches!(extension_of(path).as_str(), "pdf" | "json")
}

/// Read a document from a PDF or from a fragment JSON dump.
pub fn load_document(path: &Path, config: &CartslipConfig) -> anyhow::Result<TextDocument> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let extension = extension_of(path);
    let document = match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            PdfExtractor::from_config(&config.pdf).extract_from_bytes(&data)?
        }
        "json" => TextDocument::from_json(&fs::read_to_string(path)?)?,
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    debug!(
        "Loaded {} pages, {} fragments from {}",
        document.pages.len(),
        document.fragment_count(),
        path.display()
    );

    Ok(document)
}
