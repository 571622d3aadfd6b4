//! Configuration structures for the extraction pipeline.
//!
//! Only the surroundings of the engine are configurable. Row tolerance,
//! column offsets and the accepted quantity range are fixed constants of the
//! engine itself.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CartslipError;

/// Main configuration for cartslip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartslipConfig {
    /// PDF decoding configuration.
    pub pdf: PdfConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// PDF decoding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Try the empty user password on encrypted documents.
    pub decrypt_with_empty_password: bool,

    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            decrypt_with_empty_password: true,
            max_pages: 0,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty_json: bool,

    /// Log every extracted item at info level.
    pub log_items: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: false,
            log_items: true,
        }
    }
}

impl CartslipConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| CartslipError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CartslipConfig =
            serde_json::from_str(r#"{"pdf": {"max_pages": 3}}"#).unwrap();

        assert_eq!(config.pdf.max_pages, 3);
        assert!(config.pdf.decrypt_with_empty_password);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = CartslipConfig::default();
        config.output.pretty_json = true;
        config.save(&path).unwrap();

        assert_eq!(CartslipConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = CartslipConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CartslipError::Config(_)));
    }
}
