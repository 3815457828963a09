//! Configuration for the ingestion pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TripdraftError};

/// Pipeline configuration.
///
/// Built once at startup and shared read-only between concurrent calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Minimum number of characters of embedded PDF text required before
    /// field picking is attempted. Shorter text is treated as a scanned
    /// document without a text layer.
    pub min_text_chars: usize,

    /// Intended default currency for drafts.
    ///
    /// The field picker does not consult this value yet; drafts always carry
    /// [`DEFAULT_CURRENCY`](crate::models::expense::DEFAULT_CURRENCY).
    pub currency_default: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_text_chars: 300,
            currency_default: "USD".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Set the minimum text length.
    pub fn with_min_text_chars(mut self, min_text_chars: usize) -> Self {
        self.min_text_chars = min_text_chars;
        self
    }

    /// Set the default currency.
    pub fn with_currency_default(mut self, currency: impl Into<String>) -> Self {
        self.currency_default = currency.into();
        self
    }

    /// Check that the configuration values are usable.
    pub fn validate(&self) -> Result<()> {
        let code = self.currency_default.as_str();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(TripdraftError::Config(format!(
                "currency_default must be a three-letter uppercase code, got {:?}",
                code
            )));
        }
        Ok(())
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| TripdraftError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| TripdraftError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
