//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};

use super::receipt::Currency;

/// Main configuration for the recr pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecrConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Transcription service configuration.
    pub transcription: TranscriptionConfig,
}

/// Receipt field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of leading lines scanned for a merchant candidate.
    pub merchant_scan_window: usize,

    /// Maximum merchant name length in characters.
    pub max_merchant_len: usize,

    /// Currency assumed when no marker is found, and the currency a bare
    /// `$` resolves to. SGD reflects the locale the heuristics were tuned
    /// for; it is a documented assumption, not a bug.
    pub default_currency: Currency,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            merchant_scan_window: 6,
            max_merchant_len: 60,
            default_currency: Currency::Sgd,
        }
    }
}

/// External recognition service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// Vision message API endpoint.
    pub endpoint: String,

    /// API key. Usually injected from the environment rather than stored
    /// in the config file.
    pub api_key: String,

    /// Model identifier; the client default is used when unset.
    pub model: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.anthropic.com/v1/messages".to_string(),
            api_key: String::new(),
            model: None,
            timeout_secs: 30,
        }
    }
}

impl RecrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
