//! Receipt field extraction from transcription text.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::receipt::{Currency, ReceiptRecord, MERCHANT_FALLBACK};

use super::rules::amounts::{detect_amount, infer_currency, AmountRule};
use super::rules::merchant::detect_merchant;

/// Result of a single extraction, including diagnostics.
///
/// Deliberately not serializable: only the inner [`ReceiptRecord`] crosses
/// the service boundary, so the matched source line cannot leak through a
/// naive serialization of the whole result.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The externally visible record.
    pub record: ReceiptRecord,

    /// Source line that produced the amount. Logging only.
    pub matched_line: Option<String>,

    /// Detection rule that fired. Logging only.
    pub amount_rule: Option<AmountRule>,
}

/// Trait for receipt field extractors.
pub trait ReceiptExtractor {
    /// Extract receipt fields from transcription text. Must not fail:
    /// absent signals degrade to documented defaults.
    fn extract(&self, text: &str) -> Extraction;
}

/// Heuristic receipt parser.
///
/// Pure and deterministic; any input, including empty or garbled OCR
/// output, yields a fully populated record.
#[derive(Debug, Clone)]
pub struct ReceiptParser {
    /// Leading lines inspected for a merchant candidate.
    merchant_scan_window: usize,
    /// Merchant name truncation length.
    max_merchant_len: usize,
    /// Currency used when no signal is found (and for a bare `$`).
    default_currency: Currency,
}

impl ReceiptParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a parser from an extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            merchant_scan_window: config.merchant_scan_window,
            max_merchant_len: config.max_merchant_len,
            default_currency: config.default_currency,
        }
    }

    /// Set the merchant scan window.
    pub fn with_merchant_scan_window(mut self, window: usize) -> Self {
        self.merchant_scan_window = window;
        self
    }

    /// Set the default currency.
    pub fn with_default_currency(mut self, currency: Currency) -> Self {
        self.default_currency = currency;
        self
    }

    /// Split on any line-break sequence, trim, drop empty lines, keep order.
    fn normalize_lines(text: &str) -> Vec<&str> {
        text.split(['\r', '\n'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Run the extraction steps over one transcription.
    pub fn parse(&self, text: &str) -> Extraction {
        let lines = Self::normalize_lines(text);
        debug!("parsing receipt transcription: {} lines", lines.len());

        let merchant = detect_merchant(&lines, self.merchant_scan_window, self.max_merchant_len)
            .unwrap_or_else(|| MERCHANT_FALLBACK.to_string());

        let (amount, currency, matched_line, amount_rule) = match detect_amount(&lines) {
            Some(m) => {
                debug!(rule = ?m.rule, line = %m.line, "amount matched");
                let currency = infer_currency(&m.line, self.default_currency);
                (m.amount, currency, Some(m.line), Some(m.rule))
            }
            None => (Decimal::ZERO, self.default_currency, None, None),
        };

        info!(
            merchant = %merchant,
            amount = %amount,
            currency = currency.code(),
            "receipt extracted"
        );

        Extraction {
            record: ReceiptRecord {
                merchant,
                currency,
                amount,
            },
            matched_line,
            amount_rule,
        }
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptExtractor for ReceiptParser {
    fn extract(&self, text: &str) -> Extraction {
        self.parse(text)
    }
}
