//! Receipt data models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel merchant name used when no header line qualifies.
pub const MERCHANT_FALLBACK: &str = "-";

/// Currencies the extractor can report.
///
/// Serializes as the 3-letter ISO code. The set mirrors the currency
/// markers recognized on receipt lines (`RM` maps to MYR).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    /// Singapore dollar (also the `S$` and bare `$` marker).
    #[default]
    #[serde(rename = "SGD")]
    Sgd,

    /// Chinese yuan.
    #[serde(rename = "CNY")]
    Cny,

    /// US dollar.
    #[serde(rename = "USD")]
    Usd,

    /// Hong Kong dollar.
    #[serde(rename = "HKD")]
    Hkd,

    /// Malaysian ringgit (printed as `RM` on receipts).
    #[serde(rename = "MYR")]
    Myr,
}

impl Currency {
    /// The 3-letter ISO code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Sgd => "SGD",
            Currency::Cny => "CNY",
            Currency::Usd => "USD",
            Currency::Hkd => "HKD",
            Currency::Myr => "MYR",
        }
    }

    /// Parse a currency code or receipt marker.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "SGD" | "S$" => Some(Currency::Sgd),
            "CNY" => Some(Currency::Cny),
            "USD" => Some(Currency::Usd),
            "HKD" => Some(Currency::Hkd),
            "MYR" | "RM" => Some(Currency::Myr),
            _ => None,
        }
    }
}

/// The externally visible extraction result.
///
/// Exactly three fields cross the service boundary. Diagnostics live on
/// [`crate::receipt::Extraction`], which is deliberately not serializable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Merchant name, 1-60 characters, `"-"` when nothing qualified.
    pub merchant: String,

    /// Detected or default currency.
    pub currency: Currency,

    /// Non-negative total amount, `0` when no pattern matched.
    pub amount: Decimal,
}

impl ReceiptRecord {
    /// The record returned for empty or unusable transcriptions.
    pub fn empty(currency: Currency) -> Self {
        Self {
            merchant: MERCHANT_FALLBACK.to_string(),
            currency,
            amount: Decimal::ZERO,
        }
    }
}
