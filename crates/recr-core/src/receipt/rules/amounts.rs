//! Amount and currency detection for receipts.

use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;

use crate::models::receipt::Currency;

use super::patterns::{CURRENCY_AMOUNT, DOLLAR_AMOUNT, LABELED_AMOUNT, TOTAL_AMOUNT};

/// Which detection rule produced an amount match, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountRule {
    /// `TOTAL` keyword followed by the token.
    TotalKeyword,
    /// `AMOUNT DUE` / `AMOUNT` / `AMT` followed by the token.
    AmountKeyword,
    /// 3-letter currency code immediately before `AMOUNT`.
    CurrencyAmount,
    /// Bare `S$`/`$` immediately before the token.
    DollarFallback,
}

/// An amount match on a single line.
#[derive(Debug, Clone)]
pub struct AmountMatch {
    /// Parsed amount value.
    pub amount: Decimal,
    /// Rule that fired.
    pub rule: AmountRule,
    /// The source line, kept for currency inference and diagnostics.
    pub line: String,
}

/// The ordered rule table; earlier entries win on the same line.
fn rule_table() -> [(AmountRule, &'static Regex); 4] {
    [
        (AmountRule::TotalKeyword, &*TOTAL_AMOUNT),
        (AmountRule::AmountKeyword, &*LABELED_AMOUNT),
        (AmountRule::CurrencyAmount, &*CURRENCY_AMOUNT),
        (AmountRule::DollarFallback, &*DOLLAR_AMOUNT),
    ]
}

/// Try each rule in priority order against one line.
pub fn match_line(line: &str) -> Option<AmountMatch> {
    for (rule, pattern) in rule_table() {
        if let Some(caps) = pattern.captures(line) {
            if let Some(amount) = parse_amount_token(&caps[1]) {
                return Some(AmountMatch {
                    amount,
                    rule,
                    line: line.to_string(),
                });
            }
        }
    }
    None
}

/// Scan lines top to bottom; the first line where any rule matches wins
/// and scanning stops.
pub fn detect_amount(lines: &[&str]) -> Option<AmountMatch> {
    lines.iter().find_map(|line| match_line(line))
}

/// Normalize a matched token (comma separator becomes period) and parse it.
pub fn parse_amount_token(token: &str) -> Option<Decimal> {
    Decimal::from_str(&token.replace(',', ".")).ok()
}

/// Infer the currency from the line that produced the amount.
///
/// Only CNY and SGD have explicit signals; a bare `$` and the no-signal
/// case both resolve to `default`, preserving the original `$`-means-local
/// heuristic as configurable behavior.
pub fn infer_currency(line: &str, default: Currency) -> Currency {
    let upper = line.to_uppercase();
    if upper.contains("CNY") {
        Currency::Cny
    } else if upper.contains("SGD") || upper.contains("S$") {
        Currency::Sgd
    } else {
        default
    }
}
