//! Merchant-name detection from receipt header lines.

use super::patterns::{DENY_KEYWORD, DENY_LABEL, MERCHANT_STRIP};

/// Check whether a line may serve as the merchant name: not deny-listed,
/// at least one alphabetic character, trimmed length >= 3.
pub fn is_merchant_candidate(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.chars().count() >= 3
        && trimmed.chars().any(|c| c.is_alphabetic())
        && !DENY_KEYWORD.is_match(trimmed)
        && !DENY_LABEL.is_match(trimmed)
}

/// Strip disallowed characters and truncate to `max_len` characters.
pub fn sanitize_merchant(line: &str, max_len: usize) -> String {
    let cleaned = MERCHANT_STRIP.replace_all(line, "");
    cleaned.trim().chars().take(max_len).collect()
}

/// Scan the first `window` lines in order; the first qualifying line wins.
pub fn detect_merchant(lines: &[&str], window: usize, max_len: usize) -> Option<String> {
    lines
        .iter()
        .take(window)
        .find(|line| is_merchant_candidate(line))
        .map(|line| sanitize_merchant(line, max_len))
        .filter(|name| !name.is_empty())
}
