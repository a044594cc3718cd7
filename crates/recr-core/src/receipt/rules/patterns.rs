//! Regex patterns for receipt field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Merchant deny-list: receipt metadata keywords that disqualify a line
    // from being the merchant name.
    pub static ref DENY_KEYWORD: Regex = Regex::new(
        r"(?i)\b(?:total|date|time|invoice|batch|approval|trans\s+id|customer|wechat|visa|master|sale|receipt|cashier)\b"
    ).unwrap();

    // Keywords that also occur inside legitimate shop names; they only
    // disqualify in label position ("STORE #123", "MID: 0042", "TID 55").
    pub static ref DENY_LABEL: Regex = Regex::new(
        r"(?i)\b(?:store|host|mid|tid)\b\s*(?:[:#]|\d)"
    ).unwrap();

    // Characters stripped from a merchant name. Word characters,
    // whitespace, hyphen, ampersand, period and comma survive.
    pub static ref MERCHANT_STRIP: Regex = Regex::new(
        r"[^\w\s\-&.,]"
    ).unwrap();

    // Amount token: digits, comma or period separator, exactly two
    // fractional digits. A trailing digit invalidates the token, so
    // "12.5" and "12.505" never match.
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"(\d+[.,]\d{2})(?:\D|$)"
    ).unwrap();

    // Rule 1: TOTAL keyword, optional currency marker, amount token.
    pub static ref TOTAL_AMOUNT: Regex = Regex::new(
        r"(?i)\bTOTAL\b.*?(?:(?:SGD|HKD|CNY|USD|S\$|\$|RM)\s*)?(\d+[.,]\d{2})(?:\D|$)"
    ).unwrap();

    // Rule 2: AMOUNT DUE / AMOUNT / AMT keyword, amount token.
    pub static ref LABELED_AMOUNT: Regex = Regex::new(
        r"(?i)\b(?:AMOUNT\s+DUE|AMOUNT|AMT)\b.*?(\d+[.,]\d{2})(?:\D|$)"
    ).unwrap();

    // Rule 3: currency code immediately before AMOUNT, amount token.
    pub static ref CURRENCY_AMOUNT: Regex = Regex::new(
        r"(?i)\b(?:SGD|HKD|CNY|USD|MYR)\s*AMOUNT\b.*?(\d+[.,]\d{2})(?:\D|$)"
    ).unwrap();

    // Rule 4: bare S$/$ marker immediately before the token. Lowest
    // priority fallback.
    pub static ref DOLLAR_AMOUNT: Regex = Regex::new(
        r"(?i)S?\$\s*(\d+[.,]\d{2})(?:\D|$)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deny_keyword_whole_words() {
        assert!(DENY_KEYWORD.is_match("TAX INVOICE"));
        assert!(DENY_KEYWORD.is_match("Date: 01/01/2024"));
        assert!(DENY_KEYWORD.is_match("TRANS ID 445"));
        assert!(DENY_KEYWORD.is_match("receipt"));
        // Word boundaries: embedded keywords do not fire.
        assert!(!DENY_KEYWORD.is_match("WHOLESALE MART"));
        assert!(!DENY_KEYWORD.is_match("UPDATES CORNER"));
    }

    #[test]
    fn test_deny_label_position_only() {
        assert!(DENY_LABEL.is_match("STORE #123"));
        assert!(DENY_LABEL.is_match("STORE: 0042"));
        assert!(DENY_LABEL.is_match("MID 000123456"));
        assert!(DENY_LABEL.is_match("TID:55501"));
        assert!(!DENY_LABEL.is_match("STORE NAME"));
        assert!(!DENY_LABEL.is_match("MIDAS JEWELLERY"));
    }

    #[test]
    fn test_amount_token_two_fraction_digits() {
        assert!(AMOUNT_TOKEN.is_match("23.50"));
        assert!(AMOUNT_TOKEN.is_match("23,50"));
        assert!(!AMOUNT_TOKEN.is_match("12.5"));
        assert!(!AMOUNT_TOKEN.is_match("12.505"));
    }

    #[test]
    fn test_total_requires_keyword_boundary() {
        assert!(TOTAL_AMOUNT.is_match("TOTAL: 23.50"));
        assert!(TOTAL_AMOUNT.is_match("total sgd 23.50"));
        assert!(!TOTAL_AMOUNT.is_match("SUBTOTAL: 23.50"));
        assert!(!TOTAL_AMOUNT.is_match("TOTAL: 12.5"));
    }

    #[test]
    fn test_dollar_fallback() {
        assert!(DOLLAR_AMOUNT.is_match("$9.99"));
        assert!(DOLLAR_AMOUNT.is_match("S$ 12.00"));
        assert!(!DOLLAR_AMOUNT.is_match("9.99"));
    }
}
