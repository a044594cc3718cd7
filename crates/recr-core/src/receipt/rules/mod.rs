//! Rule-based field extractors for receipt transcriptions.

pub mod amounts;
pub mod merchant;
pub mod patterns;

pub use amounts::{detect_amount, infer_currency, match_line, AmountMatch, AmountRule};
pub use merchant::{detect_merchant, is_merchant_candidate, sanitize_merchant};
