//! Numeric field parsing
//!
//! User-entered numbers are parsed strictly: empty, missing or non-numeric
//! text is an `InvalidNumericInput` error, never a silent zero.

use crate::types::{AccountId, BillingError};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an account id field
pub fn parse_account_id(field: &str, raw: &str) -> Result<AccountId, BillingError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<AccountId>()
        .map_err(|_| BillingError::invalid_numeric_input(field, trimmed))
}

/// Parse a decimal field (readings and amounts)
///
/// Accepts plain decimal notation such as `271`, `45.50` or `-5`.
pub fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, BillingError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BillingError::invalid_numeric_input(field, trimmed));
    }

    Decimal::from_str(trimmed).map_err(|_| BillingError::invalid_numeric_input(field, trimmed))
}
