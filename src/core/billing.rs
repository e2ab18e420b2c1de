//! Billing calculator
//!
//! Turns a meter reading into a bill:
//!
//! ```text
//! usage      = new_reading - last_reading
//! cost       = usage * unit_price
//! total_bill = cost + service_charge
//! ```
//!
//! [`compute_bill`] is pure. [`apply_bill`] produces the updated account the
//! caller swaps into the store; the input account is never mutated.

use crate::types::{Account, BillingError, RateEntry, RateTable, Transaction};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Result of pricing one meter reading
#[derive(Debug, Clone, PartialEq)]
pub struct BillQuote {
    /// Reading on record before this bill
    pub previous_reading: Decimal,

    /// Submitted reading
    pub new_reading: Decimal,

    /// Units consumed since the previous reading (never negative)
    pub usage: Decimal,

    /// usage * unit_price
    pub cost: Decimal,

    /// cost + service_charge
    pub total_bill: Decimal,
}

/// Price a new meter reading for an account
///
/// Zero usage is valid and yields a bill equal to the service charge.
///
/// # Errors
///
/// - `ReadingRegression` if `new_reading` is lower than the reading on record
/// - `ArithmeticOverflow` if the cost cannot be represented
pub fn compute_bill(
    account: &Account,
    new_reading: Decimal,
    rate_table: &RateTable,
) -> Result<BillQuote, BillingError> {
    if new_reading < account.last_reading {
        return Err(BillingError::reading_regression(
            account.id,
            account.last_reading,
            new_reading,
        ));
    }

    let rate = rate_table.get(account.service_type);
    price_usage(account, new_reading, rate)
}

fn price_usage(
    account: &Account,
    new_reading: Decimal,
    rate: &RateEntry,
) -> Result<BillQuote, BillingError> {
    let overflow = || BillingError::arithmetic_overflow("bill", account.id);

    let usage = new_reading
        .checked_sub(account.last_reading)
        .ok_or_else(overflow)?;
    let cost = usage.checked_mul(rate.unit_price).ok_or_else(overflow)?;
    let total_bill = cost.checked_add(rate.service_charge).ok_or_else(overflow)?;

    Ok(BillQuote {
        previous_reading: account.last_reading,
        new_reading,
        usage,
        cost,
        total_bill,
    })
}

/// Apply a quote to a copy of the account
///
/// The copy has the new reading, the bill added to its balance and a Bill
/// entry ("Usage: 40 kWh") at the front of its history.
///
/// # Errors
///
/// - `ReadingRegression` if the quote was priced against a different reading
/// - `ArithmeticOverflow` if the balance cannot absorb the bill
pub fn apply_bill(
    account: &Account,
    quote: &BillQuote,
    unit: &str,
    date: DateTime<Utc>,
) -> Result<Account, BillingError> {
    if quote.previous_reading != account.last_reading {
        return Err(BillingError::reading_regression(
            account.id,
            account.last_reading,
            quote.new_reading,
        ));
    }

    let balance = account
        .balance
        .checked_add(quote.total_bill)
        .ok_or_else(|| BillingError::arithmetic_overflow("bill", account.id))?;

    let mut updated = account.clone();
    updated.last_reading = quote.new_reading;
    updated.balance = balance;
    updated.push_history(Transaction::bill(
        date,
        format!("Usage: {} {}", quote.usage.normalize(), unit),
        quote.total_bill,
    ));

    Ok(updated)
}
