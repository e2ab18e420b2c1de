//! Transaction-related types for the utility billing engine
//!
//! This module defines the history entries recorded on accounts and the
//! action records a driver feeds into the engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

use super::service::ServiceType;

/// Account identifier
///
/// Assigned monotonically by the account store, starting at the configured base id
pub type AccountId = u32;

/// Kind of a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Charge from a meter reading; increases the balance
    Bill,

    /// Money received; decreases the balance
    Payment,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Bill => f.write_str("BILL"),
            TransactionKind::Payment => f.write_str("PAYMENT"),
        }
    }
}

/// Immutable entry in an account's history
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// When the entry was created
    pub date: DateTime<Utc>,

    pub kind: TransactionKind,

    /// Free text, e.g. "Usage: 40 kWh" or "Cash/Online Payment"
    pub description: String,

    /// Signed amount: positive for bills, negative for payments
    pub amount: Decimal,
}

impl Transaction {
    pub fn bill(date: DateTime<Utc>, description: impl Into<String>, amount: Decimal) -> Self {
        Transaction {
            date,
            kind: TransactionKind::Bill,
            description: description.into(),
            amount,
        }
    }

    /// Payment entry; `paid` is the positive amount received and is stored negated
    pub fn payment(date: DateTime<Utc>, description: impl Into<String>, paid: Decimal) -> Self {
        Transaction {
            date,
            kind: TransactionKind::Payment,
            description: description.into(),
            amount: -paid,
        }
    }
}

/// One user action, as parsed from driver input
///
/// Numeric fields are already validated; parsing failures never reach the
/// engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionRecord {
    /// Register a new customer account
    Register {
        name: String,
        service_type: ServiceType,
    },

    /// Submit a meter reading and generate a bill
    Reading {
        account: AccountId,
        reading: Decimal,
    },

    /// Record a payment against an account
    Payment { account: AccountId, amount: Decimal },

    /// Produce a billing statement without changing the account
    Statement { account: AccountId },
}

impl ActionRecord {
    /// Lowercase action name as it appears in input files
    pub fn name(&self) -> &'static str {
        match self {
            ActionRecord::Register { .. } => "register",
            ActionRecord::Reading { .. } => "reading",
            ActionRecord::Payment { .. } => "payment",
            ActionRecord::Statement { .. } => "statement",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_entry_stores_negated_amount() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let entry = Transaction::payment(date, "Cash/Online Payment", dec!(45.50));
        assert_eq!(entry.kind, TransactionKind::Payment);
        assert_eq!(entry.amount, dec!(-45.50));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TransactionKind::Bill.to_string(), "BILL");
        assert_eq!(TransactionKind::Payment.to_string(), "PAYMENT");
    }
}
