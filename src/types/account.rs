//! Account-related types for the utility billing engine
//!
//! This module defines the Account structure: a customer's identity, the
//! service they are billed for, their running balance, their last meter
//! reading and their transaction history.

use super::service::ServiceType;
use super::transaction::{AccountId, Transaction};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Customer billing record
///
/// The balance always equals the sum of the history amounts. History is
/// ordered most recent first.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Unique id, never reassigned
    pub id: AccountId,

    /// Customer name (never blank)
    pub name: String,

    pub service_type: ServiceType,

    /// Amount owed; zero or negative means paid up or in credit
    pub balance: Decimal,

    /// Most recent meter reading (non-decreasing)
    pub last_reading: Decimal,

    /// Bills and payments, most recent first
    pub history: Vec<Transaction>,
}

impl Account {
    /// Create a freshly registered account
    ///
    /// # Returns
    ///
    /// A new Account with:
    /// - balance = 0
    /// - last_reading = 0
    /// - empty history
    pub fn new(id: AccountId, name: impl Into<String>, service_type: ServiceType) -> Self {
        Account {
            id,
            name: name.into(),
            service_type,
            balance: Decimal::ZERO,
            last_reading: Decimal::ZERO,
            history: Vec::new(),
        }
    }

    /// Create an account carried over with an existing balance and reading
    ///
    /// A non-zero opening balance is recorded as a single history entry
    /// ("Opening balance" bill, or "Opening credit" payment) so the balance
    /// stays equal to the sum of the history.
    pub fn with_opening_state(
        id: AccountId,
        name: impl Into<String>,
        service_type: ServiceType,
        balance: Decimal,
        last_reading: Decimal,
        date: DateTime<Utc>,
    ) -> Self {
        let mut account = Account::new(id, name, service_type);
        account.last_reading = last_reading;
        account.balance = balance;

        if balance > Decimal::ZERO {
            account
                .history
                .push(Transaction::bill(date, "Opening balance", balance));
        } else if balance < Decimal::ZERO {
            account
                .history
                .push(Transaction::payment(date, "Opening credit", -balance));
        }

        account
    }

    /// Whether the account currently owes money
    pub fn is_due(&self) -> bool {
        self.balance > Decimal::ZERO
    }

    /// Sum of all history amounts
    pub fn history_total(&self) -> Decimal {
        self.history.iter().map(|entry| entry.amount).sum()
    }

    /// Prepend a history entry
    pub(crate) fn push_history(&mut self, entry: Transaction) {
        self.history.insert(0, entry);
    }
}
