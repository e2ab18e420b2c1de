//! Billing statements and payment receipts
//!
//! A statement is produced after every bill and on request; a receipt after
//! every payment. Both render to the same fixed-width text slip.

use crate::types::{Account, AccountId, RateTable, ServiceType};
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

const RULE: &str = "==================================";
const THIN_RULE: &str = "----------------------------------";

/// Format a money amount with two decimals, rounding half away from zero
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Billing statement for one account
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub account_id: AccountId,
    pub customer: String,
    pub service_type: ServiceType,
    pub date: DateTime<Utc>,
    pub last_reading: Decimal,
    pub unit: String,

    /// Usage billed by the reading that produced this statement, if any
    pub usage: Option<Decimal>,

    /// Current balance
    pub total_due: Decimal,
}

impl Statement {
    pub fn for_account(
        account: &Account,
        rates: &RateTable,
        usage: Option<Decimal>,
        date: DateTime<Utc>,
    ) -> Self {
        Statement {
            account_id: account.id,
            customer: account.name.clone(),
            service_type: account.service_type,
            date,
            last_reading: account.last_reading,
            unit: rates.get(account.service_type).unit.clone(),
            usage,
            total_due: account.balance,
        }
    }
}

/// Receipt for one payment
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub account_id: AccountId,
    pub customer: String,
    pub service_type: ServiceType,
    pub date: DateTime<Utc>,
    pub amount_paid: Decimal,

    /// Balance after the payment
    pub new_balance: Decimal,
}

impl Receipt {
    /// Receipt for `account` as it stands after the payment
    pub fn for_account(account: &Account, amount_paid: Decimal, date: DateTime<Utc>) -> Self {
        Receipt {
            account_id: account.id,
            customer: account.name.clone(),
            service_type: account.service_type,
            date,
            amount_paid,
            new_balance: account.balance,
        }
    }
}

/// A printable document
#[derive(Debug, Clone, PartialEq)]
pub enum Slip {
    Statement(Statement),
    Receipt(Receipt),
}

impl Slip {
    /// Document title used in the header and file name
    pub fn title(&self) -> &'static str {
        match self {
            Slip::Statement(_) => "STATEMENT",
            Slip::Receipt(_) => "RECEIPT",
        }
    }

    pub fn account_id(&self) -> AccountId {
        match self {
            Slip::Statement(statement) => statement.account_id,
            Slip::Receipt(receipt) => receipt.account_id,
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        match self {
            Slip::Statement(statement) => statement.date,
            Slip::Receipt(receipt) => receipt.date,
        }
    }

    /// `STATEMENT_101_1709283600.txt`
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}.txt",
            self.title(),
            self.account_id(),
            self.date().timestamp()
        )
    }

    fn write_header(
        &self,
        f: &mut fmt::Formatter<'_>,
        customer: &str,
        service_type: ServiceType,
    ) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "       BILLEASE UTILITIES")?;
        writeln!(f, "   123 Main Street, Cityville")?;
        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "{} - {}",
            self.title(),
            self.date().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(f, "{}", THIN_RULE)?;
        writeln!(f, "Acct ID: {}", self.account_id())?;
        writeln!(f, "Name:    {}", customer)?;
        writeln!(f, "Type:    {}", service_type)?;
        writeln!(f, "{}", THIN_RULE)
    }
}

impl fmt::Display for Slip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slip::Statement(statement) => {
                self.write_header(f, &statement.customer, statement.service_type)?;
                writeln!(
                    f,
                    "Last Reading: {} {}",
                    statement.last_reading.normalize(),
                    statement.unit
                )?;
                if let Some(usage) = statement.usage {
                    writeln!(f, "Usage:        {} {}", usage.normalize(), statement.unit)?;
                }
                writeln!(f, "TOTAL DUE:    ${}", format_money(statement.total_due))?;
            }
            Slip::Receipt(receipt) => {
                self.write_header(f, &receipt.customer, receipt.service_type)?;
                writeln!(f, "Amount Paid:  ${}", format_money(receipt.amount_paid))?;
                writeln!(f, "New Balance:  ${}", format_money(receipt.new_balance))?;
            }
        }
        writeln!(f, "{}", RULE)?;
        write!(f, "    Thank you for your business!")
    }
}
