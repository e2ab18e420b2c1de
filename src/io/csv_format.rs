//! CSV format handling for action records and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain action records
//! - Account output serialization
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! # Input Format
//!
//! ```text
//! action,account,name,service,value
//! register,,Alice,Water,
//! reading,101,,,271
//! payment,101,,,45.50
//! statement,101,,,
//! ```

use crate::core::documents::format_money;
use crate::io::input::{parse_account_id, parse_decimal};
use crate::types::{Account, AccountId, ActionRecord, BillingError, ServiceType};
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Every column except `action` is optional; which ones are required
/// depends on the action.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CsvRecord {
    pub action: String,
    pub account: Option<String>,
    pub name: Option<String>,
    pub service: Option<String>,
    pub value: Option<String>,
}

/// Convert a CsvRecord to an ActionRecord
///
/// This function:
/// - Parses the action name (case-insensitive)
/// - Parses the account id and value with the strict numeric parser
/// - Parses the service type (exact, case-sensitive)
///
/// # Errors
///
/// - `InvalidAction` for an unknown action
/// - `InvalidNumericInput` for a missing or malformed account id or value
/// - `EmptyName` for a registration without a name
/// - `MissingField` / `UnknownServiceType` for a bad service column
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<ActionRecord, BillingError> {
    let action = csv_record.action.trim().to_lowercase();

    match action.as_str() {
        "register" => {
            let name = csv_record
                .name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or(BillingError::EmptyName)?;
            let service = csv_record
                .service
                .as_deref()
                .map(str::trim)
                .filter(|service| !service.is_empty())
                .ok_or_else(|| BillingError::missing_field("register", "service"))?;

            Ok(ActionRecord::Register {
                name: name.to_string(),
                service_type: service.parse::<ServiceType>()?,
            })
        }
        "reading" => Ok(ActionRecord::Reading {
            account: account_field(&csv_record)?,
            reading: parse_decimal("reading", csv_record.value.as_deref().unwrap_or(""))?,
        }),
        "payment" => Ok(ActionRecord::Payment {
            account: account_field(&csv_record)?,
            amount: parse_decimal("amount", csv_record.value.as_deref().unwrap_or(""))?,
        }),
        "statement" => Ok(ActionRecord::Statement {
            account: account_field(&csv_record)?,
        }),
        _ => Err(BillingError::invalid_action(&csv_record.action)),
    }
}

fn account_field(csv_record: &CsvRecord) -> Result<AccountId, BillingError> {
    parse_account_id("account", csv_record.account.as_deref().unwrap_or(""))
}

/// Write accounts to CSV format
///
/// Writes accounts in the given order with columns:
/// id, name, service, balance, last_reading
///
/// Balances are written with two decimals; readings in normalized form
/// (`271`, `25.5`).
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_accounts_csv(accounts: &[&Account], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["id", "name", "service", "balance", "last_reading"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for account in accounts {
        writer
            .write_record(&[
                account.id.to_string(),
                account.name.clone(),
                account.service_type.to_string(),
                format_money(account.balance),
                account.last_reading.normalize().to_string(),
            ])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn record(action: &str, account: &str, name: &str, service: &str, value: &str) -> CsvRecord {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        CsvRecord {
            action: action.to_string(),
            account: opt(account),
            name: opt(name),
            service: opt(service),
            value: opt(value),
        }
    }

    #[rstest]
    #[case("register")]
    #[case("REGISTER")]
    #[case("Register")]
    fn test_convert_register(#[case] action: &str) {
        let result = convert_csv_record(record(action, "", "Alice", "Water", "")).unwrap();
        assert_eq!(
            result,
            ActionRecord::Register {
                name: "Alice".to_string(),
                service_type: ServiceType::Water,
            }
        );
    }

    #[test]
    fn test_convert_reading() {
        let result = convert_csv_record(record("reading", "101", "", "", "271")).unwrap();
        assert_eq!(
            result,
            ActionRecord::Reading {
                account: 101,
                reading: dec!(271),
            }
        );
    }

    #[test]
    fn test_convert_payment() {
        let result = convert_csv_record(record("payment", "102", "", "", "45.50")).unwrap();
        assert_eq!(
            result,
            ActionRecord::Payment {
                account: 102,
                amount: dec!(45.50),
            }
        );
    }

    #[test]
    fn test_convert_statement() {
        let result = convert_csv_record(record("statement", "102", "", "", "")).unwrap();
        assert_eq!(result, ActionRecord::Statement { account: 102 });
    }

    #[rstest]
    #[case::missing_name(record("register", "", "", "Water", ""), "EmptyName")]
    #[case::missing_service(record("register", "", "Alice", "", ""), "MissingField")]
    #[case::lowercase_service(record("register", "", "Alice", "water", ""), "UnknownServiceType")]
    #[case::unknown_service(record("register", "", "Alice", "Gas", ""), "UnknownServiceType")]
    #[case::reading_not_numeric(record("reading", "101", "", "", "abc"), "InvalidNumericInput")]
    #[case::reading_missing_value(record("reading", "101", "", "", ""), "InvalidNumericInput")]
    #[case::reading_missing_account(record("reading", "", "", "", "10"), "InvalidNumericInput")]
    #[case::payment_bad_account(record("payment", "abc", "", "", "10"), "InvalidNumericInput")]
    #[case::payment_bad_amount(record("payment", "101", "", "", "ten"), "InvalidNumericInput")]
    #[case::unknown_action(record("refund", "101", "", "", "5"), "InvalidAction")]
    fn test_convert_rejects(#[case] input: CsvRecord, #[case] expected: &str) {
        let err = convert_csv_record(input).unwrap_err();
        let matched = match expected {
            "EmptyName" => matches!(err, BillingError::EmptyName),
            "MissingField" => matches!(err, BillingError::MissingField { .. }),
            "UnknownServiceType" => matches!(err, BillingError::UnknownServiceType { .. }),
            "InvalidNumericInput" => matches!(err, BillingError::InvalidNumericInput { .. }),
            "InvalidAction" => matches!(err, BillingError::InvalidAction { .. }),
            _ => false,
        };
        assert!(matched, "expected {}, got {:?}", expected, err);
    }

    #[test]
    fn test_write_accounts_csv() {
        let mut john = Account::new(101, "John Doe", ServiceType::Electricity);
        john.balance = dec!(60.65);
        john.last_reading = dec!(271);
        let mut bob = Account::new(102, "Bob", ServiceType::Internet);
        bob.balance = dec!(71.000);
        bob.last_reading = dec!(25.50);
        let mut credit = Account::new(103, "Credit", ServiceType::Water);
        credit.balance = dec!(-5);

        let mut output = Vec::new();
        write_accounts_csv(&[&john, &bob, &credit], &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(
            output_str,
            "id,name,service,balance,last_reading\n\
             101,John Doe,Electricity,60.65,271\n\
             102,Bob,Internet,71.00,25.5\n\
             103,Credit,Water,-5.00,0\n"
        );
    }

    #[test]
    fn test_write_accounts_csv_quotes_commas() {
        let account = Account::new(101, "Doe, John", ServiceType::Water);
        let mut output = Vec::new();
        write_accounts_csv(&[&account], &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("101,\"Doe, John\",Water,0.00,0"));
    }

    #[test]
    fn test_write_empty_accounts_writes_header_only() {
        let mut output = Vec::new();
        write_accounts_csv(&[], &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "id,name,service,balance,last_reading\n"
        );
    }
}
