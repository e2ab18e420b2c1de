//! Error types for the utility billing engine
//!
//! This module defines all error types that can occur while applying user
//! actions. Errors are designed to be descriptive and user-friendly for CLI
//! output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: Input file missing, output not writable, etc.
//! - **Input Errors**: Malformed CSV, non-numeric values, unknown actions
//! - **Domain Errors**: Unknown account, reading regression, rejected payment
//! - **Arithmetic Errors**: Overflow in balance or id calculations
//!
//! Every domain and input error is recoverable: the action is rejected and
//! the account store is left unchanged.

use super::transaction::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the billing engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BillingError {
    /// No account has the referenced id
    #[error("Account {id} not found")]
    AccountNotFound {
        /// The id that was looked up
        id: AccountId,
    },

    /// Submitted meter reading is lower than the recorded one
    #[error("New reading {submitted} for account {id} cannot be lower than previous reading {previous}")]
    ReadingRegression {
        /// Account id
        id: AccountId,
        /// Reading currently on record
        previous: Decimal,
        /// Rejected reading
        submitted: Decimal,
    },

    /// Text in a numeric field could not be parsed
    ///
    /// Raised before any calculation runs; values are never coerced to zero.
    #[error("Invalid numeric input '{value}' for {field}")]
    InvalidNumericInput {
        /// Field being parsed
        field: String,
        /// Raw text
        value: String,
    },

    /// A field required by the action was empty or absent
    #[error("{action} action requires a {field}")]
    MissingField {
        /// Action being parsed
        action: String,
        /// Missing field
        field: String,
    },

    /// Registration without a customer name
    #[error("Customer name is required")]
    EmptyName,

    /// Service type not in the fixed enumeration
    #[error("Unknown service type '{value}'")]
    UnknownServiceType {
        /// The rejected text
        value: String,
    },

    /// Unrecognised action in driver input
    #[error("Invalid action '{action}'")]
    InvalidAction {
        /// The rejected action text
        action: String,
    },

    /// Payment of zero or a negative amount
    #[error("Payment amount {amount} for account {id} must be greater than zero")]
    NonPositivePayment {
        /// Account id
        id: AccountId,
        /// Rejected amount
        amount: Decimal,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation} for account {id}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account id
        id: AccountId,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Invalid startup configuration (rate file, page size, ...)
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },
}

// Conversion from io::Error to BillingError
impl From<std::io::Error> for BillingError {
    fn from(error: std::io::Error) -> Self {
        BillingError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to BillingError
impl From<csv::Error> for BillingError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        BillingError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for BillingError {
    fn from(error: serde_json::Error) -> Self {
        BillingError::ConfigError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BillingError {
    /// Create an AccountNotFound error
    pub fn account_not_found(id: AccountId) -> Self {
        BillingError::AccountNotFound { id }
    }

    /// Create a ReadingRegression error
    pub fn reading_regression(id: AccountId, previous: Decimal, submitted: Decimal) -> Self {
        BillingError::ReadingRegression {
            id,
            previous,
            submitted,
        }
    }

    /// Create an InvalidNumericInput error
    pub fn invalid_numeric_input(field: &str, value: &str) -> Self {
        BillingError::InvalidNumericInput {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(action: &str, field: &str) -> Self {
        BillingError::MissingField {
            action: action.to_string(),
            field: field.to_string(),
        }
    }

    /// Create an UnknownServiceType error
    pub fn unknown_service_type(value: &str) -> Self {
        BillingError::UnknownServiceType {
            value: value.to_string(),
        }
    }

    /// Create an InvalidAction error
    pub fn invalid_action(action: &str) -> Self {
        BillingError::InvalidAction {
            action: action.to_string(),
        }
    }

    /// Create a NonPositivePayment error
    pub fn non_positive_payment(id: AccountId, amount: Decimal) -> Self {
        BillingError::NonPositivePayment { id, amount }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, id: AccountId) -> Self {
        BillingError::ArithmeticOverflow {
            operation: operation.to_string(),
            id,
        }
    }

    /// Create a ConfigError
    pub fn config(message: impl Into<String>) -> Self {
        BillingError::ConfigError {
            message: message.into(),
        }
    }
}
