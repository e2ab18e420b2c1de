//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account-related types
//! - `transaction`: History entries, identifiers and action records
//! - `service`: Service types and the rate table
//! - `error`: Error types for the billing engine

pub mod account;
pub mod error;
pub mod service;
pub mod transaction;

pub use account::Account;
pub use error::BillingError;
pub use service::{RateEntry, RateTable, ServiceType};
pub use transaction::{AccountId, ActionRecord, Transaction, TransactionKind};
