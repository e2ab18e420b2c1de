//! Utility Billing Engine Library
//! # Overview
//!
//! This library keeps customer accounts for a small utility company
//! (electricity, water, internet), prices meter readings into bills, records
//! payments, and answers dashboard queries over the account list. Action
//! files are processed with either a sync or an async reading strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Transaction, RateTable, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`config`] - Run configuration and rate table loading
//! - [`core`] - Business logic components:
//!   - [`core::account_store`] - Account registry with sequential ids
//!   - [`core::billing`] - Bill computation from meter readings
//!   - [`core::payment`] - Payment application
//!   - [`core::query`] - Filter, search and pagination
//!   - [`core::documents`] - Statements and receipts
//!   - [`core::engine`] - Action orchestration
//! - [`io`] - CSV input/output and slip files
//! - [`strategy`] - Pluggable processing strategies
//!
//! # Actions
//!
//! - **Register**: Create an account with the next sequential id
//! - **Reading**: Bill the usage since the previous meter reading
//! - **Payment**: Reduce the balance (overpayment leaves a credit)
//! - **Statement**: Produce the current statement for an account
//!
//! # Account State
//!
//! Each account maintains:
//! - `balance`: Amount owed (negative means credit)
//! - `last_reading`: Meter reading of the most recent bill
//! - `history`: Bills and payments, newest first

use std::sync::Once;

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use config::BillingConfig;
pub use core::{AccountStore, BillingEngine};
pub use io::write_accounts_csv;
pub use types::{
    Account, AccountId, ActionRecord, BillingError, RateEntry, RateTable, ServiceType,
    Transaction, TransactionKind,
};

static TRACING_INIT: Once = Once::new();

const DEFAULT_LOG_DIRECTIVE: &str = "utility_billing_engine=info";

/// Install the global tracing subscriber
///
/// Logs go to stderr so stdout only carries the accounts CSV. A valid
/// `RUST_LOG` replaces the crate's `info` default. Safe to call more than
/// once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::fmt;

        let rust_log = std::env::var("RUST_LOG").ok();
        let _ = fmt()
            .with_env_filter(log_filter(rust_log.as_deref()))
            .with_writer(std::io::stderr)
            .try_init();
    });
}

fn log_filter(rust_log: Option<&str>) -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::EnvFilter;

    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}
