//! Core business logic module
//!
//! This module contains the billing components:
//! - `traits` - Environment abstractions (clock)
//! - `account_store` - Insertion-ordered account storage and id assignment
//! - `billing` - Bill calculation from meter readings
//! - `payment` - Payment application
//! - `query` - Dashboard filtering, search and pagination
//! - `documents` - Statements and receipts
//! - `engine` - Action orchestration over the store

pub mod account_store;
pub mod billing;
pub mod documents;
pub mod engine;
pub mod payment;
pub mod query;
pub mod traits;

pub use account_store::{demo_accounts, AccountStore, DEFAULT_BASE_ID};
pub use billing::{apply_bill, compute_bill, BillQuote};
pub use documents::{format_money, Receipt, Slip, Statement};
pub use engine::{ActionOutcome, BillingEngine};
pub use payment::{apply_payment, record_payment, PaymentQuote};
pub use query::{query, AccountQuery, DashboardView, QueryPage, ServiceFilter, DEFAULT_PAGE_SIZE};
pub use traits::{Clock, FixedClock, SystemClock};
