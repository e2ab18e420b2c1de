//! Run configuration
//!
//! `BillingConfig` gathers everything a processing run needs besides the
//! input file: id numbering, rates, seed data, slip output and the dashboard
//! view used to render the final accounts.

use crate::core::account_store::{demo_accounts, AccountStore, DEFAULT_BASE_ID};
use crate::core::query::{filter_accounts, query, AccountQuery, ServiceFilter, DEFAULT_PAGE_SIZE};
use crate::types::{Account, AccountId, BillingError, RateTable};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct BillingConfig {
    /// Id given to the first registration in an empty store
    pub base_id: AccountId,

    /// Rows per dashboard page
    pub page_size: usize,

    pub rates: RateTable,

    /// Preload the two sample customers before applying actions
    pub seed_demo: bool,

    /// Where statement and receipt slips are written, if anywhere
    pub receipts_dir: Option<PathBuf>,

    pub filter: ServiceFilter,
    pub search: String,

    /// Page to render; `None` renders every filtered account
    pub page: Option<usize>,
}

impl Default for BillingConfig {
    fn default() -> Self {
        BillingConfig {
            base_id: DEFAULT_BASE_ID,
            page_size: DEFAULT_PAGE_SIZE,
            rates: RateTable::standard(),
            seed_demo: false,
            receipts_dir: None,
            filter: ServiceFilter::All,
            search: String::new(),
            page: None,
        }
    }
}

impl BillingConfig {
    /// Check the settings that cannot be enforced by their types
    ///
    /// # Errors
    ///
    /// `ConfigError` for a zero page size or negative rates.
    pub fn validate(&self) -> Result<(), BillingError> {
        if self.page_size == 0 {
            return Err(BillingError::config("page size must be at least 1"));
        }
        self.rates.validate()
    }

    /// Build the store a run starts from
    ///
    /// Seeded stores hold the demo accounts, with their opening balances
    /// dated `date`.
    pub fn initial_store(&self, date: DateTime<Utc>) -> Result<AccountStore, BillingError> {
        if self.seed_demo {
            AccountStore::with_accounts(self.base_id, demo_accounts(date))
        } else {
            Ok(AccountStore::new(self.base_id))
        }
    }

    /// Query for the configured page, if a page was requested
    pub fn page_query(&self) -> Option<AccountQuery> {
        self.page.map(|page| AccountQuery {
            filter: self.filter,
            search: self.search.clone(),
            page,
            page_size: self.page_size,
        })
    }

    /// Accounts to render in the final output, in store order
    pub fn visible_accounts<'a>(&self, accounts: &'a [Account]) -> Vec<&'a Account> {
        match self.page_query() {
            Some(page_query) => query(accounts, &page_query).items,
            None => filter_accounts(accounts, self.filter, &self.search),
        }
    }
}

/// Load a rate table from a JSON file
///
/// ```json
/// {
///   "Electricity": { "unit": "kWh", "unit_price": "0.15", "service_charge": "10.00" },
///   "Water": { "unit": "cu.m", "unit_price": "1.25", "service_charge": "5.00" },
///   "Internet": { "unit": "GB", "unit_price": "2.00", "service_charge": "20.00" }
/// }
/// ```
///
/// # Errors
///
/// `IoError` if the file cannot be read, `ConfigError` if it is not a
/// complete, non-negative rate table.
pub fn load_rates(path: &Path) -> Result<RateTable, BillingError> {
    let content = fs::read_to_string(path)?;
    let rates: RateTable = serde_json::from_str(&content)?;
    rates.validate()?;
    Ok(rates)
}
