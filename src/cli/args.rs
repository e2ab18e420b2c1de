use crate::config::{load_rates, BillingConfig};
use crate::core::{ServiceFilter, DEFAULT_BASE_ID, DEFAULT_PAGE_SIZE};
use crate::strategy::BatchConfig;
use crate::types::{AccountId, BillingError, RateTable};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Apply utility billing actions and print the resulting accounts
#[derive(Parser, Debug)]
#[command(name = "billing-engine")]
#[command(about = "Apply utility billing actions and print the resulting accounts", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing action records
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Reading strategy to use for the input file
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Reading strategy: 'sync' for synchronous or 'async' for batched asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of records per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of records per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Id assigned to the first account of an empty store
    #[arg(long = "base-id", value_name = "ID", default_value_t = DEFAULT_BASE_ID)]
    pub base_id: AccountId,

    /// Accounts per dashboard page
    #[arg(long = "page-size", value_name = "COUNT", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// JSON file overriding the standard rate table
    #[arg(long = "rates", value_name = "FILE")]
    pub rates: Option<PathBuf>,

    /// Preload the sample customers 101 and 102
    #[arg(long = "seed-demo")]
    pub seed_demo: bool,

    /// Directory receiving statement and receipt slips
    #[arg(long = "receipts-dir", value_name = "DIR")]
    pub receipts_dir: Option<PathBuf>,

    /// Service filter for the output: All, Electricity, Water or Internet
    #[arg(long = "filter", value_name = "SERVICE", default_value = "All")]
    pub filter: ServiceFilter,

    /// Case-insensitive name or id search for the output, matched as given
    #[arg(long = "search", value_name = "TEXT", default_value = "")]
    pub search: String,

    /// Only print this page of the filtered accounts
    #[arg(long = "page", value_name = "PAGE")]
    pub page: Option<usize>,
}

/// Available reading strategies for CSV processing
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// A zero batch size falls back to the default with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        match self.batch_size {
            Some(batch_size) => BatchConfig::new(batch_size),
            None => BatchConfig::default(),
        }
    }

    /// Create the billing configuration, loading the rate file if one was given
    ///
    /// # Errors
    ///
    /// - `IoError` if the rate file cannot be read
    /// - `ConfigError` for an invalid rate file or a zero page size
    pub fn to_billing_config(&self) -> Result<BillingConfig, BillingError> {
        let rates = match &self.rates {
            Some(path) => load_rates(path)?,
            None => RateTable::standard(),
        };

        let config = BillingConfig {
            base_id: self.base_id,
            page_size: self.page_size,
            rates,
            seed_demo: self.seed_demo,
            receipts_dir: self.receipts_dir.clone(),
            filter: self.filter,
            search: self.search.clone(),
            page: self.page,
        };
        config.validate()?;

        Ok(config)
    }
}
