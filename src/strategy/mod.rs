//! Processing strategy module for billing action files
//!
//! This module defines the Strategy pattern for complete processing pipelines,
//! encompassing both CSV parsing and the billing engine. This allows different
//! input implementations (synchronous, asynchronous batch) to be selected at runtime.
//!
//! Both strategies apply actions one at a time in file order, so they always
//! produce identical output for the same input and configuration.

use crate::cli::StrategyType;
use crate::config::BillingConfig;
use crate::core::{BillingEngine, Clock, SystemClock};
use crate::io::csv_format::write_accounts_csv;
use crate::io::slips::write_slip;
use crate::types::ActionRecord;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete billing pipelines
///
/// Each strategy must be able to read actions from a CSV file, apply them
/// through a billing engine, and write the resulting accounts to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process actions from input file and write results to output
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input CSV file containing action records
    /// * `output` - Mutable reference to a writer for the accounts CSV
    ///
    /// # Returns
    ///
    /// * `Ok(())` if all processing completed successfully (or with recoverable errors)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O error, etc.)
    ///
    /// Rejected actions are logged and skipped; they never cause this
    /// method to return an error.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Billing configuration shared by both strategies
/// * `batch_config` - Optional batching configuration (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: BillingConfig,
    batch_config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(config)),
        StrategyType::Async => {
            let batch_config = batch_config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, batch_config))
        }
    }
}

/// Build the engine a run starts from
fn start_engine(config: &BillingConfig) -> Result<BillingEngine<SystemClock>, String> {
    let clock = SystemClock;
    let store = config
        .initial_store(clock.now())
        .map_err(|e| e.to_string())?;

    Ok(BillingEngine::new(store, config.rates.clone(), clock))
}

/// Apply one record, logging rejections and writing any slip produced
fn apply_record<C: Clock>(
    engine: &mut BillingEngine<C>,
    record: ActionRecord,
    receipts_dir: Option<&Path>,
) {
    let action = record.name();

    match engine.process(record) {
        Ok(outcome) => {
            if let (Some(dir), Some(slip)) = (receipts_dir, outcome.slip()) {
                match write_slip(dir, slip) {
                    Ok(path) => debug!(path = %path.display(), "slip written"),
                    Err(e) => warn!(error = %e, "failed to write slip"),
                }
            }
        }
        Err(e) => warn!(action, error = %e, "action rejected"),
    }
}

/// Write the accounts selected by the configured view
fn write_view<C: Clock>(
    engine: &BillingEngine<C>,
    config: &BillingConfig,
    output: &mut dyn Write,
) -> Result<(), String> {
    let accounts = config.visible_accounts(engine.store().accounts());
    write_accounts_csv(&accounts, output)
}
