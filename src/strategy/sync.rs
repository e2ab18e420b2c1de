//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates a run by coordinating between the
//! SyncReader (for CSV input) and BillingEngine (for business logic).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Action handling to `BillingEngine` (business logic)
//! - CSV output to `csv_format::write_accounts_csv` (format handling)
//!
//! Records are streamed one at a time; memory grows with the number of
//! accounts and their history, not with the size of the input file.

use crate::config::BillingConfig;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{apply_record, start_engine, write_view, ProcessingStrategy};
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use utility_billing_engine::config::BillingConfig;
/// use utility_billing_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(BillingConfig::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("actions.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone)]
pub struct SyncProcessingStrategy {
    config: BillingConfig,
}

impl SyncProcessingStrategy {
    pub fn new(config: BillingConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process actions from input file and write results to output
    ///
    /// 1. Builds the starting store (empty or seeded) inside a BillingEngine
    /// 2. Streams records from the CSV file through a SyncReader
    /// 3. Applies each record, logging the ones that are rejected
    /// 4. Writes the accounts selected by the configured view
    ///
    /// # Error Handling
    ///
    /// Fatal errors (file not found, I/O errors) are returned immediately.
    /// Individual record errors are logged and processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let mut engine = start_engine(&self.config)?;
        let reader = SyncReader::new(input_path)?;
        let receipts_dir = self.config.receipts_dir.as_deref();

        for result in reader {
            match result {
                Ok(record) => apply_record(&mut engine, record, receipts_dir),
                Err(e) => warn!(error = %e, "skipping action record"),
            }
        }

        write_view(&engine, &self.config, output)
    }
}
