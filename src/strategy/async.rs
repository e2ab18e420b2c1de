//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous implementation of the ProcessingStrategy
//! trait. The input file is streamed in batches through csv-async on a tokio
//! runtime while the billing engine applies each batch in file order.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size)
//!     ├── AsyncReader (batch CSV reading over tokio::fs::File)
//!     └── BillingEngine (applies every record sequentially)
//! ```
//!
//! Actions on one account depend on every earlier action on it (readings
//! must not regress, ids are assigned in order), so records are never
//! reordered or applied concurrently.

use crate::config::BillingConfig;
use crate::io::async_reader::AsyncReader;
use crate::strategy::{apply_record, start_engine, write_view, ProcessingStrategy};
use std::io::Write;
use std::path::Path;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::{debug, warn};

/// Configuration for batch reading
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of records read per batch
    pub batch_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { batch_size: 1000 }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, falling back to the default for a zero size
    pub fn new(batch_size: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        Self { batch_size }
    }
}

/// Asynchronous batch processing strategy
///
/// Reads records in batches of `batch_size` and applies each batch before
/// reading the next one. Produces exactly the same output as
/// [`SyncProcessingStrategy`](crate::strategy::SyncProcessingStrategy).
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BillingConfig,
    batch_config: BatchConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BillingConfig, batch_config: BatchConfig) -> Self {
        Self {
            config,
            batch_config,
        }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process actions from input file and write results to output
    ///
    /// 1. Creates a current-thread tokio runtime
    /// 2. Opens the input with tokio and wraps it for csv-async
    /// 3. Reads batches with AsyncReader until the input is exhausted
    /// 4. Applies every record of a batch, in order, before the next read
    /// 5. Writes the accounts selected by the configured view
    ///
    /// # Error Handling
    ///
    /// Fatal errors (file not found, I/O errors, runtime errors) are returned immediately.
    /// Individual record errors are logged and processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        let mut engine = start_engine(&self.config)?;
        let receipts_dir = self.config.receipts_dir.as_deref();

        runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            let mut reader = AsyncReader::new(file.compat());

            loop {
                let batch = reader.read_batch(self.batch_config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                debug!(records = batch.len(), "applying batch");
                for record in batch {
                    apply_record(&mut engine, record, receipts_dir);
                }
            }

            Ok::<(), String>(())
        })?;

        write_view(&engine, &self.config, output)
    }
}
