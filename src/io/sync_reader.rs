//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over action records from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<ActionRecord, BillingError>` for each CSV row:
//!
//! ```no_run
//! use utility_billing_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("actions.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("Applying action: {:?}", record),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record errors are yielded as Err variants, with the line
//!   number attached to CSV parse errors

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{ActionRecord, BillingError};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Synchronous CSV reader over action records
#[derive(Debug)]
pub struct SyncReader<R: Read = File> {
    reader: csv::Reader<R>,
}

impl SyncReader<File> {
    /// Open a CSV file for streaming iteration
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (trailing optional columns)
    ///
    /// # Errors
    ///
    /// Returns a message if the file could not be opened.
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        Ok(Self::from_reader(file))
    }
}

impl<R: Read> SyncReader<R> {
    /// Wrap any reader producing CSV text
    pub fn from_reader(input: R) -> Self {
        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(input);

        Self { reader }
    }
}

impl<R: Read> Iterator for SyncReader<R> {
    type Item = Result<ActionRecord, BillingError>;

    /// Get the next action record from the CSV input
    ///
    /// # Returns
    ///
    /// * `Some(Ok(ActionRecord))` - Successfully parsed record
    /// * `Some(Err(BillingError))` - Parse or conversion error
    /// * `None` - End of input reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();

        match deserializer.next()? {
            Ok(csv_record) => Some(convert_csv_record(csv_record)),
            Err(e) => Some(Err(BillingError::from(e))),
        }
    }
}
