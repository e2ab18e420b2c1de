//! I/O module
//!
//! Handles action input parsing, account output and slip files.
//!
//! # Components
//!
//! - `input` - Strict numeric field parsing
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface
//! - `slips` - Statement and receipt files

pub mod async_reader;
pub mod csv_format;
pub mod input;
pub mod slips;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_csv_record, write_accounts_csv, CsvRecord};
pub use input::{parse_account_id, parse_decimal};
pub use slips::write_slip;
pub use sync_reader::SyncReader;
