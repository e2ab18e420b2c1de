//! Writing statements and receipts to disk
//!
//! Each slip becomes one text file named after its title, account id and
//! timestamp (`RECEIPT_102_1709283600.txt`). Existing files are never
//! overwritten: a second slip with the same name gets a numeric suffix
//! (`RECEIPT_102_1709283600_2.txt`).

use crate::core::documents::Slip;
use crate::types::BillingError;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Write a slip into `dir`, creating the directory if needed
///
/// # Returns
///
/// The path of the written file.
pub fn write_slip(dir: &Path, slip: &Slip) -> Result<PathBuf, BillingError> {
    fs::create_dir_all(dir)?;

    let file_name = slip.file_name();
    let stem = file_name.trim_end_matches(".txt");
    let mut attempt: u32 = 1;

    loop {
        let path = if attempt == 1 {
            dir.join(&file_name)
        } else {
            dir.join(format!("{}_{}.txt", stem, attempt))
        };

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                writeln!(file, "{}", slip)?;
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e.into()),
        }
    }
}
