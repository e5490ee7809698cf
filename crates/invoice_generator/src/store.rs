//! Invoice folder operations
//!
//! Provides write-once saving, listing and reading of invoice files.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use deskutils_core::{read_lossy, CoreError, Result};
use tracing::{debug, info};

use crate::invoice::{render_invoice, Invoice};

/// Default folder for generated invoices
pub const DEFAULT_INVOICE_DIR: &str = "invoices";

/// Every invoice file name contains this marker
pub const INVOICE_PREFIX: &str = "invoice_";

/// File name for an invoice generated at `at`
pub fn invoice_file_name(at: &NaiveDateTime) -> String {
    format!("{}{}.txt", INVOICE_PREFIX, at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Invoice folder handle
#[derive(Debug, Clone)]
pub struct InvoiceStore {
    dir: PathBuf,
}

impl InvoiceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the invoice to a new timestamped file
    ///
    /// Creates the folder if needed. Existing files are never overwritten.
    ///
    /// # Errors
    /// - `AlreadyExists` if an invoice was already saved in the same second
    pub fn save(&self, invoice: &Invoice, at: &NaiveDateTime) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(invoice_file_name(at));

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                if e.kind() == ErrorKind::AlreadyExists {
                    CoreError::AlreadyExists(path.display().to_string())
                } else {
                    CoreError::Io(e)
                }
            })?;
        file.write_all(render_invoice(invoice, at).as_bytes())?;

        info!("Invoice saved to {}", path.display());
        Ok(path)
    }

    /// Names of invoice files in the folder, sorted
    ///
    /// # Errors
    /// - `Io` when the folder is missing or unreadable
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let name = entry?.file_name().to_string_lossy().to_string();
            if name.contains(INVOICE_PREFIX) {
                names.push(name);
            }
        }
        names.sort();
        debug!("Found {} invoices in {}", names.len(), self.dir.display());
        Ok(names)
    }

    /// Contents of invoice `name` inside the folder
    ///
    /// # Errors
    /// - `InvalidFileName` if `name` would escape the folder
    /// - `Io` when the file does not exist
    pub fn read(&self, name: &str) -> Result<String> {
        validate_file_name(name)?;
        read_lossy(&self.dir.join(name))
    }
}

/// Accept only a bare file name
fn validate_file_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(|c: char| c == '/' || c == '\\') || name.contains("..") {
        return Err(CoreError::InvalidFileName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::{Buyer, Item, TAX_RATE};
    use chrono::NaiveDate;

    fn at(sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 25)
            .unwrap()
            .and_hms_opt(18, 0, sec)
            .unwrap()
    }

    fn invoice() -> Invoice {
        Invoice::new(Buyer::default(), vec![Item::new("Pen", 1, 2.0)], TAX_RATE)
    }

    #[test]
    fn test_file_name() {
        assert_eq!(invoice_file_name(&at(5)), "invoice_2025-06-25_18-00-05.txt");
    }

    #[test]
    fn test_file_names_unique_per_second() {
        assert_ne!(invoice_file_name(&at(1)), invoice_file_name(&at(2)));
    }

    #[test]
    fn test_save_creates_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let store = InvoiceStore::new(tmp.path().join(DEFAULT_INVOICE_DIR));

        let path = store.save(&invoice(), &at(0)).unwrap();
        assert!(path.ends_with("invoice_2025-06-25_18-00-00.txt"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("======== INVOICE ========\n"));
        assert!(content.ends_with("Grand Total: 2.36\n"));
    }

    #[test]
    fn test_save_is_write_once() {
        let tmp = tempfile::tempdir().unwrap();
        let store = InvoiceStore::new(tmp.path());

        store.save(&invoice(), &at(0)).unwrap();
        let second = store.save(&invoice(), &at(0));
        assert!(matches!(second, Err(CoreError::AlreadyExists(_))));
    }

    #[test]
    fn test_list_filters_and_sorts() {
        let tmp = tempfile::tempdir().unwrap();
        let store = InvoiceStore::new(tmp.path());
        store.save(&invoice(), &at(9)).unwrap();
        store.save(&invoice(), &at(3)).unwrap();
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();

        assert_eq!(
            store.list().unwrap(),
            vec!["invoice_2025-06-25_18-00-03.txt", "invoice_2025-06-25_18-00-09.txt"]
        );
    }

    #[test]
    fn test_list_missing_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let store = InvoiceStore::new(tmp.path().join("nope"));
        assert!(store.list().is_err());
    }

    #[test]
    fn test_read() {
        let tmp = tempfile::tempdir().unwrap();
        let store = InvoiceStore::new(tmp.path());
        store.save(&invoice(), &at(0)).unwrap();

        let text = store.read("invoice_2025-06-25_18-00-00.txt").unwrap();
        assert!(text.contains("Date: 25-06-2025 18:00:00"));
        assert!(matches!(store.read("invoice_missing.txt"), Err(CoreError::Io(_))));
    }

    #[test]
    fn test_read_rejects_traversal() {
        let store = InvoiceStore::new("invoices");
        for name in ["../secret.txt", "a/b.txt", "..", "", "a\\b"] {
            assert!(matches!(store.read(name), Err(CoreError::InvalidFileName(_))));
        }
    }
}
