//! Invoice generator menu loop

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDateTime;
use deskutils_core::{CoreError, Prompter, Result};
use tracing::{info, warn};

use crate::csv::{load_items_from_csv, DEFAULT_ITEMS_FILE};
use crate::invoice::{render_invoice, Buyer, Invoice, Item, MAX_ITEMS, TAX_RATE};
use crate::store::{InvoiceStore, DEFAULT_INVOICE_DIR};

/// Invoice generator configuration
#[derive(Debug, Clone)]
pub struct InvoiceConfig {
    /// CSV source for item loading
    pub items_path: PathBuf,

    /// Folder holding generated invoices
    pub invoice_dir: PathBuf,

    /// GST rate
    pub tax_rate: f64,

    /// Maximum number of items per invoice
    pub max_items: usize,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            items_path: PathBuf::from(DEFAULT_ITEMS_FILE),
            invoice_dir: PathBuf::from(DEFAULT_INVOICE_DIR),
            tax_rate: TAX_RATE,
            max_items: MAX_ITEMS,
        }
    }
}

impl InvoiceConfig {
    pub fn with_items_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.items_path = path.into();
        self
    }

    pub fn with_invoice_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.invoice_dir = dir.into();
        self
    }
}

const MENU: &str = "\n=========================\n\
Invoice Generator Menu:\n\
1. Generate New Invoice\n\
2. List Past Invoices\n\
3. View Specific Invoice\n\
0. Exit\n\
=========================";

/// Run the menu until `0` or end of input
pub fn run<R, W, F>(prompter: &mut Prompter<R, W>, config: &InvoiceConfig, mut now: F) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut() -> NaiveDateTime,
{
    let store = InvoiceStore::new(&config.invoice_dir);

    loop {
        writeln!(prompter.out(), "{}", MENU)?;
        let choice = match prompter.ask::<u32>("Enter choice: ") {
            Ok(choice) => choice,
            Err(CoreError::InvalidInput(_)) => {
                writeln!(prompter.out(), "Invalid choice")?;
                continue;
            }
            Err(CoreError::EndOfInput) => break,
            Err(e) => return Err(e),
        };

        let outcome = match choice {
            0 => break,
            1 => generate(prompter, config, &store, &mut now),
            2 => list(prompter, &store),
            3 => view(prompter, &store),
            _ => writeln!(prompter.out(), "Invalid choice").map_err(CoreError::from),
        };

        match outcome {
            Ok(()) => {}
            Err(CoreError::EndOfInput) => break,
            Err(e) => return Err(e),
        }
    }

    writeln!(prompter.out(), "Exiting Invoice Generator. Goodbye!")?;
    Ok(())
}

/// Ask until the answer parses
fn ask_number<T, R, W>(prompter: &mut Prompter<R, W>, msg: &str) -> Result<T>
where
    T: FromStr,
    R: BufRead,
    W: Write,
{
    loop {
        match prompter.ask::<T>(msg) {
            Err(CoreError::InvalidInput(token)) => {
                writeln!(prompter.out(), "Invalid number: {}", token)?;
            }
            other => return other,
        }
    }
}

fn read_buyer<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<Buyer> {
    Ok(Buyer {
        name: prompter.ask_line("Enter Buyer Name: ")?,
        phone: prompter.ask_line("Enter Phone: ")?,
        email: prompter.ask_line("Enter Email: ")?,
    })
}

fn read_items_manually<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, max_items: usize) -> Result<Vec<Item>> {
    let count: usize = ask_number(prompter, "Enter number of items: ")?;
    if count > max_items {
        return Err(CoreError::CapacityExceeded { what: "Item", max: max_items });
    }

    let mut items = Vec::with_capacity(count);
    for i in 1..=count {
        writeln!(prompter.out(), "\nItem {}:", i)?;
        let name = prompter.ask_line("Name: ")?;
        let quantity: i64 = ask_number(prompter, "Quantity: ")?;
        let price: f64 = ask_number(prompter, "Price per item: ")?;
        items.push(Item::new(name, quantity, price));
    }
    Ok(items)
}

/// Item entry submenu. `None` means the invoice was aborted.
fn read_items<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, config: &InvoiceConfig) -> Result<Option<Vec<Item>>> {
    writeln!(prompter.out(), "\nItem Entry Method:")?;
    writeln!(prompter.out(), "1. Load items from CSV ({})", config.items_path.display())?;
    writeln!(prompter.out(), "2. Enter items manually")?;
    let method = match prompter.ask::<u32>("Enter your choice: ") {
        Ok(method) => method,
        Err(CoreError::InvalidInput(_)) => 0,
        Err(e) => return Err(e),
    };

    let loaded = match method {
        1 => load_items_from_csv(&config.items_path, config.max_items),
        2 => read_items_manually(prompter, config.max_items),
        _ => {
            writeln!(prompter.out(), "Invalid input method. Try again.")?;
            return Ok(None);
        }
    };

    match loaded {
        Ok(items) if items.is_empty() && method == 1 => {
            writeln!(prompter.out(), "No items loaded from CSV. Aborting invoice.")?;
            Ok(None)
        }
        Ok(items) => Ok(Some(items)),
        Err(CoreError::Io(e)) if method == 1 => {
            warn!("Cannot read {}: {}", config.items_path.display(), e);
            writeln!(prompter.out(), "Error opening {}", config.items_path.display())?;
            writeln!(prompter.out(), "No items loaded from CSV. Aborting invoice.")?;
            Ok(None)
        }
        Err(e @ CoreError::CapacityExceeded { .. }) => {
            writeln!(prompter.out(), "Error: {}. Aborting invoice.", e)?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn generate<R, W, F>(prompter: &mut Prompter<R, W>, config: &InvoiceConfig, store: &InvoiceStore, now: &mut F) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut() -> NaiveDateTime,
{
    let buyer = read_buyer(prompter)?;
    let items = match read_items(prompter, config)? {
        Some(items) => items,
        None => return Ok(()),
    };

    let invoice = Invoice::new(buyer, items, config.tax_rate);
    let at = now();

    match store.save(&invoice, &at) {
        Ok(path) => {
            write!(prompter.out(), "\n{}", render_invoice(&invoice, &at))?;
            writeln!(prompter.out(), "\nInvoice saved to {}", path.display())?;
        }
        Err(e) => {
            warn!("Failed to save invoice: {}", e);
            writeln!(prompter.out(), "Error creating invoice file.")?;
        }
    }
    Ok(())
}

fn list<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, store: &InvoiceStore) -> Result<()> {
    let names = match store.list() {
        Ok(names) => names,
        Err(e) => {
            warn!("Cannot list {}: {}", store.dir().display(), e);
            writeln!(prompter.out(), "Could not open invoice directory.")?;
            return Ok(());
        }
    };

    let out = prompter.out();
    writeln!(out, "\nAvailable Invoices:")?;
    for name in &names {
        writeln!(out, "- {}", name)?;
    }
    Ok(())
}

fn view<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, store: &InvoiceStore) -> Result<()> {
    let name = prompter.ask_line("\nEnter invoice filename (e.g., invoice_2025-06-25_18-00-00.txt): ")?;
    match store.read(name.trim()) {
        Ok(content) => {
            info!("Viewing {}", name.trim());
            write!(prompter.out(), "{}", content)?;
        }
        Err(e) => {
            warn!("Cannot open invoice {:?}: {}", name, e);
            writeln!(prompter.out(), "File not found!")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 25)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
    }

    fn config(root: &Path) -> InvoiceConfig {
        InvoiceConfig::default()
            .with_items_path(root.join(DEFAULT_ITEMS_FILE))
            .with_invoice_dir(root.join(DEFAULT_INVOICE_DIR))
    }

    fn session(input: &str, config: &InvoiceConfig) -> String {
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        run(&mut prompter, config, fixed_now).unwrap();
        String::from_utf8(prompter.into_output()).unwrap()
    }

    const SAVED_NAME: &str = "invoice_2025-06-25_18-00-00.txt";

    #[test]
    fn test_generate_manual_invoice() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());

        let out = session(
            "1\nAsha Rao\n555-0100\nasha@example.com\n2\n2\nPen\n3\n12.5\nNotebook\n2\n40\n0\n",
            &config,
        );

        assert!(out.contains("Subtotal: 117.50"));
        assert!(out.contains("GST (18%): 21.15"));
        assert!(out.contains("Grand Total: 138.65"));
        assert!(out.contains("Invoice saved to"));
        assert!(out.ends_with("Exiting Invoice Generator. Goodbye!\n"));

        let saved = fs::read_to_string(config.invoice_dir.join(SAVED_NAME)).unwrap();
        assert!(saved.contains("Buyer Name : Asha Rao"));
        assert!(saved.contains("Notebook"));
    }

    #[test]
    fn test_generate_from_csv() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());
        fs::write(&config.items_path, "Pen,3,12.5\nInk,1,10\n").unwrap();

        let out = session("1\nBob\n1\nb@x.io\n1\n0\n", &config);

        assert!(out.contains("Subtotal: 47.50"));
        assert!(config.invoice_dir.join(SAVED_NAME).exists());
    }

    #[test]
    fn test_missing_csv_aborts() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());

        let out = session("1\nBob\n1\nb@x.io\n1\n0\n", &config);

        assert!(out.contains("Error opening"));
        assert!(out.contains("No items loaded from CSV. Aborting invoice."));
        assert!(!config.invoice_dir.join(SAVED_NAME).exists());
    }

    #[test]
    fn test_invalid_entry_method() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());

        let out = session("1\nBob\n1\nb@x.io\n7\n0\n", &config);

        assert!(out.contains("Invalid input method. Try again."));
    }

    #[test]
    fn test_too_many_manual_items() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());

        let out = session("1\nBob\n1\nb@x.io\n2\n101\n0\n", &config);

        assert!(out.contains("Item list full (max: 100)"));
        assert!(!config.invoice_dir.join(SAVED_NAME).exists());
    }

    #[test]
    fn test_manual_entry_reprompts_bad_numbers() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());

        let out = session("1\nBob\n1\nb@x.io\n2\n1\nPen\nlots\n2\n1.5\n0\n", &config);

        assert!(out.contains("Invalid number: lots"));
        assert!(out.contains("Subtotal: 3.00"));
    }

    #[test]
    fn test_second_invoice_same_second_not_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());
        let one = "1\nBob\n1\nb@x.io\n2\n1\nPen\n1\n1\n";

        let out = session(&format!("{one}{one}0\n"), &config);

        assert!(out.contains("Error creating invoice file."));
        let saved = fs::read_to_string(config.invoice_dir.join(SAVED_NAME)).unwrap();
        assert!(saved.contains("Grand Total: 1.18"));
    }

    #[test]
    fn test_list_and_view() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());
        fs::create_dir_all(&config.invoice_dir).unwrap();
        fs::write(config.invoice_dir.join(SAVED_NAME), "stored invoice body\n").unwrap();
        fs::write(config.invoice_dir.join("readme.md"), "skip me").unwrap();

        let out = session(&format!("2\n3\n{SAVED_NAME}\n3\nmissing.txt\n0\n"), &config);

        assert!(out.contains(&format!("- {SAVED_NAME}")));
        assert!(!out.contains("readme.md"));
        assert!(out.contains("stored invoice body"));
        assert!(out.contains("File not found!"));
    }

    #[test]
    fn test_list_without_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());

        let out = session("2\n0\n", &config);

        assert!(out.contains("Could not open invoice directory."));
    }

    #[test]
    fn test_invalid_menu_choice() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());

        let out = session("x\n5\n", &config);

        assert_eq!(out.matches("Invalid choice").count(), 2);
        assert!(out.ends_with("Exiting Invoice Generator. Goodbye!\n"));
    }
}
