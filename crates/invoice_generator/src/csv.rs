//! `items.csv` loader
//!
//! Fixed `name,quantity,price` format, one item per line. No header, no
//! quoting or escaping: the name runs up to the first comma.

use std::path::Path;

use deskutils_core::{read_lossy, CoreError, Result};
use tracing::{debug, warn};

use crate::invoice::Item;

/// Default items file name
pub const DEFAULT_ITEMS_FILE: &str = "items.csv";

/// Parse one `name,quantity,price` line
pub fn parse_csv_line(line: &str) -> Result<Item> {
    let (name, rest) = line
        .split_once(',')
        .ok_or_else(|| CoreError::InvalidInput(format!("missing fields in {:?}", line)))?;
    if name.is_empty() {
        return Err(CoreError::InvalidInput(format!("empty item name in {:?}", line)));
    }

    let (quantity, price) = rest
        .split_once(',')
        .ok_or_else(|| CoreError::InvalidInput(format!("missing price in {:?}", line)))?;
    let quantity: i64 = quantity
        .trim()
        .parse()
        .map_err(|_| CoreError::InvalidInput(format!("bad quantity {:?}", quantity.trim())))?;
    let price: f64 = price
        .trim()
        .parse()
        .map_err(|_| CoreError::InvalidInput(format!("bad price {:?}", price.trim())))?;

    Ok(Item::new(name, quantity, price))
}

/// Parse CSV content, skipping blank and malformed lines
///
/// # Errors
/// - `CapacityExceeded` when more than `capacity` items parse
pub fn parse_items(content: &str, capacity: usize) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    for (n, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_csv_line(line) {
            Ok(item) => {
                if items.len() >= capacity {
                    return Err(CoreError::CapacityExceeded { what: "Item", max: capacity });
                }
                items.push(item);
            }
            Err(e) => warn!("Skipping CSV line {}: {}", n + 1, e),
        }
    }
    Ok(items)
}

/// Load items from a CSV file
pub fn load_items_from_csv(path: &Path, capacity: usize) -> Result<Vec<Item>> {
    let content = read_lossy(path)?;
    let items = parse_items(&content, capacity)?;
    debug!("Loaded {} items from {}", items.len(), path.display());
    Ok(items)
}
