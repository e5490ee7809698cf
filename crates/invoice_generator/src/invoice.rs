//! Invoice model, totals and text rendering

use std::fmt::Write as _;

use chrono::NaiveDateTime;

/// GST rate applied to the subtotal
pub const TAX_RATE: f64 = 0.18;

/// Maximum number of items per invoice
pub const MAX_ITEMS: usize = 100;

/// One invoice line
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
    /// quantity * price
    pub total: f64,
}

impl Item {
    pub fn new(name: impl Into<String>, quantity: i64, price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
            total: quantity as f64 * price,
        }
    }
}

/// Buyer contact details
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buyer {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// A complete invoice with computed totals
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub buyer: Buyer,
    pub items: Vec<Item>,
    pub tax_rate: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub grand_total: f64,
}

impl Invoice {
    pub fn new(buyer: Buyer, items: Vec<Item>, tax_rate: f64) -> Self {
        let subtotal: f64 = items.iter().map(|item| item.total).sum();
        let tax = subtotal * tax_rate;
        Self {
            buyer,
            items,
            tax_rate,
            subtotal,
            tax,
            grand_total: subtotal + tax,
        }
    }
}

/// Render the invoice exactly as written to disk
pub fn render_invoice(invoice: &Invoice, generated_at: &NaiveDateTime) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = render_into(&mut out, invoice, generated_at);
    out
}

fn render_into(out: &mut String, invoice: &Invoice, generated_at: &NaiveDateTime) -> std::fmt::Result {
    writeln!(out, "======== INVOICE ========")?;
    writeln!(out, "Date: {}", generated_at.format("%d-%m-%Y %H:%M:%S"))?;
    writeln!(out, "Buyer Name : {}", invoice.buyer.name)?;
    writeln!(out, "Phone      : {}", invoice.buyer.phone)?;
    writeln!(out, "Email      : {}", invoice.buyer.email)?;

    writeln!(out, "\n{:<20} {:<10} {:<10} {:<10}", "Item", "Qty", "Price", "Total")?;
    for item in &invoice.items {
        writeln!(
            out,
            "{:<20} {:<10} {:<10.2} {:<10.2}",
            item.name, item.quantity, item.price, item.total
        )?;
    }

    writeln!(out, "\nSubtotal: {:.2}", invoice.subtotal)?;
    writeln!(out, "GST ({:.0}%): {:.2}", invoice.tax_rate * 100.0, invoice.tax)?;
    writeln!(out, "Grand Total: {:.2}", invoice.grand_total)?;
    Ok(())
}
