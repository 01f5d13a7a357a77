//! Text and JSON rendering for the `checkout` binary.
//!
//! ```text
//! Products in Shopping Cart:
//! 1. Jockey Wheels - Orange - $15.39 (AUD) x2
//! 2. Carbon Brake Pads - $92.00 (AUD)
//!
//! Discount applied: 20% off on total greater than $100
//!
//! TOTAL: $98.22
//! ```

use checkout_core::{CartSummary, Catalog, FormatStyle, Product, Promotion};
use serde::Serialize;
use std::fmt::Write;
use std::sync::Arc;

/// Renders a cart summary as the receipt shown above.
pub fn render_summary(summary: &CartSummary) -> String {
    let mut out = String::new();

    if summary.lines.is_empty() {
        out.push_str("Your shopping cart is empty.\n");
    } else {
        out.push_str("Products in Shopping Cart:\n");
        for (i, line) in summary.lines.iter().enumerate() {
            let _ = write!(
                out,
                "{}. {} - {} ({})",
                i + 1,
                line.name,
                line.unit_price.format(),
                line.unit_price.currency()
            );
            if line.quantity > 1 {
                let _ = write!(out, " x{}", line.quantity);
            }
            out.push('\n');
        }
    }

    if let Some(message) = &summary.discount_message {
        let _ = write!(out, "\nDiscount applied: {}\n", message);
    }

    let _ = write!(out, "\nTOTAL: {}\n", summary.total.format());
    out
}

/// Renders the catalog, one product per line keyed by uuid.
pub fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::from("Available Products:\n");
    for product in catalog.iter() {
        let _ = writeln!(
            out,
            "{}. {}",
            product.uuid(),
            product.render(FormatStyle::NameWithPrice)
        );
    }
    out
}

/// Renders promotions in tie-break order.
pub fn render_promotions(promotions: &[Arc<dyn Promotion>]) -> String {
    let mut out = String::from("Available Promotions:\n");
    for (i, promotion) in promotions.iter().enumerate() {
        let _ = writeln!(out, "{}. {}: {}", i + 1, promotion.name(), promotion.description());
    }
    out
}

/// `--list --json` payload.
#[derive(Debug, Serialize)]
struct Listing<'a> {
    products: Vec<&'a Product>,
    promotions: Vec<PromotionEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct PromotionEntry<'a> {
    name: &'a str,
    description: &'a str,
}

/// Renders the catalog and promotions as one JSON document.
pub fn render_listing_json(
    catalog: &Catalog,
    promotions: &[Arc<dyn Promotion>],
) -> serde_json::Result<String> {
    let listing = Listing {
        products: catalog.iter().map(|p| p.as_ref()).collect(),
        promotions: promotions
            .iter()
            .map(|p| PromotionEntry {
                name: p.name(),
                description: p.description(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&listing)
}

// =============================================================================
// Unit Tests
// =============================================================================
