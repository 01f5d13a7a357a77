//! # Product
//!
//! A validated catalog entry.
//!
//! ## Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product                                                                │
//! │  ─────────────                                                          │
//! │  uuid  (u64)     ◄── identity key, unique within a catalog             │
//! │  name  (String)                                                         │
//! │  price (Money)   ◄── non-negative, in the product's own currency       │
//! │                                                                         │
//! │  Constructed only through validation. Immutable afterwards.            │
//! │  The catalog owns it; carts hold Arc<Product> clones.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{check_record, ValidRecord};

/// How a product renders as a line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatStyle {
    /// `Standard Product`
    #[default]
    NameOnly,
    /// `Standard Product - $19.99 (AUD)`
    NameWithPrice,
}

/// A product available for checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    uuid: u64,
    name: String,
    price: Money,
}

impl Product {
    /// Builds a product from a raw catalog record.
    ///
    /// ## Errors
    /// Every field that failed validation. See [`crate::validation`].
    pub fn from_record(record: &Value) -> Result<Product, Vec<ValidationError>> {
        check_record(record).map(Product::from)
    }

    /// Unique identifier within the catalog.
    #[inline]
    pub fn uuid(&self) -> u64 {
        self.uuid
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price in the product's own currency.
    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Renders the product as one line of text.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::product::{FormatStyle, Product};
    /// use serde_json::json;
    ///
    /// let product = Product::from_record(&json!({
    ///     "uuid": 1234, "name": "Standard Product", "price": "19.99"
    /// })).unwrap();
    ///
    /// assert_eq!(product.render(FormatStyle::NameOnly), "Standard Product");
    /// assert_eq!(
    ///     product.render(FormatStyle::NameWithPrice),
    ///     "Standard Product - $19.99 (AUD)"
    /// );
    /// ```
    pub fn render(&self, style: FormatStyle) -> String {
        match style {
            FormatStyle::NameOnly => self.name.clone(),
            FormatStyle::NameWithPrice => format!(
                "{} - {} ({})",
                self.name,
                self.price.format(),
                self.price.currency()
            ),
        }
    }
}

impl From<ValidRecord> for Product {
    fn from(record: ValidRecord) -> Self {
        Product {
            uuid: record.uuid,
            name: record.name,
            price: record.price,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use serde_json::json;

    #[test]
    fn test_from_record_defaults_to_aud() {
        let product =
            Product::from_record(&json!({ "uuid": 1234, "name": "Standard Product", "price": "19.99" }))
                .unwrap();
        assert_eq!(product.uuid(), 1234);
        assert_eq!(product.name(), "Standard Product");
        assert_eq!(product.price(), Money::from_cents(1999, Currency::Aud));
    }

    #[test]
    fn test_from_record_numeric_prices() {
        let float = Product::from_record(&json!({ "uuid": 1, "name": "Float", "price": 29.99 })).unwrap();
        assert_eq!(float.price().cents(), 2999);

        let int = Product::from_record(&json!({ "uuid": 2, "name": "Int", "price": 30 })).unwrap();
        assert_eq!(int.price().cents(), 3000);
    }

    #[test]
    fn test_from_record_rejects_negative_price() {
        let errors =
            Product::from_record(&json!({ "uuid": 1, "name": "Negative", "price": "-19.99" })).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::MustBeNonNegative {
                field: "price".to_string()
            }]
        );
    }

    #[test]
    fn test_from_record_rejects_unknown_currency() {
        let errors = Product::from_record(
            &json!({ "uuid": 1, "name": "Yarr", "price": "19.99", "currency": "YARR" }),
        )
        .unwrap_err();
        assert!(matches!(&errors[0], ValidationError::UnknownCurrency { code, .. } if code == "YARR"));
    }

    #[test]
    fn test_render_styles() {
        let tea = Product::from_record(
            &json!({ "uuid": 1234, "name": "UK Tea", "price": "9.99", "currency": "GBP" }),
        )
        .unwrap();
        assert_eq!(tea.render(FormatStyle::NameOnly), "UK Tea");
        assert_eq!(tea.render(FormatStyle::NameWithPrice), "UK Tea - £9.99 (GBP)");
        assert_eq!(tea.render(FormatStyle::default()), "UK Tea");
    }
}
