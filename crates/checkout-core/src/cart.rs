//! # Shopping Cart
//!
//! One checkout session's products and promotions.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Caller Action              Cart Method             State Change        │
//! │  ─────────────              ───────────             ────────────        │
//! │                                                                         │
//! │  Pick a product ──────────► add_product() ────────► products.push(p)   │
//! │  Pick by uuid ────────────► add_product_by_uuid() ► catalog lookup     │
//! │  Configure promotion ─────► add_promotion() ──────► promotions.push    │
//! │                                                                         │
//! │  View total ──────────────► totals() ─────────────► (read only)        │
//! │  Checkout ────────────────► totals_after_discount() (read only)        │
//! │  Render summary ──────────► summary() ────────────► (read only)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totals Contract
//! Each product price is converted into the cart currency on its own, then
//! the converted amounts are summed. Converting a pooled sum instead gives
//! different cents once per-conversion rounding kicks in:
//! ```text
//! two 0.01 USD items into AUD at 1.5
//!   per item:  round(1.5) + round(1.5) = 2 + 2 = 4 cents   ◄── this one
//!   pooled:    round(2 × 1.5)          = 3 cents
//! ```
//!
//! ## Ownership
//! The cart holds `Arc<Product>` clones of catalog entries and a shared
//! `Arc<ExchangeRateTable>`. It is single-writer: one cart per session.

use serde::Serialize;
use std::sync::Arc;
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::engine;
use crate::error::{CoreError, CoreResult};
use crate::exchange::ExchangeRateTable;
use crate::money::{Currency, Money};
use crate::product::Product;
use crate::promotion::{Promotion, PromotionOutcome};

/// A product in the cart together with how many times it was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product: Arc<Product>,
    pub quantity: usize,
}

/// The shopping cart.
///
/// ## Invariants
/// - Products are appended in selection order; duplicates are allowed
/// - Products are never removed
/// - Promotion order decides ties in [`engine::select_best`]
#[derive(Debug, Clone)]
pub struct ShoppingCart {
    currency: Currency,
    rates: Arc<ExchangeRateTable>,
    products: Vec<Arc<Product>>,
    promotions: Vec<Arc<dyn Promotion>>,
}

impl ShoppingCart {
    /// Creates an empty cart that totals in `currency`.
    pub fn new(currency: Currency, rates: Arc<ExchangeRateTable>) -> Self {
        ShoppingCart {
            currency,
            rates,
            products: Vec::new(),
            promotions: Vec::new(),
        }
    }

    /// The currency totals are computed in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Appends a product. The product was validated by the catalog already.
    pub fn add_product(&mut self, product: Arc<Product>) {
        self.products.push(product);
    }

    /// Looks up `uuid` in the catalog and appends that product.
    ///
    /// ## Errors
    /// [`CoreError::ProductNotFound`] when the catalog has no such uuid. The
    /// cart is left unchanged.
    pub fn add_product_by_uuid(&mut self, catalog: &Catalog, uuid: u64) -> CoreResult<Arc<Product>> {
        let product = catalog
            .get(uuid)
            .cloned()
            .ok_or(CoreError::ProductNotFound(uuid))?;
        self.add_product(Arc::clone(&product));
        Ok(product)
    }

    /// Appends a promotion. Earlier promotions win ties.
    pub fn add_promotion(&mut self, promotion: Arc<dyn Promotion>) {
        self.promotions.push(promotion);
    }

    /// Products in the order they were added.
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    /// Promotions in configured order.
    pub fn promotions(&self) -> &[Arc<dyn Promotion>] {
        &self.promotions
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Number of products, counting repeats.
    pub fn item_count(&self) -> usize {
        self.products.len()
    }

    /// Raw total in the cart currency, before promotions.
    ///
    /// ## Errors
    /// [`CoreError::NoExchangeRate`] if any product's currency cannot be
    /// converted into the cart currency.
    pub fn totals(&self) -> CoreResult<Money> {
        self.products
            .iter()
            .try_fold(Money::zero(self.currency), |sum, product| {
                let converted = self.rates.convert(&product.price(), self.currency)?;
                sum.try_add(&converted)
            })
    }

    /// Total after the single best promotion.
    pub fn totals_after_discount(&self) -> CoreResult<PromotionOutcome> {
        engine::select_best(self)
    }

    /// Products collapsed by uuid with counts, in first-seen order.
    pub fn grouped_products(&self) -> Vec<CartLine> {
        let mut lines: Vec<CartLine> = Vec::new();
        for product in &self.products {
            match lines.iter_mut().find(|l| l.product.uuid() == product.uuid()) {
                Some(line) => line.quantity += 1,
                None => lines.push(CartLine {
                    product: Arc::clone(product),
                    quantity: 1,
                }),
            }
        }
        lines
    }

    /// A serializable snapshot for consumers that render the cart.
    pub fn summary(&self) -> CoreResult<CartSummary> {
        let discounted = self.totals_after_discount()?;
        let lines = self
            .grouped_products()
            .into_iter()
            .map(|line| CartSummaryLine {
                uuid: line.product.uuid(),
                name: line.product.name().to_string(),
                unit_price: line.product.price(),
                quantity: line.quantity,
            })
            .collect();

        Ok(CartSummary {
            currency: self.currency,
            lines,
            subtotal: self.totals()?,
            total: discounted.total,
            discount_message: discounted.message,
        })
    }
}

// =============================================================================
// Cart Summary
// =============================================================================

/// Cart snapshot for JSON consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub currency: Currency,
    pub lines: Vec<CartSummaryLine>,
    /// Total before promotions.
    pub subtotal: Money,
    /// Payable total after the best promotion.
    pub total: Money,
    pub discount_message: Option<String>,
}

/// One grouped product line; `unit_price` is in the product's own currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummaryLine {
    pub uuid: u64,
    pub name: String,
    pub unit_price: Money,
    pub quantity: usize,
}

// =============================================================================
// Unit Tests
// =============================================================================
