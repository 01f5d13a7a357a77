//! # checkout-core: Pure Pricing Logic
//!
//! This crate is the **heart** of the checkout engine. It turns catalog
//! records into products, products into cart totals, and cart totals into a
//! payable amount after the best promotion, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    checkout CLI (apps/checkout-cli)             │   │
//! │  │      config ──► load catalog ──► add products ──► print         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              checkout-catalog (file I/O)                        │   │
//! │  │      primary / fallback JSON sources, promotion loading         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ parsed records                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ checkout-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  money   │ │ catalog  │ │   cart   │ │ promotion/engine │  │   │
//! │  │   │ exchange │ │validation│ │ summary  │ │  best-of-N pick  │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO GLOBAL STATE • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `Money` and `Currency`, integer cents
//! - [`exchange`] - directional exchange-rate table
//! - [`validation`] - field validators for raw catalog records
//! - [`product`] - validated `Product`
//! - [`catalog`] - uuid-keyed catalog and load diagnostics
//! - [`promotion`] - `Promotion` trait and percentage-off rule
//! - [`engine`] - best-promotion selection
//! - [`cart`] - `ShoppingCart` and its summary
//! - [`error`] - domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use checkout_core::{Catalog, Currency, ExchangeRateTable, PromotionConfig, ShoppingCart};
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({ "uuid": 1, "name": "Carbon Brake Pads", "price": "92.00" }),
//!     json!({ "uuid": 2, "name": "Bar Tape", "price": 20, "currency": "USD" }),
//! ];
//! let catalog = Catalog::from_records(&records).catalog;
//!
//! let mut cart = ShoppingCart::new(Currency::Aud, Arc::new(ExchangeRateTable::standard()));
//! for config in PromotionConfig::defaults() {
//!     cart.add_promotion(Arc::new(config.build().unwrap()));
//! }
//! cart.add_product_by_uuid(&catalog, 1).unwrap();
//! cart.add_product_by_uuid(&catalog, 2).unwrap();
//!
//! // 92.00 AUD + 20 USD × 1.5 = 122.00 AUD, 20% off = 97.60 AUD
//! let outcome = cart.totals_after_discount().unwrap();
//! assert_eq!(outcome.total.format(), "$97.60");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod exchange;
pub mod money;
pub mod product;
pub mod promotion;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartLine, CartSummary, CartSummaryLine, ShoppingCart};
pub use catalog::{Catalog, CatalogLoad, LoadDiagnostic};
pub use engine::select_best;
pub use error::{CoreError, CoreResult, ValidationError};
pub use exchange::ExchangeRateTable;
pub use money::{Currency, Money};
pub use product::{FormatStyle, Product};
pub use promotion::{PercentageOffPromotion, Promotion, PromotionConfig, PromotionOutcome};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency assumed for catalog records that do not name one.
pub const DEFAULT_CURRENCY: Currency = Currency::Aud;
