//! # checkout-catalog: Catalog Loading
//!
//! The I/O edge of the checkout engine. Reads product catalogs from JSON
//! files and builds promotions from settings; everything it produces is
//! handed to `checkout-core`.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Loading                                 │
//! │                                                                         │
//! │   db/products.json ──┐                                                 │
//! │                      ├──► source::read_records ──► Vec<serde_json::Value>
//! │   db/default.json ───┘          (primary, then fallback)               │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                          checkout_core::Catalog::from_records           │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                         CatalogLoad { catalog, diagnostics }            │
//! │                                                                         │
//! │   [[promotions]] ────► promotions::load_promotions ──► PromotionLoad    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`source`] - reading and parsing a single JSON source
//! - [`loader`] - primary/fallback policy and load diagnostics
//! - [`promotions`] - promotion settings to promotions
//! - [`error`] - source error types

pub mod error;
pub mod loader;
pub mod promotions;
pub mod source;

pub use error::{CatalogError, CatalogResult};
pub use loader::load;
pub use promotions::{load_default_promotions, load_promotions, PromotionLoad};
