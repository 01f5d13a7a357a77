//! # Catalog
//!
//! The immutable, uuid-keyed set of products a checkout sells from.
//!
//! ## Building a Catalog
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog::from_records                                │
//! │                                                                         │
//! │  for record in source order:                                           │
//! │       │                                                                 │
//! │       ├── validation fails? ──► InvalidRecord diagnostic, skip         │
//! │       │                                                                 │
//! │       ├── uuid already seen? ─► Duplicate diagnostic, skip             │
//! │       │                         (first occurrence wins)                │
//! │       │                                                                 │
//! │       └── insert ─────────────► Loaded diagnostic                      │
//! │                                                                         │
//! │  local Vec + index ──► Catalog (no mutation API from here on)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reading the records from disk, and the primary/fallback source policy,
//! live in `checkout-catalog`. This module only sees parsed JSON values.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::ValidationError;
use crate::money::Money;
use crate::product::Product;

// =============================================================================
// Diagnostics
// =============================================================================

/// One entry of the ordered load report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadDiagnostic {
    /// A product was accepted.
    Loaded { name: String, price: Money },

    /// A later record reused a uuid; it was discarded.
    Duplicate { uuid: u64 },

    /// A record failed validation; `raw` is its JSON text.
    InvalidRecord {
        raw: String,
        errors: Vec<ValidationError>,
    },

    /// The primary source could not be read; the fallback was used.
    SourceMissing { path: String },

    /// Neither source could be read.
    NoSourceAvailable,

    /// The load finished with an empty catalog.
    NoValidProducts,

    /// The source was not a JSON array of records.
    InvalidSource { reason: String },
}

impl LoadDiagnostic {
    /// True for entries that describe something going wrong.
    pub fn is_warning(&self) -> bool {
        !matches!(self, LoadDiagnostic::Loaded { .. })
    }
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadDiagnostic::Loaded { name, price } => write!(
                f,
                "Loaded product: {} - {} ({})",
                name,
                price.format(),
                price.currency()
            ),
            LoadDiagnostic::Duplicate { uuid } => {
                write!(f, "Duplicate product UUID detected: {}. Skipping.", uuid)
            }
            LoadDiagnostic::InvalidRecord { raw, .. } => {
                write!(f, "Invalid record: {}. Skipping.", raw)
            }
            LoadDiagnostic::SourceMissing { path } => write!(
                f,
                "Database file not found at {}. Using default products.",
                path
            ),
            LoadDiagnostic::NoSourceAvailable => f.write_str("No valid database file found."),
            LoadDiagnostic::NoValidProducts => f.write_str("No valid products were loaded."),
            LoadDiagnostic::InvalidSource { reason } => {
                write!(f, "Invalid JSON format: {}", reason)
            }
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Insertion-ordered `uuid → Product` map.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
    index: HashMap<u64, usize>,
}

impl Catalog {
    /// An empty catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a catalog from raw records, reporting every decision made.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::catalog::Catalog;
    /// use serde_json::json;
    ///
    /// let records = vec![
    ///     json!({ "uuid": 1, "name": "Jockey Wheels - Orange", "price": 15.39 }),
    ///     json!({ "uuid": 1, "name": "Imposter", "price": 1 }),
    /// ];
    /// let load = Catalog::from_records(&records);
    /// assert_eq!(load.catalog.len(), 1);
    /// assert_eq!(
    ///     load.messages(),
    ///     vec![
    ///         "Loaded product: Jockey Wheels - Orange - $15.39 (AUD)".to_string(),
    ///         "Duplicate product UUID detected: 1. Skipping.".to_string(),
    ///     ]
    /// );
    /// ```
    pub fn from_records(records: &[Value]) -> CatalogLoad {
        let mut products: Vec<Arc<Product>> = Vec::with_capacity(records.len());
        let mut index: HashMap<u64, usize> = HashMap::with_capacity(records.len());
        let mut diagnostics = Vec::with_capacity(records.len());

        for record in records {
            let product = match Product::from_record(record) {
                Ok(product) => product,
                Err(errors) => {
                    diagnostics.push(LoadDiagnostic::InvalidRecord {
                        raw: record.to_string(),
                        errors,
                    });
                    continue;
                }
            };

            if index.contains_key(&product.uuid()) {
                diagnostics.push(LoadDiagnostic::Duplicate {
                    uuid: product.uuid(),
                });
                continue;
            }

            diagnostics.push(LoadDiagnostic::Loaded {
                name: product.name().to_string(),
                price: product.price(),
            });
            index.insert(product.uuid(), products.len());
            products.push(Arc::new(product));
        }

        CatalogLoad {
            catalog: Catalog { products, index },
            diagnostics,
        }
    }

    /// Looks up a product by uuid.
    pub fn get(&self, uuid: u64) -> Option<&Arc<Product>> {
        self.index.get(&uuid).map(|&i| &self.products[i])
    }

    /// True if a product with this uuid exists.
    pub fn contains(&self, uuid: u64) -> bool {
        self.index.contains_key(&uuid)
    }

    /// Products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Product>> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// A catalog plus the ordered diagnostics produced while building it.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub diagnostics: Vec<LoadDiagnostic>,
}

impl CatalogLoad {
    /// Diagnostics rendered as text, in order.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_loads_valid_records_in_order() {
        let records = vec![
            json!({ "uuid": 3, "name": "Carbon Brake Pads", "price": "92.00" }),
            json!({ "uuid": 1, "name": "Chain Ring 146mm", "price": 65.95 }),
            json!({ "uuid": 2, "name": "UK Tea", "price": "9.99", "currency": "GBP" }),
        ];
        let load = Catalog::from_records(&records);

        let uuids: Vec<u64> = load.catalog.iter().map(|p| p.uuid()).collect();
        assert_eq!(uuids, vec![3, 1, 2]);
        assert_eq!(
            load.messages(),
            vec![
                "Loaded product: Carbon Brake Pads - $92.00 (AUD)",
                "Loaded product: Chain Ring 146mm - $65.95 (AUD)",
                "Loaded product: UK Tea - £9.99 (GBP)",
            ]
        );
        assert!(load.diagnostics.iter().all(|d| !d.is_warning()));
    }

    #[test]
    fn test_first_duplicate_wins() {
        let records = vec![
            json!({ "uuid": 7, "name": "First", "price": 1 }),
            json!({ "uuid": "7", "name": "Second", "price": 2 }),
            json!({ "uuid": 8, "name": "Third", "price": 3 }),
        ];
        let load = Catalog::from_records(&records);

        assert_eq!(load.catalog.len(), 2);
        assert_eq!(load.catalog.get(7).unwrap().name(), "First");
        assert_eq!(load.diagnostics[1], LoadDiagnostic::Duplicate { uuid: 7 });
        assert_eq!(
            load.messages()[1],
            "Duplicate product UUID detected: 7. Skipping."
        );
    }

    #[test]
    fn test_invalid_records_are_skipped_with_raw_text() {
        let records = vec![
            json!({ "uuid": 1, "price": 5 }),
            json!({ "uuid": 2, "name": "Good", "price": 5 }),
            json!({ "uuid": 3, "name": "Yarr", "price": 5, "currency": "YARR" }),
        ];
        let load = Catalog::from_records(&records);

        assert_eq!(load.catalog.len(), 1);
        assert!(load.catalog.contains(2));
        assert_eq!(
            load.messages()[0],
            format!("Invalid record: {}. Skipping.", records[0])
        );
        assert!(load.diagnostics[0].is_warning());
        assert!(matches!(
            &load.diagnostics[2],
            LoadDiagnostic::InvalidRecord { errors, .. } if errors[0].field() == "currency"
        ));
    }

    #[test]
    fn test_invalid_record_does_not_claim_uuid() {
        let records = vec![
            json!({ "uuid": 5, "name": "Broken", "price": "-1" }),
            json!({ "uuid": 5, "name": "Fixed", "price": "1" }),
        ];
        let load = Catalog::from_records(&records);
        assert_eq!(load.catalog.get(5).unwrap().name(), "Fixed");
    }

    #[test]
    fn test_empty_records() {
        let load = Catalog::from_records(&[]);
        assert!(load.catalog.is_empty());
        assert!(load.diagnostics.is_empty());
        assert!(load.catalog.get(1).is_none());
    }

    #[test]
    fn test_source_diagnostic_messages() {
        assert_eq!(
            LoadDiagnostic::SourceMissing {
                path: "db/products.json".to_string()
            }
            .to_string(),
            "Database file not found at db/products.json. Using default products."
        );
        assert_eq!(
            LoadDiagnostic::NoSourceAvailable.to_string(),
            "No valid database file found."
        );
        assert_eq!(
            LoadDiagnostic::NoValidProducts.to_string(),
            "No valid products were loaded."
        );
        let loaded = LoadDiagnostic::Loaded {
            name: "Tea".to_string(),
            price: Money::from_cents(250, Currency::Eur),
        };
        assert_eq!(loaded.to_string(), "Loaded product: Tea - €2.50 (EUR)");
    }

    proptest! {
        /// Generated records: `(uuid, valid)`. Invalid ones carry a negative price.
        #[test]
        fn test_retained_uuids_unique_and_first_valid_wins(
            entries in prop::collection::vec((0u64..16, any::<bool>()), 0..48)
        ) {
            let records: Vec<Value> = entries
                .iter()
                .enumerate()
                .map(|(i, (uuid, valid))| {
                    json!({
                        "uuid": uuid,
                        "name": format!("Product {}", i),
                        "price": if *valid { "1.00" } else { "-1.00" }
                    })
                })
                .collect();
            let load = Catalog::from_records(&records);

            let mut seen = HashSet::new();
            let expected: Vec<(u64, usize)> = entries
                .iter()
                .enumerate()
                .filter(|(_, (_, valid))| *valid)
                .filter(|(_, (uuid, _))| seen.insert(*uuid))
                .map(|(i, (uuid, _))| (*uuid, i))
                .collect();

            let retained: Vec<u64> = load.catalog.iter().map(|p| p.uuid()).collect();
            let unique: HashSet<u64> = retained.iter().copied().collect();
            prop_assert_eq!(unique.len(), retained.len());
            prop_assert_eq!(
                retained,
                expected.iter().map(|(uuid, _)| *uuid).collect::<Vec<_>>()
            );

            for (uuid, first) in &expected {
                let name = load.catalog.get(*uuid).map(|p| p.name().to_string());
                prop_assert_eq!(name, Some(format!("Product {}", first)));
            }

            // One diagnostic per record, in source order.
            prop_assert_eq!(load.diagnostics.len(), entries.len());
        }
    }
}
