//! # Promotion Loading
//!
//! Turns promotion settings into the promotions a cart evaluates.
//!
//! Invalid entries are skipped with a message instead of failing the whole
//! set; a checkout with one broken promotion still runs with the rest.

use checkout_core::{Promotion, PromotionConfig};
use std::sync::Arc;
use tracing::debug;

/// Loaded promotions plus the messages produced while loading them.
#[derive(Debug, Default)]
pub struct PromotionLoad {
    pub promotions: Vec<Arc<dyn Promotion>>,
    pub messages: Vec<String>,
}

/// Builds a promotion for every valid entry, in order.
pub fn load_promotions(configs: &[PromotionConfig]) -> PromotionLoad {
    let mut load = PromotionLoad::default();

    for config in configs {
        match config.build() {
            Ok(promotion) => {
                debug!(
                    promotion = %config.name,
                    threshold = %config.threshold,
                    percentage = config.percentage,
                    "Loaded promotion"
                );
                load.messages.push(format!("Loaded promotion: {}", config.name));
                load.promotions.push(Arc::new(promotion));
            }
            Err(e) => {
                debug!(promotion = %config.name, error = %e, "Skipping promotion");
                load.messages
                    .push(format!("Invalid promotion {}: {}. Skipping.", config.name, e));
            }
        }
    }

    load
}

/// Loads the three built-in spender promotions.
pub fn load_default_promotions() -> PromotionLoad {
    load_promotions(&PromotionConfig::defaults())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let load = load_default_promotions();
        assert_eq!(load.promotions.len(), 3);
        assert_eq!(
            load.messages,
            vec![
                "Loaded promotion: Big Spender",
                "Loaded promotion: Medium Spender",
                "Loaded promotion: Small Spender",
            ]
        );
        assert_eq!(load.promotions[1].description(), "15% off on total greater than $50");
    }

    #[test]
    fn test_invalid_entry_skipped() {
        let configs = vec![
            PromotionConfig {
                name: "Too Generous".to_string(),
                description: "150% off".to_string(),
                threshold: dec!(10),
                percentage: 150,
            },
            PromotionConfig {
                name: "Fine".to_string(),
                description: "5% off".to_string(),
                threshold: dec!(10),
                percentage: 5,
            },
        ];
        let load = load_promotions(&configs);

        assert_eq!(load.promotions.len(), 1);
        assert_eq!(load.promotions[0].name(), "Fine");
        assert!(load.messages[0].starts_with("Invalid promotion Too Generous: "));
        assert_eq!(load.messages[1], "Loaded promotion: Fine");
    }

    #[test]
    fn test_empty() {
        let load = load_promotions(&[]);
        assert!(load.promotions.is_empty());
        assert!(load.messages.is_empty());
    }
}
