//! # Promotion Engine
//!
//! Picks the single best promotion for a cart. Promotions never stack.
//!
//! ## Selection Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  best = (cart.totals(), no message)                                    │
//! │                                                                         │
//! │  for promotion in configured order:                                    │
//! │      candidate = promotion.apply(cart)                                 │
//! │      if candidate.total < best.total:      ◄── strictly less           │
//! │          best = candidate                                              │
//! │                                                                         │
//! │  Ties keep the earlier promotion.                                      │
//! │  A candidate without a message can still win on total.                 │
//! │  No promotions, or none cheaper → original total, no message.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cmp::Ordering;
use tracing::debug;

use crate::cart::ShoppingCart;
use crate::error::CoreResult;
use crate::promotion::PromotionOutcome;

/// Evaluates every promotion on the cart and returns the cheapest outcome.
///
/// Pure: reads the cart, changes nothing. Linear in the number of
/// promotions.
///
/// ## Errors
/// Any currency error raised while totalling the cart or applying a
/// promotion. Such errors are never treated as "no discount".
pub fn select_best(cart: &ShoppingCart) -> CoreResult<PromotionOutcome> {
    let mut best = PromotionOutcome::unchanged(cart.totals()?);

    for promotion in cart.promotions() {
        let candidate = promotion.apply(cart)?;
        debug!(
            promotion = promotion.name(),
            total = %candidate.total,
            applied = candidate.message.is_some(),
            "Evaluated promotion"
        );

        if candidate.total.compare(&best.total)? == Ordering::Less {
            best = candidate;
        }
    }

    debug!(total = %best.total, message = ?best.message, "Selected best promotion");
    Ok(best)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::error::CoreError;
    use crate::exchange::ExchangeRateTable;
    use crate::money::{Currency, Money};
    use crate::promotion::{PercentageOffPromotion, Promotion};
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::sync::Arc;

    /// Returns a fixed outcome regardless of the cart contents.
    #[derive(Debug)]
    struct FixedPromotion {
        cents: i64,
        message: Option<&'static str>,
    }

    impl Promotion for FixedPromotion {
        fn name(&self) -> &str {
            "Fixed"
        }

        fn description(&self) -> &str {
            self.message.unwrap_or_default()
        }

        fn apply(&self, cart: &ShoppingCart) -> CoreResult<PromotionOutcome> {
            Ok(PromotionOutcome {
                total: Money::from_cents(self.cents, cart.currency()),
                message: self.message.map(str::to_string),
            })
        }
    }

    fn fixed(amount: i64, message: Option<&'static str>) -> Arc<dyn Promotion> {
        Arc::new(FixedPromotion {
            cents: amount * 100,
            message,
        })
    }

    /// An AUD cart whose raw total is `amount` dollars.
    fn cart_totalling(amount: i64) -> ShoppingCart {
        let load = Catalog::from_records(&[json!({ "uuid": 1, "name": "Widget", "price": amount })]);
        let mut cart = ShoppingCart::new(Currency::Aud, Arc::new(ExchangeRateTable::standard()));
        if let Some(product) = load.catalog.get(1) {
            cart.add_product(Arc::clone(product));
        }
        cart
    }

    fn aud(amount: i64) -> Money {
        Money::from_cents(amount * 100, Currency::Aud)
    }

    #[test]
    fn test_empty_cart_without_promotions() {
        let cart = ShoppingCart::new(Currency::Aud, Arc::new(ExchangeRateTable::new()));
        assert_eq!(
            select_best(&cart).unwrap(),
            PromotionOutcome::unchanged(Money::zero(Currency::Aud))
        );
    }

    #[test]
    fn test_no_promotions_returns_original_total() {
        let cart = cart_totalling(100);
        assert_eq!(select_best(&cart).unwrap(), PromotionOutcome::unchanged(aud(100)));
    }

    #[test]
    fn test_single_promotion_applies() {
        let mut cart = cart_totalling(100);
        cart.add_promotion(fixed(80, Some("20% discount applied")));
        assert_eq!(
            select_best(&cart).unwrap(),
            PromotionOutcome::discounted(aud(80), "20% discount applied")
        );
    }

    #[test]
    fn test_picks_lowest_when_first() {
        let mut cart = cart_totalling(100);
        cart.add_promotion(fixed(70, Some("30% discount")));
        cart.add_promotion(fixed(80, Some("20% discount")));
        cart.add_promotion(fixed(90, Some("10% discount")));
        assert_eq!(
            select_best(&cart).unwrap(),
            PromotionOutcome::discounted(aud(70), "30% discount")
        );
    }

    #[test]
    fn test_picks_lowest_when_last() {
        let mut cart = cart_totalling(100);
        cart.add_promotion(fixed(90, Some("10% discount")));
        cart.add_promotion(fixed(80, Some("20% discount")));
        cart.add_promotion(fixed(70, Some("30% discount")));
        assert_eq!(
            select_best(&cart).unwrap(),
            PromotionOutcome::discounted(aud(70), "30% discount")
        );
    }

    #[test]
    fn test_non_applying_promotion_is_ignored() {
        let mut cart = cart_totalling(100);
        cart.add_promotion(fixed(100, None));
        cart.add_promotion(fixed(80, Some("20% discount")));
        assert_eq!(
            select_best(&cart).unwrap(),
            PromotionOutcome::discounted(aud(80), "20% discount")
        );
    }

    #[test]
    fn test_tie_keeps_first_promotion() {
        let mut cart = cart_totalling(100);
        cart.add_promotion(fixed(80, Some("First")));
        cart.add_promotion(fixed(80, Some("Second")));
        assert_eq!(
            select_best(&cart).unwrap(),
            PromotionOutcome::discounted(aud(80), "First")
        );
    }

    #[test]
    fn test_silent_discount_can_win() {
        let mut cart = cart_totalling(100);
        cart.add_promotion(fixed(90, Some("10% off")));
        cart.add_promotion(fixed(80, None));
        assert_eq!(select_best(&cart).unwrap(), PromotionOutcome::unchanged(aud(80)));
    }

    #[test]
    fn test_equal_to_original_total_does_not_replace() {
        let mut cart = cart_totalling(100);
        cart.add_promotion(fixed(100, Some("Nothing off")));
        assert_eq!(select_best(&cart).unwrap(), PromotionOutcome::unchanged(aud(100)));
    }

    #[test]
    fn test_real_promotions_big_spender() {
        let mut cart = cart_totalling(120);
        cart.add_promotion(Arc::new(
            PercentageOffPromotion::new("Big", "20% off on total greater than $100", dec!(100), 20)
                .unwrap(),
        ));
        cart.add_promotion(Arc::new(
            PercentageOffPromotion::new("Medium", "15% off on total greater than $50", dec!(50), 15)
                .unwrap(),
        ));
        let best = select_best(&cart).unwrap();
        assert_eq!(best.total, aud(96));
        assert_eq!(best.message.as_deref(), Some("20% off on total greater than $100"));
    }

    #[test]
    fn test_real_promotions_medium_spender() {
        let mut cart = cart_totalling(70);
        cart.add_promotion(Arc::new(
            PercentageOffPromotion::new("Big", "20% off on total greater than $100", dec!(100), 20)
                .unwrap(),
        ));
        cart.add_promotion(Arc::new(
            PercentageOffPromotion::new("Medium", "15% off on total greater than $50", dec!(50), 15)
                .unwrap(),
        ));
        let best = select_best(&cart).unwrap();
        assert_eq!(best.total, Money::from_cents(5950, Currency::Aud));
        assert_eq!(best.message.as_deref(), Some("15% off on total greater than $50"));
    }

    #[test]
    fn test_currency_error_propagates() {
        let load = Catalog::from_records(&[json!({ "uuid": 1, "name": "Euro", "price": 5, "currency": "EUR" })]);
        let mut cart = ShoppingCart::new(Currency::Aud, Arc::new(ExchangeRateTable::standard()));
        cart.add_product(Arc::clone(load.catalog.get(1).unwrap()));
        cart.add_promotion(fixed(1, Some("never reached")));

        assert_eq!(
            select_best(&cart),
            Err(CoreError::NoExchangeRate {
                from: Currency::Eur,
                to: Currency::Aud
            })
        );
    }
}
