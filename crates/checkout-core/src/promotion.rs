//! # Promotions
//!
//! Threshold-percentage discounts: "X% off when the total is at least T".
//!
//! ## How a Promotion Evaluates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PercentageOffPromotion::apply(cart)                                   │
//! │                                                                         │
//! │  total     = cart.totals()                   e.g. 60.00 USD            │
//! │  threshold = 50 materialized in USD          50.00 USD                 │
//! │       │                                                                 │
//! │       ├── total ≥ threshold ──► total × (100 - 10)/100 = 54.00 USD     │
//! │       │                         message: "10% off orders over $50"     │
//! │       │                                                                 │
//! │       └── total < threshold ──► 60.00 USD unchanged, no message        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The threshold is a bare number. It is read as an amount in whatever
//! currency the cart uses; no exchange rate is applied to it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::cart::ShoppingCart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Promotion Trait
// =============================================================================

/// The result of evaluating one promotion against a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromotionOutcome {
    /// Total after this promotion, in the cart's currency.
    pub total: Money,
    /// Discount message; `None` when nothing was applied.
    pub message: Option<String>,
}

impl PromotionOutcome {
    /// An outcome that leaves the total as it is.
    pub fn unchanged(total: Money) -> Self {
        PromotionOutcome {
            total,
            message: None,
        }
    }

    /// An outcome with a discounted total and its message.
    pub fn discounted(total: Money, message: impl Into<String>) -> Self {
        PromotionOutcome {
            total,
            message: Some(message.into()),
        }
    }
}

/// A discount rule the promotion engine can evaluate.
///
/// Implementations must be pure: the same cart always yields the same
/// outcome, and the cart is never modified.
pub trait Promotion: fmt::Debug + Send + Sync {
    /// Short name, e.g. "Big Spender".
    fn name(&self) -> &str;

    /// Human-readable description, also used as the discount message.
    fn description(&self) -> &str;

    /// Evaluates the promotion against the cart.
    fn apply(&self, cart: &ShoppingCart) -> CoreResult<PromotionOutcome>;
}

// =============================================================================
// Percentage Off
// =============================================================================

/// "`percentage`% off when the total is at least `threshold`".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentageOffPromotion {
    name: String,
    description: String,
    threshold: Decimal,
    percentage: u32,
}

impl PercentageOffPromotion {
    /// Creates a promotion.
    ///
    /// ## Errors
    /// [`CoreError::InvalidPercentage`] if `percentage > 100`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        threshold: Decimal,
        percentage: u32,
    ) -> CoreResult<Self> {
        if percentage > 100 {
            return Err(CoreError::InvalidPercentage(percentage));
        }

        Ok(PercentageOffPromotion {
            name: name.into(),
            description: description.into(),
            threshold,
            percentage,
        })
    }

    /// Minimum total, as a bare amount in the cart's currency.
    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    /// Discount in whole percent (0-100).
    pub fn percentage(&self) -> u32 {
        self.percentage
    }
}

impl Promotion for PercentageOffPromotion {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn apply(&self, cart: &ShoppingCart) -> CoreResult<PromotionOutcome> {
        let total = cart.totals()?;
        let threshold = Money::from_amount(self.threshold, cart.currency())?;

        if total.compare(&threshold)? == Ordering::Less {
            return Ok(PromotionOutcome::unchanged(total));
        }

        let factor = Decimal::from(100 - self.percentage) / Decimal::ONE_HUNDRED;
        Ok(PromotionOutcome::discounted(
            total.scale(factor)?,
            self.description.clone(),
        ))
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Serializable promotion settings, as found in `checkout.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionConfig {
    pub name: String,
    pub description: String,
    pub threshold: Decimal,
    pub percentage: u32,
}

impl PromotionConfig {
    /// The promotions offered when none are configured.
    ///
    /// | name           | % off | threshold |
    /// |----------------|-------|-----------|
    /// | Big Spender    | 20    | 100       |
    /// | Medium Spender | 15    | 50        |
    /// | Small Spender  | 10    | 20        |
    pub fn defaults() -> Vec<PromotionConfig> {
        vec![
            PromotionConfig {
                name: "Big Spender".to_string(),
                description: "20% off on total greater than $100".to_string(),
                threshold: Decimal::from(100),
                percentage: 20,
            },
            PromotionConfig {
                name: "Medium Spender".to_string(),
                description: "15% off on total greater than $50".to_string(),
                threshold: Decimal::from(50),
                percentage: 15,
            },
            PromotionConfig {
                name: "Small Spender".to_string(),
                description: "10% off on total greater than $20".to_string(),
                threshold: Decimal::from(20),
                percentage: 10,
            },
        ]
    }

    /// Builds the promotion these settings describe.
    pub fn build(&self) -> CoreResult<PercentageOffPromotion> {
        PercentageOffPromotion::new(
            self.name.clone(),
            self.description.clone(),
            self.threshold,
            self.percentage,
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
