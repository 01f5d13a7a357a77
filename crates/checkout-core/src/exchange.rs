//! # Exchange Rates
//!
//! A read-only table of directional exchange rates.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Exchange Table Lifecycle                             │
//! │                                                                         │
//! │  startup                                                               │
//! │    │  ExchangeRateTable::standard()  or  config [[exchange_rates]]     │
//! │    ▼                                                                    │
//! │  Arc<ExchangeRateTable>  ──► cart #1                                   │
//! │                          ──► cart #2   (shared, never mutated)         │
//! │                                                                         │
//! │  (USD, AUD) → 1.5        (AUD, USD) → 0.6666                          │
//! │  Each direction is its own entry. They need not be reciprocals.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The table is built with [`ExchangeRateTable::with_rate`], which consumes
//! and returns the table. There is no way to change a rate once the table
//! is shared.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::money::{round_to_cents, Currency, Money};

/// Directional `(from, to) → rate` lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeRateTable {
    rates: HashMap<(Currency, Currency), Decimal>,
}

impl ExchangeRateTable {
    /// Creates an empty table. Only same-currency conversions succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in rates used when nothing is configured.
    ///
    /// | from | to  | rate   |
    /// |------|-----|--------|
    /// | USD  | AUD | 1.5    |
    /// | AUD  | USD | 0.6666 |
    /// | GBP  | AUD | 1.5    |
    /// | AUD  | GBP | 0.6666 |
    /// | USD  | GBP | 0.8    |
    /// | GBP  | USD | 1.25   |
    pub fn standard() -> Self {
        Self::new()
            .with_rate(Currency::Usd, Currency::Aud, Decimal::new(15, 1))
            .with_rate(Currency::Aud, Currency::Usd, Decimal::new(6666, 4))
            .with_rate(Currency::Gbp, Currency::Aud, Decimal::new(15, 1))
            .with_rate(Currency::Aud, Currency::Gbp, Decimal::new(6666, 4))
            .with_rate(Currency::Usd, Currency::Gbp, Decimal::new(8, 1))
            .with_rate(Currency::Gbp, Currency::Usd, Decimal::new(125, 2))
    }

    /// Returns the table with one more directional rate.
    ///
    /// A later rate for the same pair replaces the earlier one.
    pub fn with_rate(mut self, from: Currency, to: Currency, rate: Decimal) -> Self {
        self.rates.insert((from, to), rate);
        self
    }

    /// Looks up the rate for an ordered pair.
    pub fn rate(&self, from: Currency, to: Currency) -> Option<Decimal> {
        self.rates.get(&(from, to)).copied()
    }

    /// Number of directional entries.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// True when no rates are configured.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Converts `money` into `target`.
    ///
    /// ## Algorithm
    /// 1. Same currency → returned unchanged, no lookup
    /// 2. Look up `(money.currency, target)` → [`CoreError::NoExchangeRate`] if absent
    /// 3. `cents × rate`, rounded half-up to whole cents
    pub fn convert(&self, money: &Money, target: Currency) -> CoreResult<Money> {
        let from = money.currency();
        if from == target {
            return Ok(*money);
        }

        let rate = self
            .rate(from, target)
            .ok_or(CoreError::NoExchangeRate { from, to: target })?;

        let converted = Decimal::from(money.cents())
            .checked_mul(rate)
            .ok_or_else(|| CoreError::AmountOverflow(format!("{} × {}", money, rate)))?;

        Ok(Money::from_cents(round_to_cents(converted)?, target))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
