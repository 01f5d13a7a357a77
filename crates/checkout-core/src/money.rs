//! # Money Module
//!
//! Provides the `Money` type: an amount in integer cents tagged with its
//! currency.
//!
//! ## Why Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    10.50 + 20.25 might not be exactly 30.75  ❌                         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Decimal Inputs                           │
//! │    "19.99" ──► Decimal ──► round half-up ──► 1999 cents                │
//! │    1999 cents × rate 1.5 ──► 2998.5 ──► round half-up ──► 2999 cents   │
//! │                                                                         │
//! │  Rounding happens at every conversion and every scale, never later.    │
//! │  Repeated conversions compound rounding; nothing corrects it.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Currency Safety
//! Amounts in different currencies never mix. `try_add` and `compare`
//! return [`CoreError::CurrencyMismatch`]; callers convert first through an
//! [`ExchangeRateTable`](crate::exchange::ExchangeRateTable).
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::{Currency, Money};
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! let price = Money::create(Decimal::from_str("19.99").unwrap(), "AUD").unwrap();
//! assert_eq!(price.cents(), 1999);
//! assert_eq!(price.format(), "$19.99");
//!
//! let total = price.try_add(&Money::from_cents(1, Currency::Aud)).unwrap();
//! assert_eq!(total.format(), "$20.00");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::exchange::ExchangeRateTable;

// =============================================================================
// Currency
// =============================================================================

/// ISO 4217 currencies the engine recognizes.
///
/// All of them use two minor-unit digits, so one cent representation works
/// for every supported currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Australian Dollar
    Aud,
    /// US Dollar
    Usd,
    /// Pound Sterling
    Gbp,
    /// Euro
    Eur,
    /// New Zealand Dollar
    Nzd,
    /// Canadian Dollar
    Cad,
}

impl Currency {
    /// Every supported currency, in declaration order.
    pub const ALL: [Currency; 6] = [
        Currency::Aud,
        Currency::Usd,
        Currency::Gbp,
        Currency::Eur,
        Currency::Nzd,
        Currency::Cad,
    ];

    /// Returns the three-letter ISO code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Aud => "AUD",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
            Currency::Nzd => "NZD",
            Currency::Cad => "CAD",
        }
    }

    /// Returns the display symbol used by [`Money::format`].
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Aud | Currency::Usd | Currency::Nzd | Currency::Cad => "$",
            Currency::Gbp => "£",
            Currency::Eur => "€",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    /// Parses a currency code, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| CoreError::UnknownCurrency(code.to_string()))
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// An immutable monetary value: integer cents plus currency.
///
/// ## Design Decisions
/// - **i64 cents**: exact addition, no float drift
/// - **Currency tag**: same-currency arithmetic is checked, not assumed
/// - **No `PartialOrd` derive**: ordering across currencies is meaningless,
///   so comparison goes through [`Money::compare`]
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► convert(cart currency) ──► sum ──► Cart total
///                                                         │
///                          Promotion.apply ◄──────────────┤
///                          scale(1 - pct/100)             │
///                                │                        ▼
///                                └────────► select_best ──► payable total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    cents: i64,
    currency: Currency,
}

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::{Currency, Money};
    ///
    /// let price = Money::from_cents(1099, Currency::Usd); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64, currency: Currency) -> Self {
        Money { cents, currency }
    }

    /// Creates a Money value from a decimal amount in major units.
    ///
    /// The amount is rounded half-up (away from zero) to whole cents.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::{Currency, Money};
    /// use rust_decimal::Decimal;
    ///
    /// let m = Money::from_amount(Decimal::new(10005, 3), Currency::Aud).unwrap(); // 10.005
    /// assert_eq!(m.cents(), 1001);
    /// ```
    pub fn from_amount(amount: Decimal, currency: Currency) -> CoreResult<Self> {
        let cents = amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(|| CoreError::AmountOverflow(amount.to_string()))?;
        Ok(Money::from_cents(round_to_cents(cents)?, currency))
    }

    /// Creates a Money value from a decimal amount and a currency code.
    ///
    /// Fails with [`CoreError::UnknownCurrency`] if the code is not recognized.
    pub fn create(amount: Decimal, currency_code: &str) -> CoreResult<Self> {
        let currency = currency_code.parse::<Currency>()?;
        Money::from_amount(amount, currency)
    }

    /// Returns zero in the given currency.
    #[inline]
    pub const fn zero(currency: Currency) -> Self {
        Money::from_cents(0, currency)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the currency.
    #[inline]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.cents % 100).abs()
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Adds two amounts of the same currency.
    ///
    /// ## Errors
    /// [`CoreError::CurrencyMismatch`] when the currencies differ. There is no
    /// implicit conversion here.
    pub fn try_add(&self, other: &Money) -> CoreResult<Money> {
        self.ensure_same_currency(other)?;
        let cents = self
            .cents
            .checked_add(other.cents)
            .ok_or_else(|| CoreError::AmountOverflow(format!("{} + {}", self, other)))?;
        Ok(Money::from_cents(cents, self.currency))
    }

    /// Multiplies the amount by a non-negative decimal factor.
    ///
    /// The result is rounded half-up to whole cents. Currency is unchanged.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::{Currency, Money};
    /// use rust_decimal::Decimal;
    ///
    /// let total = Money::from_cents(5950, Currency::Aud);
    /// let discounted = total.scale(Decimal::new(90, 2)).unwrap(); // × 0.90
    /// assert_eq!(discounted.cents(), 5355);
    /// ```
    pub fn scale(&self, factor: Decimal) -> CoreResult<Money> {
        let scaled = Decimal::from(self.cents)
            .checked_mul(factor)
            .ok_or_else(|| CoreError::AmountOverflow(format!("{} × {}", self, factor)))?;
        Ok(Money::from_cents(round_to_cents(scaled)?, self.currency))
    }

    /// Converts into `target` using the given exchange table.
    ///
    /// Returns `self` unchanged when the currencies already match.
    pub fn convert(&self, target: Currency, rates: &ExchangeRateTable) -> CoreResult<Money> {
        rates.convert(self, target)
    }

    /// Orders two amounts of the same currency.
    ///
    /// ## Errors
    /// [`CoreError::CurrencyMismatch`] when the currencies differ.
    pub fn compare(&self, other: &Money) -> CoreResult<Ordering> {
        self.ensure_same_currency(other)?;
        Ok(self.cents.cmp(&other.cents))
    }

    /// Renders the amount with its currency symbol at two decimal places.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::{Currency, Money};
    ///
    /// assert_eq!(Money::from_cents(999, Currency::Gbp).format(), "£9.99");
    /// assert_eq!(Money::from_cents(-550, Currency::Aud).format(), "-$5.50");
    /// ```
    pub fn format(&self) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            self.currency.symbol(),
            self.dollars().abs(),
            self.cents_part()
        )
    }

    fn ensure_same_currency(&self, other: &Money) -> CoreResult<()> {
        if self.currency != other.currency {
            return Err(CoreError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            });
        }
        Ok(())
    }
}

/// Rounds a value already expressed in cents to a whole number of cents.
///
/// Half-up in the commercial sense: ties move away from zero.
pub(crate) fn round_to_cents(value: Decimal) -> CoreResult<i64> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| CoreError::AmountOverflow(value.to_string()))
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_parsing() {
        assert_eq!("AUD".parse::<Currency>().unwrap(), Currency::Aud);
        assert_eq!(" gbp ".parse::<Currency>().unwrap(), Currency::Gbp);
        assert_eq!(
            "YARR".parse::<Currency>(),
            Err(CoreError::UnknownCurrency("YARR".to_string()))
        );
        assert!("".parse::<Currency>().is_err());
    }

    #[test]
    fn test_create_and_format() {
        let price = Money::create(dec!(19.99), "AUD").unwrap();
        assert_eq!(price.cents(), 1999);
        assert_eq!(price.currency(), Currency::Aud);
        assert_eq!(price.format(), "$19.99");
        assert_eq!(price.to_string(), "$19.99");

        let tea = Money::create(dec!(9.99), "GBP").unwrap();
        assert_eq!(tea.format(), "£9.99");

        assert_eq!(Money::from_cents(500, Currency::Eur).format(), "€5.00");
        assert_eq!(Money::zero(Currency::Usd).format(), "$0.00");
    }

    #[test]
    fn test_create_rejects_unknown_currency() {
        let err = Money::create(dec!(19.99), "YARR").unwrap_err();
        assert!(matches!(err, CoreError::UnknownCurrency(code) if code == "YARR"));
    }

    #[test]
    fn test_from_amount_rounds_half_up() {
        assert_eq!(Money::from_amount(dec!(10.005), Currency::Aud).unwrap().cents(), 1001);
        assert_eq!(Money::from_amount(dec!(10.004), Currency::Aud).unwrap().cents(), 1000);
        assert_eq!(Money::from_amount(dec!(-10.005), Currency::Aud).unwrap().cents(), -1001);
        assert_eq!(Money::from_amount(dec!(30), Currency::Aud).unwrap().cents(), 3000);
    }

    #[test]
    fn test_amount_accessors() {
        let money = Money::from_cents(1099, Currency::Usd);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
        assert!(!money.is_zero());
        assert!(!money.is_negative());
    }

    #[test]
    fn test_try_add_same_currency() {
        let a = Money::create(dec!(10.50), "AUD").unwrap();
        let b = Money::create(dec!(20.25), "AUD").unwrap();
        assert_eq!(a.try_add(&b).unwrap(), Money::create(dec!(30.75), "AUD").unwrap());
    }

    #[test]
    fn test_try_add_rejects_mixed_currency() {
        let aud = Money::from_cents(100, Currency::Aud);
        let usd = Money::from_cents(100, Currency::Usd);
        assert_eq!(
            aud.try_add(&usd),
            Err(CoreError::CurrencyMismatch {
                left: Currency::Aud,
                right: Currency::Usd
            })
        );
    }

    #[test]
    fn test_scale() {
        let total = Money::from_cents(10000, Currency::Aud);
        assert_eq!(total.scale(dec!(0.8)).unwrap().cents(), 8000);

        // 59.50 × 0.85 = 50.575 → 50.58
        let total = Money::from_cents(5950, Currency::Aud);
        assert_eq!(total.scale(dec!(0.85)).unwrap().cents(), 5058);

        assert_eq!(total.scale(dec!(1)).unwrap(), total);
        assert_eq!(total.scale(dec!(0)).unwrap().cents(), 0);
        assert_eq!(total.scale(dec!(0.5)).unwrap().currency(), Currency::Aud);
    }

    #[test]
    fn test_compare() {
        let small = Money::from_cents(100, Currency::Aud);
        let large = Money::from_cents(200, Currency::Aud);
        assert_eq!(small.compare(&large).unwrap(), Ordering::Less);
        assert_eq!(large.compare(&small).unwrap(), Ordering::Greater);
        assert_eq!(small.compare(&small).unwrap(), Ordering::Equal);

        let usd = Money::from_cents(100, Currency::Usd);
        assert!(small.compare(&usd).is_err());
    }

    #[test]
    fn test_negative_format() {
        assert_eq!(Money::from_cents(-550, Currency::Aud).format(), "-$5.50");
        assert_eq!(Money::from_cents(-5, Currency::Gbp).format(), "-£0.05");
    }

    #[test]
    fn test_serializes_with_currency_code() {
        let json = serde_json::to_value(Money::from_cents(1999, Currency::Aud)).unwrap();
        assert_eq!(json, serde_json::json!({ "cents": 1999, "currency": "AUD" }));
    }
}
