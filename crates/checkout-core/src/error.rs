//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CoreError        - Money, conversion and cart failures            │
//! │  └── ValidationError  - Field-level catalog record failures            │
//! │                                                                         │
//! │  checkout-catalog errors (separate crate)                              │
//! │  └── CatalogError     - Source reading / JSON parsing failures         │
//! │                                                                         │
//! │  Flow: ValidationError → diagnostic (recovered, record skipped)        │
//! │        CoreError       → returned to the caller (hard stop)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recovery Rules
//! 1. Validation failures never abort a catalog load; they become diagnostics
//! 2. Currency failures are never absorbed into a zero amount
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::money::Currency;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing errors.
///
/// Every variant here is a hard failure of the specific operation that
/// produced it. There is no safe default for a missing exchange rate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Currency code is not one the engine knows.
    #[error("Unknown currency '{0}'")]
    UnknownCurrency(String),

    /// Same-currency operation was given two different currencies.
    ///
    /// ## When This Occurs
    /// - Adding a USD amount to an AUD amount without converting first
    /// - Comparing totals that were never brought into one currency
    #[error("Currency mismatch: {left} and {right}")]
    CurrencyMismatch { left: Currency, right: Currency },

    /// The exchange table has no entry for this ordered pair.
    ///
    /// Rates are directional: USD→AUD being present says nothing about
    /// AUD→USD.
    #[error("No exchange rate from {from} to {to}")]
    NoExchangeRate { from: Currency, to: Currency },

    /// No product with this uuid exists in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(u64),

    /// Promotion percentage is outside 0..=100.
    #[error("Invalid promotion percentage {0}: must be between 0 and 100")]
    InvalidPercentage(u32),

    /// An amount left the representable range of cents.
    #[error("Amount out of range: {0}")]
    AmountOverflow(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors for raw catalog records.
///
/// A record can fail several fields at once; the validator returns all of
/// them rather than stopping at the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing, null or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field is present but cannot be parsed.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    MustBeNonNegative { field: String },

    /// Currency code not recognized.
    #[error("{field} has unknown currency '{code}'")]
    UnknownCurrency { field: String, code: String },
}

impl ValidationError {
    /// Returns the name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::MustBeNonNegative { field }
            | ValidationError::UnknownCurrency { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::NoExchangeRate {
            from: Currency::Gbp,
            to: Currency::Eur,
        };
        assert_eq!(err.to_string(), "No exchange rate from GBP to EUR");

        let err = CoreError::UnknownCurrency("yarr".to_string());
        assert_eq!(err.to_string(), "Unknown currency 'yarr'");

        assert_eq!(CoreError::ProductNotFound(42).to_string(), "Product not found: 42");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
        assert_eq!(err.field(), "name");

        let err = ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price cannot be negative");
    }
}
