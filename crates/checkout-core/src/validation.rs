//! # Validation Module
//!
//! Field validators for raw catalog records.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Record Validation                                  │
//! │                                                                         │
//! │  raw JSON record                                                       │
//! │  { "uuid": "7", "name": "Chain Ring", "price": "65.95" }               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  validate_uuid      → u64            ┐                                 │
//! │  validate_name      → String         │  every field is checked,        │
//! │  validate_price     → Decimal ≥ 0    │  errors are collected,          │
//! │  validate_currency  → Currency       ┘  nothing short-circuits         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Ok(fields)  or  Err(vec![ValidationError, ...])                       │
//! │                                                                         │
//! │  The catalog loader turns Err into an "Invalid record" diagnostic.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validator is a pure function. Nothing here panics or logs.
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::validate_record;
//! use serde_json::json;
//!
//! let errors = validate_record(&json!({ "uuid": 1, "price": "-2" }));
//! let fields: Vec<&str> = errors.iter().map(|e| e.field()).collect();
//! assert_eq!(fields, vec!["name", "price"]);
//! ```

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::{Currency, Money};
use crate::DEFAULT_CURRENCY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The fields of a record that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecord {
    pub uuid: u64,
    pub name: String,
    pub price: Money,
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product uuid.
///
/// ## Rules
/// - Must be present and not null
/// - A non-negative integer, or a string holding one (`"42"`)
pub fn validate_uuid(value: Option<&Value>) -> ValidationResult<u64> {
    let invalid = || ValidationError::InvalidFormat {
        field: "uuid".to_string(),
        reason: "must be a non-negative integer".to_string(),
    };

    match value {
        None | Some(Value::Null) => Err(required("uuid")),
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                    .map(|f| f as u64)
            })
            .ok_or_else(invalid),
        Some(Value::String(s)) if s.trim().is_empty() => Err(required("uuid")),
        Some(Value::String(s)) => s.trim().parse::<u64>().map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

/// Validates a product name.
///
/// ## Rules
/// - Must be a string that is not blank
///
/// ## Returns
/// The name exactly as given; surrounding whitespace only counts towards
/// the blank check.
pub fn validate_name(value: Option<&Value>) -> ValidationResult<String> {
    match value {
        None | Some(Value::Null) => Err(required("name")),
        Some(Value::String(s)) if s.trim().is_empty() => Err(required("name")),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: "must be a string".to_string(),
        }),
    }
}

/// Validates a price amount.
///
/// ## Rules
/// - Must be present and not null
/// - A JSON number or a numeric string (`29.99`, `"19.99"`, `"1e2"`)
/// - Must be non-negative; zero is allowed (free items)
pub fn validate_price(value: Option<&Value>) -> ValidationResult<Decimal> {
    let text = match value {
        None | Some(Value::Null) => return Err(required("price")),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if s.trim().is_empty() => return Err(required("price")),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(_) => {
            return Err(ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "must be a number or numeric string".to_string(),
            })
        }
    };

    let amount = parse_decimal(&text).ok_or_else(|| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: format!("'{}' is not a number", text),
    })?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(amount)
}

/// Validates a currency code.
///
/// ## Rules
/// - Absent or null means [`DEFAULT_CURRENCY`]
/// - Otherwise a recognized ISO code, case-insensitive
pub fn validate_currency(value: Option<&Value>) -> ValidationResult<Currency> {
    match value {
        None | Some(Value::Null) => Ok(DEFAULT_CURRENCY),
        Some(Value::String(code)) => {
            code.parse::<Currency>()
                .map_err(|_| ValidationError::UnknownCurrency {
                    field: "currency".to_string(),
                    code: code.trim().to_string(),
                })
        }
        Some(_) => Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: "must be a currency code string".to_string(),
        }),
    }
}

// =============================================================================
// Record Validation
// =============================================================================

/// Validates a whole record, returning every field error found.
///
/// An empty list means the record would produce a valid product.
pub fn validate_record(record: &Value) -> Vec<ValidationError> {
    match check_record(record) {
        Ok(_) => Vec::new(),
        Err(errors) => errors,
    }
}

/// Validates a record and returns its parsed fields.
///
/// ## Errors
/// All field errors, in field order: uuid, name, price, currency.
pub fn check_record(record: &Value) -> Result<ValidRecord, Vec<ValidationError>> {
    let Some(fields) = record.as_object() else {
        return Err(vec![ValidationError::InvalidFormat {
            field: "record".to_string(),
            reason: "must be a JSON object".to_string(),
        }]);
    };

    let uuid = validate_uuid(fields.get("uuid"));
    let name = validate_name(fields.get("name"));
    let price = validate_price(fields.get("price"));
    let currency = validate_currency(fields.get("currency"));

    match (uuid, name, price, currency) {
        (Ok(uuid), Ok(name), Ok(amount), Ok(currency)) => {
            let price = Money::from_amount(amount, currency).map_err(|_| {
                vec![ValidationError::InvalidFormat {
                    field: "price".to_string(),
                    reason: "amount out of range".to_string(),
                }]
            })?;
            Ok(ValidRecord { uuid, name, price })
        }
        (uuid, name, price, currency) => Err([
            uuid.err(),
            name.err(),
            price.err(),
            currency.err(),
        ]
        .into_iter()
        .flatten()
        .collect()),
    }
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
