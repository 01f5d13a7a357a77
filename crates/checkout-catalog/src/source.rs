//! # Catalog Sources
//!
//! Reads a JSON catalog file into raw records.
//!
//! ## Expected Shape
//! ```json
//! [
//!   { "uuid": 1, "name": "Jockey Wheels - Orange", "price": 15.39 },
//!   { "uuid": "2", "name": "UK Tea", "price": "9.99", "currency": "GBP" }
//! ]
//! ```
//!
//! Individual records are not inspected here. A record that is not an object,
//! or has bad fields, is still returned; the catalog builder reports it.

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::{CatalogError, CatalogResult};

/// Reads and parses a catalog file.
///
/// The file is read as raw bytes. Content that is not UTF-8 is a malformed
/// source, not a missing one.
///
/// ## Errors
/// - [`CatalogError::SourceUnavailable`] if the file cannot be read
/// - [`CatalogError::InvalidJson`] / [`CatalogError::NotAnArray`] if it is malformed
pub fn read_records(path: &Path) -> CatalogResult<Vec<Value>> {
    let bytes =
        fs::read(path).map_err(|e| CatalogError::unavailable(path.display().to_string(), e))?;
    parse_bytes(&bytes)
}

/// Parses catalog text into raw records.
pub fn parse_records(text: &str) -> CatalogResult<Vec<Value>> {
    parse_bytes(text.as_bytes())
}

fn parse_bytes(bytes: &[u8]) -> CatalogResult<Vec<Value>> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Array(records) => Ok(records),
        other => Err(CatalogError::NotAnArray {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
