//! # Catalog Loader
//!
//! One-shot catalog load with a primary and a fallback source.
//!
//! ## Source Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    load(primary, fallback)                              │
//! │                                                                         │
//! │  read primary                                                          │
//! │     │                                                                   │
//! │     ├── ok ──────────────────────────────────┐                         │
//! │     │                                        │                         │
//! │     ├── unreadable ──► "Database file not    │                         │
//! │     │                   found at ..."        │                         │
//! │     │                   read fallback        │                         │
//! │     │                     ├── ok ────────────┤                         │
//! │     │                     └── unreadable ──► "No valid database file   │
//! │     │                                         found." → empty          │
//! │     │                                        ▼                         │
//! │     │                              Catalog::from_records               │
//! │     │                              (per-record diagnostics)            │
//! │     │                                        │                         │
//! │     │                              empty? ──► "No valid products       │
//! │     │                                          were loaded."           │
//! │     │                                                                   │
//! │     └── malformed (either source) ──► empty catalog, ONE diagnostic:   │
//! │                                       "Invalid JSON format: ..."       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Loading never fails. The worst case is an empty catalog with warnings.
//! Callers own the diagnostics and decide whether to show them. Each one is
//! also traced at `debug`, and the load as a whole at `info` (or `error`
//! for a malformed source).

use checkout_core::{Catalog, CatalogLoad, LoadDiagnostic};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, error, info};

use crate::error::CatalogError;
use crate::source;

/// Loads a catalog from `primary`, falling back to `fallback` when the
/// primary cannot be read.
///
/// ## Example
/// ```rust,no_run
/// use checkout_catalog::loader;
/// use std::path::Path;
///
/// let load = loader::load(Path::new("db/products.json"), Some(Path::new("db/default_products.json")));
/// for message in load.messages() {
///     println!("{}", message);
/// }
/// ```
pub fn load(primary: &Path, fallback: Option<&Path>) -> CatalogLoad {
    let mut diagnostics = Vec::new();

    let records = match read_with_fallback(primary, fallback, &mut diagnostics) {
        Ok(Some(records)) => records,
        Ok(None) => Vec::new(),
        Err(err) => {
            let load = CatalogLoad {
                catalog: Catalog::empty(),
                diagnostics: vec![LoadDiagnostic::InvalidSource {
                    reason: err.to_string(),
                }],
            };
            log_diagnostics(&load.diagnostics);
            error!(error = %err, "Catalog source is malformed");
            return load;
        }
    };

    let built = Catalog::from_records(&records);
    diagnostics.extend(built.diagnostics);
    if built.catalog.is_empty() {
        diagnostics.push(LoadDiagnostic::NoValidProducts);
    }

    log_diagnostics(&diagnostics);
    info!(
        products = built.catalog.len(),
        warnings = diagnostics.iter().filter(|d| d.is_warning()).count(),
        "Catalog loaded"
    );

    CatalogLoad {
        catalog: built.catalog,
        diagnostics,
    }
}

/// Reads the first readable source.
///
/// `Ok(None)` means neither source could be read; `Err` means a source was
/// read but is malformed.
fn read_with_fallback(
    primary: &Path,
    fallback: Option<&Path>,
    diagnostics: &mut Vec<LoadDiagnostic>,
) -> Result<Option<Vec<Value>>, CatalogError> {
    match source::read_records(primary) {
        Ok(records) => return Ok(Some(records)),
        Err(err) if err.is_unavailable() => {
            debug!(path = %primary.display(), error = %err, "Primary catalog unavailable");
        }
        Err(err) => return Err(err),
    }

    let Some(fallback) = fallback else {
        diagnostics.push(LoadDiagnostic::NoSourceAvailable);
        return Ok(None);
    };

    diagnostics.push(LoadDiagnostic::SourceMissing {
        path: primary.display().to_string(),
    });

    match source::read_records(fallback) {
        Ok(records) => Ok(Some(records)),
        Err(err) if err.is_unavailable() => {
            debug!(path = %fallback.display(), error = %err, "Fallback catalog unavailable");
            diagnostics.push(LoadDiagnostic::NoSourceAvailable);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn log_diagnostics(diagnostics: &[LoadDiagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic {
            LoadDiagnostic::Loaded { name, price } => {
                debug!(product = %name, price = %price, currency = %price.currency(), "Loaded product");
            }
            LoadDiagnostic::InvalidRecord { raw, errors } => {
                let reasons: Vec<String> = errors.iter().map(ToString::to_string).collect();
                debug!(record = %raw, reasons = ?reasons, "Skipping invalid record");
            }
            other => debug!(warning = other.is_warning(), "{}", other),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
