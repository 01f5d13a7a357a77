//! # Checkout Configuration
//!
//! Configuration for the `checkout` binary.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority)                                    │
//! │     --config, --currency                                               │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     CHECKOUT_CATALOG_PATH=./db/products.json                           │
//! │     CHECKOUT_FALLBACK_PATH=./db/default_products.json                  │
//! │     CHECKOUT_CURRENCY=USD                                              │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, else CHECKOUT_CONFIG, else                        │
//! │     ~/.config/checkout/checkout.toml (Linux)                           │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     AUD cart, three spender promotions, standard exchange rates        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # checkout.toml
//! [catalog]
//! path = "db/products.json"
//! fallback_path = "db/default_products.json"
//!
//! [cart]
//! currency = "AUD"
//!
//! [[promotions]]
//! name = "Big Spender"
//! description = "20% off on total greater than $100"
//! threshold = 100
//! percentage = 20
//!
//! [[exchange_rates]]
//! from = "USD"
//! to = "AUD"
//! rate = "1.5"
//! ```
//!
//! Configured exchange rates are layered on top of the standard table; a
//! pair listed in the file replaces the standard rate for that direction.

use checkout_core::{Currency, ExchangeRateTable, PromotionConfig, DEFAULT_CURRENCY};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

// =============================================================================
// Errors
// =============================================================================

/// Configuration load failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Where products come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Primary catalog file.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,

    /// Used when the primary file cannot be read. `None` disables fallback.
    #[serde(default = "default_fallback_path")]
    pub fallback_path: Option<PathBuf>,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("db/products.json")
}

fn default_fallback_path() -> Option<PathBuf> {
    Some(PathBuf::from("db/default_products.json"))
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            path: default_catalog_path(),
            fallback_path: default_fallback_path(),
        }
    }
}

/// Cart behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSettings {
    /// ISO code totals are computed in. Case-insensitive.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.code().to_string()
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            currency: default_currency(),
        }
    }
}

/// One directional rate: `1 from = rate to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateSetting {
    pub from: String,
    pub to: String,
    pub rate: Decimal,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete checkout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub cart: CartSettings,

    /// Promotions in tie-break order. Defaults to the three spender tiers.
    #[serde(default = "PromotionConfig::defaults")]
    pub promotions: Vec<PromotionConfig>,

    /// Extra or replacement rates on top of the standard table.
    #[serde(default)]
    pub exchange_rates: Vec<ExchangeRateSetting>,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        CheckoutConfig {
            catalog: CatalogSettings::default(),
            cart: CartSettings::default(),
            promotions: PromotionConfig::defaults(),
            exchange_rates: Vec::new(),
        }
    }
}

impl CheckoutConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (checkout.toml)
    /// 3. Environment variables
    ///
    /// A missing config file is not an error; an unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var("CHECKOUT_CONFIG").ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading checkout config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.catalog.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("catalog.path must not be empty".into()));
        }

        self.currency()?;

        for promotion in &self.promotions {
            if promotion.percentage > 100 {
                return Err(ConfigError::Invalid(format!(
                    "promotion '{}': percentage must be between 0 and 100, got {}",
                    promotion.name, promotion.percentage
                )));
            }
            if promotion.threshold.is_sign_negative() && !promotion.threshold.is_zero() {
                return Err(ConfigError::Invalid(format!(
                    "promotion '{}': threshold cannot be negative",
                    promotion.name
                )));
            }
        }

        for setting in &self.exchange_rates {
            parse_currency("exchange_rates.from", &setting.from)?;
            parse_currency("exchange_rates.to", &setting.to)?;
            if setting.rate <= Decimal::ZERO {
                return Err(ConfigError::Invalid(format!(
                    "exchange rate {} -> {} must be positive, got {}",
                    setting.from, setting.to, setting.rate
                )));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("CHECKOUT_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = PathBuf::from(path);
        }

        if let Some(path) = lookup("CHECKOUT_FALLBACK_PATH") {
            debug!(path = %path, "Overriding fallback path from environment");
            self.catalog.fallback_path = if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }

        if let Some(currency) = lookup("CHECKOUT_CURRENCY") {
            debug!(currency = %currency, "Overriding cart currency from environment");
            self.cart.currency = currency;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "checkout", "checkout")
            .map(|dirs| dirs.config_dir().join("checkout.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The cart currency.
    pub fn currency(&self) -> ConfigResult<Currency> {
        parse_currency("cart.currency", &self.cart.currency)
    }

    /// The standard exchange table with configured rates applied.
    pub fn exchange_table(&self) -> ConfigResult<ExchangeRateTable> {
        self.exchange_rates
            .iter()
            .try_fold(ExchangeRateTable::standard(), |table, setting| {
                let from = parse_currency("exchange_rates.from", &setting.from)?;
                let to = parse_currency("exchange_rates.to", &setting.to)?;
                Ok(table.with_rate(from, to, setting.rate))
            })
    }
}

fn parse_currency(field: &str, code: &str) -> ConfigResult<Currency> {
    code.parse::<Currency>()
        .map_err(|e| ConfigError::Invalid(format!("{}: {}", field, e)))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = CheckoutConfig::default();
        assert_eq!(config.catalog.path, PathBuf::from("db/products.json"));
        assert_eq!(config.currency().unwrap(), Currency::Aud);
        assert_eq!(config.promotions.len(), 3);
        assert!(config.validate().is_ok());
        assert_eq!(config.exchange_table().unwrap().len(), 6);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkout.toml");
        fs::write(
            &path,
            r#"
[catalog]
path = "custom.json"

[cart]
currency = "usd"

[[promotions]]
name = "Flash"
description = "5% off everything"
threshold = 0
percentage = 5

[[exchange_rates]]
from = "EUR"
to = "USD"
rate = "1.08"
"#,
        )
        .unwrap();

        let config = CheckoutConfig::load(Some(path)).unwrap();
        assert_eq!(config.catalog.path, PathBuf::from("custom.json"));
        assert_eq!(
            config.catalog.fallback_path,
            Some(PathBuf::from("db/default_products.json"))
        );
        assert_eq!(config.promotions.len(), 1);
        assert_eq!(config.promotions[0].name, "Flash");

        let table = config.exchange_table().unwrap();
        assert_eq!(table.rate(Currency::Eur, Currency::Usd), Some(dec!(1.08)));
        assert_eq!(table.rate(Currency::Usd, Currency::Aud), Some(dec!(1.5)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CheckoutConfig::load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.promotions, PromotionConfig::defaults());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkout.toml");
        fs::write(&path, "[cart\ncurrency = ").unwrap();
        assert!(matches!(
            CheckoutConfig::load(Some(path)),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CHECKOUT_CATALOG_PATH", "/srv/products.json"),
            ("CHECKOUT_FALLBACK_PATH", ""),
            ("CHECKOUT_CURRENCY", "GBP"),
        ]
        .into_iter()
        .collect();

        let mut config = CheckoutConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.catalog.path, PathBuf::from("/srv/products.json"));
        assert_eq!(config.catalog.fallback_path, None);
        assert_eq!(config.currency().unwrap(), Currency::Gbp);
    }

    #[test]
    fn test_validation() {
        let mut config = CheckoutConfig::default();
        config.cart.currency = "XYZ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = CheckoutConfig::default();
        config.promotions[0].percentage = 120;
        assert!(config.validate().is_err());

        let mut config = CheckoutConfig::default();
        config.exchange_rates.push(ExchangeRateSetting {
            from: "USD".to_string(),
            to: "AUD".to_string(),
            rate: dec!(0),
        });
        assert!(config.validate().is_err());
    }
}
