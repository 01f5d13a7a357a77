//! # checkout
//!
//! One-shot checkout: price a basket of catalog products and print the
//! payable total after the best promotion.
//!
//! ## Usage
//! ```bash
//! # Price three products in the default currency
//! checkout --add 1411 --add 23881 --add 15293
//!
//! # Machine-readable output, totals in USD
//! checkout --currency USD --add 1411 --json
//!
//! # Show products and promotions
//! checkout --list
//! ```
//!
//! ## Run Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging (stderr) ───────────────────────────────────────►│
//! │     RUST_LOG, default warn,checkout=info                               │
//! │                                                                         │
//! │  2. Load Configuration ────────────────────────────────────────────────►│
//! │     defaults → checkout.toml → CHECKOUT_* env → --currency              │
//! │                                                                         │
//! │  3. Load Catalog + Promotions ─────────────────────────────────────────►│
//! │     diagnostics printed unless --json                                  │
//! │                                                                         │
//! │  4. Fill Cart ─────────────────────────────────────────────────────────►│
//! │     --add <uuid>, unknown uuids reported on stderr                     │
//! │                                                                         │
//! │  5. Print ─────────────────────────────────────────────────────────────►│
//! │     receipt text, or CartSummary as JSON                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exit code is 2 when any requested uuid was not in the catalog, 1 on a
//! configuration or pricing error, 0 otherwise.

mod config;
mod output;

use checkout_core::{CoreError, ShoppingCart};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::CheckoutConfig;

const USAGE: &str = "\
Checkout

Usage: checkout [OPTIONS]

Options:
  -a, --add <UUID>         Add a product to the cart (repeatable)
  -c, --config <PATH>      Config file (default: platform config dir)
      --currency <CODE>    Cart currency, e.g. AUD, USD, GBP
      --json               Print JSON (cart summary, or listing with --list), no diagnostics
  -l, --list               List products and promotions
  -h, --help               Show this help message";

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    currency: Option<String>,
    add: Vec<u64>,
    json: bool,
    list: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--add" | "-a" | "--config" | "-c" | "--currency" => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| format!("{} requires a value", flag))?;
                match flag {
                    "--add" | "-a" => {
                        let uuid = value
                            .trim()
                            .parse::<u64>()
                            .map_err(|_| format!("Invalid product uuid: '{}'", value))?;
                        parsed.add.push(uuid);
                    }
                    "--config" | "-c" => parsed.config = Some(PathBuf::from(value)),
                    _ => parsed.currency = Some(value.clone()),
                }
                i += 1;
            }
            "--json" => parsed.json = true,
            "--list" | "-l" => parsed.list = true,
            "--help" | "-h" => parsed.help = true,
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(parsed)
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return ExitCode::from(1);
        }
    };

    if args.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut config = CheckoutConfig::load(args.config)?;
    if let Some(currency) = args.currency {
        config.cart.currency = currency;
        config.validate()?;
    }

    let verbose = !args.json;
    let currency = config.currency()?;

    let catalog_load = checkout_catalog::load(
        &config.catalog.path,
        config.catalog.fallback_path.as_deref(),
    );
    let promotion_load = checkout_catalog::load_promotions(&config.promotions);

    if verbose {
        for message in catalog_load.messages().iter().chain(&promotion_load.messages) {
            println!("{}", message);
        }
        println!();
    }

    let catalog = catalog_load.catalog;

    if args.list {
        if args.json {
            println!(
                "{}",
                output::render_listing_json(&catalog, &promotion_load.promotions)?
            );
        } else {
            print!("{}", output::render_catalog(&catalog));
            println!();
            print!("{}", output::render_promotions(&promotion_load.promotions));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut cart = ShoppingCart::new(currency, Arc::new(config.exchange_table()?));
    for promotion in promotion_load.promotions {
        cart.add_promotion(promotion);
    }

    let mut missing = 0;
    for uuid in args.add {
        match cart.add_product_by_uuid(&catalog, uuid) {
            Ok(product) => {
                debug!(uuid, product = %product.name(), "Added to cart");
                if verbose {
                    println!("Product '{}' added to cart.", product.name());
                }
            }
            Err(e @ CoreError::ProductNotFound(_)) => {
                debug!(uuid, "Requested product is not in the catalog");
                eprintln!("{}", e);
                missing += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let summary = cart.summary()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!();
        print!("{}", output::render_summary(&summary));
    }

    Ok(if missing > 0 {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages, including every load diagnostic
/// - `RUST_LOG=checkout_core=debug` - Show promotion evaluation only
/// - Default: WARN, with INFO for checkout crates
///
/// Logs go to stderr so `--json` output on stdout stays parseable. Load
/// diagnostics already printed on stdout are traced at DEBUG, below the
/// default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn default_filter() -> EnvFilter {
    EnvFilter::new("warn,checkout=info")
}

// =============================================================================
// Unit Tests
// =============================================================================
