//! # Application Configuration
//!
//! Configuration resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. CLI flags (`--data-dir`)
//! 2. Environment variables (`MEDSTORE_*`)
//! 3. Defaults (this file)
//!
//! Read-only after initialization; the app is single-threaded so nothing
//! wraps it.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::AppError;
use medstore_core::{TaxRate, DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_TAX_RATE_BPS};
use medstore_store::{CATALOG_FILE, RECEIPT_FILE, TRANSACTION_FILE};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding all three data files.
    pub data_dir: PathBuf,

    /// Store name printed in the banner.
    pub store_name: String,

    /// Shared-secret password gating the admin panel.
    pub admin_password: String,

    /// VAT applied to the cart subtotal at checkout.
    pub tax_rate: TaxRate,

    /// Stock level below which a medicine appears in the low-stock report.
    pub low_stock_threshold: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: PathBuf::from("."),
            store_name: "Medical Store Management System".to_string(),
            admin_password: "admin123".to_string(),
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl AppConfig {
    /// Resolves the full configuration from the CLI override, the
    /// environment, and defaults.
    ///
    /// ## Environment Variables
    /// - `MEDSTORE_DATA_DIR`: data directory (beaten by `--data-dir`)
    /// - `MEDSTORE_STORE_NAME`: banner name
    /// - `MEDSTORE_ADMIN_PASSWORD`: admin panel password
    /// - `MEDSTORE_TAX_RATE`: VAT as a percentage, e.g. "5" or "5.5"
    /// - `MEDSTORE_LOW_STOCK_THRESHOLD`: low-stock report cutoff
    pub fn resolve(cli_data_dir: Option<PathBuf>) -> Result<Self, AppError> {
        let mut config = AppConfig {
            data_dir: match cli_data_dir {
                Some(dir) => dir,
                None => default_data_dir()?,
            },
            ..AppConfig::default()
        };

        if let Ok(name) = std::env::var("MEDSTORE_STORE_NAME") {
            config.store_name = name;
        }
        if let Ok(password) = std::env::var("MEDSTORE_ADMIN_PASSWORD") {
            config.admin_password = password;
        }
        if let Ok(rate) = std::env::var("MEDSTORE_TAX_RATE") {
            config.tax_rate = parse_tax_rate(&rate)
                .ok_or_else(|| AppError::input(format!("invalid MEDSTORE_TAX_RATE: {rate}")))?;
        }
        if let Ok(threshold) = std::env::var("MEDSTORE_LOW_STOCK_THRESHOLD") {
            config.low_stock_threshold = threshold.parse().map_err(|_| {
                AppError::input(format!("invalid MEDSTORE_LOW_STOCK_THRESHOLD: {threshold}"))
            })?;
        }

        Ok(config)
    }

    /// Catalog document path.
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(CATALOG_FILE)
    }

    /// Structured transaction log path.
    pub fn transactions_path(&self) -> PathBuf {
        self.data_dir.join(TRANSACTION_FILE)
    }

    /// Receipt log path.
    pub fn receipts_path(&self) -> PathBuf {
        self.data_dir.join(RECEIPT_FILE)
    }
}

/// Parses a percentage string ("5", "5.5") into a tax rate in basis points.
fn parse_tax_rate(value: &str) -> Option<TaxRate> {
    let pct: f64 = value.trim().parse().ok()?;
    if !(0.0..=100.0).contains(&pct) {
        return None;
    }
    Some(TaxRate::from_bps((pct * 100.0).round() as u32))
}

/// The platform data directory, with the `MEDSTORE_DATA_DIR` override.
///
/// - Linux: `~/.local/share/medstore`
/// - macOS: `~/Library/Application Support/com.medstore.medstore`
/// - Windows: `%APPDATA%\medstore\medstore\data`
fn default_data_dir() -> Result<PathBuf, AppError> {
    if let Ok(dir) = std::env::var("MEDSTORE_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let dirs = ProjectDirs::from("com", "medstore", "medstore")
        .ok_or_else(|| AppError::input("could not determine a data directory".to_string()))?;
    Ok(dirs.data_dir().to_path_buf())
}
