//! Cart engine configuration.

use crate::cart::{CartLimits, Coupon, PricingConfig};
use crate::catalog::CouponBook;
use crate::error::CartError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Storage key the web client has always used for the cart.
pub const DEFAULT_STORAGE_KEY: &str = "foodie-cart";

/// Cart engine configuration file.
///
/// Every section is optional; omitted values fall back to the defaults.
///
/// ```toml
/// [storage]
/// key = "foodie-cart"
///
/// [pricing]
/// currency = "INR"
/// delivery_fee = 40
/// tax_rate_percent = 18.0
///
/// [limits]
/// max_quantity_per_item = 20
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Persistence settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Checkout fees and rates.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Reducer limits.
    #[serde(default)]
    pub limits: CartLimits,

    /// Coupon book override. `None` uses the standard book.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupons: Option<Vec<Coupon>>,
}

impl CartConfig {
    /// Load config from a TOML or JSON file, chosen by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CartError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CartError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content).map_err(|e| {
                CartError::Config(format!("Failed to parse JSON config {}: {}", path.display(), e))
            })
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    /// Save config to a TOML or JSON file, chosen by extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CartError> {
        let path = path.as_ref();
        let content = if path.extension().is_some_and(|e| e == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self).map_err(|e| CartError::Config(e.to_string()))?
        };

        std::fs::write(path, content).map_err(|e| {
            CartError::Config(format!("Failed to write config file {}: {}", path.display(), e))
        })
    }

    /// The coupon book this config describes.
    pub fn coupon_book(&self) -> CouponBook {
        match &self.coupons {
            Some(coupons) => CouponBook::new(coupons.clone()),
            None => CouponBook::standard(),
        }
    }
}

/// Persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key the cart snapshot is stored under.
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}
