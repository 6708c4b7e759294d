//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use foodie_cart::prelude::*;
use foodie_storage::Storage;
use tracing::debug;

use crate::output::Output;

/// Config file names searched for, in order, from the working directory up.
const CONFIG_NAMES: [&str; 3] = ["foodie.toml", ".foodie.toml", "foodie.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Cart engine configuration.
    pub config: CartConfig,
    /// Output handler.
    pub output: Output,
    /// Directory holding the persisted cart.
    pub store_dir: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, store_dir: PathBuf, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CartConfig::load(path).with_context(|| format!("Failed to load config: {}", path))?
        } else {
            // Try to find config in current directory or parent directories
            find_config(&cwd).unwrap_or_default()
        };

        let store_dir = if store_dir.is_absolute() {
            store_dir
        } else {
            cwd.join(store_dir)
        };

        Ok(Self {
            config,
            output,
            store_dir,
        })
    }

    /// Open the file-backed cart.
    pub fn open_cart(&self) -> Result<CartStore> {
        let storage = Storage::open_dir(&self.store_dir).with_context(|| {
            format!("Failed to open cart store at {}", self.store_dir.display())
        })?;
        self.output
            .debug(&format!("Using cart store at {}", self.store_dir.display()));
        Ok(CartStore::open(storage, &self.config))
    }

    /// The coupon book from config.
    pub fn coupon_book(&self) -> CouponBook {
        self.config.coupon_book()
    }

    /// Currency used for display.
    pub fn currency(&self) -> Currency {
        self.config.pricing.currency
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<CartConfig> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                match CartConfig::load(&config_path) {
                    Ok(config) => {
                        debug!(path = %config_path.display(), "loaded config");
                        return Some(config);
                    }
                    Err(e) => {
                        debug!(path = %config_path.display(), error = %e, "skipping config");
                    }
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join("foodie.toml"),
            "[storage]\nkey = \"cart-from-parent\"\n",
        )
        .unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = find_config(&nested).unwrap();
        assert_eq!(config.storage.key, "cart-from-parent");
    }

    #[test]
    fn test_invalid_config_is_skipped() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("foodie.toml"), "[storage\n").unwrap();
        std::fs::write(
            root.path().join("foodie.json"),
            r#"{"storage":{"key":"from-json"}}"#,
        )
        .unwrap();

        let config = find_config(root.path()).unwrap();
        assert_eq!(config.storage.key, "from-json");
    }

    #[test]
    fn test_open_cart_creates_store_dir() {
        let root = tempfile::tempdir().unwrap();
        let ctx = Context {
            config: CartConfig::default(),
            output: Output::new(false, true),
            store_dir: root.path().join("store"),
        };

        let mut cart = ctx.open_cart().unwrap();
        cart.add_item(NewItem::new("a", "A", Money::from_major(10), "r", "R"));
        assert!(root.path().join("store").join("foodie-cart.json").exists());
    }
}
