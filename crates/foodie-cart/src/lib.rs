//! Cart pricing and coupon engine for Foodie.
//!
//! This crate provides the client-side cart used by the ordering app:
//!
//! - **Cart**: line items, a pure reducer, and derived totals
//! - **Coupons**: percentage and flat discounts, the coupon book, and the
//!   redemption gate
//! - **Pricing**: delivery fee, taxes and loyalty points at checkout
//! - **Store**: persistence to local storage and last-writer-wins sync
//!   between contexts
//!
//! # Example
//!
//! ```rust
//! use foodie_cart::prelude::*;
//! use foodie_storage::Storage;
//!
//! let config = CartConfig::default();
//! let book = config.coupon_book();
//! let mut cart = CartStore::open(Storage::in_memory(), &config);
//!
//! let biryani = NewItem::new("biryani", "Chicken Biryani", Money::from_major(150), "r-1", "Paradise");
//! cart.add_item(biryani.clone());
//! cart.add_item(biryani);
//! cart.redeem(&book, "WELCOME20").unwrap();
//!
//! assert_eq!(cart.state().total(), Money::from_major(300));
//! assert_eq!(cart.state().discount(), Money::from_major(60));
//!
//! let summary = OrderSummary::for_cart(cart.state(), &config.pricing);
//! assert_eq!(summary.grand_total.display(Currency::INR), "\u{20b9}334");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod config;
pub mod store;

pub use error::{CartError, CouponError};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CartError, CouponError};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        CartAction, CartLimits, CartState, Coupon, CouponKind, CouponValue, LineItem, MenuItem,
        NewItem, OrderLine, OrderSummary, PricingConfig,
    };

    // Coupons
    pub use crate::catalog::CouponBook;

    // Config and store
    pub use crate::config::{CartConfig, StorageConfig};
    pub use crate::store::CartStore;
}
