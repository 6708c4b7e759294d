//! Shopping cart module.
//!
//! Contains the cart state and reducer, line items, coupons and the
//! checkout pricing built on top of them.

mod coupon;
mod item;
mod pricing;
mod state;

pub use coupon::{discount_for, Coupon, CouponKind, CouponValue, LEGACY_PERCENTAGE_CEILING};
pub use item::{LineItem, MenuItem, NewItem, OrderLine};
pub use pricing::{OrderSummary, PricingConfig};
pub use state::{CartAction, CartLimits, CartState, MAX_QUANTITY_PER_ITEM};
