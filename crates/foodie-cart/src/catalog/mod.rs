//! Coupon catalog.
//!
//! Holds the coupons a customer can redeem and the eligibility gate run
//! before a code reaches the cart.

mod coupons;

pub use coupons::CouponBook;
