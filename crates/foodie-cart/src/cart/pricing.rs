//! Checkout pricing on top of the cart totals.

use crate::cart::CartState;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Fees and rates applied at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Display currency.
    pub currency: Currency,
    /// Flat delivery fee per order.
    pub delivery_fee: Money,
    /// Tax rate in percent, applied to the subtotal.
    pub tax_rate_percent: f64,
    /// Spend needed per loyalty point.
    pub points_per: Money,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::INR,
            delivery_fee: Money::from_major(40),
            tax_rate_percent: 18.0,
            points_per: Money::from_major(10),
        }
    }
}

/// Complete pricing breakdown for a checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Cart total before fees and discounts.
    pub subtotal: Money,
    /// Delivery fee.
    pub delivery_fee: Money,
    /// Taxes, rounded to whole currency units.
    pub taxes: Money,
    /// Coupon discount.
    pub discount: Money,
    /// subtotal + delivery_fee + taxes - discount.
    pub grand_total: Money,
    /// Loyalty points earned by paying `grand_total`.
    pub points_earned: u64,
}

impl OrderSummary {
    /// Price a cart for checkout.
    ///
    /// The grand total is not floored at zero: a flat coupon larger than the
    /// order yields a negative total, and deciding what to do with it is up
    /// to the checkout flow.
    pub fn for_cart(cart: &CartState, config: &PricingConfig) -> Self {
        let subtotal = cart.total();
        let taxes = subtotal.percentage_in_major(config.tax_rate_percent);
        let discount = cart.discount();
        let grand_total = subtotal + config.delivery_fee + taxes - discount;

        Self {
            subtotal,
            delivery_fee: config.delivery_fee,
            taxes,
            discount,
            grand_total,
            points_earned: grand_total.whole_multiples_of(config.points_per),
        }
    }

    /// Check if a discount is part of the order.
    pub fn has_discount(&self) -> bool {
        !self.discount.is_zero()
    }
}
